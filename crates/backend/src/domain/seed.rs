//! Демо-данные каталога

use contracts::domain::a001_category::aggregate::{Category, CategoryId};
use contracts::domain::a002_product::aggregate::{Product, ProductId};
use contracts::domain::common::EntityMetadata;

use super::catalog::Catalog;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

fn category(id: i64, name: &str, description: &str, day: u32, is_active: bool) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.into(),
        description: description.into(),
        metadata: EntityMetadata::created_on(2024, 1, day, is_active),
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i64,
    name: &str,
    description: &str,
    price: f64,
    quantity: u32,
    category_id: i64,
    sku: &str,
    day: u32,
    is_active: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.into(),
        description: description.into(),
        price,
        quantity,
        category_id: CategoryId::new(category_id),
        sku: sku.into(),
        metadata: EntityMetadata::created_on(2024, 1, day, is_active),
        image_url: Some(PLACEHOLDER_IMAGE.into()),
    }
}

pub fn demo_categories() -> Vec<Category> {
    vec![
        category(1, "Electronics", "Electronic devices and accessories", 1, true),
        category(2, "Clothing", "Apparel and fashion items", 2, true),
        category(3, "Books", "Physical and digital books", 3, true),
        category(4, "Home & Garden", "Home improvement and garden supplies", 4, false),
    ]
}

pub fn demo_products() -> Vec<Product> {
    vec![
        product(1, "Smartphone X", "Latest smartphone with advanced features", 999.99, 50, 1, "ELEC-SMART-X", 10, true),
        product(2, "Wireless Earbuds", "Noise-cancelling wireless earbuds", 199.99, 100, 1, "ELEC-EAR-WL", 11, true),
        product(3, "Laptop Pro", "High-performance laptop for professionals", 1499.99, 25, 1, "ELEC-LAP-PRO", 12, true),
        product(4, "Cotton T-Shirt", "Comfortable cotton t-shirt", 24.99, 200, 2, "CLOTH-TS-COT", 13, true),
        product(5, "Denim Jeans", "Classic blue denim jeans", 59.99, 150, 2, "CLOTH-JEANS-DN", 14, true),
        product(6, "Angular Development Guide", "Complete guide to Angular development", 39.99, 75, 3, "BOOK-ANG-GD", 15, true),
        product(7, ".NET Cookbook", "Recipes for .NET development", 49.99, 60, 3, "BOOK-DOT-COOK", 16, false),
    ]
}

/// Каталог, заполненный демо-данными
pub fn demo_catalog() -> Catalog {
    Catalog::from_parts(demo_categories(), demo_products())
}
