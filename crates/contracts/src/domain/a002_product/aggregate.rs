use serde::{Deserialize, Serialize};

use crate::domain::a001_category::aggregate::{Category, CategoryId};
use crate::domain::common::aggregate_id::parse_positive_id;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::shared::validation::{
    validate_image_url, validate_sku, ValidationErrors, ValidationRules,
};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор товара
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl ProductId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for ProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        parse_positive_id(s).map(ProductId)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

const NAME_RULES: ValidationRules = ValidationRules::required().min_length(3).max_length(100);
const DESCRIPTION_RULES: ValidationRules =
    ValidationRules::required().min_length(10).max_length(500);
const MIN_PRICE: f64 = 0.01;

/// Товар каталога
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub category_id: CategoryId,
    pub sku: String,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Создать новый товар для вставки
    pub fn new_for_insert(id: ProductId, dto: &ProductCreateRequest) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            price: dto.price,
            quantity: dto.quantity,
            category_id: dto.category_id,
            sku: dto.sku.trim().to_string(),
            metadata: EntityMetadata::new(),
            image_url: normalize_image_url(dto.image_url.as_deref()),
        }
    }

    /// Обновить данные из DTO (только переданные поля)
    pub fn update(&mut self, dto: &ProductUpdateRequest) {
        if let Some(name) = &dto.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &dto.description {
            self.description = description.trim().to_string();
        }
        if let Some(price) = dto.price {
            self.price = price;
        }
        if let Some(quantity) = dto.quantity {
            self.quantity = quantity;
        }
        if let Some(category_id) = dto.category_id {
            self.category_id = category_id;
        }
        if let Some(sku) = &dto.sku {
            self.sku = sku.trim().to_string();
        }
        if let Some(image_url) = &dto.image_url {
            self.image_url = normalize_image_url(Some(image_url));
        }
        if let Some(is_active) = dto.is_active {
            self.metadata.is_active = is_active;
        }
    }

    pub fn is_active(&self) -> bool {
        self.metadata.is_active
    }

    /// Стоимость остатка: price × quantity
    pub fn stock_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Совпадение с поисковой строкой (уже в нижнем регистре) по name/description/sku
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self.sku.to_lowercase().contains(needle_lower)
    }
}

fn normalize_image_url(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl AggregateRoot for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Product"
    }

    fn list_name() -> &'static str {
        "Products"
    }
}

// ============================================================================
// Read models
// ============================================================================

/// Товар, обогащённый категорией. `category` отсутствует,
/// если ссылка повисла (категории больше нет).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

/// Сводная статистика по товарам
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    pub total_products: usize,
    pub active_products: usize,
    pub inactive_products: usize,
    pub total_value: f64,
    pub average_price: f64,
    pub categories_count: usize,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания товара
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
    pub category_id: CategoryId,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProductCreateRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(NAME_RULES.validate_string(&self.name, "Name"));
        errors.check(DESCRIPTION_RULES.validate_string(&self.description, "Description"));
        errors.check(price_rules().validate_number(self.price, "Price"));
        errors.check(validate_sku(self.sku.trim()));
        if let Some(url) = &self.image_url {
            errors.check(validate_image_url(url.trim()));
        }
        errors.into_result()
    }
}

/// DTO для обновления товара; `None` = поле не меняется
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductUpdateRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.check(NAME_RULES.validate_string(name, "Name"));
        }
        if let Some(description) = &self.description {
            errors.check(DESCRIPTION_RULES.validate_string(description, "Description"));
        }
        if let Some(price) = self.price {
            errors.check(price_rules().validate_number(price, "Price"));
        }
        if let Some(sku) = &self.sku {
            errors.check(validate_sku(sku.trim()));
        }
        if let Some(url) = &self.image_url {
            errors.check(validate_image_url(url.trim()));
        }
        errors.into_result()
    }
}

fn price_rules() -> ValidationRules {
    ValidationRules::required().min(MIN_PRICE)
}

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Параметры запроса списка товаров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[serde(default = "default_page")]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            search: None,
            category_id: None,
        }
    }
}

impl ProductListQuery {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.page < 1 {
            errors.push("Page must be at least 1");
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            errors.push(format!("Page size must be between 1 and {}", MAX_PAGE_SIZE));
        }
        errors.into_result()
    }

    /// Поисковая строка в нижнем регистре; пустая/пробельная строка = без фильтра
    pub fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> ProductCreateRequest {
        ProductCreateRequest {
            name: "Smart Watch".into(),
            description: "Fitness tracker with heart rate monitor".into(),
            price: 149.5,
            quantity: 10,
            category_id: CategoryId(1),
            sku: "ELEC-WATCH-1".into(),
            image_url: Some("  ".into()),
        }
    }

    #[test]
    fn test_new_for_insert_normalizes_blank_image_url() {
        let product = Product::new_for_insert(ProductId(8), &create_request());
        assert_eq!(product.image_url, None);
        assert!(product.is_active());
        assert_eq!(product.stock_value(), 1495.0);
    }

    #[test]
    fn test_matches_search_on_any_field() {
        let product = Product::new_for_insert(ProductId(8), &create_request());
        assert!(product.matches_search("watch"));
        assert!(product.matches_search("heart rate"));
        assert!(product.matches_search("elec-"));
        assert!(!product.matches_search("phone"));
    }

    #[test]
    fn test_create_request_validation() {
        assert!(create_request().validate().is_ok());

        let mut bad = create_request();
        bad.price = 0.0;
        bad.sku = "BAD SKU".into();
        bad.image_url = Some("ftp://nope".into());
        assert_eq!(bad.validate().unwrap_err().messages().len(), 3);
    }

    #[test]
    fn test_update_request_validates_present_fields_only() {
        assert!(ProductUpdateRequest::default().validate().is_ok());
        let bad = ProductUpdateRequest {
            name: Some("ab".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_list_query_defaults_and_search_needle() {
        let query: ProductListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(query.search_needle(), None);

        let query = ProductListQuery {
            search: Some("  PhOnE ".into()),
            ..Default::default()
        };
        assert_eq!(query.search_needle().as_deref(), Some("phone"));

        let query = ProductListQuery {
            page: 0,
            page_size: 0,
            ..Default::default()
        };
        assert_eq!(query.validate().unwrap_err().messages().len(), 2);
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product::new_for_insert(ProductId(8), &create_request());
        let json = serde_json::to_value(&ProductWithCategory {
            product,
            category: None,
        })
        .unwrap();
        assert_eq!(json["categoryId"], 1);
        assert_eq!(json["sku"], "ELEC-WATCH-1");
        assert!(json.get("category").is_none());
        assert!(json.get("imageUrl").is_none());
    }
}
