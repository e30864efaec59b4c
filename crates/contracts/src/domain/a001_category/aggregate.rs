use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::parse_positive_id;
use crate::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use crate::shared::validation::{ValidationErrors, ValidationRules};

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор категории (положительное целое, неизменяемое)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for CategoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        parse_positive_id(s).map(CategoryId)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

const NAME_RULES: ValidationRules = ValidationRules::required().min_length(2).max_length(50);
const DESCRIPTION_RULES: ValidationRules =
    ValidationRules::required().min_length(10).max_length(200);

/// Категория товаров
///
/// Количество товаров не хранится: оно вычисляется при чтении (см. [`CategoryWithCount`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub metadata: EntityMetadata,
}

impl Category {
    /// Создать новую категорию для вставки
    pub fn new_for_insert(id: CategoryId, dto: &CategoryCreateRequest) -> Self {
        Self {
            id,
            name: dto.name.trim().to_string(),
            description: dto.description.trim().to_string(),
            metadata: EntityMetadata::new(),
        }
    }

    /// Обновить данные из DTO (только переданные поля)
    pub fn update(&mut self, dto: &CategoryUpdateRequest) {
        if let Some(name) = &dto.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = &dto.description {
            self.description = description.trim().to_string();
        }
        if let Some(is_active) = dto.is_active {
            self.metadata.is_active = is_active;
        }
    }

    pub fn is_active(&self) -> bool {
        self.metadata.is_active
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "category"
    }

    fn element_name() -> &'static str {
        "Category"
    }

    fn list_name() -> &'static str {
        "Categories"
    }
}

// ============================================================================
// Read models
// ============================================================================

/// Категория с актуальным количеством товаров
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: usize,
}

/// Элемент выпадающего списка категорий (только активные)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

impl From<&Category> for CategoryOption {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
        }
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания категории
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCreateRequest {
    pub name: String,
    pub description: String,
}

impl CategoryCreateRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(NAME_RULES.validate_string(&self.name, "Name"));
        errors.check(DESCRIPTION_RULES.validate_string(&self.description, "Description"));
        errors.into_result()
    }
}

/// DTO для обновления категории; `None` = поле не меняется
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CategoryUpdateRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            errors.check(NAME_RULES.validate_string(name, "Name"));
        }
        if let Some(description) = &self.description {
            errors.check(DESCRIPTION_RULES.validate_string(description, "Description"));
        }
        errors.into_result()
    }
}

/// Параметры запроса списка категорий
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}
