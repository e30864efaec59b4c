use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Метаданные экземпляра агрегата (lifecycle tracking)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// Дата создания записи
    pub created_at: DateTime<Utc>,
    /// Дата последнего обновления
    pub updated_at: DateTime<Utc>,
    /// Активна ли запись (false = мягкое удаление)
    pub is_active: bool,
}

impl EntityMetadata {
    /// Создать новые метаданные для нового агрегата
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// Метаданные с фиксированной датой (для демо-данных)
    pub fn created_on(year: i32, month: u32, day: u32, is_active: bool) -> Self {
        let at = Utc
            .with_ymd_and_hms(year, month, day, 0, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Self {
            created_at: at,
            updated_at: at,
            is_active,
        }
    }

    /// Обновить timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Мягкое удаление
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.touch();
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deactivate_touches_updated_at() {
        let mut meta = EntityMetadata::created_on(2024, 1, 1, true);
        let before = meta.updated_at;
        meta.deactivate();
        assert!(!meta.is_active);
        assert!(meta.updated_at > before);
        assert_eq!(meta.created_at, before);
    }

    #[test]
    fn test_serializes_camel_case() {
        let meta = EntityMetadata::created_on(2024, 1, 2, false);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["isActive"], false);
        assert!(json["createdAt"].as_str().unwrap().starts_with("2024-01-02T00:00:00"));
        assert!(json.get("updatedAt").is_some());
    }
}
