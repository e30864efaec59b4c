use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Роль пользователя
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
    Manager,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
        }
    }

    /// Права по умолчанию для роли
    pub fn default_permissions(&self) -> Vec<String> {
        let perms: &[&str] = match self {
            UserRole::Admin => &["read", "write", "delete", "admin"],
            UserRole::Manager => &["read", "write"],
            UserRole::User => &["read"],
        };
        perms.iter().map(|p| p.to_string()).collect()
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub permissions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(UserRole::Admin).unwrap(), "admin");
        let role: UserRole = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, UserRole::Manager);
    }

    #[test]
    fn test_default_permissions() {
        assert!(UserRole::Admin
            .default_permissions()
            .contains(&"admin".to_string()));
        assert_eq!(UserRole::User.default_permissions(), vec!["read".to_string()]);
    }
}
