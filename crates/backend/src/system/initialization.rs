use anyhow::Result;
use chrono::{TimeZone, Utc};
use contracts::system::users::{User, UserRole};

use crate::system::auth::password;
use crate::system::users::repository::UserStore;

/// Пароль демо-пользователей
pub const DEMO_PASSWORD: &str = "password";

/// Создать демо-пользователей `admin` и `user`, если хранилище пустое
pub fn ensure_demo_users(store: &mut UserStore) -> Result<()> {
    if store.count_users() > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating demo users...");

    let password_hash = password::hash_password(DEMO_PASSWORD)?;
    for (username, first_name, last_name, role) in [
        ("admin", "Admin", "User", UserRole::Admin),
        ("user", "Regular", "User", UserRole::User),
    ] {
        let user = User {
            id: store.next_id(),
            username: username.into(),
            email: format!("{}@example.com", username),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            permissions: role.default_permissions(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now),
            is_active: true,
        };
        store.create_with_password(user, password_hash.clone());
    }

    tracing::warn!("═══════════════════════════════════════════════");
    tracing::warn!("  Demo users created: admin / user");
    tracing::warn!("  Password: {}", DEMO_PASSWORD);
    tracing::warn!("═══════════════════════════════════════════════");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::users::service;

    #[test]
    fn test_demo_users_can_log_in() {
        let mut store = UserStore::new();
        ensure_demo_users(&mut store).unwrap();
        ensure_demo_users(&mut store).unwrap();
        assert_eq!(store.count_users(), 2);

        let admin = service::verify_credentials(&store, "admin", DEMO_PASSWORD).unwrap();
        assert!(admin.is_admin());
        assert_eq!(admin.permissions.len(), 4);

        let user = service::verify_credentials(&store, "user", DEMO_PASSWORD).unwrap();
        assert_eq!(user.role, UserRole::User);
    }
}
