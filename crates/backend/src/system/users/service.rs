use chrono::{Duration, Utc};
use contracts::system::auth::{ForgotPasswordRequest, RegisterRequest};
use contracts::system::users::{User, UserRole};

use super::repository::UserStore;
use crate::shared::error::AuthError;
use crate::system::auth::{jwt, password};

/// Срок действия ссылки сброса пароля
pub const RESET_TOKEN_LIFETIME_MINUTES: i64 = 60;

/// Create a new user
pub fn create(
    store: &mut UserStore,
    dto: RegisterRequest,
    role: UserRole,
) -> Result<User, AuthError> {
    dto.validate()?;

    // Check if username already exists
    if store.get_by_username(&dto.username).is_some() {
        return Err(AuthError::UsernameTaken);
    }

    let password_hash = password::hash_password(&dto.password)?;

    let user = User {
        id: store.next_id(),
        username: dto.username.trim().to_string(),
        email: dto.email.trim().to_string(),
        first_name: dto.first_name.trim().to_string(),
        last_name: dto.last_name.trim().to_string(),
        role,
        permissions: role.default_permissions(),
        created_at: Utc::now(),
        is_active: true,
    };

    store.create_with_password(user.clone(), password_hash);
    tracing::info!("User {} created with role {}", user.username, role);

    Ok(user)
}

/// Проверка логина и пароля; неактивные пользователи не входят
pub fn verify_credentials(
    store: &UserStore,
    username: &str,
    password_plain: &str,
) -> Result<User, AuthError> {
    let (user, hash) = match (
        store.get_by_username(username),
        store.get_password_hash(username),
    ) {
        (Some(user), Some(hash)) => (user, hash),
        _ => return Err(AuthError::InvalidCredentials),
    };

    if !password::verify_password(password_plain, hash) {
        return Err(AuthError::InvalidCredentials);
    }
    if !user.is_active {
        return Err(AuthError::UserInactive);
    }

    Ok(user.clone())
}

/// Выпуск одноразового токена сброса пароля
///
/// `None`, если активного пользователя с таким email нет (ответ клиенту одинаковый).
pub fn request_password_reset(
    store: &mut UserStore,
    dto: &ForgotPasswordRequest,
) -> Result<Option<String>, AuthError> {
    dto.validate()?;
    let Some(user_id) = store
        .get_by_email(&dto.email)
        .filter(|u| u.is_active)
        .map(|u| u.id)
    else {
        return Ok(None);
    };

    let token = uuid::Uuid::new_v4().to_string();
    store.store_reset_token(
        jwt::hash_token(&token),
        user_id,
        Utc::now() + Duration::minutes(RESET_TOKEN_LIFETIME_MINUTES),
    );
    Ok(Some(token))
}

/// Смена пароля по reset token; все refresh token'ы пользователя отзываются
///
/// `password_hash` считается заранее, вне блокировки хранилища.
pub fn reset_password(
    store: &mut UserStore,
    token: &str,
    password_hash: String,
) -> Result<User, AuthError> {
    let user_id = store
        .take_reset_token(&jwt::hash_token(token.trim()), Utc::now())
        .ok_or(AuthError::InvalidResetToken)?;
    if !store.set_password_hash(user_id, password_hash) {
        return Err(AuthError::UserNotFound);
    }
    let revoked = store.revoke_user_refresh_tokens(user_id);
    let user = get_by_id(store, user_id)?;
    tracing::info!(
        "Password reset for {}, {} refresh token(s) revoked",
        user.username,
        revoked
    );
    Ok(user)
}

/// Get user by ID
pub fn get_by_id(store: &UserStore, id: i64) -> Result<User, AuthError> {
    store.get_by_id(id).cloned().ok_or(AuthError::UserNotFound)
}

/// List all users
pub fn list_all(store: &UserStore) -> Vec<User> {
    store.list_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            email: format!("{}@example.com", username),
            password: "secret123".into(),
            first_name: "Jane".into(),
            last_name: "Roe".into(),
        }
    }

    #[test]
    fn test_register_then_login() {
        let mut store = UserStore::new();
        let user = create(&mut store, register("jroe"), UserRole::User).unwrap();
        assert_eq!(user.role, UserRole::User);
        assert_eq!(user.permissions, vec!["read".to_string()]);

        let verified = verify_credentials(&store, "jroe", "secret123").unwrap();
        assert_eq!(verified.id, user.id);
        assert!(matches!(
            verify_credentials(&store, "jroe", "wrong-pass1"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            verify_credentials(&store, "nobody", "secret123"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_duplicate_username_is_rejected() {
        let mut store = UserStore::new();
        create(&mut store, register("jroe"), UserRole::User).unwrap();
        assert!(matches!(
            create(&mut store, register("JROE"), UserRole::User),
            Err(AuthError::UsernameTaken)
        ));
        assert_eq!(list_all(&store).len(), 1);
    }

    #[test]
    fn test_weak_password_is_a_validation_error() {
        let mut store = UserStore::new();
        let mut dto = register("jroe");
        dto.password = "short".into();
        assert!(matches!(
            create(&mut store, dto, UserRole::User),
            Err(AuthError::Validation(_))
        ));
        assert!(matches!(get_by_id(&store, 1), Err(AuthError::UserNotFound)));
    }

    #[test]
    fn test_password_reset_flow() {
        let mut store = UserStore::new();
        let user = create(&mut store, register("jroe"), UserRole::User).unwrap();
        store.store_refresh_token("session".into(), user.id, Utc::now() + Duration::days(1));

        let unknown = ForgotPasswordRequest {
            email: "nobody@example.com".into(),
        };
        assert_eq!(request_password_reset(&mut store, &unknown).unwrap(), None);

        let forgot = ForgotPasswordRequest {
            email: "JROE@example.com".into(),
        };
        let token = request_password_reset(&mut store, &forgot).unwrap().unwrap();

        let new_hash = password::hash_password("newpass99").unwrap();
        let reset = reset_password(&mut store, &token, new_hash.clone()).unwrap();
        assert_eq!(reset.id, user.id);
        assert!(verify_credentials(&store, "jroe", "newpass99").is_ok());
        assert!(matches!(
            verify_credentials(&store, "jroe", "secret123"),
            Err(AuthError::InvalidCredentials)
        ));
        assert_eq!(store.validate_refresh_token("session", Utc::now()), None);

        // токен одноразовый
        assert!(matches!(
            reset_password(&mut store, &token, new_hash),
            Err(AuthError::InvalidResetToken)
        ));
    }
}
