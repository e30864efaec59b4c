use std::rc::Rc;

use contracts::system::auth::{ApiError, LoginRequest, LoginResponse, RegisterForm};
use contracts::system::users::{User, UserRole};

use super::api;
use super::storage::{AuthStorage, KeyValueStorage};
use crate::shared::api::ApiClient;
use crate::shared::config::ClientConfig;
use crate::shared::store::Store;

/// Сессия пользователя: текущий пользователь и флаг аутентификации
///
/// Жизненный цикл: `hydrate` из хранилища при старте, `establish`
/// после входа, `clear` при выходе или 401.
#[derive(Clone)]
pub struct Session {
    client: ApiClient,
    current_user: Store<Option<User>>,
    is_authenticated: Store<bool>,
}

impl Session {
    /// Восстановить сессию: пользователь считается вошедшим,
    /// только если сохранены и токен, и корректный JSON пользователя
    pub fn hydrate(config: ClientConfig, storage: Rc<dyn KeyValueStorage>) -> Self {
        let auth = AuthStorage::new(storage, &config);
        let user = match (auth.token(), auth.user()) {
            (Some(_), Some(user)) => Some(user),
            _ => None,
        };
        if let Some(user) = &user {
            log::info!("Session restored for {}", user.username);
        }

        Self {
            is_authenticated: Store::new(user.is_some()),
            current_user: Store::new(user),
            client: ApiClient::new(config, auth),
        }
    }

    /// Сессия поверх `localStorage`
    pub fn browser(config: ClientConfig) -> Self {
        Self::hydrate(config, Rc::new(super::storage::BrowserStorage))
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn current_user_store(&self) -> &Store<Option<User>> {
        &self.current_user
    }

    pub fn is_authenticated_store(&self) -> &Store<bool> {
        &self.is_authenticated
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated.get()
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.current_user
            .with(|u| u.as_ref().is_some_and(|u| u.role == role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    /// Сохранить токены и пользователя, затем оповестить подписчиков
    pub fn establish(&self, response: &LoginResponse) {
        let auth = self.client.auth_storage();
        auth.set_token(&response.token);
        auth.set_refresh_token(&response.refresh_token);
        auth.set_user(&response.user);

        self.current_user.set(Some(response.user.clone()));
        self.is_authenticated.set(true);
    }

    /// Удалить сохранённые ключи и опубликовать состояние "не вошёл"
    pub fn clear(&self) {
        self.client.auth_storage().clear();
        self.current_user.set(None);
        self.is_authenticated.set(false);
    }

    pub async fn login(&self, request: LoginRequest) -> Result<User, ApiError> {
        let response = api::login(&self.client, &request).await?;
        self.establish(&response);
        log::info!("Logged in as {}", response.user.username);
        Ok(response.user)
    }

    /// Регистрация из формы (подтверждение пароля, согласие с условиями);
    /// вход автоматически не выполняется
    pub async fn register(&self, form: &RegisterForm) -> Result<User, ApiError> {
        form.validate()?;
        let user = api::register(&self.client, &form.to_request()).await?;
        log::info!("Registered {}", user.username);
        Ok(user)
    }

    /// Выход: локальное состояние очищается даже при ошибке сервера
    pub async fn logout(&self) {
        let refresh_token = self.client.auth_storage().refresh_token();
        if let Err(e) = api::logout(&self.client, refresh_token).await {
            log::warn!("Logout API error: {}", e);
        }
        self.clear();
    }

    /// Получить новый access token по сохранённому refresh token
    pub async fn refresh_token(&self) -> Result<String, ApiError> {
        let refresh_token = self
            .client
            .auth_storage()
            .refresh_token()
            .ok_or_else(|| ApiError::client("No refresh token stored"))?;
        let response = api::refresh_token(&self.client, refresh_token).await?;
        self.client.auth_storage().set_token(&response.token);
        Ok(response.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::auth::storage::MemoryStorage;
    use chrono::Utc;
    use std::cell::RefCell;

    fn user(role: UserRole) -> User {
        User {
            id: 1,
            username: "admin".into(),
            email: "admin@example.com".into(),
            first_name: "Admin".into(),
            last_name: "User".into(),
            role,
            permissions: role.default_permissions(),
            created_at: Utc::now(),
            is_active: true,
        }
    }

    fn login_response(role: UserRole) -> LoginResponse {
        LoginResponse {
            token: "access".into(),
            refresh_token: "refresh".into(),
            expires_at: Utc::now(),
            user: user(role),
        }
    }

    fn memory() -> Rc<MemoryStorage> {
        Rc::new(MemoryStorage::new())
    }

    #[test]
    fn test_hydrate_empty_storage_is_signed_out() {
        let session = Session::hydrate(ClientConfig::development(), memory());
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_hydrate_requires_token_and_user() {
        let config = ClientConfig::development();
        let storage = memory();
        storage.set_item(&config.user_key, &serde_json::to_string(&user(UserRole::User)).unwrap());
        let session = Session::hydrate(config.clone(), storage.clone());
        assert!(!session.is_authenticated());

        storage.set_item(&config.token_key, "access");
        let session = Session::hydrate(config.clone(), storage.clone());
        assert!(session.is_authenticated());
        assert!(session.has_role(UserRole::User));

        storage.set_item(&config.user_key, "not json");
        let session = Session::hydrate(config, storage);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_establish_persists_and_publishes() {
        let config = ClientConfig::development();
        let storage = memory();
        let session = Session::hydrate(config.clone(), storage.clone());

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = session
            .is_authenticated_store()
            .subscribe(move |v| sink.borrow_mut().push(*v));

        session.establish(&login_response(UserRole::Admin));
        assert!(session.is_admin());
        assert_eq!(storage.get_item(&config.token_key).as_deref(), Some("access"));
        assert_eq!(
            storage.get_item(&config.refresh_token_key).as_deref(),
            Some("refresh")
        );

        let rehydrated = Session::hydrate(config, storage);
        assert_eq!(
            rehydrated.current_user().map(|u| u.username),
            Some("admin".to_string())
        );

        session.clear();
        assert_eq!(*seen.borrow(), vec![true, false]);
        sub.unsubscribe();
    }

    #[test]
    fn test_clear_removes_persisted_state_together() {
        let config = ClientConfig::development();
        let storage = memory();
        let session = Session::hydrate(config.clone(), storage.clone());
        session.establish(&login_response(UserRole::User));

        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(storage.get_item(&config.token_key).is_none());
        assert!(storage.get_item(&config.refresh_token_key).is_none());
        assert!(storage.get_item(&config.user_key).is_none());
    }

    #[test]
    fn test_register_form_is_checked_before_request() {
        let session = Session::hydrate(ClientConfig::development(), memory());
        let form = RegisterForm {
            username: "jroe".into(),
            email: "jroe@example.com".into(),
            password: "secret123".into(),
            confirm_password: "secret321".into(),
            first_name: "Jane".into(),
            last_name: "Roe".into(),
            agree_to_terms: false,
        };

        let err = futures::executor::block_on(session.register(&form)).unwrap_err();
        assert!(err.is_client_side());
        assert_eq!(
            err.errors,
            Some(vec![
                "Passwords do not match".to_string(),
                "You must agree to the terms and conditions".to_string(),
            ])
        );
        assert!(!session.is_authenticated());
    }
}
