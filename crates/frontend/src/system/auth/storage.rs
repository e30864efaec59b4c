use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use contracts::system::users::User;
use web_sys::window;

use crate::shared::config::ClientConfig;

/// Строковое key-value хранилище
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// `window.localStorage`; без окна все операции пустые
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn local_storage() -> Option<web_sys::Storage> {
        window()?.local_storage().ok()?
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = Self::local_storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage.setItem failed for {}", key);
            }
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::local_storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("localStorage.removeItem failed for {}", key);
            }
        }
    }
}

/// In-memory хранилище (тесты, окружения без localStorage)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.into(), value.into());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Сохранённое состояние аутентификации: token, refresh token, пользователь
#[derive(Clone)]
pub struct AuthStorage {
    storage: Rc<dyn KeyValueStorage>,
    token_key: String,
    refresh_token_key: String,
    user_key: String,
}

impl AuthStorage {
    pub fn new(storage: Rc<dyn KeyValueStorage>, config: &ClientConfig) -> Self {
        Self {
            storage,
            token_key: config.token_key.clone(),
            refresh_token_key: config.refresh_token_key.clone(),
            user_key: config.user_key.clone(),
        }
    }

    /// Хранилище браузера с ключами из конфигурации
    pub fn browser(config: &ClientConfig) -> Self {
        Self::new(Rc::new(BrowserStorage), config)
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(&self.token_key).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set_item(&self.token_key, token);
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.storage
            .get_item(&self.refresh_token_key)
            .filter(|t| !t.is_empty())
    }

    pub fn set_refresh_token(&self, token: &str) {
        self.storage.set_item(&self.refresh_token_key, token);
    }

    /// Пользователь из хранилища; битый JSON = нет пользователя
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get_item(&self.user_key)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("Stored user data is not valid JSON: {}", e);
                None
            }
        }
    }

    pub fn set_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => self.storage.set_item(&self.user_key, &json),
            Err(e) => log::error!("Failed to serialize user: {}", e),
        }
    }

    /// Удалить все ключи аутентификации вместе
    pub fn clear(&self) {
        self.storage.remove_item(&self.token_key);
        self.storage.remove_item(&self.refresh_token_key);
        self.storage.remove_item(&self.user_key);
    }
}
