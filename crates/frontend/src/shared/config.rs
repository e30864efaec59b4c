/// Настройки клиента: адрес API, ключи хранилища, таймаут и повторы
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub production: bool,
    /// Абсолютный URL или путь от origin страницы (начинается с `/`)
    pub api_base_url: String,
    pub token_key: String,
    pub refresh_token_key: String,
    pub user_key: String,
    pub timeout_ms: u32,
    /// Дополнительные попытки для GET запросов
    pub retry_attempts: u32,
}

impl ClientConfig {
    pub fn development() -> Self {
        Self {
            production: false,
            api_base_url: "http://localhost:5000/api".into(),
            token_key: "auth_token".into(),
            refresh_token_key: "refresh_token".into(),
            user_key: "user_data".into(),
            timeout_ms: 30_000,
            retry_attempts: 3,
        }
    }

    pub fn production() -> Self {
        Self {
            production: true,
            api_base_url: "/api".into(),
            token_key: "auth_token_prod".into(),
            refresh_token_key: "refresh_token_prod".into(),
            user_key: "user_data_prod".into(),
            ..Self::development()
        }
    }

    /// Пресет по профилю сборки
    pub fn current() -> Self {
        if cfg!(debug_assertions) {
            Self::development()
        } else {
            Self::production()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_use_separate_storage_keys() {
        let dev = ClientConfig::development();
        let prod = ClientConfig::production();
        assert_eq!(dev.api_base_url, "http://localhost:5000/api");
        assert_eq!(prod.api_base_url, "/api");
        assert_ne!(dev.token_key, prod.token_key);
        assert_ne!(dev.user_key, prod.user_key);
        assert_eq!(prod.timeout_ms, 30_000);
        assert_eq!(prod.retry_attempts, 3);
    }
}
