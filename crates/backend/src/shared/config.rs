use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Искусственная задержка ответов (эмуляция сети), 0 = выключено
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Пустая строка = случайный секрет на время жизни процесса
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedConfig {
    /// Заполнить каталог и пользователей демо-данными при старте
    #[serde(default = "default_true")]
    pub demo_data: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { demo_data: true }
    }
}

fn default_access_token_minutes() -> i64 {
    60
}

fn default_refresh_token_days() -> i64 {
    30
}

fn default_true() -> bool {
    true
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 5000
simulated_latency_ms = 0

[auth]
jwt_secret = ""
access_token_minutes = 60
refresh_token_days = 30

[seed]
demo_data = true
"#;

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Embedded default configuration
    pub fn embedded() -> anyhow::Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Some(config_path) = config_path_next_to_exe() {
        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            return Config::from_toml(&contents);
        }
        tracing::warn!("config.toml not found at: {}", config_path.display());
    }

    tracing::info!("Using default embedded configuration");
    Config::embedded()
}

fn config_path_next_to_exe() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    Some(exe_path.parent()?.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = Config::embedded().unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.simulated_latency_ms, 0);
        assert_eq!(config.auth.access_token_minutes, 60);
        assert!(config.seed.demo_data);
    }

    #[test]
    fn test_optional_sections_fall_back_to_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [auth]
            jwt_secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.simulated_latency_ms, 0);
        assert_eq!(config.auth.refresh_token_days, 30);
        assert!(config.seed.demo_data);
    }

    #[test]
    fn test_missing_required_section_fails() {
        assert!(Config::from_toml("[server]\nhost = \"x\"\nport = 1\n").is_err());
    }
}
