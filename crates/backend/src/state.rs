use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{catalog::Catalog, seed};
use crate::shared::config::Config;
use crate::system::auth::jwt::JwtSettings;
use crate::system::initialization;
use crate::system::users::repository::UserStore;

/// Общее состояние приложения, передаётся во все обработчики
///
/// Каждый запрос держит блокировку только на время одного
/// синхронного вызова сервиса, поэтому операции каталога атомарны.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<Catalog>>,
    pub users: Arc<RwLock<UserStore>>,
    pub jwt: Arc<JwtSettings>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog, users: UserStore) -> Self {
        let jwt = JwtSettings::from_config(&config.auth);
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            users: Arc::new(RwLock::new(users)),
            jwt: Arc::new(jwt),
            config: Arc::new(config),
        }
    }

    /// Состояние по конфигурации: демо-данные загружаются, если `seed.demo_data`
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let (catalog, users) = if config.seed.demo_data {
            let mut users = UserStore::new();
            initialization::ensure_demo_users(&mut users)?;
            (seed::demo_catalog(), users)
        } else {
            (Catalog::new(), UserStore::new())
        };

        tracing::info!(
            "Catalog ready: {} categories, {} products",
            catalog.categories().len(),
            catalog.products().len()
        );
        Ok(Self::new(config, catalog, users))
    }
}
