//! Shared application state.

use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::cache::KeyedCache;
use crate::config::Config;
use crate::database::SettingsStore;
use crate::settings::{AccountManager, GuildManager, I18nManager};

/// Every service handle the command handlers need, built once in `main`
/// and cloned into the event handler and background tasks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: KeyedCache,
    pub store: SettingsStore,
    pub i18n: I18nManager,
    pub accounts: AccountManager,
    pub guilds: GuildManager,
    pub api: ApiClient,
}

impl AppState {
    pub fn new(
        config: Config,
        cache: KeyedCache,
        store: SettingsStore,
    ) -> Result<Self, ApiError> {
        let api = ApiClient::new(
            cache.clone(),
            config.api_url.clone(),
            config.hypixel_api_token,
        )?;
        Ok(Self {
            i18n: I18nManager::new(cache.clone(), store.clone()),
            accounts: AccountManager::new(cache.clone(), store.clone()),
            guilds: GuildManager::new(cache.clone(), store.clone()),
            api,
            config: Arc::new(config),
            cache,
            store,
        })
    }
}
