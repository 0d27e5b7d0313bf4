//! Settings store dispatch.

use thiserror::Error;
use uuid::Uuid;

use super::memory::MemorySettingsStore;
use super::models::NewsChannels;
use super::postgres::PgSettingsStore;

/// Errors from the relational layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be reached or a query failed.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    /// Startup migrations could not be applied.
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Where settings rows live.
///
/// Postgres in production, an in-process map for tests. Same contract on
/// both sides: getters never create rows, setters upsert, a missing row and
/// a NULL column read identically as `None`.
#[derive(Debug, Clone)]
pub enum SettingsStore {
    Postgres(PgSettingsStore),
    Memory(MemorySettingsStore),
}

impl SettingsStore {
    pub async fn guild_locale(&self, guild_id: u64) -> Result<Option<String>, StoreError> {
        match self {
            Self::Postgres(store) => store.guild_locale(guild_id).await,
            Self::Memory(store) => Ok(store.guild_locale(guild_id)),
        }
    }

    pub async fn set_guild_locale(
        &self,
        guild_id: u64,
        locale: Option<&str>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.set_guild_locale(guild_id, locale).await,
            Self::Memory(store) => {
                store.set_guild_locale(guild_id, locale);
                Ok(())
            }
        }
    }

    pub async fn guild_regional(&self, guild_id: u64) -> Result<Option<String>, StoreError> {
        match self {
            Self::Postgres(store) => store.guild_regional(guild_id).await,
            Self::Memory(store) => Ok(store.guild_regional(guild_id)),
        }
    }

    pub async fn set_guild_regional(
        &self,
        guild_id: u64,
        regional: Option<&str>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.set_guild_regional(guild_id, regional).await,
            Self::Memory(store) => {
                store.set_guild_regional(guild_id, regional);
                Ok(())
            }
        }
    }

    pub async fn guild_server(&self, guild_id: u64) -> Result<Option<String>, StoreError> {
        match self {
            Self::Postgres(store) => store.guild_server(guild_id).await,
            Self::Memory(store) => Ok(store.guild_server(guild_id)),
        }
    }

    pub async fn set_guild_server(
        &self,
        guild_id: u64,
        server: Option<&str>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.set_guild_server(guild_id, server).await,
            Self::Memory(store) => {
                store.set_guild_server(guild_id, server);
                Ok(())
            }
        }
    }

    pub async fn guild_news(&self, guild_id: u64) -> Result<Option<NewsChannels>, StoreError> {
        match self {
            Self::Postgres(store) => store.guild_news(guild_id).await,
            Self::Memory(store) => Ok(store.guild_news(guild_id)),
        }
    }

    pub async fn set_guild_news(
        &self,
        guild_id: u64,
        news: Option<&NewsChannels>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.set_guild_news(guild_id, news).await,
            Self::Memory(store) => {
                store.set_guild_news(guild_id, news);
                Ok(())
            }
        }
    }

    pub async fn account_uuid(&self, user_id: u64) -> Result<Option<Uuid>, StoreError> {
        match self {
            Self::Postgres(store) => store.account_uuid(user_id).await,
            Self::Memory(store) => Ok(store.account_uuid(user_id)),
        }
    }

    pub async fn set_account_uuid(
        &self,
        user_id: u64,
        uuid: Option<Uuid>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.set_account_uuid(user_id, uuid).await,
            Self::Memory(store) => {
                store.set_account_uuid(user_id, uuid);
                Ok(())
            }
        }
    }

    /// Every configured news subscription, for the autopost task.
    pub async fn news_subscriptions(&self) -> Result<Vec<NewsChannels>, StoreError> {
        match self {
            Self::Postgres(store) => store.news_subscriptions().await,
            Self::Memory(store) => Ok(store.news_subscriptions()),
        }
    }
}
