//! Linked server and news-channel settings.

use super::{SettingsError, SETTINGS_TTL};
use crate::cache::{Cached, KeyedCache};
use crate::database::{NewsChannels, SettingsStore};

/// Read-through cache for per-guild server link and autopost channels.
#[derive(Clone)]
pub struct GuildManager {
    cache: KeyedCache,
    store: SettingsStore,
}

impl GuildManager {
    pub fn new(cache: KeyedCache, store: SettingsStore) -> Self {
        Self { cache, store }
    }

    /// The Minecraft server address linked to a guild.
    pub async fn get_server(&self, guild_id: u64) -> Result<Option<String>, SettingsError> {
        let key = format!("server_{guild_id}");
        if let Some(entry) = self.cache.get::<String>(&key).await? {
            return Ok(entry.into_option());
        }
        let server = self.store.guild_server(guild_id).await?;
        self.cache
            .set(&key, &Cached::from(server.clone()), SETTINGS_TTL)
            .await?;
        Ok(server)
    }

    /// Link (`Some`) or unlink (`None`) a server address.
    pub async fn set_server(
        &self,
        guild_id: u64,
        server: Option<&str>,
    ) -> Result<(), SettingsError> {
        self.store.set_guild_server(guild_id, server).await?;
        self.cache
            .set(
                &format!("server_{guild_id}"),
                &Cached::from(server.map(str::to_owned)),
                SETTINGS_TTL,
            )
            .await?;
        Ok(())
    }

    /// The guild's autopost channel configuration.
    pub async fn get_news(&self, guild_id: u64) -> Result<Option<NewsChannels>, SettingsError> {
        let key = format!("news_{guild_id}");
        if let Some(entry) = self.cache.get::<NewsChannels>(&key).await? {
            return Ok(entry.into_option());
        }
        let news = self.store.guild_news(guild_id).await?;
        self.cache
            .set(&key, &Cached::from(news), SETTINGS_TTL)
            .await?;
        Ok(news)
    }

    /// Replace (`Some`) or remove (`None`) the autopost configuration.
    pub async fn set_news(
        &self,
        guild_id: u64,
        news: Option<&NewsChannels>,
    ) -> Result<(), SettingsError> {
        self.store.set_guild_news(guild_id, news).await?;
        self.cache
            .set(
                &format!("news_{guild_id}"),
                &Cached::from(news.copied()),
                SETTINGS_TTL,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheBackend;
    use crate::database::MemorySettingsStore;
    use pretty_assertions::assert_eq;

    fn manager() -> (GuildManager, MemorySettingsStore) {
        let rows = MemorySettingsStore::default();
        let manager = GuildManager::new(
            KeyedCache::new(CacheBackend::memory()),
            SettingsStore::Memory(rows.clone()),
        );
        (manager, rows)
    }

    #[tokio::test]
    async fn test_server_set_then_get() {
        let (manager, _rows) = manager();
        assert_eq!(manager.get_server(5).await.unwrap(), None);
        manager.set_server(5, Some("mc.hypixel.net")).await.unwrap();
        assert_eq!(
            manager.get_server(5).await.unwrap(),
            Some("mc.hypixel.net".to_string())
        );
    }

    #[tokio::test]
    async fn test_server_overwrite_holds_whether_or_not_cached() {
        let (manager, _rows) = manager();
        manager.set_server(5, Some("play.one.net")).await.unwrap();
        assert_eq!(
            manager.get_server(5).await.unwrap(),
            Some("play.one.net".to_string())
        );
        // Overwrite on top of a live cache entry.
        manager.set_server(5, Some("play.two.net")).await.unwrap();
        assert_eq!(
            manager.get_server(5).await.unwrap(),
            Some("play.two.net".to_string())
        );
    }

    #[tokio::test]
    async fn test_news_scenario_for_unseen_guild() {
        let (manager, rows) = manager();
        assert_eq!(manager.get_news(12345).await.unwrap(), None);

        let cfg = NewsChannels {
            release: Some(555),
            snapshot: None,
            article: None,
            status: None,
        };
        manager.set_news(12345, Some(&cfg)).await.unwrap();

        assert_eq!(manager.get_news(12345).await.unwrap(), Some(cfg));
        assert_eq!(rows.guild_row_count(), 1);
    }

    #[tokio::test]
    async fn test_set_news_is_idempotent() {
        let (manager, rows) = manager();
        let cfg = NewsChannels {
            release: Some(1),
            snapshot: Some(2),
            article: None,
            status: None,
        };
        manager.set_news(8, Some(&cfg)).await.unwrap();
        manager.set_news(8, Some(&cfg)).await.unwrap();

        assert_eq!(rows.guild_row_count(), 1);
        assert_eq!(manager.get_news(8).await.unwrap(), Some(cfg));
    }

    #[tokio::test]
    async fn test_news_removal_is_cached_as_absent() {
        let (manager, rows) = manager();
        let cfg = NewsChannels {
            release: Some(1),
            ..Default::default()
        };
        manager.set_news(8, Some(&cfg)).await.unwrap();
        manager.set_news(8, None).await.unwrap();

        assert_eq!(manager.get_news(8).await.unwrap(), None);
        // The row survives; only the column was cleared.
        assert!(rows.has_guild(8));
    }
}
