//! Locale and regional-format settings.

use tracing::debug;

use super::{SettingsError, DEFAULT_LOCALE, SETTINGS_TTL};
use crate::cache::{Cached, KeyedCache};
use crate::database::SettingsStore;

/// Read-through cache for per-guild locale and regional format.
///
/// Both fields default to `en-US` when unset; the resolved default is what
/// gets cached on a store miss, so repeated lookups for an unconfigured
/// guild stay off the database.
#[derive(Clone)]
pub struct I18nManager {
    cache: KeyedCache,
    store: SettingsStore,
}

impl I18nManager {
    pub fn new(cache: KeyedCache, store: SettingsStore) -> Self {
        Self { cache, store }
    }

    /// Locale for a guild. `None` means a DM context and short-circuits to
    /// the default without touching cache or store.
    pub async fn get_locale(&self, guild_id: Option<u64>) -> Result<String, SettingsError> {
        let Some(gid) = guild_id else {
            return Ok(DEFAULT_LOCALE.to_string());
        };
        let key = format!("locale_{gid}");
        if let Some(entry) = self.cache.get::<String>(&key).await? {
            return Ok(entry
                .into_option()
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()));
        }
        let locale = self
            .store
            .guild_locale(gid)
            .await?
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        self.cache
            .set(&key, &Cached::Present(locale.clone()), SETTINGS_TTL)
            .await?;
        debug!(guild_id = gid, %locale, "resolved locale from store");
        Ok(locale)
    }

    /// Set or clear (`None`) the guild locale.
    pub async fn set_locale(
        &self,
        guild_id: u64,
        locale: Option<&str>,
    ) -> Result<(), SettingsError> {
        self.store.set_guild_locale(guild_id, locale).await?;
        self.cache
            .set(
                &format!("locale_{guild_id}"),
                &Cached::from(locale.map(str::to_owned)),
                SETTINGS_TTL,
            )
            .await?;
        Ok(())
    }

    /// Regional format for a guild, used for date and number rendering.
    pub async fn get_regional_format(
        &self,
        guild_id: Option<u64>,
    ) -> Result<String, SettingsError> {
        let Some(gid) = guild_id else {
            return Ok(DEFAULT_LOCALE.to_string());
        };
        let key = format!("regional_{gid}");
        if let Some(entry) = self.cache.get::<String>(&key).await? {
            return Ok(entry
                .into_option()
                .unwrap_or_else(|| DEFAULT_LOCALE.to_string()));
        }
        let regional = self
            .store
            .guild_regional(gid)
            .await?
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());
        self.cache
            .set(&key, &Cached::Present(regional.clone()), SETTINGS_TTL)
            .await?;
        Ok(regional)
    }

    /// Set or clear (`None`) the guild regional format. Cleared guilds fall
    /// back to locale-based formatting.
    pub async fn set_regional_format(
        &self,
        guild_id: u64,
        regional: Option<&str>,
    ) -> Result<(), SettingsError> {
        self.store.set_guild_regional(guild_id, regional).await?;
        self.cache
            .set(
                &format!("regional_{guild_id}"),
                &Cached::from(regional.map(str::to_owned)),
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
    use std::time::Duration;

    fn manager() -> (I18nManager, MemorySettingsStore) {
        let rows = MemorySettingsStore::default();
        let manager = I18nManager::new(
            KeyedCache::new(CacheBackend::memory()),
            SettingsStore::Memory(rows.clone()),
        );
        (manager, rows)
    }

    #[tokio::test]
    async fn test_dm_context_short_circuits_to_default() {
        let (manager, rows) = manager();
        assert_eq!(manager.get_locale(None).await.unwrap(), "en-US");
        assert_eq!(rows.guild_row_count(), 0);
    }

    #[tokio::test]
    async fn test_get_defaults_without_creating_a_row() {
        let (manager, rows) = manager();
        assert_eq!(manager.get_locale(Some(42)).await.unwrap(), "en-US");
        assert_eq!(manager.get_regional_format(Some(42)).await.unwrap(), "en-US");
        // Getters resolve the default but never upsert.
        assert!(!rows.has_guild(42));
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (manager, rows) = manager();
        manager.set_locale(42, Some("de-DE")).await.unwrap();
        assert_eq!(manager.get_locale(Some(42)).await.unwrap(), "de-DE");
        assert_eq!(rows.guild_locale(42), Some("de-DE".to_string()));
        assert_eq!(rows.guild_row_count(), 1);
    }

    #[tokio::test]
    async fn test_clearing_falls_back_to_default() {
        let (manager, _rows) = manager();
        manager.set_locale(42, Some("fr-FR")).await.unwrap();
        manager.set_locale(42, None).await.unwrap();
        // The cleared entry is cached as absent; lookups read it as default.
        assert_eq!(manager.get_locale(Some(42)).await.unwrap(), "en-US");
    }

    #[tokio::test]
    async fn test_get_serves_cache_over_store() {
        let (manager, rows) = manager();
        assert_eq!(manager.get_locale(Some(7)).await.unwrap(), "en-US");
        // A direct store write is invisible until the cache entry expires.
        rows.set_guild_locale(7, Some("pl-PL"));
        assert_eq!(manager.get_locale(Some(7)).await.unwrap(), "en-US");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_re_resolves_from_store() {
        let (manager, rows) = manager();
        assert_eq!(manager.get_locale(Some(7)).await.unwrap(), "en-US");
        rows.set_guild_locale(7, Some("pl-PL"));

        tokio::time::advance(SETTINGS_TTL + Duration::from_millis(1)).await;
        assert_eq!(manager.get_locale(Some(7)).await.unwrap(), "pl-PL");
    }
}
