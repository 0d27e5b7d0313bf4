//! In-memory settings store.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use super::models::NewsChannels;

/// Map-backed twin of the Postgres store.
///
/// Same row semantics: a getter on a missing row and on a NULL column both
/// come back empty, setters create the row on first write. Used by the test
/// suite; clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    guilds: Arc<DashMap<u64, GuildRow>>,
    accounts: Arc<DashMap<u64, Option<Uuid>>>,
}

#[derive(Debug, Clone, Default)]
struct GuildRow {
    locale: Option<String>,
    regional: Option<String>,
    server: Option<String>,
    news: Option<NewsChannels>,
}

impl MemorySettingsStore {
    pub fn guild_locale(&self, guild_id: u64) -> Option<String> {
        self.guilds.get(&guild_id).and_then(|row| row.locale.clone())
    }

    pub fn set_guild_locale(&self, guild_id: u64, locale: Option<&str>) {
        self.guilds.entry(guild_id).or_default().locale = locale.map(str::to_owned);
    }

    pub fn guild_regional(&self, guild_id: u64) -> Option<String> {
        self.guilds.get(&guild_id).and_then(|row| row.regional.clone())
    }

    pub fn set_guild_regional(&self, guild_id: u64, regional: Option<&str>) {
        self.guilds.entry(guild_id).or_default().regional = regional.map(str::to_owned);
    }

    pub fn guild_server(&self, guild_id: u64) -> Option<String> {
        self.guilds.get(&guild_id).and_then(|row| row.server.clone())
    }

    pub fn set_guild_server(&self, guild_id: u64, server: Option<&str>) {
        self.guilds.entry(guild_id).or_default().server = server.map(str::to_owned);
    }

    pub fn guild_news(&self, guild_id: u64) -> Option<NewsChannels> {
        self.guilds.get(&guild_id).and_then(|row| row.news)
    }

    pub fn set_guild_news(&self, guild_id: u64, news: Option<&NewsChannels>) {
        self.guilds.entry(guild_id).or_default().news = news.copied();
    }

    pub fn account_uuid(&self, user_id: u64) -> Option<Uuid> {
        self.accounts.get(&user_id).and_then(|uuid| *uuid)
    }

    pub fn set_account_uuid(&self, user_id: u64, uuid: Option<Uuid>) {
        self.accounts.insert(user_id, uuid);
    }

    pub fn news_subscriptions(&self) -> Vec<NewsChannels> {
        self.guilds
            .iter()
            .filter_map(|row| row.news)
            .collect()
    }

    /// Number of guild rows, for asserting that writes stay single-row.
    pub fn guild_row_count(&self) -> usize {
        self.guilds.len()
    }

    /// Whether a guild row exists at all, regardless of column contents.
    pub fn has_guild(&self, guild_id: u64) -> bool {
        self.guilds.contains_key(&guild_id)
    }

    /// Number of account rows.
    #[allow(dead_code)]
    pub fn account_row_count(&self) -> usize {
        self.accounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_row_and_null_column_read_the_same() {
        let store = MemorySettingsStore::default();
        // No row at all.
        assert_eq!(store.guild_locale(1), None);

        // Row exists but the column is NULL.
        store.set_guild_server(1, Some("mc.hypixel.net"));
        assert!(store.has_guild(1));
        assert_eq!(store.guild_locale(1), None);
    }

    #[test]
    fn test_upsert_touches_a_single_row() {
        let store = MemorySettingsStore::default();
        store.set_guild_locale(7, Some("de-DE"));
        store.set_guild_locale(7, Some("fr-FR"));
        store.set_guild_regional(7, Some("pl-PL"));

        assert_eq!(store.guild_row_count(), 1);
        assert_eq!(store.guild_locale(7), Some("fr-FR".to_string()));
        assert_eq!(store.guild_regional(7), Some("pl-PL".to_string()));
    }

    #[test]
    fn test_set_none_still_creates_the_row() {
        let store = MemorySettingsStore::default();
        store.set_guild_locale(3, None);
        assert!(store.has_guild(3));
        assert_eq!(store.guild_locale(3), None);
    }

    #[test]
    fn test_news_subscriptions_skip_rows_without_news() {
        let store = MemorySettingsStore::default();
        store.set_guild_locale(1, Some("en-US"));
        store.set_guild_news(
            2,
            Some(&NewsChannels { release: Some(42), ..Default::default() }),
        );

        let subscriptions = store.news_subscriptions();
        assert_eq!(subscriptions.len(), 1);
        assert_eq!(subscriptions[0].release, Some(42));
    }

    #[test]
    fn test_clones_share_tables() {
        let store = MemorySettingsStore::default();
        let view = store.clone();
        store.set_account_uuid(9, Some(Uuid::nil()));
        assert_eq!(view.account_uuid(9), Some(Uuid::nil()));
    }
}
