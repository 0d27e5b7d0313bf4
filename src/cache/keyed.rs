//! Typed wrapper over the cache backend.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::backend::CacheBackend;
use super::value::Cached;
use super::CacheError;

/// Keyed TTL cache.
///
/// Entries are JSON strings, one per key, each with its own expiry.
/// Cloning is cheap and shares the underlying backend.
#[derive(Clone)]
pub struct KeyedCache {
    backend: CacheBackend,
}

impl KeyedCache {
    pub fn new(backend: CacheBackend) -> Self {
        Self { backend }
    }

    /// Check whether a live entry exists for `key`.
    #[allow(dead_code)]
    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.backend.exists(key).await
    }

    /// Fetch and decode the entry at `key`.
    ///
    /// `None` means the key is missing or expired. `Some(Cached::Absent)` is
    /// a live entry recording that the looked-up thing does not exist.
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<Cached<T>>, CacheError> {
        let Some(raw) = self.backend.get(key).await? else {
            return Ok(None);
        };
        let value = serde_json::from_str(&raw)?;
        debug!(key, "cache hit");
        Ok(Some(value))
    }

    /// Store `value` at `key`, unconditionally replacing any previous entry
    /// and its deadline.
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &Cached<T>,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, raw, ttl).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn memory_cache() -> KeyedCache {
        KeyedCache::new(CacheBackend::memory())
    }

    #[tokio::test]
    async fn test_miss_and_hit() {
        let cache = memory_cache();
        assert_eq!(cache.get::<String>("locale_1").await.unwrap(), None);

        cache
            .set(
                "locale_1",
                &Cached::Present("de-DE".to_string()),
                Duration::from_secs(60),
            )
            .await
            .unwrap();

        assert!(cache.exists("locale_1").await.unwrap());
        assert_eq!(
            cache.get::<String>("locale_1").await.unwrap(),
            Some(Cached::Present("de-DE".to_string()))
        );
    }

    #[tokio::test]
    async fn test_absent_entry_is_a_hit() {
        let cache = memory_cache();
        cache
            .set("server_1", &Cached::<String>::Absent, Duration::from_secs(60))
            .await
            .unwrap();

        // An absence entry is present in the cache, distinct from a miss.
        assert!(cache.exists("server_1").await.unwrap());
        assert_eq!(
            cache.get::<String>("server_1").await.unwrap(),
            Some(Cached::Absent)
        );
    }

    #[tokio::test]
    async fn test_set_replaces_previous_entry() {
        let cache = memory_cache();
        cache
            .set("regional_9", &Cached::Present(1), Duration::from_secs(60))
            .await
            .unwrap();
        cache
            .set("regional_9", &Cached::Present(2), Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            cache.get::<i32>("regional_9").await.unwrap(),
            Some(Cached::Present(2))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let cache = memory_cache();
        cache
            .set(
                "versions",
                &Cached::Present("1.18".to_string()),
                Duration::from_millis(500),
            )
            .await
            .unwrap();
        assert!(cache.exists("versions").await.unwrap());

        tokio::time::advance(Duration::from_millis(501)).await;

        assert!(!cache.exists("versions").await.unwrap());
        assert_eq!(cache.get::<String>("versions").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_resets_the_deadline() {
        let cache = memory_cache();
        cache
            .set("status", &Cached::Present(1), Duration::from_millis(500))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_millis(400)).await;
        cache
            .set("status", &Cached::Present(2), Duration::from_millis(500))
            .await
            .unwrap();

        // The rewrite pushed the deadline out past the original 500ms.
        tokio::time::advance(Duration::from_millis(400)).await;
        assert_eq!(
            cache.get::<i32>("status").await.unwrap(),
            Some(Cached::Present(2))
        );
    }
}
