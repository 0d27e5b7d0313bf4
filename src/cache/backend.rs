//! Key-value backends for the keyed cache.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::time::Instant;
use tracing::info;

/// Errors from the key-value layer.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing store could not be reached.
    #[error("cache unavailable: {0}")]
    Unavailable(#[from] redis::RedisError),

    /// A stored value could not be encoded or decoded.
    #[error("cache value encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Where cache entries live.
///
/// Redis when a connection string is configured, an in-process map
/// otherwise. Both expire entries after their per-entry TTL; dispatch is a
/// plain `match`, no trait objects.
#[derive(Clone)]
pub enum CacheBackend {
    Redis(RedisBackend),
    Memory(MemoryBackend),
}

impl CacheBackend {
    /// Connect to Redis. The connection manager reconnects on its own after
    /// a dropped connection.
    pub async fn connect_redis(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        info!("Successfully connected to Redis");
        Ok(Self::Redis(RedisBackend { conn }))
    }

    /// In-process backend with the same expiry semantics.
    pub fn memory() -> Self {
        Self::Memory(MemoryBackend::default())
    }

    pub async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        match self {
            Self::Redis(backend) => backend.exists(key).await,
            Self::Memory(backend) => Ok(backend.exists(key)),
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            Self::Redis(backend) => backend.get(key).await,
            Self::Memory(backend) => Ok(backend.get(key)),
        }
    }

    pub async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        match self {
            Self::Redis(backend) => backend.set(key, value, ttl).await,
            Self::Memory(backend) => {
                backend.set(key, value, ttl);
                Ok(())
            }
        }
    }
}

/// Redis-backed entries with millisecond expiry.
#[derive(Clone)]
pub struct RedisBackend {
    conn: ConnectionManager,
}

impl RedisBackend {
    async fn exists(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        conn.pset_ex::<_, _, ()>(key, value, ttl.as_millis() as u64)
            .await?;
        Ok(())
    }
}

/// In-process fallback used when Redis is not configured, and by tests.
///
/// Entries carry an absolute deadline and expire lazily on read.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<DashMap<String, MemoryEntry>>,
}

struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryBackend {
    fn exists(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > Instant::now())
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Some(entry.value.clone());
            }
        }
        // Shard guard is released above; safe to take the write lock.
        self.entries
            .remove_if(key, |_, entry| entry.expires_at <= Instant::now());
        None
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        self.entries.insert(
            key.to_string(),
            MemoryEntry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
    }
}
