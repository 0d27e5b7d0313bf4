//! Cache module - keyed TTL caching over Redis or an in-process map.
//!
//! Every read path in the bot goes through here first: settings lookups,
//! player profiles and API responses are all stored as JSON strings under
//! well-known keys, each with its own expiry.
//!
//! ## Architecture
//!
//! - `CacheBackend` - where entries live (Redis, or memory when
//!   unconfigured)
//! - `KeyedCache` - typed get/set wrapper shared across the app
//! - `Cached<T>` - value envelope distinguishing cached absence from a miss
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache = KeyedCache::new(CacheBackend::memory());
//! cache.set("locale_1", &Cached::Present("en-US"), ttl).await?;
//! let locale = cache.get::<String>("locale_1").await?;
//! ```

mod backend;
mod keyed;
mod value;

pub use backend::{CacheBackend, CacheError};
pub use keyed::KeyedCache;
pub use value::Cached;
