//! API module - read-through cache for outbound HTTP lookups.
//!
//! Every outbound GET goes through `ApiClient::fetch`: check the keyed
//! cache, on a miss issue one request, cache the outcome (a failed status
//! is cached as an absence for the same TTL) and return it. No retries, no
//! transient/permanent distinction; repeated calls inside the TTL window
//! never re-attempt a failed fetch.
//!
//! Response bodies are decoded once, at this boundary, into the typed
//! records in `mojang`, `minecraft`, `hypixel` and `wiki`.

mod client;
pub mod hypixel;
pub mod minecraft;
pub mod mojang;
pub mod wiki;

use thiserror::Error;

pub use client::ApiClient;

use crate::cache::CacheError;

/// Errors from the fetch layer.
///
/// Only infrastructure failures surface here; a non-success HTTP status is
/// data (`None`) so that negative caching applies to it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be decoded.
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// An endpoint path did not form a valid URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}
