//! Settings module - read-through caches over the settings store.
//!
//! Three independent managers, one per configuration domain:
//!
//! - `I18nManager` - guild locale and regional format
//! - `AccountManager` - linked Minecraft account per user
//! - `GuildManager` - linked server address and news channels per guild
//!
//! All follow the same protocol: a getter checks the keyed cache first,
//! falls back to the store on a miss and writes the resolved value back
//! (absence included, so a missing row is not re-queried until the entry
//! expires); a setter upserts the store row and then unconditionally
//! overwrites the cache entry. Cache and store writes are not transactional:
//! a crash between them leaves the cache stale until the TTL runs out.

mod account;
mod guild;
mod i18n;

use std::time::Duration;

use thiserror::Error;

pub use account::AccountManager;
pub use guild::GuildManager;
pub use i18n::I18nManager;

use crate::cache::CacheError;
use crate::database::StoreError;

/// How long settings entries live in the cache: 8 hours.
pub(crate) const SETTINGS_TTL: Duration = Duration::from_millis(28_800_000);

/// Locale used when a guild never configured one, and in DMs.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Errors from the settings layer.
///
/// Both kinds are infrastructure failures and propagate to the caller;
/// "not configured" is data (`None`), never an error.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
