//! Database module - per-guild and per-user settings rows.
//!
//! Two tables, both keyed by Discord snowflake: `guild` (locale, regional
//! format, linked server, news channels) and `account` (linked Minecraft
//! uuid). Rows are created lazily on first write; getters never insert.
//!
//! `SettingsStore` dispatches between the Postgres store and an in-process
//! twin with the same semantics, used when testing.

mod memory;
mod models;
mod postgres;
mod store;

pub use memory::MemorySettingsStore;
pub use models::NewsChannels;
pub use postgres::PgSettingsStore;
pub use store::{SettingsStore, StoreError};
