//! Obsidion - Minecraft Discord bot
//!
//! Answers Minecraft slash commands from third-party APIs, with every
//! lookup going through a keyed TTL cache and per-guild settings persisted
//! in Postgres.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `cache` - Keyed TTL cache (Redis, or in-process when unconfigured)
//! - `database` - Settings rows in Postgres
//! - `settings` - Read-through caches for locale, account and guild config
//! - `api` - Read-through fetch cache over the outbound HTTP APIs
//! - `bot` - Serenity event handler, command registration, shared state
//! - `commands` - Slash-command handlers
//! - `news` - Autopost background task
//! - `utils` - Small pure helpers

mod api;
mod bot;
mod cache;
mod commands;
mod config;
mod database;
mod news;
mod settings;
mod utils;

use serenity::all::GatewayIntents;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bot::{AppState, Handler};
use cache::{CacheBackend, KeyedCache};
use config::Config;
use database::{PgSettingsStore, SettingsStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("obsidion=info,serenity=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Obsidion...");

    let config = Config::from_env();
    info!("Configuration loaded successfully");

    let backend = match &config.redis_url {
        Some(url) => CacheBackend::connect_redis(url).await?,
        None => {
            warn!("REDIS_URL not set, using the in-process cache backend");
            CacheBackend::memory()
        }
    };
    let cache = KeyedCache::new(backend);

    let store = SettingsStore::Postgres(PgSettingsStore::connect(&config.database_url).await?);

    let state = AppState::new(config, cache, store)?;

    let token = state.config.discord_token.clone();
    let intents = GatewayIntents::GUILDS;
    let mut client = serenity::Client::builder(&token, intents)
        .event_handler(Handler::new(state))
        .await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutting down...");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await?;
    Ok(())
}
