//! Postgres settings store.

use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::models::NewsChannels;
use super::store::StoreError;

/// Per-column accessors for the `guild` and `account` tables.
///
/// Ids are Discord snowflakes; they fit in the tables' BIGINT columns and
/// are cast at this boundary. Getters never create rows, setters upsert so
/// rows come into being on first write.
#[derive(Debug, Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    /// Connect and apply pending migrations.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Successfully connected to Postgres");
        Ok(Self { pool })
    }

    pub async fn guild_locale(&self, guild_id: u64) -> Result<Option<String>, StoreError> {
        let locale: Option<Option<String>> =
            sqlx::query_scalar("SELECT locale FROM guild WHERE id = $1")
                .bind(guild_id as i64)
                .fetch_optional(&self.pool)
                .await?;
        Ok(locale.flatten())
    }

    pub async fn set_guild_locale(
        &self,
        guild_id: u64,
        locale: Option<&str>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO guild (id, locale) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET locale = EXCLUDED.locale",
        )
        .bind(guild_id as i64)
        .bind(locale)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn guild_regional(&self, guild_id: u64) -> Result<Option<String>, StoreError> {
        let regional: Option<Option<String>> =
            sqlx::query_scalar("SELECT regional FROM guild WHERE id = $1")
                .bind(guild_id as i64)
                .fetch_optional(&self.pool)
                .await?;
        Ok(regional.flatten())
    }

    pub async fn set_guild_regional(
        &self,
        guild_id: u64,
        regional: Option<&str>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO guild (id, regional) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET regional = EXCLUDED.regional",
        )
        .bind(guild_id as i64)
        .bind(regional)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn guild_server(&self, guild_id: u64) -> Result<Option<String>, StoreError> {
        let server: Option<Option<String>> =
            sqlx::query_scalar("SELECT server FROM guild WHERE id = $1")
                .bind(guild_id as i64)
                .fetch_optional(&self.pool)
                .await?;
        Ok(server.flatten())
    }

    pub async fn set_guild_server(
        &self,
        guild_id: u64,
        server: Option<&str>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO guild (id, server) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET server = EXCLUDED.server",
        )
        .bind(guild_id as i64)
        .bind(server)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn guild_news(&self, guild_id: u64) -> Result<Option<NewsChannels>, StoreError> {
        let news: Option<Option<Json<NewsChannels>>> =
            sqlx::query_scalar("SELECT news FROM guild WHERE id = $1")
                .bind(guild_id as i64)
                .fetch_optional(&self.pool)
                .await?;
        Ok(news.flatten().map(|Json(channels)| channels))
    }

    pub async fn set_guild_news(
        &self,
        guild_id: u64,
        news: Option<&NewsChannels>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO guild (id, news) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET news = EXCLUDED.news",
        )
        .bind(guild_id as i64)
        .bind(news.map(Json))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn account_uuid(&self, user_id: u64) -> Result<Option<Uuid>, StoreError> {
        let uuid: Option<Option<Uuid>> =
            sqlx::query_scalar("SELECT uuid FROM account WHERE id = $1")
                .bind(user_id as i64)
                .fetch_optional(&self.pool)
                .await?;
        Ok(uuid.flatten())
    }

    pub async fn set_account_uuid(
        &self,
        user_id: u64,
        uuid: Option<Uuid>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO account (id, uuid) VALUES ($1, $2) \
             ON CONFLICT (id) DO UPDATE SET uuid = EXCLUDED.uuid",
        )
        .bind(user_id as i64)
        .bind(uuid)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Every configured news subscription, for the autopost task.
    pub async fn news_subscriptions(&self) -> Result<Vec<NewsChannels>, StoreError> {
        let rows: Vec<Json<NewsChannels>> =
            sqlx::query_scalar("SELECT news FROM guild WHERE news IS NOT NULL")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|Json(channels)| channels).collect())
    }
}
