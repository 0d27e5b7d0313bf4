//! HTTP fetch cache.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::hypixel::{PlayerCount, WatchdogStats};
use super::minecraft::{ArticleGrid, BedrockServerStatus, JavaServerStatus, VersionManifest};
use super::mojang::MojangProfile;
use super::wiki::WikiResponse;
use super::ApiError;
use crate::cache::{Cached, KeyedCache};

/// Default TTL for generic fetches: 10 minutes.
pub const DEFAULT_FETCH_TTL: Duration = Duration::from_millis(600_000);

/// TTL for live data such as player counts: 1 minute.
pub const LIVE_TTL: Duration = Duration::from_millis(60_000);

/// TTL for slow-changing Hypixel data: 1 hour.
pub const SLOW_TTL: Duration = Duration::from_millis(3_600_000);

/// TTL for resolved player profiles: 8 hours.
pub const PROFILE_TTL: Duration = Duration::from_millis(28_800_000);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);
// The version manifest is large enough to blow the default timeout.
const LONG_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

const MOJANG_PROFILE_BASE: &str = "https://api.ashcon.app/mojang/v2/user/";
const VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";
const ARTICLE_GRID_URL: &str =
    "https://www.minecraft.net/content/minecraft-net/_jcr_content.articles.grid";
const HYPIXEL_BASE: &str = "https://api.hypixel.net/";
const WIKI_API_URL: &str = "https://minecraft.fandom.com/api.php";

/// Read-through cache for idempotent outbound GETs.
///
/// Cloning is cheap; the reqwest client and the keyed cache are both
/// internally shared.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    cache: KeyedCache,
    base: Url,
    hypixel_key: Uuid,
    mojang_base: Url,
    wiki_url: Url,
}

impl ApiClient {
    pub fn new(cache: KeyedCache, base: Url, hypixel_key: Uuid) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("Obsidion Discord Bot")
            .build()?;
        Ok(Self {
            http,
            cache,
            base,
            hypixel_key,
            mojang_base: Url::parse(MOJANG_PROFILE_BASE)?,
            wiki_url: Url::parse(WIKI_API_URL)?,
        })
    }

    #[cfg(test)]
    pub fn with_mojang_base(mut self, base: Url) -> Self {
        self.mojang_base = base;
        self
    }

    #[cfg(test)]
    pub fn with_wiki_url(mut self, url: Url) -> Self {
        self.wiki_url = url;
        self
    }

    /// Fetch `url` through the cache.
    ///
    /// A non-success status resolves to `None` and is cached for the full
    /// `ttl` like any other answer. Transport and decode failures propagate
    /// and cache nothing.
    pub async fn fetch<T>(
        &self,
        key: &str,
        url: Url,
        params: &[(&str, String)],
        ttl: Duration,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        self.fetch_inner(key, url, params, ttl, None).await
    }

    /// `fetch` with a per-request timeout override.
    pub async fn fetch_with_timeout<T>(
        &self,
        key: &str,
        url: Url,
        params: &[(&str, String)],
        ttl: Duration,
        timeout: Duration,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        self.fetch_inner(key, url, params, ttl, Some(timeout)).await
    }

    /// `fetch` against an endpoint of the configured bot API.
    pub async fn fetch_api<T>(
        &self,
        key: &str,
        endpoint: &str,
        params: &[(&str, String)],
        ttl: Duration,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        let url = self.base.join(endpoint)?;
        self.fetch(key, url, params, ttl).await
    }

    async fn fetch_inner<T>(
        &self,
        key: &str,
        url: Url,
        params: &[(&str, String)],
        ttl: Duration,
        timeout: Option<Duration>,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned + Serialize,
    {
        if let Some(entry) = self.cache.get::<T>(key).await? {
            return Ok(entry.into_option());
        }

        let mut request = self.http.get(url).query(params);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await?;
        let resolved = if response.status().is_success() {
            Cached::Present(response.json::<T>().await?)
        } else {
            debug!(key, status = %response.status(), "fetch resolved to nothing");
            Cached::Absent
        };

        self.cache.set(key, &resolved, ttl).await?;
        Ok(resolved.into_option())
    }

    /// Resolve a username or uuid to a full Mojang profile.
    ///
    /// Two cache layers: `username_{name}` maps a name to its uuid so later
    /// lookups go straight to the profile entry, and `player_{query}` holds
    /// the profile itself. An unknown player resolves to `None` and is
    /// negative-cached like any fetch.
    pub async fn mojang_player(&self, query: &str) -> Result<Option<MojangProfile>, ApiError> {
        let username_key = format!("username_{query}");
        let resolved = match self.cache.get::<String>(&username_key).await? {
            Some(Cached::Present(uuid)) => uuid,
            _ => query.to_string(),
        };

        let player_key = format!("player_{resolved}");
        let url = self.mojang_base.join(&resolved)?;
        let profile: Option<MojangProfile> =
            self.fetch(&player_key, url, &[], PROFILE_TTL).await?;

        if let Some(profile) = &profile {
            // Re-key under the canonical uuid so name-based lookups land on
            // the same entry once the username mapping is known.
            let canonical_key = format!("player_{}", profile.uuid);
            if canonical_key != player_key {
                self.cache
                    .set(&canonical_key, &Cached::Present(profile.clone()), PROFILE_TTL)
                    .await?;
            }
            self.cache
                .set(
                    &format!("username_{}", profile.username),
                    &Cached::Present(profile.uuid.to_string()),
                    PROFILE_TTL,
                )
                .await?;
        }
        Ok(profile)
    }

    /// The launcher version manifest. Key `versions`, 10 minutes.
    pub async fn version_manifest(&self) -> Result<Option<VersionManifest>, ApiError> {
        let url = Url::parse(VERSION_MANIFEST_URL)?;
        self.fetch_with_timeout("versions", url, &[], DEFAULT_FETCH_TTL, LONG_REQUEST_TIMEOUT)
            .await
    }

    /// Mojang service health map. Key `status`, 10 minutes.
    pub async fn mojang_status(&self) -> Result<Option<BTreeMap<String, String>>, ApiError> {
        self.fetch_api("status", "mojang/check", &[], DEFAULT_FETCH_TTL)
            .await
    }

    /// Java edition server status via the bot API.
    pub async fn java_server(
        &self,
        address: &str,
        port: Option<u16>,
    ) -> Result<Option<JavaServerStatus>, ApiError> {
        let key = server_key(address, port);
        let params = server_params(address, port);
        self.fetch_api(&key, "server/java", &params, DEFAULT_FETCH_TTL)
            .await
    }

    /// Bedrock edition server status via the bot API.
    pub async fn bedrock_server(
        &self,
        address: &str,
        port: Option<u16>,
    ) -> Result<Option<BedrockServerStatus>, ApiError> {
        let key = server_key(address, port);
        let params = server_params(address, port);
        self.fetch_api(&key, "server/bedrock", &params, DEFAULT_FETCH_TTL)
            .await
    }

    /// Thumbnail URL for a Java server's icon, rendered by the bot API.
    pub fn java_icon_url(&self, address: &str, port: Option<u16>) -> Result<Url, ApiError> {
        let mut url = self.base.join("server/javaicon")?;
        url.query_pairs_mut().append_pair("server", address);
        if let Some(port) = port {
            url.query_pairs_mut().append_pair("port", &port.to_string());
        }
        Ok(url)
    }

    /// Plaintext intro extract for a wiki article. Key `wiki_{query}`,
    /// 10 minutes. A query that matches no page still resolves to a body,
    /// just one without an article in it.
    pub async fn wiki(&self, query: &str) -> Result<Option<WikiResponse>, ApiError> {
        let key = format!("wiki_{query}");
        let params = [
            ("action", "query".to_string()),
            ("titles", query.replace(' ', "_")),
            ("format", "json".to_string()),
            ("formatversion", "2".to_string()),
            ("prop", "extracts".to_string()),
            ("exintro", "1".to_string()),
            ("redirects", "1".to_string()),
            ("explaintext", "1".to_string()),
        ];
        self.fetch(&key, self.wiki_url.clone(), &params, DEFAULT_FETCH_TTL)
            .await
    }

    /// The minecraft.net article grid. Key `news`, 10 minutes.
    pub async fn article_grid(&self) -> Result<Option<ArticleGrid>, ApiError> {
        let url = Url::parse(ARTICLE_GRID_URL)?;
        let params = [("tileselection", "auto".to_string())];
        self.fetch("news", url, &params, DEFAULT_FETCH_TTL).await
    }

    /// Hypixel watchdog ban statistics. Key `hypixel_watchdog`, 1 hour.
    pub async fn watchdog_stats(&self) -> Result<Option<WatchdogStats>, ApiError> {
        let url = Url::parse(HYPIXEL_BASE)?.join("watchdogstats")?;
        let params = [("key", self.hypixel_key.to_string())];
        self.fetch("hypixel_watchdog", url, &params, SLOW_TTL).await
    }

    /// Players currently on Hypixel. Key `hypixel_playercount`, 1 minute.
    pub async fn player_count(&self) -> Result<Option<PlayerCount>, ApiError> {
        let url = Url::parse(HYPIXEL_BASE)?.join("playerCount")?;
        let params = [("key", self.hypixel_key.to_string())];
        self.fetch("hypixel_playercount", url, &params, LIVE_TTL)
            .await
    }
}

fn server_key(address: &str, port: Option<u16>) -> String {
    match port {
        Some(port) => format!("server_{address}:{port}"),
        None => format!("server_{address}:default"),
    }
}

fn server_params(address: &str, port: Option<u16>) -> Vec<(&'static str, String)> {
    let mut params = vec![("server", address.to_string())];
    if let Some(port) = port {
        params.push(("port", port.to_string()));
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheBackend;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        answer: i64,
    }

    fn client(base: &str) -> ApiClient {
        ApiClient::new(
            KeyedCache::new(CacheBackend::memory()),
            Url::parse(base).unwrap(),
            Uuid::nil(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_hits_network_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "answer": 42
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server.uri());
        let url = Url::parse(&format!("{}/data", server.uri())).unwrap();
        let first: Option<Payload> = api
            .fetch("data", url.clone(), &[], DEFAULT_FETCH_TTL)
            .await
            .unwrap();
        let second: Option<Payload> = api.fetch("data", url, &[], DEFAULT_FETCH_TTL).await.unwrap();

        assert_eq!(first, Some(Payload { answer: 42 }));
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_failed_status_is_negative_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server.uri());
        let url = Url::parse(&format!("{}/broken", server.uri())).unwrap();
        let first: Option<Payload> = api
            .fetch("broken", url.clone(), &[], DEFAULT_FETCH_TTL)
            .await
            .unwrap();
        // The second call must come from the cache, not hit the server again.
        let second: Option<Payload> = api
            .fetch("broken", url, &[], DEFAULT_FETCH_TTL)
            .await
            .unwrap();

        assert_eq!(first, None);
        assert_eq!(second, None);
    }

    #[tokio::test]
    async fn test_fetch_api_joins_the_configured_base() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/server/java"))
            .and(query_param("server", "mc.example.net"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "answer": 7
            })))
            .mount(&server)
            .await;

        let api = client(&format!("{}/", server.uri()));
        let params = [("server", "mc.example.net".to_string())];
        let got: Option<Payload> = api
            .fetch_api("server_mc.example.net:default", "server/java", &params, LIVE_TTL)
            .await
            .unwrap();
        assert_eq!(got, Some(Payload { answer: 7 }));
    }

    #[tokio::test]
    async fn test_mojang_player_learns_the_username_mapping() {
        let server = MockServer::start().await;
        let uuid = "069a79f4-44e9-4726-a5be-fca90e38aaf5";
        Mock::given(method("GET"))
            .and(path("/user/Notch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "uuid": uuid,
                "username": "Notch",
                "username_history": [{"username": "Notch"}],
                "textures": {"slim": false},
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server.uri())
            .with_mojang_base(Url::parse(&format!("{}/user/", server.uri())).unwrap());

        let profile = api.mojang_player("Notch").await.unwrap().unwrap();
        assert_eq!(profile.username, "Notch");
        assert_eq!(profile.uuid.to_string(), uuid);

        // Second resolution goes name -> uuid -> canonical profile entry,
        // no request (only /user/Notch is mocked, so a refetch would fail).
        let again = api.mojang_player("Notch").await.unwrap().unwrap();
        assert_eq!(again.uuid, profile.uuid);
    }

    #[tokio::test]
    async fn test_wiki_underscores_the_title_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.php"))
            .and(query_param("titles", "Ender_Dragon"))
            .and(query_param("formatversion", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": {
                    "pages": [{
                        "title": "Ender Dragon",
                        "extract": "The ender dragon is a boss mob."
                    }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server.uri())
            .with_wiki_url(Url::parse(&format!("{}/api.php", server.uri())).unwrap());

        let first = api.wiki("Ender Dragon").await.unwrap().unwrap();
        assert_eq!(first.article().unwrap().title, "Ender Dragon");

        // Served from the cache; a second request would trip the mock.
        let second = api.wiki("Ender Dragon").await.unwrap().unwrap();
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_unknown_player_resolves_to_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/NoSuchPlayer"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let api = client(&server.uri())
            .with_mojang_base(Url::parse(&format!("{}/user/", server.uri())).unwrap());

        assert!(api.mojang_player("NoSuchPlayer").await.unwrap().is_none());
        assert!(api.mojang_player("NoSuchPlayer").await.unwrap().is_none());
    }
}
