//! Minecraft version, server-status and news records.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The launcher version manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<ManifestVersion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestVersions {
    pub release: String,
    pub snapshot: String,
}

/// One manifest entry; `versions[0]` is the newest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestVersion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub time: DateTime<FixedOffset>,
    #[serde(rename = "releaseTime")]
    pub release_time: DateTime<FixedOffset>,
}

impl VersionManifest {
    pub fn find(&self, id: &str) -> Option<&ManifestVersion> {
        self.versions.iter().find(|version| version.id == id)
    }
}

/// Java server status from the bot API's `server/java` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JavaServerStatus {
    pub motd: Motd,
    pub players: Players,
    pub version: String,
    pub protocol: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motd {
    #[serde(default)]
    pub clean: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Players {
    pub online: i64,
    pub max: i64,
}

/// Bedrock server status from the bot API's `server/bedrock` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedrockServerStatus {
    #[serde(default)]
    pub motd: Vec<String>,
    pub player_count: i64,
    pub player_max: i64,
    pub protocol_version: String,
    pub protocol_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamemode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
}

/// The minecraft.net article grid feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleGrid {
    #[serde(default)]
    pub article_grid: Vec<Article>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub article_url: String,
    /// Raw feed timestamp, e.g. `17 August 2021 14:00:00 UTC`.
    pub publish_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<String>,
    pub default_tile: ArticleTile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleTile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<TileImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileImage {
    #[serde(rename = "imageURL")]
    pub image_url: String,
}

impl Article {
    /// Absolute link to the article.
    pub fn link(&self) -> String {
        format!("https://minecraft.net{}", self.article_url)
    }

    /// Absolute link to the tile image, if the feed carried one.
    pub fn image_link(&self) -> Option<String> {
        self.default_tile
            .image
            .as_ref()
            .map(|image| format!("https://minecraft.net{}", image.image_url))
    }
}
