//! Minecraft news autoposting.
//!
//! A 10-minute loop spawned from `ready`: reads every guild's news
//! subscription, buckets the configured channels per category and posts
//! fresh releases, snapshots and articles. Watermarks live in the task, so
//! a restart starts from "now" rather than replaying a backlog.

use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serenity::all::{ChannelId, Context, Timestamp};
use serenity::builder::{CreateEmbed, CreateEmbedAuthor, CreateMessage};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::api::minecraft::{Article, ManifestVersion};
use crate::bot::AppState;
use crate::utils::parse_article_date;

const CYCLE: Duration = Duration::from_secs(600);
const MOJANG_ICON: &str = "https://www.minecraft.net/etc.clientlibs/minecraft\
/clientlibs/main/resources/img/menu/menu-buy--reversed.gif";

pub async fn autopost(ctx: Context, state: AppState) {
    info!("news autopost task started");
    let mut ticker = interval(CYCLE);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut marks = Watermarks::new();
    loop {
        ticker.tick().await;
        if let Err(err) = cycle(&ctx, &state, &mut marks).await {
            warn!(error = %err, "news autopost cycle failed");
        }
    }
}

/// Last content seen, kept in-task.
struct Watermarks {
    version_time: DateTime<Utc>,
    article_time: DateTime<Utc>,
    article_url: String,
}

impl Watermarks {
    fn new() -> Self {
        Self {
            version_time: Utc::now(),
            article_time: Utc::now(),
            article_url: String::new(),
        }
    }
}

/// Subscribed channel ids per news category.
#[derive(Default)]
struct Buckets {
    release: Vec<u64>,
    snapshot: Vec<u64>,
    article: Vec<u64>,
}

async fn cycle(ctx: &Context, state: &AppState, marks: &mut Watermarks) -> Result<()> {
    let mut buckets = Buckets::default();
    for subscription in state.store.news_subscriptions().await? {
        buckets.release.extend(subscription.release);
        buckets.snapshot.extend(subscription.snapshot);
        buckets.article.extend(subscription.article);
    }

    // Content checks still run with no subscribers so the watermarks keep
    // moving and a new subscriber never receives a backlog.
    if let Some(manifest) = state.api.version_manifest().await? {
        if let Some(latest) = manifest.versions.first() {
            let time = latest.release_time.to_utc();
            if time > marks.version_time {
                marks.version_time = time;
                let targets = if latest.kind == "release" {
                    &buckets.release
                } else {
                    &buckets.snapshot
                };
                deliver(ctx, version_embed(state, latest, time), targets).await;
            }
        }
    }

    if let Some(grid) = state.api.article_grid().await? {
        if let Some(latest) = grid.article_grid.first() {
            let time = parse_article_date(&latest.publish_date);
            if let Some(published) = time {
                if published > marks.article_time && latest.article_url != marks.article_url {
                    marks.article_time = published;
                    marks.article_url = latest.article_url.clone();
                    deliver(ctx, article_embed(state, latest, time), &buckets.article).await;
                }
            }
        }
    }

    Ok(())
}

fn version_embed(state: &AppState, version: &ManifestVersion, time: DateTime<Utc>) -> CreateEmbed {
    let headline = if version.kind == "release" {
        "New Minecraft Java Edition Release"
    } else {
        "New Minecraft Java Edition Snapshot"
    };
    let wiki = format!("https://minecraft.fandom.com/Java_Edition_{}", version.id);
    CreateEmbed::new()
        .author(
            CreateEmbedAuthor::new(headline)
                .url(wiki.clone())
                .icon_url(MOJANG_ICON),
        )
        .colour(state.config.embed_color)
        .field("Name", version.id.clone(), true)
        .field("Package URL", format!("[Package URL]({})", version.url), true)
        .field("Minecraft Wiki", format!("[Minecraft Wiki]({wiki})"), true)
        .timestamp(Timestamp::from_unix_timestamp(time.timestamp()).unwrap_or_else(|_| Timestamp::now()))
}

fn article_embed(state: &AppState, article: &Article, time: Option<DateTime<Utc>>) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .author(
            CreateEmbedAuthor::new("New Article on Minecraft.net")
                .url(article.link())
                .icon_url(MOJANG_ICON),
        )
        .colour(state.config.embed_color)
        .url(article.link());
    if let Some(title) = &article.default_tile.title {
        embed = embed.title(title.clone());
    }
    if let Some(sub_header) = &article.default_tile.sub_header {
        embed = embed.description(sub_header.clone());
    }
    if let Some(image) = article.image_link() {
        embed = embed.image(image);
    }
    if let Some(category) = &article.primary_category {
        embed = embed.field("Category", category.clone(), true);
    }
    if let Some(time) = time {
        embed = embed
            .timestamp(Timestamp::from_unix_timestamp(time.timestamp()).unwrap_or_else(|_| Timestamp::now()));
    }
    embed
}

/// Fan the embed out to every subscribed channel; a failed send is logged
/// and never fails the cycle.
async fn deliver(ctx: &Context, embed: CreateEmbed, channels: &[u64]) {
    if channels.is_empty() {
        return;
    }
    debug!(count = channels.len(), "posting news update");
    let sends = channels.iter().map(|&id| {
        let message = CreateMessage::new().embed(embed.clone());
        async move { (id, ChannelId::new(id).send_message(&ctx.http, message).await) }
    });
    for (channel, result) in join_all(sends).await {
        if let Err(err) = result {
            warn!(channel, error = %err, "failed to post news update");
        }
    }
}
