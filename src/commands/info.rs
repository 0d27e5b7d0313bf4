//! Lookup commands: player profiles, server status, Mojang services,
//! versions and news.

use serenity::all::{CommandInteraction, Context};
use serenity::builder::CreateEmbedFooter;

use super::{edit_reply, int_option, str_option, CommandError};
use crate::bot::embeds::{branded_embed, EmbedTone};
use crate::bot::AppState;
use crate::utils::{
    default_skin_variant, format_regional_date, parse_article_date, split_server_address,
};

const UNKNOWN_SERVER_ICON: &str = "https://media.discordapp.net/attachments/493764139290984459/602058959284863051/unknown.png";
const WIKIMEDIA_ICON: &str = "https://upload.wikimedia.org/wikipedia/commons/thumb/5/53\
/Wikimedia-logo.png/600px-Wikimedia-logo.png";

// Embed descriptions cap at 4096; leave room for the read-more link.
const WIKI_EXTRACT_LIMIT: usize = 1500;

pub async fn profile(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let query = match str_option(&command.data.options, "username") {
        Some(username) => username.to_string(),
        None => state
            .accounts
            .get_account(command.user.id.get())
            .await?
            .ok_or(CommandError::AccountNotLinked)?
            .to_string(),
    };
    let profile = state
        .api
        .mojang_player(&query)
        .await?
        .ok_or(CommandError::PlayerNotFound { username: query })?;

    let uuid = profile.uuid;
    let mut name_history = String::new();
    for (index, change) in profile.username_history.iter().enumerate().skip(1).rev() {
        let date = change
            .changed_at
            .map(|at| at.format("%b %d, %Y").to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        name_history.push_str(&format!(
            "**{}.** `{}` - {}\n",
            index + 1,
            change.username,
            date
        ));
    }
    if let Some(first) = profile.username_history.first() {
        name_history.push_str(&format!("**1.** `{}` - First Username", first.username));
    }

    let title = format!("Minecraft profile for {}", profile.username);
    let mut embed = branded_embed(ctx, &state.config, &title, EmbedTone::Default)
        .description("Profile Information")
        .field(
            "Account",
            format!(
                "Full UUID: `{uuid}`\nShort UUID: `{}`",
                profile.short_uuid()
            ),
            false,
        )
        .field(
            "Textures",
            format!(
                "Skin: [Open Skin](https://visage.surgeplay.com/skin/512/{uuid})\n\
                 Skin Type: `{}`\n\
                 Skin History: [link](https://mcskinhistory.com/player/{})\n\
                 Slim: `{}`\nCustom: `{}`\nCape: `{}`",
                default_skin_variant(&uuid),
                profile.username,
                profile.textures.slim,
                profile.textures.custom,
                profile.textures.cape.is_some(),
            ),
            true,
        )
        .field(
            "Information",
            format!(
                "Username Changes: `{}`\nNamemc: [link](https://namemc.com/profile/{uuid})\n\
                 Legacy: `{}`\nDemo: `{}`",
                profile.name_changes(),
                profile.legacy,
                profile.demo,
            ),
            true,
        )
        .thumbnail(format!("https://visage.surgeplay.com/bust/{uuid}"));
    if !name_history.is_empty() {
        embed = embed.field("Name History", name_history, false);
    }
    edit_reply(ctx, command, embed).await
}

pub async fn server(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let mut address = str_option(&command.data.options, "address").map(str::to_string);
    if address.is_none() {
        if let Some(guild_id) = command.guild_id {
            address = state.guilds.get_server(guild_id.get()).await?;
        }
    }
    let address = address.ok_or(CommandError::NoServerProvided)?;
    let (host, inline_port) =
        split_server_address(&address).ok_or(CommandError::NoServerProvided)?;
    let port = inline_port.or_else(|| {
        int_option(&command.data.options, "port").and_then(|value| u16::try_from(value).ok())
    });

    let status = state
        .api
        .java_server(host, port)
        .await?
        .ok_or_else(|| CommandError::ServerUnavailable {
            address: address.clone(),
        })?;

    let thumbnail = if status.icon.is_some() {
        state.api.java_icon_url(host, port)?.to_string()
    } else {
        UNKNOWN_SERVER_ICON.to_string()
    };
    let embed = branded_embed(
        ctx,
        &state.config,
        &format!("Java Server: {host}"),
        EmbedTone::Default,
    )
    .description(status.motd.clean.first().cloned().unwrap_or_default())
    .field(
        "Players",
        format!(
            "Online: `{}`\nMaximum: `{}`",
            status.players.online, status.players.max
        ),
        true,
    )
    .field(
        "Version",
        format!(
            "Java Edition\nRunning: `{}`\nProtocol: `{}`",
            status.version, status.protocol
        ),
        true,
    )
    .thumbnail(thumbnail);
    edit_reply(ctx, command, embed).await
}

pub async fn serverpe(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let address = str_option(&command.data.options, "address")
        .ok_or(CommandError::NoServerProvided)?
        .to_string();
    let (host, inline_port) =
        split_server_address(&address).ok_or(CommandError::NoServerProvided)?;
    let port = inline_port.or_else(|| {
        int_option(&command.data.options, "port").and_then(|value| u16::try_from(value).ok())
    });

    let status = state
        .api
        .bedrock_server(host, port)
        .await?
        .ok_or_else(|| CommandError::ServerUnavailable {
            address: address.clone(),
        })?;

    let mut embed = branded_embed(
        ctx,
        &state.config,
        &format!("Bedrock Server: {host}"),
        EmbedTone::Default,
    )
    .description("Server Information")
    .field("Description", status.motd.join("\n"), false)
    .field(
        "Players",
        format!(
            "Online: `{}`\nMaximum: `{}`",
            status.player_count, status.player_max
        ),
        true,
    )
    .field(
        "Version",
        format!(
            "Bedrock Edition\nRunning: `{}`\nProtocol: `{}`",
            status.protocol_version, status.protocol_name
        ),
        false,
    );
    if let Some(gamemode) = &status.gamemode {
        let latency = status
            .latency
            .map(|ms| format!("{ms:.0}ms"))
            .unwrap_or_else(|| "unknown".to_string());
        embed = embed.field(
            "Info",
            format!("Gamemode: `{gamemode}`\nLatency: `{latency}`"),
            true,
        );
    }
    edit_reply(ctx, command, embed).await
}

pub async fn status(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let services = state
        .api
        .mojang_status()
        .await?
        .ok_or(CommandError::ApiUnavailable)?;

    let mut lines = String::new();
    for (service, health) in &services {
        if health == "green" {
            lines.push_str(&format!(
                ":green_heart: - {service}: **This service is healthy.**\n"
            ));
        } else {
            lines.push_str(&format!(
                ":heart: - {service}: **This service is offline.**\n"
            ));
        }
    }

    let embed = branded_embed(
        ctx,
        &state.config,
        "Minecraft Service Status",
        EmbedTone::Default,
    )
    .field("Minecraft Services:", lines, false);
    edit_reply(ctx, command, embed).await
}

pub async fn version(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let manifest = state
        .api
        .version_manifest()
        .await?
        .ok_or(CommandError::ApiUnavailable)?;
    let regional = state
        .i18n
        .get_regional_format(command.guild_id.map(|id| id.get()))
        .await?;

    let embed = match str_option(&command.data.options, "version") {
        Some(id) => {
            let entry = manifest.find(id).ok_or_else(|| CommandError::NotFound {
                name: "version".to_string(),
                search: id.to_string(),
            })?;
            branded_embed(
                ctx,
                &state.config,
                &format!("Minecraft {}", entry.id),
                EmbedTone::Default,
            )
            .field("Type", format!("`{}`", entry.kind), true)
            .field(
                "Released",
                format_regional_date(entry.release_time.to_utc(), &regional),
                true,
            )
            .field(
                "Links",
                format!(
                    "[Package]({})\n[Minecraft Wiki](https://minecraft.fandom.com/Java_Edition_{})",
                    entry.url, entry.id
                ),
                false,
            )
        }
        None => branded_embed(
            ctx,
            &state.config,
            "Minecraft Java versions",
            EmbedTone::Default,
        )
        .field("Latest release", format!("`{}`", manifest.latest.release), true)
        .field(
            "Latest snapshot",
            format!("`{}`", manifest.latest.snapshot),
            true,
        )
        .field(
            "Known versions",
            format!("`{}`", manifest.versions.len()),
            true,
        ),
    };
    edit_reply(ctx, command, embed).await
}

pub async fn wiki(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let query = str_option(&command.data.options, "query")
        .unwrap_or_default()
        .to_string();
    let response = state
        .api
        .wiki(&query)
        .await?
        .ok_or(CommandError::ApiUnavailable)?;
    let page = response.article().ok_or_else(|| CommandError::NotFound {
        name: "article".to_string(),
        search: query,
    })?;

    let url = page.link();
    let extract = page
        .extract
        .as_deref()
        .unwrap_or_default()
        .trim()
        .replace('\n', "\n\n");
    let embed = branded_embed(ctx, &state.config, &page.title, EmbedTone::Default)
        .url(url.clone())
        .description(wiki_description(&extract, &url))
        .footer(CreateEmbedFooter::new("Information provided by Wikimedia").icon_url(WIKIMEDIA_ICON));
    edit_reply(ctx, command, embed).await
}

pub async fn news(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let grid = state
        .api
        .article_grid()
        .await?
        .ok_or(CommandError::ApiUnavailable)?;
    let latest = grid
        .article_grid
        .first()
        .ok_or(CommandError::ApiUnavailable)?;
    let regional = state
        .i18n
        .get_regional_format(command.guild_id.map(|id| id.get()))
        .await?;

    let title = latest
        .default_tile
        .title
        .clone()
        .unwrap_or_else(|| "New Article on Minecraft.net".to_string());
    let mut embed = branded_embed(ctx, &state.config, &title, EmbedTone::Default)
        .url(latest.link());
    if let Some(sub_header) = &latest.default_tile.sub_header {
        embed = embed.description(sub_header.clone());
    }
    if let Some(image) = latest.image_link() {
        embed = embed.image(image);
    }
    if let Some(category) = &latest.primary_category {
        embed = embed.field("Category", category.clone(), true);
    }
    if let Some(published) = parse_article_date(&latest.publish_date) {
        embed = embed.field(
            "Publish Date",
            format_regional_date(published, &regional),
            true,
        );
    }
    edit_reply(ctx, command, embed).await
}

/// Trim an article extract to the embed-friendly length, appending a
/// read-more link when it was cut.
fn wiki_description(extract: &str, url: &str) -> String {
    if extract.chars().count() <= WIKI_EXTRACT_LIMIT {
        return extract.to_string();
    }
    let cut: String = extract.chars().take(WIKI_EXTRACT_LIMIT).collect();
    format!("{}... [(read more)]({url})", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_extract_passes_through() {
        assert_eq!(
            wiki_description("A creeper is a common hostile mob.", "https://example.net"),
            "A creeper is a common hostile mob."
        );
    }

    #[test]
    fn test_long_extract_is_cut_with_a_read_more_link() {
        let extract = "a".repeat(WIKI_EXTRACT_LIMIT + 100);
        let description = wiki_description(&extract, "https://minecraft.fandom.com/Creeper");
        assert!(description.starts_with(&"a".repeat(WIKI_EXTRACT_LIMIT)));
        assert!(description.ends_with("... [(read more)](https://minecraft.fandom.com/Creeper)"));
        assert!(!description.contains(&"a".repeat(WIKI_EXTRACT_LIMIT + 1)));
    }

    #[test]
    fn test_cut_lands_on_a_char_boundary() {
        // Multi-byte text must not panic at the cut point.
        let extract = "ü".repeat(WIKI_EXTRACT_LIMIT + 10);
        let description = wiki_description(&extract, "https://example.net");
        assert!(description.contains("(read more)"));
    }
}
