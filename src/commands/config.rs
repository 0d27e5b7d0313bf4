//! Settings commands: locale, regional format, account and server links,
//! autopost channels.

use once_cell::sync::Lazy;
use regex::Regex;
use serenity::all::{CommandInteraction, Context};

use super::{
    channel_option, guild_only, reply, require_manage_guild, str_option, subcommand, CommandError,
};
use crate::bot::embeds::{branded_embed, EmbedTone};
use crate::bot::AppState;
use crate::database::NewsChannels;

static LOCALE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<lang>[A-Za-z]{2,3})-(?P<territory>[A-Za-z]{2})$").unwrap());

/// Validate a `xx-YY` language code and normalize its casing.
fn standardize_locale(code: &str) -> Result<String, CommandError> {
    let captures = LOCALE_RE
        .captures(code)
        .ok_or_else(|| CommandError::InvalidLocale(code.to_string()))?;
    Ok(format!(
        "{}-{}",
        captures["lang"].to_lowercase(),
        captures["territory"].to_uppercase()
    ))
}

pub async fn locale(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    let guild_id = guild_only(command)?;
    require_manage_guild(command)?;
    let code = str_option(&command.data.options, "language_code")
        .ok_or_else(|| CommandError::InvalidLocale(String::new()))?;

    let description = if code.eq_ignore_ascii_case("default") {
        state.i18n.set_locale(guild_id, None).await?;
        "Default locale set.".to_string()
    } else {
        let standardized = standardize_locale(code)?;
        state.i18n.set_locale(guild_id, Some(&standardized)).await?;
        format!("Locale set to `{standardized}`.")
    };

    let embed = branded_embed(ctx, &state.config, "Changing locale", EmbedTone::Info)
        .description(description);
    reply(ctx, command, embed, true).await
}

pub async fn regionalformat(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    let guild_id = guild_only(command)?;
    require_manage_guild(command)?;

    let description = match str_option(&command.data.options, "language_code") {
        None => {
            state.i18n.set_regional_format(guild_id, None).await?;
            "Regional formatting will now be based on the bot's locale in this server."
                .to_string()
        }
        Some(code) => {
            let standardized = standardize_locale(code)?;
            state
                .i18n
                .set_regional_format(guild_id, Some(&standardized))
                .await?;
            format!("Regional formatting set to `{standardized}`.")
        }
    };

    let embed = branded_embed(
        ctx,
        &state.config,
        "Changing regional format",
        EmbedTone::Info,
    )
    .description(description);
    reply(ctx, command, embed, true).await
}

pub async fn account(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    let user_id = command.user.id.get();
    match subcommand(&command.data.options) {
        Some(("link", options)) => {
            let username = str_option(options, "username").unwrap_or_default().to_string();
            let profile = state
                .api
                .mojang_player(&username)
                .await?
                .ok_or(CommandError::PlayerNotFound { username })?;
            state.accounts.set_account(user_id, Some(profile.uuid)).await?;
            let embed = branded_embed(ctx, &state.config, "Account linked", EmbedTone::Info)
                .description(format!(
                    "Your account has been linked to `{}`.",
                    profile.uuid
                ));
            reply(ctx, command, embed, true).await
        }
        Some(("unlink", _)) => {
            let description = if state.accounts.get_account(user_id).await?.is_some() {
                state.accounts.set_account(user_id, None).await?;
                "Your account has been unlinked from any Minecraft account."
            } else {
                "You don't have any account linked to your Discord account."
            };
            let embed = branded_embed(ctx, &state.config, "Account unlinked", EmbedTone::Info)
                .description(description);
            reply(ctx, command, embed, true).await
        }
        _ => Err(CommandError::UnknownCommand("account".to_string())),
    }
}

pub async fn serverlink(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    let guild_id = guild_only(command)?;
    require_manage_guild(command)?;
    match subcommand(&command.data.options) {
        Some(("link", options)) => {
            let address = str_option(options, "address")
                .ok_or(CommandError::NoServerProvided)?
                .to_string();
            state.guilds.set_server(guild_id, Some(&address)).await?;
            let embed = branded_embed(ctx, &state.config, "Server linked", EmbedTone::Info)
                .description(format!("Your server has been linked to `{address}`."));
            reply(ctx, command, embed, true).await
        }
        Some(("unlink", _)) => {
            let description = if state.guilds.get_server(guild_id).await?.is_some() {
                state.guilds.set_server(guild_id, None).await?;
                "Your server has been unlinked from any Minecraft server."
            } else {
                "You don't have any server linked to your Discord server."
            };
            let embed = branded_embed(ctx, &state.config, "Server unlinked", EmbedTone::Info)
                .description(description);
            reply(ctx, command, embed, true).await
        }
        _ => Err(CommandError::UnknownCommand("serverlink".to_string())),
    }
}

pub async fn autopost(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    let guild_id = guild_only(command)?;
    require_manage_guild(command)?;
    match subcommand(&command.data.options) {
        Some(("setup", options)) => {
            let config = NewsChannels {
                release: channel_option(options, "release"),
                snapshot: channel_option(options, "snapshot"),
                article: channel_option(options, "article"),
                status: channel_option(options, "status"),
            };
            state.guilds.set_news(guild_id, Some(&config)).await?;
            let embed = news_embed(
                ctx,
                state,
                "Autopost configuration updated",
                "Your server's autopost configuration has been updated.",
                &config,
            );
            reply(ctx, command, embed, true).await
        }
        Some(("view", _)) => match state.guilds.get_news(guild_id).await? {
            Some(config) => {
                let embed = news_embed(
                    ctx,
                    state,
                    "Autopost configuration",
                    "Your server's autopost configuration is as follows:",
                    &config,
                );
                reply(ctx, command, embed, true).await
            }
            None => {
                let embed = branded_embed(
                    ctx,
                    &state.config,
                    "Autopost configuration not set",
                    EmbedTone::Warning,
                )
                .description("You don't have any autopost configuration set.");
                reply(ctx, command, embed, true).await
            }
        },
        Some(("remove", _)) => {
            state.guilds.set_news(guild_id, None).await?;
            let embed = branded_embed(
                ctx,
                &state.config,
                "Autopost configuration removed",
                EmbedTone::Info,
            )
            .description("Your server's autopost configuration has been removed.");
            reply(ctx, command, embed, true).await
        }
        _ => Err(CommandError::UnknownCommand("autopost".to_string())),
    }
}

fn news_embed(
    ctx: &Context,
    state: &AppState,
    title: &str,
    description: &str,
    config: &NewsChannels,
) -> serenity::builder::CreateEmbed {
    let mut embed = branded_embed(ctx, &state.config, title, EmbedTone::Info)
        .description(description.to_string());
    for (name, channel) in [
        ("Release channel", config.release),
        ("Snapshot channel", config.snapshot),
        ("Article channel", config.article),
        ("Status channel", config.status),
    ] {
        if let Some(id) = channel {
            embed = embed.field(name, format!("<#{id}>"), false);
        }
    }
    embed
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_standardize_locale() {
        assert_eq!(standardize_locale("en-US").unwrap(), "en-US");
        assert_eq!(standardize_locale("DE-de").unwrap(), "de-DE");
        assert!(standardize_locale("english").is_err());
        assert!(standardize_locale("en").is_err());
        assert!(standardize_locale("en-USA").is_err());
    }
}
