//! Slash-command handlers.
//!
//! One file per command family, mirroring the upstream APIs involved:
//! `config` (settings writes), `info` (Mojang and server lookups),
//! `hypixel`. `dispatch` routes an interaction by name and translates a
//! `CommandError` into an ephemeral error embed.

mod config;
mod error;
mod hypixel;
mod info;

use serenity::all::{CommandDataOption, CommandDataOptionValue, CommandInteraction, Context};
use serenity::builder::{
    CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse,
};
use tracing::{debug, error};

pub use error::CommandError;

use crate::bot::embeds::{branded_embed, EmbedTone};
use crate::bot::AppState;

/// Route a command interaction to its handler and translate failures.
pub async fn dispatch(ctx: &Context, command: CommandInteraction, state: &AppState) {
    let name = command.data.name.clone();
    let result = match name.as_str() {
        "locale" => config::locale(ctx, &command, state).await,
        "regionalformat" => config::regionalformat(ctx, &command, state).await,
        "account" => config::account(ctx, &command, state).await,
        "serverlink" => config::serverlink(ctx, &command, state).await,
        "autopost" => config::autopost(ctx, &command, state).await,
        "profile" => info::profile(ctx, &command, state).await,
        "server" => info::server(ctx, &command, state).await,
        "serverpe" => info::serverpe(ctx, &command, state).await,
        "status" => info::status(ctx, &command, state).await,
        "version" => info::version(ctx, &command, state).await,
        "news" => info::news(ctx, &command, state).await,
        "wiki" => info::wiki(ctx, &command, state).await,
        "watchdogstats" => hypixel::watchdogstats(ctx, &command, state).await,
        "playercount" => hypixel::playercount(ctx, &command, state).await,
        _ => Err(CommandError::UnknownCommand(name.clone())),
    };

    if let Err(err) = result {
        if err.is_internal() {
            error!(command = %name, error = %err, "command failed");
        } else {
            debug!(command = %name, error = %err, "command rejected");
        }
        let embed = branded_embed(ctx, &state.config, &err.title(), EmbedTone::Error)
            .description(err.description());
        send_error(ctx, &command, embed).await;
    }
}

/// Error replies have to work both before and after a `defer`.
async fn send_error(ctx: &Context, command: &CommandInteraction, embed: CreateEmbed) {
    let message = CreateInteractionResponseMessage::new()
        .embed(embed.clone())
        .ephemeral(true);
    if command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
        .is_err()
    {
        let _ = command
            .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
            .await;
    }
}

/// Reply immediately with a single embed.
pub(crate) async fn reply(
    ctx: &Context,
    command: &CommandInteraction,
    embed: CreateEmbed,
    ephemeral: bool,
) -> Result<(), CommandError> {
    let message = CreateInteractionResponseMessage::new()
        .embed(embed)
        .ephemeral(ephemeral);
    command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await?;
    Ok(())
}

/// Finish a deferred interaction with a single embed.
pub(crate) async fn edit_reply(
    ctx: &Context,
    command: &CommandInteraction,
    embed: CreateEmbed,
) -> Result<(), CommandError> {
    command
        .edit_response(&ctx.http, EditInteractionResponse::new().embed(embed))
        .await?;
    Ok(())
}

pub(crate) fn guild_only(command: &CommandInteraction) -> Result<u64, CommandError> {
    command
        .guild_id
        .map(|id| id.get())
        .ok_or(CommandError::GuildOnly)
}

pub(crate) fn require_manage_guild(command: &CommandInteraction) -> Result<(), CommandError> {
    let allowed = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.manage_guild());
    if allowed {
        Ok(())
    } else {
        Err(CommandError::MissingPermission)
    }
}

pub(crate) fn str_option<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

pub(crate) fn int_option(options: &[CommandDataOption], name: &str) -> Option<i64> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_i64())
}

pub(crate) fn channel_option(options: &[CommandDataOption], name: &str) -> Option<u64> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_channel_id())
        .map(|id| id.get())
}

/// The invoked subcommand and its nested options.
pub(crate) fn subcommand(
    options: &[CommandDataOption],
) -> Option<(&str, &[CommandDataOption])> {
    options.first().and_then(|option| match &option.value {
        CommandDataOptionValue::SubCommand(nested) => {
            Some((option.name.as_str(), nested.as_slice()))
        }
        _ => None,
    })
}
