//! Slash-command registration.

use anyhow::Result;
use serenity::all::{CommandOptionType, GuildId};
use serenity::builder::{CreateCommand, CreateCommandOption};
use serenity::prelude::Context;

/// Register every command globally. Global propagation can take up to an
/// hour; use a dev guild while iterating.
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    for command in all_commands() {
        ctx.http.create_global_command(&command).await?;
    }
    Ok(())
}

/// Register every command against a single guild (development).
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    guild_id.set_commands(&ctx.http, all_commands()).await?;
    Ok(())
}

fn all_commands() -> Vec<CreateCommand> {
    vec![
        locale_command(),
        regionalformat_command(),
        account_command(),
        serverlink_command(),
        autopost_command(),
        profile_command(),
        server_command(),
        serverpe_command(),
        status_command(),
        version_command(),
        news_command(),
        wiki_command(),
        watchdogstats_command(),
        playercount_command(),
    ]
}

// Config commands

fn locale_command() -> CreateCommand {
    CreateCommand::new("locale")
        .description("Changes the bot's locale in this server.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "language_code",
                "Language code with country code included, e.g. `en-US`. Use `default` to reset.",
            )
            .required(true),
        )
}

fn regionalformat_command() -> CreateCommand {
    CreateCommand::new("regionalformat")
        .description("Changes the regional format used for dates and numbers in this server.")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "language_code",
            "Language code such as `de-DE`. Leave empty to follow the server locale.",
        ))
}

fn account_command() -> CreateCommand {
    CreateCommand::new("account")
        .description("Link your Minecraft account to your Discord account.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "link",
                "Link a Minecraft account.",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "username",
                    "Minecraft username to link to.",
                )
                .required(true),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "unlink",
            "Unlink your Minecraft account.",
        ))
}

fn serverlink_command() -> CreateCommand {
    CreateCommand::new("serverlink")
        .description("Link a Minecraft server to this Discord server.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "link",
                "Link a Minecraft server.",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "address",
                    "Server address to link to.",
                )
                .required(true),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "unlink",
            "Unlink the Minecraft server.",
        ))
}

fn autopost_command() -> CreateCommand {
    CreateCommand::new("autopost")
        .description("Autopost Minecraft news and updates.")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "setup",
                "Choose channels per news category.",
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "release",
                "Channel to post Minecraft releases in.",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "snapshot",
                "Channel to post Minecraft snapshots in.",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "article",
                "Channel to post Minecraft articles in.",
            ))
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Channel,
                "status",
                "Channel reserved for Mojang service status posts (not yet posted to).",
            )),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "view",
            "View the autopost configuration.",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "remove",
            "Remove the autopost configuration.",
        ))
}

// Info commands

fn profile_command() -> CreateCommand {
    CreateCommand::new("profile")
        .description("View a player's Minecraft UUID, username history and skin.")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "username",
            "Username of the player; defaults to your linked account.",
        ))
}

fn server_command() -> CreateCommand {
    CreateCommand::new("server")
        .description("Minecraft Java server info.")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "address",
            "Server address; defaults to the linked server.",
        ))
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "port",
            "Server port.",
        ))
}

fn serverpe_command() -> CreateCommand {
    CreateCommand::new("serverpe")
        .description("Minecraft Bedrock server info.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "address", "Server address.")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::Integer,
            "port",
            "Server port.",
        ))
}

fn status_command() -> CreateCommand {
    CreateCommand::new("status").description("Check the status of all the Mojang services.")
}

fn version_command() -> CreateCommand {
    CreateCommand::new("version")
        .description("Minecraft Java version details.")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "version",
            "A specific version id, e.g. `1.17.1`; defaults to a summary.",
        ))
}

fn news_command() -> CreateCommand {
    CreateCommand::new("news").description("The latest article on minecraft.net.")
}

fn wiki_command() -> CreateCommand {
    CreateCommand::new("wiki")
        .description("Get an article from the Minecraft wiki.")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "query", "Thing to look up.")
                .required(true),
        )
}

// Hypixel commands

fn watchdogstats_command() -> CreateCommand {
    CreateCommand::new("watchdogstats").description("Current Hypixel Watchdog statistics.")
}

fn playercount_command() -> CreateCommand {
    CreateCommand::new("playercount").description("Players currently online on Hypixel.")
}
