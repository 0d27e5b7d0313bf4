//! Command-level errors and their user-facing translation.

use thiserror::Error;

use crate::api::ApiError;
use crate::cache::CacheError;
use crate::settings::SettingsError;

/// Everything a command handler can fail with.
///
/// Domain kinds render as friendly error embeds; infrastructure kinds are
/// logged and shown as a generic failure.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("player not found: {username}")]
    PlayerNotFound { username: String },

    #[error("{name} not found: {search}")]
    NotFound { name: String, search: String },

    #[error("no account linked")]
    AccountNotLinked,

    #[error("no server provided")]
    NoServerProvided,

    #[error("server unavailable: {address}")]
    ServerUnavailable { address: String },

    #[error("invalid language code: {0}")]
    InvalidLocale(String),

    #[error("guild-only command used outside a guild")]
    GuildOnly,

    #[error("missing manage-server permission")]
    MissingPermission,

    #[error("upstream api unreachable")]
    ApiUnavailable,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Discord(#[from] serenity::Error),
}

impl CommandError {
    /// True for failures worth an operator's attention rather than the
    /// user's.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Settings(_)
                | Self::Cache(_)
                | Self::Api(_)
                | Self::Discord(_)
                | Self::UnknownCommand(_)
        )
    }

    pub fn title(&self) -> String {
        match self {
            Self::PlayerNotFound { .. } => "Invalid Username!".to_string(),
            Self::NotFound { name, .. } => format!("Could not find {name}!"),
            Self::AccountNotLinked => "No username provided!".to_string(),
            Self::NoServerProvided => "No server provided!".to_string(),
            Self::ServerUnavailable { .. } => "Server Unavailable!".to_string(),
            Self::InvalidLocale(_) => "Invalid language code!".to_string(),
            Self::GuildOnly => "Server only command!".to_string(),
            Self::MissingPermission => "Missing permission!".to_string(),
            Self::ApiUnavailable => "API timeout!".to_string(),
            _ => "Something went wrong!".to_string(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::PlayerNotFound { username } => format!(
                "The username you provided, `{username}`, is not a valid username!\n\n\
                 Click [here](https://namemc.com/search?q={username}) if you'd like \
                 to search NameMC."
            ),
            Self::NotFound { name, search } => format!(
                "The {name} `{search}` could not be found, please check it is \
                 spelt correctly."
            ),
            Self::AccountNotLinked => "You haven't provided a username! Either specify a \
                 username, or link your account so you don't have to type your username \
                 every time! /account link"
                .to_string(),
            Self::NoServerProvided => "You haven't provided a server! Either specify a \
                 server, or link your Minecraft server to your Discord server so you \
                 don't have to type your server every time! /serverlink link"
                .to_string(),
            Self::ServerUnavailable { address } => format!(
                "The server `{address}` is currently offline or not responding. \
                 Please check that you provided the correct address and port or try \
                 again later."
            ),
            Self::InvalidLocale(_) => "Invalid language code. Use format: `en-US`".to_string(),
            Self::GuildOnly => "This command can only be used in a server.".to_string(),
            Self::MissingPermission => {
                "You need the Manage Server permission to use this command.".to_string()
            }
            Self::ApiUnavailable => {
                "Looks like the api we use cannot be reached, please try again later."
                    .to_string()
            }
            _ => "An unexpected error occurred, please try again later.".to_string(),
        }
    }
}
