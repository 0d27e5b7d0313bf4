//! Branded embed builder.

use serenity::all::{Colour, Context, Timestamp};
use serenity::builder::{CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter};

use crate::config::Config;

const SITE_URL: &str = "https://obsidion-dev.com";
const FOOTER: &str = "obsidion-dev.com";

/// Tint chosen per reply kind; `Default` uses the configured color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedTone {
    Default,
    Error,
    Info,
    Success,
    Warning,
}

impl EmbedTone {
    fn colour(self, default: u32) -> Colour {
        match self {
            Self::Error => Colour::RED,
            Self::Info => Colour::BLUE,
            Self::Success => Colour::DARK_GREEN,
            Self::Warning => Colour::ORANGE,
            Self::Default => Colour::new(default),
        }
    }
}

/// Base embed with the bot's author line, footer, thumbnail and timestamp.
/// Callers add description and fields on top.
pub fn branded_embed(ctx: &Context, config: &Config, title: &str, tone: EmbedTone) -> CreateEmbed {
    let icon = ctx.cache.current_user().face();
    CreateEmbed::new()
        .author(
            CreateEmbedAuthor::new(title)
                .url(SITE_URL)
                .icon_url(icon.clone()),
        )
        .footer(CreateEmbedFooter::new(FOOTER))
        .thumbnail(icon)
        .timestamp(Timestamp::now())
        .colour(tone.colour(config.embed_color))
}
