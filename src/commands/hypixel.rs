//! Hypixel commands.

use serenity::all::{CommandInteraction, Context};

use super::{edit_reply, CommandError};
use crate::bot::embeds::{branded_embed, EmbedTone};
use crate::bot::AppState;

pub async fn watchdogstats(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let stats = state
        .api
        .watchdog_stats()
        .await?
        .ok_or(CommandError::ApiUnavailable)?;

    let embed = branded_embed(ctx, &state.config, "Watchdog Stats", EmbedTone::Default)
        .field("Total Bans", group_digits(stats.total_bans()), true)
        .field(
            "Watchdog Rolling Daily",
            group_digits(stats.watchdog_rolling_daily),
            true,
        )
        .field("Staff Total", group_digits(stats.staff_total), true)
        .field(
            "Staff Rolling Daily",
            group_digits(stats.staff_rolling_daily),
            true,
        );
    edit_reply(ctx, command, embed).await
}

pub async fn playercount(
    ctx: &Context,
    command: &CommandInteraction,
    state: &AppState,
) -> Result<(), CommandError> {
    command.defer(&ctx.http).await?;

    let count = state
        .api
        .player_count()
        .await?
        .ok_or(CommandError::ApiUnavailable)?;

    let embed = branded_embed(ctx, &state.config, "Players Online", EmbedTone::Default)
        .description(format!(
            "Total players online: {}",
            group_digits(count.player_count)
        ));
    edit_reply(ctx, command, embed).await
}

/// `1234567` -> `1,234,567`.
fn group_digits(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(4924740), "4,924,740");
        assert_eq!(group_digits(-1234), "-1,234");
    }
}
