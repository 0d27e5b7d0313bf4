//! Serenity event handler.

use serenity::all::{ActivityData, Context, EventHandler, GuildId, Interaction, Ready};
use serenity::async_trait;
use tracing::{error, info};

use super::registration;
use super::state::AppState;
use crate::{commands, news};

pub struct Handler {
    state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "{} is connected to {} guilds",
            ready.user.name,
            ready.guilds.len()
        );

        let registered = match self.state.config.dev_guild_id {
            Some(guild_id) => {
                registration::register_guild_commands(&ctx, GuildId::new(guild_id)).await
            }
            None => registration::register_global_commands(&ctx).await,
        };
        if let Err(err) = registered {
            error!(error = %err, "failed to register slash commands");
        }

        ctx.set_activity(Some(ActivityData::watching(
            self.state.config.activity.clone(),
        )));

        let state = self.state.clone();
        let task_ctx = ctx.clone();
        tokio::spawn(async move {
            news::autopost(task_ctx, state).await;
        });
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            commands::dispatch(&ctx, command, &self.state).await;
        }
    }
}
