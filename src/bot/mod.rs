//! Bot module - Discord gateway wiring.
//!
//! `Handler` implements the serenity event handler: on `ready` it registers
//! the slash commands, sets the activity and spawns the news autopost task;
//! each command interaction is dispatched to `crate::commands`. `AppState`
//! carries every service handle and is cloned wherever it is needed - no
//! globals.

pub mod embeds;
mod handler;
mod registration;
mod state;

pub use handler::Handler;
pub use state::AppState;
