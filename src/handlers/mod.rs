pub mod callbacks;
pub mod commands;
pub mod messages;
pub mod utils;

pub use callbacks::callback_handler;
pub use commands::{command_handler, Command};
pub use messages::message_handler;

use std::time::Duration;

use tokio::time;

use crate::bot_state::BotState;

const CLEANUP_INTERVAL: Duration = Duration::from_secs(600);

/// Фоновая очистка простаивающих сессий
pub async fn cleanup_sessions_task(state: BotState, idle_ttl: Duration) {
    let mut interval = time::interval(CLEANUP_INTERVAL);

    loop {
        interval.tick().await;
        state.cleanup_cache(idle_ttl).await;
    }
}
