pub mod bot_state;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod weather;
