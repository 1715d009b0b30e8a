//! HTTP adapters - REST API implementations.

pub mod bot;

pub use bot::{bot_router, BotAppState};
