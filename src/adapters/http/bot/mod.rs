//! HTTP adapter for the bot messaging endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{IncomingActivity, OutgoingActivity, TurnResponse};
pub use handlers::{BotApiError, BotAppState};
pub use routes::{bot_router, bot_routes};
