//! Axum routes for the bot endpoints.

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{health, post_messages, BotAppState};

/// Creates routes for the bot endpoints.
///
/// - POST /api/messages - Inbound activities from the channel
/// - GET /health - Liveness probe
pub fn bot_routes() -> Router<BotAppState> {
    Router::new()
        .route("/api/messages", post(post_messages))
        .route("/health", get(health))
}

/// Complete router with state, request tracing and a per-request timeout.
///
/// The timeout is a backstop: it answers `408` with no body, so the turn
/// handler's own deadline must be shorter for users to get the apology.
pub fn bot_router(state: BotAppState, request_timeout: Duration) -> Router {
    bot_routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(request_timeout)),
    )
}

