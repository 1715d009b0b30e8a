//! HTTP handlers for the bot messaging endpoint.
//!
//! The channel posts one activity per user turn and receives the reply
//! activities in the response body.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tokio_util::sync::CancellationToken;

use super::dto::{ErrorResponse, HealthResponse, IncomingActivity, OutgoingActivity, TurnResponse};
use crate::application::{ProcessTurnCommand, ProcessTurnHandler};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for bot handlers.
#[derive(Clone)]
pub struct BotAppState {
    pub turn_handler: Arc<ProcessTurnHandler>,
    /// Parent token; each turn runs under a child of it.
    pub shutdown: CancellationToken,
}

impl BotAppState {
    /// Creates a new BotAppState.
    pub fn new(turn_handler: Arc<ProcessTurnHandler>) -> Self {
        Self {
            turn_handler,
            shutdown: CancellationToken::new(),
        }
    }

    /// Uses the given token as the server-wide shutdown signal.
    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/messages
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/messages - Process one inbound activity.
///
/// Message activities run a turn and return its replies. Other activity
/// types (conversation updates, typing) are accepted with no replies.
///
/// # Errors
/// - 400 Bad Request: body is not a valid activity
pub async fn post_messages(
    State(state): State<BotAppState>,
    payload: Result<Json<IncomingActivity>, JsonRejection>,
) -> Result<impl IntoResponse, BotApiError> {
    let Json(activity) = payload.map_err(|e| BotApiError::BadRequest(e.body_text()))?;

    if !activity.is_message() {
        tracing::debug!(activity_type = %activity.activity_type, "Ignoring non-message activity");
        return Ok((StatusCode::OK, Json(TurnResponse { activities: Vec::new() })));
    }

    let mut cmd = ProcessTurnCommand::new(activity.utterance_text());
    if let Some(conversation_id) = activity.conversation_id() {
        cmd = cmd.with_conversation_id(conversation_id);
    }

    let cancel = state.shutdown.child_token();
    let replies = state.turn_handler.reply(cmd, &cancel).await;

    let activities = replies
        .iter()
        .map(|action| OutgoingActivity::reply_to(&activity, action))
        .collect();

    Ok((StatusCode::OK, Json(TurnResponse { activities })))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /health
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health - Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for the bot endpoints.
#[derive(Debug)]
pub enum BotApiError {
    BadRequest(String),
}

impl IntoResponse for BotApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            BotApiError::BadRequest(msg) => {
                tracing::debug!("Rejected activity: {}", msg);
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
