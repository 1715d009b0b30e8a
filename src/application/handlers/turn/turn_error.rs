//! Turn error handler.
//!
//! Last stop for a failed turn: logs the failure once and tells the user
//! something went wrong. Configuration, network, and service errors all get
//! the same two lines.

use super::process_turn::TurnError;
use crate::domain::conversation::ResponseAction;

/// The fixed lines sent after a failed turn, in order.
pub const APOLOGY_LINES: [&str; 2] = [
    "Sorry, it looks like something went wrong.",
    "To run this sample make sure you have the QnA model deployed.",
];

/// Handler for failed turns.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnErrorHandler;

impl TurnErrorHandler {
    /// Logs the error and returns the replies for the user.
    ///
    /// A cancelled turn is not reported to the user.
    pub fn on_turn_error(&self, error: &TurnError) -> Vec<ResponseAction> {
        if matches!(error, TurnError::Cancelled) {
            tracing::info!("Turn cancelled before a reply was produced");
            return Vec::new();
        }

        tracing::error!(error = %error, "Exception caught during turn");

        APOLOGY_LINES.iter().map(|line| ResponseAction::text(*line)).collect()
    }
}
