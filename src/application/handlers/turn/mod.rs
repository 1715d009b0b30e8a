//! Turn command handlers.
//!
//! Processes one inbound message into the replies the bot sends back.

mod process_turn;
mod turn_error;

#[cfg(test)]
mod log_capture;

pub use process_turn::{
    ProcessTurnCommand, ProcessTurnHandler, TurnError, TurnHandlerConfig, TurnOutcome,
};
pub use turn_error::{TurnErrorHandler, APOLOGY_LINES};

#[cfg(test)]
pub(crate) use log_capture::CapturedLogs;
