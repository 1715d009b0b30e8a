//! Application handlers.
//!
//! Command handlers that orchestrate the domain policy over the ports.

pub mod turn;

pub use turn::{
    ProcessTurnCommand, ProcessTurnHandler, TurnError, TurnErrorHandler, TurnHandlerConfig,
    TurnOutcome, APOLOGY_LINES,
};
