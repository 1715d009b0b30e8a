//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error types that form the vocabulary of
//! a single bot turn.

mod errors;
mod unit_interval;
mod utterance;

pub use errors::ValidationError;
pub use unit_interval::{Confidence, SentimentScore};
pub use utterance::Utterance;
