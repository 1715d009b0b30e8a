//! Domain layer containing the bot's vocabulary and reply rules.
//!
//! # Module Organization
//!
//! - `foundation` - Value objects (utterance, scores) and validation errors
//! - `conversation` - Answers, moods, reply actions and the response policy

pub mod conversation;
pub mod foundation;
