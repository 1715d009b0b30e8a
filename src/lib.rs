//! QnA Mood Bot - Conversational knowledge-base bot with mood checks
//!
//! Answers user questions from a QnA Maker knowledge base and, when the
//! user's sentiment drops, asks how they feel before answering.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
