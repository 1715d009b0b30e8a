//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `QnaService` - Knowledge-base question answering
//! - `SentimentAnalyzer` - Text polarity scoring

mod qna_service;
mod sentiment_analyzer;

pub use qna_service::{QnaError, QnaService};
pub use sentiment_analyzer::{SentimentAnalyzer, SentimentError};
