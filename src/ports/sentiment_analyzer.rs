//! Sentiment Analyzer Port - Interface for text polarity scoring.

use async_trait::async_trait;

use crate::domain::foundation::{SentimentScore, Utterance};

/// Port for sentiment scoring.
///
/// Implementations must return an error rather than guess when the service
/// does not produce a usable score.
#[async_trait]
pub trait SentimentAnalyzer: Send + Sync {
    /// Scores the utterance in `[0, 1]`, higher meaning more positive.
    async fn score(&self, utterance: &Utterance) -> Result<SentimentScore, SentimentError>;
}

/// Sentiment service errors.
#[derive(Debug, thiserror::Error)]
pub enum SentimentError {
    /// Service answered with a non-success status.
    #[error("sentiment service returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Response was empty or did not contain a valid score.
    #[error("malformed sentiment response: {0}")]
    MalformedResponse(String),

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl SentimentError {
    /// Creates a malformed response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }
}
