//! QnA Service Port - Interface for knowledge-base question answering.
//!
//! The bot only needs ranked answers for an utterance; how the knowledge
//! base is hosted, indexed, or authenticated is the adapter's business.

use async_trait::async_trait;

use crate::domain::conversation::AnswerCandidate;
use crate::domain::foundation::Utterance;

/// Port for knowledge-base lookups.
#[async_trait]
pub trait QnaService: Send + Sync {
    /// Returns candidate answers, best first.
    ///
    /// An empty list means nothing cleared the service's confidence
    /// threshold; it is not an error.
    async fn get_answers(&self, utterance: &Utterance) -> Result<Vec<AnswerCandidate>, QnaError>;
}

/// QnA service errors.
#[derive(Debug, thiserror::Error)]
pub enum QnaError {
    /// Endpoint key was rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The knowledge base id is unknown to the service.
    #[error("knowledge base not found: {0}")]
    KnowledgeBaseNotFound(String),

    /// Rate limited by the service.
    #[error("rate limited")]
    RateLimited,

    /// Service returned a server error.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Service answered with a status we do not handle.
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, for the log.
        body: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Failed to parse the service response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl QnaError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
