//! ProcessTurn command handler.
//!
//! Runs one bot turn: keyword short-circuit, then sentiment, then the
//! knowledge base, then the response policy. Steps run strictly in that
//! order and a cancelled token stops the turn at the next await.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use super::turn_error::TurnErrorHandler;
use crate::domain::conversation::{
    top_candidate, AnswerCandidate, ResponseAction, ResponseBranch, ResponsePolicy,
};
use crate::domain::foundation::{SentimentScore, Utterance};
use crate::ports::{QnaError, QnaService, SentimentAnalyzer, SentimentError};

/// Command to process one inbound message.
#[derive(Debug, Clone)]
pub struct ProcessTurnCommand {
    /// What the user said.
    pub utterance: Utterance,
    /// Channel conversation id, for log correlation only.
    pub conversation_id: Option<String>,
}

impl ProcessTurnCommand {
    /// Creates a command for the given utterance.
    pub fn new(utterance: impl Into<Utterance>) -> Self {
        Self {
            utterance: utterance.into(),
            conversation_id: None,
        }
    }

    /// Attaches the conversation id.
    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }
}

/// Errors that end a turn without a policy reply.
#[derive(Debug, Error)]
pub enum TurnError {
    /// Knowledge-base lookup failed.
    #[error("QnA service error: {0}")]
    Qna(#[from] QnaError),

    /// Sentiment failed and the configuration requires it.
    #[error("Sentiment service error: {0}")]
    Sentiment(#[from] SentimentError),

    /// The services did not finish within the turn deadline.
    #[error("Turn exceeded its deadline of {0:?}")]
    DeadlineExceeded(Duration),

    /// The turn was cancelled between steps.
    #[error("Turn cancelled")]
    Cancelled,
}

/// Result of a completed turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// The reply to send.
    pub action: ResponseAction,
    /// Which policy rule produced it.
    pub branch: ResponseBranch,
    /// Sentiment used, if it was queried and available.
    pub sentiment: Option<SentimentScore>,
    /// Best knowledge-base answer, if any.
    pub top_answer: Option<AnswerCandidate>,
}

/// Configuration for the turn handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurnHandlerConfig {
    /// Fail the turn when sentiment is unavailable.
    pub sentiment_required: bool,
    /// Deadline for the sentiment and QnA calls together. Keep it below the
    /// HTTP request timeout so an overrun still produces the apology.
    pub turn_timeout: Option<Duration>,
}

/// Handler for ProcessTurn commands.
pub struct ProcessTurnHandler {
    qna: Arc<dyn QnaService>,
    sentiment: Arc<dyn SentimentAnalyzer>,
    error_handler: TurnErrorHandler,
    config: TurnHandlerConfig,
}

impl ProcessTurnHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(qna: Arc<dyn QnaService>, sentiment: Arc<dyn SentimentAnalyzer>) -> Self {
        Self {
            qna,
            sentiment,
            error_handler: TurnErrorHandler,
            config: TurnHandlerConfig::default(),
        }
    }

    /// Sets the handler configuration.
    pub fn with_config(mut self, config: TurnHandlerConfig) -> Self {
        self.config = config;
        self
    }

    /// Handles a turn, returning the policy outcome or the error that ended it.
    pub async fn handle(
        &self,
        cmd: ProcessTurnCommand,
        cancel: &CancellationToken,
    ) -> Result<TurnOutcome, TurnError> {
        if cancel.is_cancelled() {
            return Err(TurnError::Cancelled);
        }

        let utterance = &cmd.utterance;

        if let Some(decision) = ResponsePolicy::short_circuit(utterance) {
            tracing::debug!(branch = %decision.branch, "Mood keyword, skipping services");
            return Ok(TurnOutcome {
                action: decision.action,
                branch: decision.branch,
                sentiment: None,
                top_answer: None,
            });
        }

        let consult = self.consult_services(utterance, cancel);
        let (sentiment, top_answer) = match self.config.turn_timeout {
            Some(limit) => tokio::time::timeout(limit, consult)
                .await
                .map_err(|_| TurnError::DeadlineExceeded(limit))??,
            None => consult.await?,
        };

        if cancel.is_cancelled() {
            return Err(TurnError::Cancelled);
        }

        let decision = ResponsePolicy::decide(utterance, top_answer.as_ref(), sentiment);

        tracing::info!(
            branch = %decision.branch,
            conversation_id = cmd.conversation_id.as_deref().unwrap_or("-"),
            utterance_chars = utterance.char_count(),
            "Turn processed"
        );

        Ok(TurnOutcome {
            action: decision.action,
            branch: decision.branch,
            sentiment,
            top_answer,
        })
    }

    /// Sentiment first, then the knowledge base.
    async fn consult_services(
        &self,
        utterance: &Utterance,
        cancel: &CancellationToken,
    ) -> Result<(Option<SentimentScore>, Option<AnswerCandidate>), TurnError> {
        let sentiment = match until_cancelled(cancel, self.sentiment.score(utterance)).await? {
            Ok(score) => {
                tracing::debug!(score = %score, "Sentiment scored");
                Some(score)
            }
            Err(err) if self.config.sentiment_required => return Err(err.into()),
            Err(err) => {
                tracing::warn!(error = %err, "Sentiment unavailable, answering without mood check");
                None
            }
        };

        let answers = until_cancelled(cancel, self.qna.get_answers(utterance)).await??;
        Ok((sentiment, top_candidate(answers)))
    }

    /// Handles a turn and always produces the messages to send back.
    ///
    /// Failures go through the turn error handler, so the caller only has to
    /// deliver the returned replies. A cancelled turn yields no replies.
    pub async fn reply(
        &self,
        cmd: ProcessTurnCommand,
        cancel: &CancellationToken,
    ) -> Vec<ResponseAction> {
        match self.handle(cmd, cancel).await {
            Ok(outcome) => vec![outcome.action],
            Err(err) => self.error_handler.on_turn_error(&err),
        }
    }
}

/// Awaits `fut` unless the token fires first.
async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output, TurnError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TurnError::Cancelled),
        output = fut => Ok(output),
    }
}
