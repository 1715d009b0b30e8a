//! Mock QnA Service for testing.
//!
//! Returns queued answer lists or injected errors and records every
//! utterance it was asked about, so tests can assert that a turn did or did
//! not reach the knowledge base.
//!
//! # Example
//!
//! ```ignore
//! let qna = MockQnaService::new().with_answer("We open at 9.", 0.9);
//! let answers = qna.get_answers(&Utterance::new("hours?")).await?;
//! assert_eq!(qna.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::conversation::AnswerCandidate;
use crate::domain::foundation::{Confidence, Utterance};
use crate::ports::{QnaError, QnaService};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockQnaResponse {
    /// Return these candidates.
    Answers(Vec<AnswerCandidate>),
    /// Return an error.
    Error(MockQnaError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockQnaError {
    AuthenticationFailed,
    Unavailable { message: String },
    Network { message: String },
    Timeout { timeout_secs: u64 },
}

impl From<MockQnaError> for QnaError {
    fn from(err: MockQnaError) -> Self {
        match err {
            MockQnaError::AuthenticationFailed => QnaError::AuthenticationFailed,
            MockQnaError::Unavailable { message } => QnaError::unavailable(message),
            MockQnaError::Network { message } => QnaError::network(message),
            MockQnaError::Timeout { timeout_secs } => QnaError::Timeout { timeout_secs },
        }
    }
}

/// Mock QnA service.
///
/// Responses are consumed in order; once the queue is empty every call
/// returns no answers.
#[derive(Debug, Clone, Default)]
pub struct MockQnaService {
    responses: Arc<Mutex<VecDeque<MockQnaResponse>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<Utterance>>>,
}

impl MockQnaService {
    /// Creates a mock with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a single answer with the given confidence (0-1).
    ///
    /// # Panics
    /// If `confidence` is outside `[0, 1]`.
    pub fn with_answer(self, answer: impl Into<String>, confidence: f64) -> Self {
        let confidence = Confidence::try_new(confidence).expect("mock confidence must be in [0, 1]");
        self.with_answers(vec![AnswerCandidate::new(answer, confidence)])
    }

    /// Queues a list of candidates.
    pub fn with_answers(self, answers: Vec<AnswerCandidate>) -> Self {
        self.push(MockQnaResponse::Answers(answers))
    }

    /// Queues an empty result.
    pub fn with_no_answers(self) -> Self {
        self.push(MockQnaResponse::Answers(Vec::new()))
    }

    /// Queues an error.
    pub fn with_error(self, error: MockQnaError) -> Self {
        self.push(MockQnaResponse::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded utterances.
    pub fn get_calls(&self) -> Vec<Utterance> {
        self.calls.lock().unwrap().clone()
    }

    fn push(self, response: MockQnaResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    fn next_response(&self) -> MockQnaResponse {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockQnaResponse::Answers(Vec::new()))
    }
}

#[async_trait]
impl QnaService for MockQnaService {
    async fn get_answers(&self, utterance: &Utterance) -> Result<Vec<AnswerCandidate>, QnaError> {
        self.calls.lock().unwrap().push(utterance.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockQnaResponse::Answers(answers) => Ok(answers),
            MockQnaResponse::Error(err) => Err(err.into()),
        }
    }
}
