//! Mock Sentiment Analyzer for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::foundation::{SentimentScore, Utterance};
use crate::ports::{SentimentAnalyzer, SentimentError};

/// A configured mock response.
#[derive(Debug, Clone)]
enum MockSentimentResponse {
    Score(f64),
    Status(u16),
    Malformed(String),
}

/// Mock sentiment analyzer.
///
/// Queued responses are consumed in order. With an empty queue it falls back
/// to the default score (neutral `0.5` unless changed).
#[derive(Debug, Clone)]
pub struct MockSentimentAnalyzer {
    responses: Arc<Mutex<VecDeque<MockSentimentResponse>>>,
    default_score: f64,
    calls: Arc<Mutex<Vec<Utterance>>>,
}

impl Default for MockSentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSentimentAnalyzer {
    /// Creates a mock that scores everything `0.5`.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            default_score: 0.5,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sets the score returned once the queue is empty.
    pub fn with_default_score(mut self, score: f64) -> Self {
        self.default_score = score;
        self
    }

    /// Queues a score.
    pub fn with_score(self, score: f64) -> Self {
        self.push(MockSentimentResponse::Score(score))
    }

    /// Queues a non-success status.
    pub fn with_status_error(self, status: u16) -> Self {
        self.push(MockSentimentResponse::Status(status))
    }

    /// Queues a malformed-response error.
    pub fn with_malformed(self, detail: impl Into<String>) -> Self {
        self.push(MockSentimentResponse::Malformed(detail.into()))
    }

    /// Returns the number of calls made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn push(self, response: MockSentimentResponse) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }
}

#[async_trait]
impl SentimentAnalyzer for MockSentimentAnalyzer {
    async fn score(&self, utterance: &Utterance) -> Result<SentimentScore, SentimentError> {
        self.calls.lock().unwrap().push(utterance.clone());

        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(MockSentimentResponse::Score(self.default_score));

        match next {
            MockSentimentResponse::Score(value) => {
                SentimentScore::try_new(value).map_err(|e| SentimentError::malformed(e.to_string()))
            }
            MockSentimentResponse::Status(status) => Err(SentimentError::Status { status }),
            MockSentimentResponse::Malformed(detail) => Err(SentimentError::malformed(detail)),
        }
    }
}
