//! QnA Maker Client - Implementation of QnaService for a hosted knowledge base.
//!
//! # Wire contract
//!
//! `POST {host}/knowledgebases/{kb_id}/generateAnswer` with
//! `Authorization: EndpointKey <key>` and a JSON body
//! `{"question": ..., "top": n, "scoreThreshold": 0-100}`. The service
//! scores answers on a 0-100 scale and returns a sentinel answer with id
//! `-1` when nothing matched.
//!
//! # Configuration
//!
//! ```ignore
//! let config = QnaMakerConfig::new(kb_id, endpoint_key, "https://my-qna.azurewebsites.net/qnamaker")
//!     .with_top(3)
//!     .with_score_threshold(0.5);
//!
//! let client = QnaMakerClient::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::QnaConfig;
use crate::domain::conversation::AnswerCandidate;
use crate::domain::foundation::{Confidence, Utterance};
use crate::ports::{QnaError, QnaService};

/// Id the service uses for its "no good match" placeholder answer.
const NO_MATCH_ID: i64 = -1;

/// Configuration for the QnA Maker client.
#[derive(Debug, Clone)]
pub struct QnaMakerConfig {
    /// Knowledge base to query.
    pub knowledge_base_id: String,
    /// Endpoint key for authentication.
    endpoint_key: Secret<String>,
    /// Host including scheme and `/qnamaker` path.
    pub host: String,
    /// Maximum number of answers to return.
    pub top: u32,
    /// Minimum confidence (0-1) an answer needs.
    pub score_threshold: f64,
    /// Request timeout.
    pub timeout: Duration,
}

impl QnaMakerConfig {
    /// Creates a new configuration. `host` is used as given.
    pub fn new(
        knowledge_base_id: impl Into<String>,
        endpoint_key: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            knowledge_base_id: knowledge_base_id.into(),
            endpoint_key: Secret::new(endpoint_key.into()),
            host: host.into(),
            top: 1,
            score_threshold: 0.3,
            timeout: Duration::from_secs(10),
        }
    }

    /// Builds the client configuration from application config, normalizing the host.
    pub fn from_app_config(config: &QnaConfig) -> Self {
        Self::new(
            config.knowledge_base_id.clone(),
            config.endpoint_key.expose_secret().clone(),
            config.host(),
        )
        .with_top(config.top)
        .with_score_threshold(config.score_threshold)
        .with_timeout(config.timeout())
    }

    /// Sets the maximum number of answers.
    pub fn with_top(mut self, top: u32) -> Self {
        self.top = top;
        self
    }

    /// Sets the minimum confidence.
    pub fn with_score_threshold(mut self, threshold: f64) -> Self {
        self.score_threshold = threshold;
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint_key(&self) -> &str {
        self.endpoint_key.expose_secret()
    }
}

/// QnA Maker knowledge-base client.
pub struct QnaMakerClient {
    config: QnaMakerConfig,
    client: Client,
}

impl QnaMakerClient {
    /// Creates a new client with its own connection pool.
    pub fn new(config: QnaMakerConfig) -> Result<Self, QnaError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QnaError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the generateAnswer endpoint URL.
    fn generate_answer_url(&self) -> String {
        format!(
            "{}/knowledgebases/{}/generateAnswer",
            self.config.host.trim_end_matches('/'),
            self.config.knowledge_base_id
        )
    }

    fn to_request(&self, utterance: &Utterance) -> GenerateAnswerRequest {
        GenerateAnswerRequest {
            question: utterance.as_str().to_string(),
            top: self.config.top,
            score_threshold: self.config.score_threshold * 100.0,
        }
    }

    async fn send_request(&self, utterance: &Utterance) -> Result<Response, QnaError> {
        self.client
            .post(self.generate_answer_url())
            .header(
                "Authorization",
                format!("EndpointKey {}", self.config.endpoint_key()),
            )
            .json(&self.to_request(utterance))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QnaError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    QnaError::network(format!("Connection failed: {}", e))
                } else {
                    QnaError::network(e.to_string())
                }
            })
    }

    async fn handle_response_status(&self, response: Response) -> Result<Response, QnaError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(QnaError::AuthenticationFailed),
            404 => Err(QnaError::KnowledgeBaseNotFound(
                self.config.knowledge_base_id.clone(),
            )),
            429 => Err(QnaError::RateLimited),
            500..=599 => Err(QnaError::unavailable(format!(
                "Server error {}: {}",
                status, body
            ))),
            other => Err(QnaError::UnexpectedStatus {
                status: other,
                body,
            }),
        }
    }

    async fn parse_response(&self, response: Response) -> Result<Vec<AnswerCandidate>, QnaError> {
        let response = self.handle_response_status(response).await?;

        let parsed: GenerateAnswerResponse = response
            .json()
            .await
            .map_err(|e| QnaError::parse(format!("Failed to parse response: {}", e)))?;

        select_answers(parsed.answers, self.config.score_threshold, self.config.top)
    }
}

#[async_trait]
impl QnaService for QnaMakerClient {
    async fn get_answers(&self, utterance: &Utterance) -> Result<Vec<AnswerCandidate>, QnaError> {
        tracing::info!(
            knowledge_base_id = %self.config.knowledge_base_id,
            "Calling QnA Maker"
        );

        let response = self.send_request(utterance).await?;
        let answers = self.parse_response(response).await?;

        tracing::debug!(answer_count = answers.len(), "QnA Maker responded");
        Ok(answers)
    }
}

/// Drops placeholders and low scores, then ranks best first and keeps `top`.
fn select_answers(
    answers: Vec<QnaAnswerDto>,
    score_threshold: f64,
    top: u32,
) -> Result<Vec<AnswerCandidate>, QnaError> {
    let mut candidates = Vec::with_capacity(answers.len());

    for dto in answers {
        if dto.id == Some(NO_MATCH_ID) {
            continue;
        }
        let confidence = Confidence::from_percent(dto.score)
            .map_err(|e| QnaError::parse(format!("Invalid answer score: {}", e)))?;
        if confidence.value() < score_threshold {
            continue;
        }

        let mut candidate = AnswerCandidate::new(dto.answer, confidence).with_questions(dto.questions);
        if let Some(source) = dto.source {
            candidate = candidate.with_source(source);
        }
        if let Some(id) = dto.id {
            candidate = candidate.with_id(id);
        }
        candidates.push(candidate);
    }

    // Stable sort keeps the service's order among equal scores.
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(top as usize);

    Ok(candidates)
}

// ----- QnA Maker API Types -----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAnswerRequest {
    question: String,
    top: u32,
    score_threshold: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateAnswerResponse {
    #[serde(default)]
    answers: Vec<QnaAnswerDto>,
}

#[derive(Debug, Deserialize)]
struct QnaAnswerDto {
    answer: String,
    score: f64,
    #[serde(default)]
    questions: Vec<String>,
    source: Option<String>,
    id: Option<i64>,
}
