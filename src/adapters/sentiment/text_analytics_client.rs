//! Text Analytics Client - Implementation of SentimentAnalyzer for the v2.0
//! sentiment API.
//!
//! Sends a single-document batch and reads `documents[0].score`. Anything
//! short of a well-formed score in `[0, 1]` is an error; the client never
//! substitutes a default.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SentimentConfig;
use crate::domain::foundation::{SentimentScore, Utterance};
use crate::ports::{SentimentAnalyzer, SentimentError};

/// Path of the sentiment operation under the regional endpoint.
pub const SENTIMENT_PATH: &str = "/text/analytics/v2.0/sentiment";

/// Configuration for the Text Analytics client.
#[derive(Debug, Clone)]
pub struct TextAnalyticsConfig {
    /// Subscription key for authentication.
    subscription_key: Secret<String>,
    /// Regional base address.
    pub endpoint: String,
    /// Document language sent with every request.
    pub language: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl TextAnalyticsConfig {
    /// Creates a configuration for the West US region.
    pub fn new(subscription_key: impl Into<String>) -> Self {
        Self {
            subscription_key: Secret::new(subscription_key.into()),
            endpoint: "https://westus.api.cognitive.microsoft.com".to_string(),
            language: "en".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Builds the client configuration from application config.
    pub fn from_app_config(config: &SentimentConfig) -> Self {
        Self::new(config.subscription_key.expose_secret().clone())
            .with_endpoint(config.endpoint.clone())
            .with_timeout(config.timeout())
    }

    /// Sets the base address.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the document language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn subscription_key(&self) -> &str {
        self.subscription_key.expose_secret()
    }
}

/// Text Analytics sentiment client.
pub struct TextAnalyticsClient {
    config: TextAnalyticsConfig,
    client: Client,
}

impl TextAnalyticsClient {
    /// Creates a new client with its own connection pool.
    pub fn new(config: TextAnalyticsConfig) -> Result<Self, SentimentError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SentimentError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn sentiment_url(&self) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), SENTIMENT_PATH)
    }

    fn to_request<'a>(&'a self, utterance: &'a Utterance) -> SentimentRequest<'a> {
        SentimentRequest {
            documents: [SentimentDocument {
                id: "1",
                language: &self.config.language,
                text: utterance.as_str(),
            }],
        }
    }

    async fn send_request(&self, utterance: &Utterance) -> Result<Response, SentimentError> {
        self.client
            .post(self.sentiment_url())
            .header("Ocp-Apim-Subscription-Key", self.config.subscription_key())
            .json(&self.to_request(utterance))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SentimentError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    SentimentError::network(e.to_string())
                }
            })
    }
}

#[async_trait]
impl SentimentAnalyzer for TextAnalyticsClient {
    async fn score(&self, utterance: &Utterance) -> Result<SentimentScore, SentimentError> {
        let response = self.send_request(utterance).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SentimentError::Status {
                status: status.as_u16(),
            });
        }

        tracing::info!("Got response from sentiment");

        let body = response
            .text()
            .await
            .map_err(|e| SentimentError::network(format!("Failed to read body: {}", e)))?;

        tracing::debug!(body = %body, "Sentiment response body");

        parse_score(&body)
    }
}

/// Decodes the first document's score from a sentiment response body.
fn parse_score(body: &str) -> Result<SentimentScore, SentimentError> {
    if body.trim().is_empty() {
        return Err(SentimentError::malformed("empty body"));
    }

    let parsed: SentimentResponse = serde_json::from_str(body)
        .map_err(|e| SentimentError::malformed(e.to_string()))?;

    let document = parsed.documents.into_iter().next().ok_or_else(|| {
        let detail = parsed
            .errors
            .first()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "no documents".to_string());
        SentimentError::malformed(detail)
    })?;

    SentimentScore::try_new(document.score).map_err(|e| SentimentError::malformed(e.to_string()))
}

// ----- Text Analytics API Types -----

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    documents: [SentimentDocument<'a>; 1],
}

#[derive(Debug, Serialize)]
struct SentimentDocument<'a> {
    id: &'a str,
    language: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    #[serde(default)]
    documents: Vec<DocumentScore>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
struct DocumentScore {
    score: f64,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    #[serde(default)]
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone)]
    struct Stub {
        status: StatusCode,
        body: String,
        seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn sentiment(
        State(stub): State<Stub>,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, String) {
        let key = headers
            .get("ocp-apim-subscription-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let json = serde_json::from_str(&body).unwrap_or(Value::Null);
        stub.seen.lock().unwrap().push((key, json));
        (stub.status, stub.body.clone())
    }

    async fn spawn_stub(status: StatusCode, body: &str) -> (String, Stub) {
        let stub = Stub {
            status,
            body: body.to_string(),
            seen: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route(SENTIMENT_PATH, post(sentiment))
            .with_state(stub.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), stub)
    }

    fn client(endpoint: &str) -> TextAnalyticsClient {
        TextAnalyticsClient::new(TextAnalyticsConfig::new("sub-key").with_endpoint(endpoint)).unwrap()
    }

    #[test]
    fn config_defaults_to_west_us_english() {
        let config = TextAnalyticsConfig::new("k");
        assert_eq!(config.endpoint, "https://westus.api.cognitive.microsoft.com");
        assert_eq!(config.language, "en");
        assert_eq!(config.subscription_key(), "k");
    }

    #[test]
    fn request_body_escapes_utterance() {
        let client = client("https://example.com");
        let utterance = Utterance::new(r#"say "hi" \ bye"#);
        let json = serde_json::to_value(client.to_request(&utterance)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"documents": [{"id": "1", "language": "en", "text": "say \"hi\" \\ bye"}]})
        );
    }

    #[test]
    fn parse_score_reads_first_document() {
        let score = parse_score(r#"{"documents":[{"id":"1","score":0.42}],"errors":[]}"#).unwrap();
        assert_eq!(score.value(), 0.42);
    }

    #[test]
    fn parse_score_rejects_empty_body() {
        assert!(matches!(parse_score(""), Err(SentimentError::MalformedResponse(_))));
        assert!(matches!(parse_score("  \n"), Err(SentimentError::MalformedResponse(_))));
    }

    #[test]
    fn parse_score_reports_document_errors() {
        let err = parse_score(r#"{"documents":[],"errors":[{"id":"1","message":"Invalid language"}]}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "malformed sentiment response: Invalid language");
    }

    #[test]
    fn parse_score_rejects_out_of_range() {
        assert!(parse_score(r#"{"documents":[{"id":"1","score":1.7}]}"#).is_err());
    }

    #[test]
    fn parse_score_rejects_wrong_shape() {
        assert!(parse_score(r#"{"documents":[{"id":"1"}]}"#).is_err());
        assert!(parse_score("not json").is_err());
    }

    #[tokio::test]
    async fn score_posts_document_with_subscription_key() {
        let (endpoint, stub) =
            spawn_stub(StatusCode::OK, r#"{"documents":[{"id":"1","score":0.77}],"errors":[]}"#).await;

        let score = client(&endpoint).score(&Utterance::new("great service")).await.unwrap();
        assert_eq!(score.value(), 0.77);

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen[0].0.as_deref(), Some("sub-key"));
        assert_eq!(seen[0].1["documents"][0]["text"], "great service");
        assert_eq!(seen[0].1["documents"][0]["language"], "en");
        assert_eq!(seen[0].1["documents"][0]["id"], "1");
    }

    #[tokio::test]
    async fn score_fails_on_non_success_status() {
        let (endpoint, _stub) = spawn_stub(StatusCode::UNAUTHORIZED, "").await;
        let err = client(&endpoint).score(&Utterance::new("x")).await.unwrap_err();
        assert!(matches!(err, SentimentError::Status { status: 401 }));
    }

    #[tokio::test]
    async fn score_fails_on_empty_success_body() {
        let (endpoint, _stub) = spawn_stub(StatusCode::OK, "").await;
        let err = client(&endpoint).score(&Utterance::new("x")).await.unwrap_err();
        assert!(matches!(err, SentimentError::MalformedResponse(_)));
    }
}
