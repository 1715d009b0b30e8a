//! QnA Maker configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// QnA Maker knowledge-base configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QnaConfig {
    /// Knowledge base identifier
    pub knowledge_base_id: String,

    /// Endpoint key sent as `Authorization: EndpointKey <key>`
    pub endpoint_key: SecretString,

    /// Endpoint host; scheme and `/qnamaker` suffix are optional
    pub endpoint_host_name: String,

    /// Maximum number of answers requested
    #[serde(default = "default_top")]
    pub top: u32,

    /// Minimum confidence (0-1) for an answer to count
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl QnaConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Endpoint host normalized to `https://.../qnamaker`
    pub fn host(&self) -> String {
        normalize_host(&self.endpoint_host_name)
    }

    /// Validate QnA configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.knowledge_base_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("QNA__KNOWLEDGE_BASE_ID"));
        }
        if self.endpoint_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("QNA__ENDPOINT_KEY"));
        }
        if self.endpoint_host_name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("QNA__ENDPOINT_HOST_NAME"));
        }
        if self.endpoint_host_name.starts_with("http://") {
            return Err(ValidationError::InvalidEndpoint("QNA__ENDPOINT_HOST_NAME"));
        }
        if !(0.0..=1.0).contains(&self.score_threshold) {
            return Err(ValidationError::InvalidScoreThreshold);
        }
        if self.top == 0 || self.top > 100 {
            return Err(ValidationError::InvalidTop);
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Ensures the host starts with `https://` and ends with `/qnamaker`,
/// dropping any trailing slashes first.
///
/// Applying it twice yields the same string.
pub fn normalize_host(host: &str) -> String {
    let mut normalized = host.trim().trim_end_matches('/').to_string();
    if !normalized.starts_with("https://") {
        normalized = format!("https://{}", normalized);
    }
    if !normalized.ends_with("/qnamaker") {
        normalized = format!("{}/qnamaker", normalized);
    }
    normalized
}

fn default_top() -> u32 {
    1
}

fn default_score_threshold() -> f64 {
    0.3
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> QnaConfig {
        QnaConfig {
            knowledge_base_id: "kb-123".to_string(),
            endpoint_key: SecretString::new("endpoint-key".to_string()),
            endpoint_host_name: "my-qna.azurewebsites.net".to_string(),
            top: default_top(),
            score_threshold: default_score_threshold(),
            timeout_secs: default_timeout(),
        }
    }

    #[test]
    fn normalize_adds_scheme_and_suffix() {
        assert_eq!(
            normalize_host("my-qna.azurewebsites.net"),
            "https://my-qna.azurewebsites.net/qnamaker"
        );
    }

    #[test]
    fn normalize_keeps_complete_host() {
        let host = "https://my-qna.azurewebsites.net/qnamaker";
        assert_eq!(normalize_host(host), host);
    }

    #[test]
    fn normalize_adds_only_missing_part() {
        assert_eq!(
            normalize_host("https://my-qna.azurewebsites.net"),
            "https://my-qna.azurewebsites.net/qnamaker"
        );
        assert_eq!(
            normalize_host("my-qna.azurewebsites.net/qnamaker"),
            "https://my-qna.azurewebsites.net/qnamaker"
        );
    }

    #[test]
    fn normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_host("https://h.example/qnamaker/"),
            "https://h.example/qnamaker"
        );
        assert_eq!(normalize_host("h.example/"), "https://h.example/qnamaker");
        assert_eq!(normalize_host("h.example//"), "https://h.example/qnamaker");
    }

    #[test]
    fn normalize_is_idempotent() {
        for host in [
            "a.example",
            "https://a.example",
            "a.example/qnamaker",
            " a.example ",
            "a.example/",
            "https://a.example/qnamaker/",
        ] {
            let once = normalize_host(host);
            assert_eq!(normalize_host(&once), once);
        }
    }

    #[test]
    fn test_qna_config_defaults() {
        let config = config();
        assert_eq!(config.top, 1);
        assert_eq!(config.score_threshold, 0.3);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.host(), "https://my-qna.azurewebsites.net/qnamaker");
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_fields() {
        let mut missing_kb = config();
        missing_kb.knowledge_base_id = String::new();
        assert_eq!(
            missing_kb.validate(),
            Err(ValidationError::MissingRequired("QNA__KNOWLEDGE_BASE_ID"))
        );

        let mut missing_key = config();
        missing_key.endpoint_key = SecretString::new(" ".to_string());
        assert_eq!(
            missing_key.validate(),
            Err(ValidationError::MissingRequired("QNA__ENDPOINT_KEY"))
        );
    }

    #[test]
    fn test_validation_rejects_plain_http() {
        let mut config = config();
        config.endpoint_host_name = "http://my-qna.azurewebsites.net".to_string();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidEndpoint("QNA__ENDPOINT_HOST_NAME"))
        );
    }

    #[test]
    fn test_validation_bounds() {
        let mut config = config();
        config.score_threshold = 1.5;
        assert_eq!(config.validate(), Err(ValidationError::InvalidScoreThreshold));

        config.score_threshold = 0.3;
        config.top = 0;
        assert_eq!(config.validate(), Err(ValidationError::InvalidTop));
    }
}
