//! Sentiment service configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Text Analytics sentiment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentConfig {
    /// Subscription key sent as `Ocp-Apim-Subscription-Key`
    pub subscription_key: SecretString,

    /// Regional base address
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Fail the turn when sentiment is unavailable instead of answering without it
    #[serde(default)]
    pub required: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SentimentConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate sentiment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.subscription_key.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("SENTIMENT__SUBSCRIPTION_KEY"));
        }
        if !self.endpoint.starts_with("https://") && !self.endpoint.starts_with("http://") {
            return Err(ValidationError::InvalidEndpoint("SENTIMENT__ENDPOINT"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://westus.api.cognitive.microsoft.com".to_string()
}

fn default_timeout() -> u64 {
    10
}
