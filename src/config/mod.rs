//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `QNA_BOT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use qna_mood_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Bot listening on port {}", config.server.port);
//! ```

mod error;
mod qna;
mod sentiment;
mod server;

pub use error::{ConfigError, ValidationError};
pub use qna::{normalize_host, QnaConfig};
pub use sentiment::SentimentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;
use std::time::Duration;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// QnA Maker knowledge base
    pub qna: QnaConfig,

    /// Text Analytics sentiment service
    pub sentiment: SentimentConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QNA_BOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QNA_BOT__SERVER__PORT=3978` -> `server.port = 3978`
    /// - `QNA_BOT__QNA__KNOWLEDGE_BASE_ID=...` -> `qna.knowledge_base_id = ...`
    /// - `QNA_BOT__SENTIMENT__SUBSCRIPTION_KEY=...` -> `sentiment.subscription_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QNA_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.qna.validate()?;
        self.sentiment.validate()?;

        let turn_secs = self.qna.timeout_secs + self.sentiment.timeout_secs;
        if self.server.request_timeout_secs <= turn_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                turn_secs,
            });
        }
        Ok(())
    }

    /// Deadline for one turn: the sentiment call followed by the QnA call
    pub fn turn_timeout(&self) -> Duration {
        self.sentiment.timeout() + self.qna.timeout()
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("QNA_BOT__QNA__KNOWLEDGE_BASE_ID", "kb-123");
        env::set_var("QNA_BOT__QNA__ENDPOINT_KEY", "endpoint-key");
        env::set_var("QNA_BOT__QNA__ENDPOINT_HOST_NAME", "my-qna.azurewebsites.net");
        env::set_var("QNA_BOT__SENTIMENT__SUBSCRIPTION_KEY", "sub-key");
    }

    fn clear_env() {
        env::remove_var("QNA_BOT__QNA__KNOWLEDGE_BASE_ID");
        env::remove_var("QNA_BOT__QNA__ENDPOINT_KEY");
        env::remove_var("QNA_BOT__QNA__ENDPOINT_HOST_NAME");
        env::remove_var("QNA_BOT__QNA__TOP");
        env::remove_var("QNA_BOT__QNA__TIMEOUT_SECS");
        env::remove_var("QNA_BOT__SENTIMENT__TIMEOUT_SECS");
        env::remove_var("QNA_BOT__SENTIMENT__SUBSCRIPTION_KEY");
        env::remove_var("QNA_BOT__SENTIMENT__REQUIRED");
        env::remove_var("QNA_BOT__SERVER__PORT");
        env::remove_var("QNA_BOT__SERVER__ENVIRONMENT");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.qna.knowledge_base_id, "kb-123");
        assert_eq!(config.qna.endpoint_key.expose_secret(), "endpoint-key");
        assert_eq!(config.qna.host(), "https://my-qna.azurewebsites.net/qnamaker");
        assert_eq!(config.sentiment.subscription_key.expose_secret(), "sub-key");
    }

    #[test]
    fn test_validate_full_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().validate().is_ok());
    }

    #[test]
    fn test_defaults_applied() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3978);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.qna.top, 1);
        assert_eq!(config.sentiment.endpoint, "https://westus.api.cognitive.microsoft.com");
        assert!(!config.sentiment.required);
    }

    #[test]
    fn test_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("QNA_BOT__SERVER__PORT", "3000");
        env::set_var("QNA_BOT__SERVER__ENVIRONMENT", "production");
        env::set_var("QNA_BOT__QNA__TOP", "3");
        env::set_var("QNA_BOT__SENTIMENT__REQUIRED", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
        assert_eq!(config.qna.top, 3);
        assert!(config.sentiment.required);
    }

    #[test]
    fn test_turn_timeout_sums_adapter_timeouts() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.turn_timeout(), Duration::from_secs(20));
        assert!(config.turn_timeout() < config.server.request_timeout());
    }

    #[test]
    fn test_request_timeout_must_exceed_turn_timeout() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("QNA_BOT__QNA__TIMEOUT_SECS", "30");
        env::set_var("QNA_BOT__SENTIMENT__TIMEOUT_SECS", "30");
        let result = AppConfig::load();
        clear_env();

        assert_eq!(
            result.unwrap().validate(),
            Err(ValidationError::RequestTimeoutTooShort {
                request_secs: 30,
                turn_secs: 60,
            })
        );
    }

    #[test]
    fn test_missing_qna_section_fails() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("QNA_BOT__SENTIMENT__SUBSCRIPTION_KEY", "sub-key");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
