//! Sentiment adapters.
//!
//! - `TextAnalyticsClient` - Text Analytics v2.0 sentiment over HTTPS
//! - `MockSentimentAnalyzer` - Configurable mock for testing

mod mock_sentiment_analyzer;
mod text_analytics_client;

pub use mock_sentiment_analyzer::MockSentimentAnalyzer;
pub use text_analytics_client::{TextAnalyticsClient, TextAnalyticsConfig, SENTIMENT_PATH};
