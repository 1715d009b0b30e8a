//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `qna` - Knowledge-base clients (QnA Maker, mock)
//! - `sentiment` - Sentiment clients (Text Analytics, mock)
//! - `http` - Inbound bot messaging endpoint

pub mod http;
pub mod qna;
pub mod sentiment;

pub use qna::{MockQnaService, QnaMakerClient, QnaMakerConfig};
pub use sentiment::{MockSentimentAnalyzer, TextAnalyticsClient, TextAnalyticsConfig};
