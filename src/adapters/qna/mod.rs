//! QnA service adapters.
//!
//! - `QnaMakerClient` - Hosted QnA Maker knowledge base over HTTPS
//! - `MockQnaService` - Configurable mock for testing

mod mock_qna_service;
mod qna_maker_client;

pub use mock_qna_service::{MockQnaError, MockQnaResponse, MockQnaService};
pub use qna_maker_client::{QnaMakerClient, QnaMakerConfig};
