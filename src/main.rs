//! QnA Mood Bot server
//!
//! Loads configuration, wires the QnA Maker and Text Analytics adapters into
//! the turn handler, and serves the bot messaging endpoint until shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use qna_mood_bot::adapters::http::{bot_router, BotAppState};
use qna_mood_bot::adapters::{QnaMakerClient, QnaMakerConfig, TextAnalyticsClient, TextAnalyticsConfig};
use qna_mood_bot::application::{ProcessTurnHandler, TurnHandlerConfig};
use qna_mood_bot::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;

    init_tracing(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting QnA Mood Bot"
    );

    let qna = QnaMakerClient::new(QnaMakerConfig::from_app_config(&config.qna))
        .context("failed to build QnA Maker client")?;
    let sentiment = TextAnalyticsClient::new(TextAnalyticsConfig::from_app_config(&config.sentiment))
        .context("failed to build Text Analytics client")?;

    let turn_handler = ProcessTurnHandler::new(Arc::new(qna), Arc::new(sentiment)).with_config(
        TurnHandlerConfig {
            sentiment_required: config.sentiment.required,
            turn_timeout: Some(config.turn_timeout()),
        },
    );

    let shutdown = CancellationToken::new();
    let state = BotAppState::new(Arc::new(turn_handler)).with_shutdown(shutdown.clone());
    let app = bot_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening for bot activities");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    tracing::info!("Shut down gracefully");
    Ok(())
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Resolves on Ctrl+C or SIGTERM and cancels in-flight turns.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
