//! Structify Server
//!
//! HTTP layer for the text structuring service: accepts unstructured
//! text plus a template document, runs the extraction engine, and
//! returns the validated structured JSON.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use std::sync::Arc;
use structify_engine::Engine;
use structify_llm::OpenAiProvider;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the structuring HTTP server
///
/// Builds the LLM provider and engine from configuration and serves
/// until interrupted.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Structify server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.llm.model);

    config.validate()?;

    let provider = OpenAiProvider::with_endpoint(
        &config.llm.endpoint,
        &config.llm.api_key,
        &config.llm.model,
    );
    let engine = Arc::new(Engine::new(provider, config.engine.clone()));

    let state = AppState { engine };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
