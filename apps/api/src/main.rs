mod config;
mod document;
mod errors;
mod matching;
mod models;
mod oracle;
mod parsing;
mod pipeline;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::matching::StaticThesaurus;
use crate::oracle::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the oracle client
    let oracle = GeminiClient::new(&config.oracle).context("failed to build oracle client")?;
    info!(
        "Oracle client initialized (model: {}, timeout: {}s, retries: {})",
        oracle.model(),
        config.oracle.timeout_secs,
        config.oracle.max_retries
    );
    info!(
        "Default rubric: {} (weights sum to {:.2}); word range {}-{}, long bullet > {} words",
        config.rubric,
        config.rubric.weights().total(),
        config.analyzer.word_count_min,
        config.analyzer.word_count_max,
        config.analyzer.bullet_word_threshold
    );

    // Build app state
    let state = AppState {
        oracle: Arc::new(oracle),
        config: config.clone(),
        synonyms: Arc::new(StaticThesaurus::default()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
