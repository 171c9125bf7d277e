//! Server binary for medreport.
//!
//! A thin shim over the library crate: read configuration from the
//! environment, wire the model client and analyzer together, and serve the router.

use anyhow::{Context, Result};
use medreport::{create_router, AnalysisConfig, Analyzer, AppState, GeminiClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing GEMINI_API_KEY is fatal: refuse to start rather than serve a
    // service that cannot analyse anything.
    let config = AnalysisConfig::from_env().context("configuration error")?;

    let http = reqwest::Client::builder()
        .build()
        .context("failed to build HTTP client")?;

    let llm = Arc::new(GeminiClient::new(
        http.clone(),
        config.api_key.clone(),
        config.model.clone(),
    ));
    let analyzer = Arc::new(Analyzer::new(llm, config.retry, config.cache_capacity));

    let state = AppState {
        analyzer,
        http,
        config: Arc::new(config),
    };
    let router = create_router(state);

    let port: u16 = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Listening on {addr}");

    axum::serve(listener, router)
        .await
        .context("server error")?;

    Ok(())
}
