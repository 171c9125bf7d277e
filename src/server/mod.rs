//! HTTP surface: router, shared state, and middleware stack.

mod handlers;

pub use handlers::{AnalyzeRequest, AnalyzeResponse, EMPTY_EXTRACTION_MESSAGE};

use crate::config::AnalysisConfig;
use crate::pipeline::analyze::Analyzer;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared per-process state: everything is read-only after startup, so
/// request tasks clone freely.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub http: reqwest::Client,
    pub config: Arc<AnalysisConfig>,
}

/// Build the service router with tracing, CORS, and gzip compression.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/analyze-pdf", post(handlers::analyze_pdf_handler))
        .route("/", get(handlers::liveness_handler))
        .route("/health", get(handlers::health_handler))
        .layer(trace_layer)
        .layer(cors)
        .layer(CompressionLayer::new())
        .with_state(state)
}
