//! # medreport
//!
//! AI-powered medical report analysis over HTTP: accept a URL to a PDF
//! report, extract its text, and have a generative model interpret it.
//!
//! ## Why this crate?
//!
//! The hard parts — PDF text extraction and medical reasoning — are
//! delegated to `pdf-extract` and the Gemini API. What this crate owns is
//! the orchestration contract around them: strict per-request sequencing,
//! a fixed-delay retry policy for provider failures, and a deterministic
//! local fallback so the endpoint never hard-fails just because the model
//! is unreachable.
//!
//! ## Pipeline Overview
//!
//! ```text
//! POST /analyze-pdf { pdf_url }
//!  │
//!  ├─ 1. Fetch    stream the PDF to a scoped temp file (30 s budget)
//!  ├─ 2. Extract  pdf-extract → page texts → one blob (spawn_blocking)
//!  ├─ 3. Analyze  fixed medical prompt → Gemini, 3 attempts 2 s apart,
//!  │              then deterministic fallback
//!  └─ 4. Respond  uniform { status, analysis? | error? } envelope, HTTP 200
//! ```
//!
//! Handled failures (bad download, empty document) come back as
//! `status: "error"` envelopes; model unavailability is absorbed into the
//! fallback and still yields `status: "success"`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medreport::{create_router, AnalysisConfig, Analyzer, AppState, GeminiClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalysisConfig::from_env()?; // requires GEMINI_API_KEY
//!     let http = reqwest::Client::new();
//!     let llm = Arc::new(GeminiClient::new(http.clone(), config.api_key.clone(), config.model.clone()));
//!     let analyzer = Arc::new(Analyzer::new(llm, config.retry, config.cache_capacity));
//!     let state = AppState { analyzer, http, config: Arc::new(config) };
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//!     axum::serve(listener, create_router(state)).await?;
//!     Ok(())
//! }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod cache;
pub mod config;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use cache::AnalysisCache;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, RetryPolicy};
pub use error::{AnalysisError, LlmError};
pub use llm::{GeminiClient, LanguageModel};
pub use pipeline::analyze::Analyzer;
pub use pipeline::extract::ExtractedDocument;
pub use server::{create_router, AppState, EMPTY_EXTRACTION_MESSAGE};
