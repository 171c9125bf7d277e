//! Request handlers: sequence the pipeline and map outcomes onto the
//! uniform response envelope.
//!
//! Every handled outcome — including download and extraction failures — is
//! HTTP 200 with a `{status, analysis?, error?}` body; the envelope, not the
//! transport, carries the verdict. Only structurally invalid requests (bad
//! JSON, a `pdf_url` that is not a URL) are rejected before the handler by
//! the `Json` extractor with a 4xx.

use crate::error::AnalysisError;
use crate::pipeline::extract::extract_text;
use crate::pipeline::fetch::fetch_pdf;
use crate::server::AppState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use url::Url;

/// Exact message for the empty-document outcome; part of the API contract.
pub const EMPTY_EXTRACTION_MESSAGE: &str = "Failed to extract text from PDF or PDF was empty";

const SERVICE_NAME: &str = "Medical Report Analysis API";
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Deserialising through [`Url`] enforces syntactic validity at the
    /// extractor boundary; no further checks happen before network use.
    pub pdf_url: Url,
}

/// The uniform response envelope. Exactly one of `analysis`/`error` is
/// populated, matching `status`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    fn success(analysis: String) -> Self {
        Self {
            status: "success",
            analysis: Some(analysis),
            error: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            analysis: None,
            error: Some(message.into()),
        }
    }
}

#[tracing::instrument(skip(state, request), fields(url = %request.pdf_url))]
pub async fn analyze_pdf_handler(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    match run_pipeline(&state, &request.pdf_url).await {
        Ok(Some(analysis)) => {
            tracing::info!(chars = analysis.len(), "analysis complete");
            Json(AnalyzeResponse::success(analysis))
        }
        Ok(None) => {
            tracing::info!("extraction produced no content");
            Json(AnalyzeResponse::error(EMPTY_EXTRACTION_MESSAGE))
        }
        Err(e) => {
            tracing::error!(error = %e, "analysis pipeline failed");
            Json(AnalyzeResponse::error(e.to_string()))
        }
    }
}

/// Fetch → extract → analyze, strictly in order.
///
/// `Ok(None)` is the empty-document outcome. Analysis itself cannot fail:
/// once this function has a non-empty document, the orchestrator's fallback
/// guarantees a result. Any error slipping through here — extraction parse
/// failures, temp-file I/O — reaches the handler's generic arm, the
/// last-resort boundary.
async fn run_pipeline(state: &AppState, url: &Url) -> Result<Option<String>, AnalysisError> {
    let pdf = fetch_pdf(&state.http, url, state.config.download_timeout_secs).await?;
    let document = extract_text(&pdf).await?;
    // The temp file has served its purpose; release it before the model
    // round-trips.
    drop(pdf);

    let Some(document) = document else {
        return Ok(None);
    };

    Ok(Some(state.analyzer.analyze(&document).await))
}

// ── Health endpoints ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub features: Vec<&'static str>,
}

pub async fn liveness_handler() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "healthy",
        service: SERVICE_NAME,
        version: VERSION,
        features: vec!["Enhanced Medical Knowledge", "Caching", "Compression"],
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub api_available: bool,
    pub cache_enabled: bool,
    pub version: &'static str,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        // Config validation already refused to start without a credential.
        api_available: !state.config.api_key.is_empty(),
        cache_enabled: state.config.cache_capacity > 0,
        version: VERSION,
    })
}
