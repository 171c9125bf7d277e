//! Error types for the medreport service.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`AnalysisError`] — **Fatal for the request**: the pipeline cannot
//!   produce an analysis (download failed, the PDF could not be parsed).
//!   Rendered into the `{status: "error"}` response envelope by the request
//!   handler.
//!
//! * [`LlmError`] — **Recoverable**: a single language-model call failed.
//!   The orchestrator retries it and, once attempts are exhausted, absorbs it
//!   into the local fallback analysis. An `LlmError` is never surfaced to a
//!   client.
//!
//! The separation keeps the handler's error mapping exhaustive: everything it
//! can see is an `AnalysisError`, and every `AnalysisError` has a stable
//! user-facing message.

use thiserror::Error;

/// All fatal per-request errors surfaced in the response envelope.
///
/// Model failures use [`LlmError`] and are absorbed by
/// [`crate::pipeline::analyze::Analyzer`] rather than propagated here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    // ── Download errors ───────────────────────────────────────────────────
    /// The server answered with a non-success HTTP status.
    ///
    /// The display string is part of the API contract — clients match on it.
    #[error("Failed to download the PDF from URL: {url}")]
    DownloadFailed {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Download exceeded the configured timeout.
    #[error("Failed to download the PDF from URL: {url}: timed out after {secs}s")]
    DownloadTimeout { url: String, secs: u64 },

    /// The request failed before an HTTP status was received (DNS failure,
    /// refused connection, interrupted body).
    #[error("Failed to download the PDF from URL: {url}: {reason}")]
    DownloadRequest { url: String, reason: String },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The PDF parser rejected the document outright.
    ///
    /// An empty-but-parseable document is NOT an error; it is the distinct
    /// `Ok(None)` outcome of [`crate::pipeline::extract::extract_text`].
    #[error("Failed to parse PDF: {0}")]
    Extraction(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Temp-file plumbing failed while spooling the download to disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder or environment validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A failed language-model call.
///
/// Classified uniformly on purpose: the retry policy does not distinguish a
/// rate limit from a transport failure or a garbled body. Every variant is
/// retried the same way and, after the final attempt, replaced by the
/// fallback analysis.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The HTTP request to the provider failed outright.
    #[error("LLM request failed: {0}")]
    Request(String),

    /// The provider answered with an error status.
    #[error("LLM returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not contain a usable completion.
    #[error("LLM response malformed: {0}")]
    MalformedResponse(String),
}
