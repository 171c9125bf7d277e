//! Configuration types for the analysis service.
//!
//! All behaviour is controlled through [`AnalysisConfig`], built once at
//! startup via its [`AnalysisConfigBuilder`] (or [`AnalysisConfig::from_env`]
//! in the binary) and treated as read-only afterwards. Keeping every knob in
//! one immutable struct makes it trivial to share across request tasks and to
//! substitute pieces (most importantly the model client) in tests without touching
//! global state.

use crate::error::AnalysisError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Maximum LLM attempts per analysis before falling back.
pub const MAX_RETRIES: u32 = 3;

/// Fixed pause between LLM attempts. No backoff, no jitter.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Budget for downloading the PDF, end to end.
pub const DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Bounded capacity of the analysis cache. `0` disables caching.
pub const CACHE_CAPACITY: usize = 128;

/// Default generative model used by the Gemini adapter.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Fixed-delay retry policy applied by the orchestrator to LLM failures.
///
/// Modelled as a value injected into
/// [`crate::pipeline::analyze::Analyzer`] so alternative policies (backoff,
/// jitter) can be swapped without touching orchestration logic, and tests can
/// shrink the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Always ≥ 1.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRIES, RETRY_DELAY)
    }
}

/// Immutable service configuration, constructed once at startup.
#[derive(Clone)]
pub struct AnalysisConfig {
    /// Credential for the generative-model provider. Required; never logged.
    pub api_key: String,

    /// Model identifier passed to the provider.
    pub model: String,

    /// Retry policy for LLM calls.
    pub retry: RetryPolicy,

    /// Download budget for the PDF fetch, in seconds.
    ///
    /// This is the only deadline propagated into the pipeline; the model
    /// call relies on the HTTP client's defaults.
    pub download_timeout_secs: u64,

    /// Analysis cache capacity. `0` disables the cache.
    pub cache_capacity: usize,
}

impl fmt::Debug for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("retry", &self.retry)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("cache_capacity", &self.cache_capacity)
            .finish()
    }
}

impl AnalysisConfig {
    /// Create a new builder for `AnalysisConfig`.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Build the configuration from the process environment.
    ///
    /// `GEMINI_API_KEY` is required; its absence is a fatal startup error —
    /// the process refuses to start. `GEMINI_MODEL` optionally overrides the
    /// default model.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AnalysisError::InvalidConfig(
                    "Gemini API key not found. Please set the GEMINI_API_KEY environment variable."
                        .into(),
                )
            })?;

        let mut builder = Self::builder().api_key(api_key);
        if let Ok(model) = std::env::var("GEMINI_MODEL") {
            if !model.is_empty() {
                builder = builder.model(model);
            }
        }
        builder.build()
    }
}

/// Builder for [`AnalysisConfig`].
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    api_key: Option<String>,
    model: Option<String>,
    retry: Option<RetryPolicy>,
    download_timeout_secs: Option<u64>,
    cache_capacity: Option<usize>,
}

impl AnalysisConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.download_timeout_secs = Some(secs.max(1));
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AnalysisConfig, AnalysisError> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AnalysisError::InvalidConfig("API key must be non-empty".into()))?;

        let retry = self.retry.unwrap_or_default();
        if retry.max_attempts == 0 {
            return Err(AnalysisError::InvalidConfig(
                "Retry attempts must be ≥ 1".into(),
            ));
        }

        Ok(AnalysisConfig {
            api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            retry,
            download_timeout_secs: self.download_timeout_secs.unwrap_or(DOWNLOAD_TIMEOUT_SECS),
            cache_capacity: self.cache_capacity.unwrap_or(CACHE_CAPACITY),
        })
    }
}
