//! Analysis orchestration: prompt the model, retry on failure, fall back.
//!
//! This is the only stage with decision logic. It is intentionally
//! infallible outward — [`Analyzer::analyze`] always resolves to either a
//! real analysis or the deterministic degraded message, so model
//! unavailability never turns a successfully extracted document into an
//! error response.
//!
//! ## Retry Strategy
//!
//! Provider failures are retried up to [`RetryPolicy::max_attempts`] with a
//! fixed pause between attempts — no backoff, no jitter, no severity
//! sub-classification. The pause suspends only this request's task; other
//! requests keep flowing.

use crate::cache::AnalysisCache;
use crate::config::RetryPolicy;
use crate::llm::LanguageModel;
use crate::pipeline::extract::ExtractedDocument;
use crate::prompts;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Owns the prompt template, the retry policy, and the analysis cache.
///
/// Shared read-only across request tasks; the model is injected so tests
/// substitute a double without global state.
pub struct Analyzer {
    llm: Arc<dyn LanguageModel>,
    retry: RetryPolicy,
    cache: AnalysisCache,
}

impl Analyzer {
    pub fn new(llm: Arc<dyn LanguageModel>, retry: RetryPolicy, cache_capacity: usize) -> Self {
        Self {
            llm,
            retry,
            cache: AnalysisCache::new(cache_capacity),
        }
    }

    /// Analyse an extracted document. Never fails outward.
    pub async fn analyze(&self, document: &ExtractedDocument) -> String {
        let key = AnalysisCache::key(&document.text, prompts::PROMPT_VERSION);
        if let Some(hit) = self.cache.get(&key) {
            debug!("analysis served from cache");
            return hit;
        }

        let prompt = format!("{}\n\n{}", prompts::ANALYSIS_PROMPT, document.text);

        for attempt in 1..=self.retry.max_attempts {
            match self.llm.complete(&prompt).await {
                Ok(analysis) => {
                    self.cache.insert(key, analysis.clone());
                    return analysis;
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        error = %e,
                        "LLM call failed"
                    );
                    if attempt < self.retry.max_attempts {
                        sleep(self.retry.delay).await;
                    }
                }
            }
        }

        // Fallback results are deliberately not cached: the provider may
        // recover before the same document is submitted again.
        info!(
            words = document.word_count(),
            "LLM unavailable, returning fallback analysis"
        );
        prompts::fallback_analysis(document.word_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Model double that fails the first `failures` calls, then succeeds.
    struct FlakyModel {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyModel {
        fn failing(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LanguageModel for FlakyModel {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(LlmError::Request("connection reset".into()))
            } else {
                Ok("### Executive Summary\nAll values within range.".to_string())
            }
        }
    }

    fn document(text: &str) -> ExtractedDocument {
        ExtractedDocument { text: text.into() }
    }

    fn analyzer(llm: Arc<FlakyModel>, retry: RetryPolicy) -> Analyzer {
        Analyzer::new(llm, retry, 8)
    }

    #[tokio::test]
    async fn healthy_model_is_invoked_exactly_once() {
        let llm = Arc::new(FlakyModel::failing(0));
        let analyzer = analyzer(Arc::clone(&llm), RetryPolicy::default());

        let analysis = analyzer.analyze(&document("HbA1c 7.2")).await;
        assert!(analysis.contains("Executive Summary"));
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_model_is_invoked_exactly_max_attempts_times() {
        let llm = Arc::new(FlakyModel::failing(u32::MAX));
        let analyzer = analyzer(Arc::clone(&llm), RetryPolicy::default());

        let started = tokio::time::Instant::now();
        let analysis = analyzer.analyze(&document("one two three")).await;

        assert_eq!(llm.calls(), 3);
        assert!(analysis.contains("Words: Approximately 3"), "got: {analysis}");
        // Two pauses of the fixed delay between three attempts, nothing more.
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn recovery_on_final_attempt_still_succeeds() {
        let llm = Arc::new(FlakyModel::failing(2));
        let analyzer = analyzer(Arc::clone(&llm), RetryPolicy::default());

        let analysis = analyzer.analyze(&document("HbA1c 7.2")).await;
        assert!(analysis.contains("Executive Summary"));
        assert_eq!(llm.calls(), 3);
    }

    #[tokio::test]
    async fn identical_document_is_served_from_cache() {
        let llm = Arc::new(FlakyModel::failing(0));
        let analyzer = analyzer(Arc::clone(&llm), RetryPolicy::default());
        let doc = document("HbA1c 7.2");

        let first = analyzer.analyze(&doc).await;
        let second = analyzer.analyze(&doc).await;

        assert_eq!(first, second);
        assert_eq!(llm.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fallback_is_not_cached() {
        // Fails all three attempts of the first analysis, then recovers.
        let llm = Arc::new(FlakyModel::failing(3));
        let analyzer = analyzer(Arc::clone(&llm), RetryPolicy::default());
        let doc = document("one two");

        let first = analyzer.analyze(&doc).await;
        assert!(first.contains("Fallback Analysis Mode"));
        assert_eq!(llm.calls(), 3);

        let second = analyzer.analyze(&doc).await;
        assert!(second.contains("Executive Summary"));
        assert_eq!(llm.calls(), 4);
    }

    #[tokio::test]
    async fn fallback_statistics_are_deterministic() {
        let llm = Arc::new(FlakyModel::failing(u32::MAX));
        let policy = RetryPolicy::new(3, Duration::from_millis(0));
        let analyzer = analyzer(Arc::clone(&llm), policy);

        let first = analyzer.analyze(&document("a b c d e")).await;
        let second = analyzer.analyze(&document("a b c d e")).await;
        assert_eq!(first, second);
        assert!(first.contains("Words: Approximately 5"));
    }
}
