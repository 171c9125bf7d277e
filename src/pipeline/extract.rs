//! Text extraction: turn a spooled PDF into a single text blob.
//!
//! Delegates the parsing entirely to the `pdf-extract` crate and runs it
//! under `spawn_blocking` — PDF parsing is CPU-bound and must not stall the
//! runtime's I/O workers.
//!
//! An empty document is NOT an error. `Ok(None)` is the distinct
//! "extraction produced no content" outcome the handler reports as such; a
//! hard parse failure is `Err(AnalysisError::Extraction)`. Whether the text
//! is actually medical is not judged here — that call belongs to the model
//! prompt.

use crate::error::AnalysisError;
use crate::pipeline::fetch::FetchedPdf;
use tracing::debug;

/// Text extracted from one document, alive for a single request.
pub struct ExtractedDocument {
    pub text: String,
}

impl ExtractedDocument {
    /// Whitespace-separated word count, used by the fallback analysis.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Extract the text of a fetched PDF, page order preserved.
pub async fn extract_text(pdf: &FetchedPdf) -> Result<Option<ExtractedDocument>, AnalysisError> {
    let path = pdf.path().to_path_buf();
    let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_by_pages(&path))
        .await
        .map_err(|e| AnalysisError::Internal(format!("extraction task failed: {e}")))?
        .map_err(|e| AnalysisError::Extraction(e.to_string()))?;

    debug!(pages = pages.len(), "PDF parsed");
    Ok(assemble(pages))
}

/// Join page texts with a separator; whitespace-only output collapses to the
/// empty-document outcome.
fn assemble(pages: Vec<String>) -> Option<ExtractedDocument> {
    if pages.is_empty() {
        return None;
    }
    let text = pages.join("\n");
    if text.trim().is_empty() {
        return None;
    }
    Some(ExtractedDocument { text })
}
