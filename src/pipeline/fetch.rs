//! Document fetching: download a client-supplied URL to a scoped temp file.
//!
//! ## Why download to a temp file?
//!
//! The PDF parser wants a file-system path, and medical reports can be tens
//! of megabytes — streaming the body chunk-by-chunk to disk keeps peak
//! memory independent of document size. Wrapping the file in
//! [`tempfile::NamedTempFile`] guarantees deletion when [`FetchedPdf`] is
//! dropped, on every exit path including errors downstream.

use crate::error::AnalysisError;
use futures::StreamExt;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

/// A downloaded PDF spooled to a request-scoped temp file.
///
/// The file is deleted when this value is dropped; callers must finish
/// extraction before letting it go out of scope.
pub struct FetchedPdf {
    file: NamedTempFile,
}

impl FetchedPdf {
    /// Path of the spooled document.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    #[cfg(test)]
    pub(crate) fn from_tempfile(file: NamedTempFile) -> Self {
        Self { file }
    }
}

/// Download `url` into a temp file, enforcing the download budget.
///
/// A non-success status fails with [`AnalysisError::DownloadFailed`] carrying
/// the offending URL and status; nothing is retried here.
pub async fn fetch_pdf(
    http: &reqwest::Client,
    url: &Url,
    timeout_secs: u64,
) -> Result<FetchedPdf, AnalysisError> {
    info!(%url, "downloading PDF");

    let response = http
        .get(url.clone())
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await
        .map_err(|e| classify_request_error(e, url, timeout_secs))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AnalysisError::DownloadFailed {
            url: url.to_string(),
            status,
        });
    }

    let file = NamedTempFile::new()?;
    let mut sink = tokio::fs::File::from_std(file.reopen()?);

    let mut body = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| classify_request_error(e, url, timeout_secs))?;
        sink.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    sink.flush().await?;

    debug!(path = %file.path().display(), bytes = written, "PDF spooled to temp file");
    Ok(FetchedPdf { file })
}

fn classify_request_error(error: reqwest::Error, url: &Url, timeout_secs: u64) -> AnalysisError {
    if error.is_timeout() {
        AnalysisError::DownloadTimeout {
            url: url.to_string(),
            secs: timeout_secs,
        }
    } else {
        AnalysisError::DownloadRequest {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}
