//! Authenticated streaming downloader.
//!
//! Fetches one URL into one local file. Inline `user:pass@` credentials are
//! stripped from the URL and sent as a Basic `Authorization` header instead;
//! only the sanitized URL is logged. The body is written chunk by chunk, so
//! memory use does not depend on file size.
//!
//! Transport failures never escape as `Err`: they are logged and returned as
//! [`TransferStatus::Failed`] inside a [`DownloadReport`]. The destination is
//! left as it was when the failure happened (partial files are not removed).
//! Only a malformed URL or an unopenable destination yield `Err`, both before
//! any network activity.

mod error;
mod sink;
mod state;

pub use error::DownloadError;
pub use state::{TransferProgress, TransferState, TransferStatus};

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;
use crate::transport::{classify, CurlOptions, CurlTransport, TransferError, Transport};
use crate::url_model::parse_credentials;
use sink::FileSink;

/// One URL to one path. Consumed by [`Downloader::download_request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub source_url: String,
    pub destination_path: PathBuf,
}

impl DownloadRequest {
    pub fn new(source_url: impl Into<String>, destination_path: impl Into<PathBuf>) -> Self {
        Self {
            source_url: source_url.into(),
            destination_path: destination_path.into(),
        }
    }
}

/// What happened to a download that passed URL and destination checks.
#[derive(Debug)]
pub struct DownloadReport {
    /// Requested URL without inline credentials.
    pub sanitized_url: String,
    pub destination: PathBuf,
    pub bytes_written: u64,
    pub total_size: Option<u64>,
    pub status: TransferStatus,
}

impl DownloadReport {
    pub fn is_success(&self) -> bool {
        self.status.is_completed()
    }

    pub fn error(&self) -> Option<&TransferError> {
        match &self.status {
            TransferStatus::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Downloader bound to one transport.
#[derive(Debug, Clone, Default)]
pub struct Downloader<T = CurlTransport> {
    transport: T,
}

impl Downloader<CurlTransport> {
    /// libcurl transport configured from `cfg`.
    pub fn from_config(cfg: &FetchConfig) -> Self {
        Self::new(CurlTransport::new(CurlOptions::from(cfg)))
    }
}

impl<T: Transport> Downloader<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn download(
        &self,
        destination: impl AsRef<Path>,
        source_url: &str,
    ) -> Result<DownloadReport, DownloadError> {
        self.download_with_progress(destination, source_url, |_| {})
    }

    pub fn download_request(
        &self,
        request: DownloadRequest,
    ) -> Result<DownloadReport, DownloadError> {
        self.download(&request.destination_path, &request.source_url)
    }

    /// Like [`download`](Self::download), calling `on_progress` after every chunk written.
    pub fn download_with_progress<F>(
        &self,
        destination: impl AsRef<Path>,
        source_url: &str,
        mut on_progress: F,
    ) -> Result<DownloadReport, DownloadError>
    where
        F: FnMut(&TransferProgress),
    {
        let destination = destination.as_ref();
        let credentials = parse_credentials(source_url)?;
        let headers: Vec<(String, String)> = credentials.authorization().into_iter().collect();
        if credentials.has_credentials() && headers.is_empty() {
            tracing::warn!(
                url = %credentials.sanitized_url,
                "incomplete inline credentials ignored; sending unauthenticated request"
            );
        }

        let file = File::create(destination).map_err(|source| DownloadError::Destination {
            path: destination.to_path_buf(),
            source,
        })?;
        tracing::info!("GET {}", credentials.sanitized_url);

        let mut sink = FileSink::new(file, destination, &mut on_progress);
        let outcome = self
            .transport
            .get(&credentials.sanitized_url, &headers, &mut sink)
            .and_then(|()| sink.finish());
        let mut state = sink.into_state();

        state.status = match outcome {
            Ok(()) => {
                tracing::info!(
                    bytes = state.bytes_written,
                    "downloaded {} to {}",
                    credentials.sanitized_url,
                    destination.display()
                );
                TransferStatus::Completed
            }
            Err(e) => {
                tracing::error!(
                    kind = ?classify(&e),
                    bytes = state.bytes_written,
                    "download of {} failed: {}",
                    credentials.sanitized_url,
                    e
                );
                TransferStatus::Failed(e)
            }
        };

        Ok(DownloadReport {
            sanitized_url: credentials.sanitized_url,
            destination: destination.to_path_buf(),
            bytes_written: state.bytes_written,
            total_size: state.total_size,
            status: state.status,
        })
    }
}

/// Downloads `source_url` to `destination` with the default libcurl transport.
pub fn download(
    destination: impl AsRef<Path>,
    source_url: &str,
) -> Result<DownloadReport, DownloadError> {
    Downloader::<CurlTransport>::default().download(destination, source_url)
}

/// [`download`] with a per-chunk progress callback.
pub fn download_with_progress<F>(
    destination: impl AsRef<Path>,
    source_url: &str,
    on_progress: F,
) -> Result<DownloadReport, DownloadError>
where
    F: FnMut(&TransferProgress),
{
    Downloader::<CurlTransport>::default().download_with_progress(
        destination,
        source_url,
        on_progress,
    )
}
