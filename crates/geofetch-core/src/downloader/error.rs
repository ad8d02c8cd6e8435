//! Errors that abort a download before any network activity.

use std::io;
use std::path::PathBuf;

/// Configuration/programming mistakes surfaced to the caller.
///
/// Transport failures are not represented here; they end up in
/// [`TransferStatus::Failed`](super::TransferStatus::Failed).
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// URL does not parse into scheme/authority/path, or is not http(s).
    #[error("malformed URL: {reason}")]
    MalformedUrl { reason: String },

    /// Destination could not be created or truncated.
    #[error("cannot open destination {}: {source}", path.display())]
    Destination {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DownloadError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        DownloadError::MalformedUrl {
            reason: reason.into(),
        }
    }
}
