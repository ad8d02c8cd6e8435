//! Per-call transfer bookkeeping and progress snapshots.

use std::fmt;

use crate::transport::TransferError;

/// Outcome of one transfer.
#[derive(Debug)]
pub enum TransferStatus {
    InProgress,
    Completed,
    /// Transfer stopped early; the destination keeps whatever was written.
    Failed(TransferError),
}

impl TransferStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferStatus::Completed)
    }
}

/// Lives for the duration of one download call.
#[derive(Debug)]
pub struct TransferState {
    pub bytes_written: u64,
    /// `None` when the server did not announce a usable `Content-Length`.
    pub total_size: Option<u64>,
    pub status: TransferStatus,
}

impl TransferState {
    pub fn new() -> Self {
        Self {
            bytes_written: 0,
            total_size: None,
            status: TransferStatus::InProgress,
        }
    }

    pub fn progress(&self) -> TransferProgress {
        TransferProgress {
            bytes_written: self.bytes_written,
            total_size: self.total_size,
        }
    }
}

impl Default for TransferState {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot handed to progress observers after each chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub bytes_written: u64,
    pub total_size: Option<u64>,
}

impl TransferProgress {
    /// Percentage complete, or `None` when the total size is unknown.
    /// Exactly `100.0` once `bytes_written` reaches the total.
    pub fn percent(&self) -> Option<f64> {
        let total = self.total_size?;
        if self.bytes_written >= total {
            return Some(100.0);
        }
        Some(self.bytes_written as f64 * 100.0 / total as f64)
    }
}

/// `<bytes> [<pct>%]`, or just `<bytes>` when the total is unknown.
impl fmt::Display for TransferProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percent() {
            Some(pct) => write!(f, "{:>10}  [{:.2}%]", self.bytes_written, pct),
            None => write!(f, "{:>10}", self.bytes_written),
        }
    }
}
