//! Body sink that writes chunks to the destination file in arrival order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::state::{TransferProgress, TransferState};
use crate::transport::{BodySink, ResponseHead, TransferError};

pub(super) struct FileSink<'a> {
    file: File,
    destination: &'a Path,
    state: TransferState,
    observer: &'a mut dyn FnMut(&TransferProgress),
}

impl<'a> FileSink<'a> {
    pub(super) fn new(
        file: File,
        destination: &'a Path,
        observer: &'a mut dyn FnMut(&TransferProgress),
    ) -> Self {
        Self {
            file,
            destination,
            state: TransferState::new(),
            observer,
        }
    }

    /// Called once the transport reports a clean end of body.
    pub(super) fn finish(&mut self) -> Result<(), TransferError> {
        self.file.flush().map_err(TransferError::Storage)?;
        match self.state.total_size {
            Some(expected) if self.state.bytes_written < expected => {
                Err(TransferError::PartialTransfer {
                    expected,
                    received: self.state.bytes_written,
                })
            }
            _ => Ok(()),
        }
    }

    /// Closes the file and hands back the counters.
    pub(super) fn into_state(self) -> TransferState {
        drop(self.file);
        self.state
    }
}

impl BodySink for FileSink<'_> {
    fn on_response(&mut self, head: &ResponseHead) -> Result<(), TransferError> {
        if !head.is_success() {
            return Err(TransferError::Http(head.status));
        }
        self.state.total_size = head.content_length;
        match head.content_length {
            Some(total) => tracing::info!(
                "Downloading: {} Bytes: {}",
                self.destination.display(),
                total
            ),
            None => tracing::info!("Downloading: {} Bytes: unknown", self.destination.display()),
        }
        Ok(())
    }

    fn on_chunk(&mut self, chunk: &[u8]) -> Result<(), TransferError> {
        if chunk.is_empty() {
            return Ok(());
        }
        let written = self.state.bytes_written + chunk.len() as u64;
        if let Some(expected) = self.state.total_size {
            if written > expected {
                return Err(TransferError::Overrun {
                    expected,
                    received: written,
                });
            }
        }
        self.file
            .write_all(chunk)
            .map_err(TransferError::Storage)?;
        self.state.bytes_written = written;

        let progress = self.state.progress();
        tracing::debug!("{}", progress);
        (self.observer)(&progress);
        Ok(())
    }
}
