//! HTTP transport capability.
//!
//! The downloader only sees [`Transport`]: "GET this URL with these headers
//! and push the body into a [`BodySink`]". libcurl drives transfers through
//! callbacks, so the body is pushed chunk by chunk rather than pulled.
//! [`CurlTransport`] is the production adapter; tests plug in their own.

mod error;
mod libcurl;
mod parse;

pub use error::{classify, FailureKind, TransferError};
pub use libcurl::{CurlOptions, CurlTransport};
pub use parse::parse_response_head;

/// Status and size of the final response (after redirects).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHead {
    /// HTTP status code; 0 if no status line was seen.
    pub status: u32,
    /// `Content-Length`, unless absent, non-numeric, or the body is chunked.
    pub content_length: Option<u64>,
}

impl ResponseHead {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Receiver of one response body.
///
/// `on_response` is called exactly once, before any chunk. `on_chunk` is
/// called with each non-empty chunk in arrival order. An `Err` from either
/// aborts the transfer and is returned from [`Transport::get`] unchanged.
pub trait BodySink {
    fn on_response(&mut self, head: &ResponseHead) -> Result<(), TransferError>;
    fn on_chunk(&mut self, chunk: &[u8]) -> Result<(), TransferError>;
}

/// Performs a blocking streaming GET.
///
/// Returns after the body is exhausted or the transfer failed; the
/// connection is released on every path. `on_response` may not have been
/// called when an error is returned (e.g. DNS failure).
pub trait Transport {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
        sink: &mut dyn BodySink,
    ) -> Result<(), TransferError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
        sink: &mut dyn BodySink,
    ) -> Result<(), TransferError> {
        (**self).get(url, headers, sink)
    }
}
