//! Transfer error type and its classification for log messages.

use std::fmt;
use std::io;

/// Why a transfer did not complete.
#[derive(Debug)]
pub enum TransferError {
    /// Curl reported an error (DNS, connect, reset, timeout, ...).
    Curl(curl::Error),
    /// I/O failure reported by a non-curl transport.
    Io(io::Error),
    /// Final response had a non-2xx status.
    Http(u32),
    /// Body ended before the announced `Content-Length`.
    PartialTransfer { expected: u64, received: u64 },
    /// Body ran past the announced `Content-Length`; the excess was not written.
    Overrun { expected: u64, received: u64 },
    /// Writing to the destination failed (disk full, permission denied).
    Storage(io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Curl(e) => write!(f, "{}", e),
            TransferError::Io(e) => write!(f, "{}", e),
            TransferError::Http(code) => write!(f, "HTTP {}", code),
            TransferError::PartialTransfer { expected, received } => {
                write!(f, "partial transfer: expected {} bytes, got {}", expected, received)
            }
            TransferError::Overrun { expected, received } => {
                write!(
                    f,
                    "body exceeds Content-Length: expected {} bytes, got at least {}",
                    expected, received
                )
            }
            TransferError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransferError::Curl(e) => Some(e),
            TransferError::Io(e) | TransferError::Storage(e) => Some(e),
            TransferError::Http(_)
            | TransferError::PartialTransfer { .. }
            | TransferError::Overrun { .. } => None,
        }
    }
}

impl From<curl::Error> for TransferError {
    fn from(e: curl::Error) -> Self {
        TransferError::Curl(e)
    }
}

/// Coarse failure category, used to word log messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    /// DNS, refused, reset, or the peer closed early.
    Connection,
    /// Server answered with a non-2xx status.
    Status(u32),
    /// Body length disagreed with `Content-Length`.
    Length,
    Storage,
    Other,
}

fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
        || e.is_ssl_connect_error()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}

fn classify_io_error(e: &io::Error) -> FailureKind {
    match e.kind() {
        io::ErrorKind::TimedOut => FailureKind::Timeout,
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::NotConnected
        | io::ErrorKind::BrokenPipe
        | io::ErrorKind::UnexpectedEof => FailureKind::Connection,
        _ => FailureKind::Other,
    }
}

pub fn classify(e: &TransferError) -> FailureKind {
    match e {
        TransferError::Curl(ce) => classify_curl_error(ce),
        TransferError::Io(ie) => classify_io_error(ie),
        TransferError::Http(code) => FailureKind::Status(*code),
        TransferError::PartialTransfer { .. } | TransferError::Overrun { .. } => {
            FailureKind::Length
        }
        TransferError::Storage(_) => FailureKind::Storage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_keeps_code() {
        assert_eq!(classify(&TransferError::Http(404)), FailureKind::Status(404));
        assert_eq!(classify(&TransferError::Http(503)), FailureKind::Status(503));
    }

    #[test]
    fn io_errors_map_to_connection_or_timeout() {
        let reset = TransferError::Io(io::Error::from(io::ErrorKind::ConnectionReset));
        assert_eq!(classify(&reset), FailureKind::Connection);
        let slow = TransferError::Io(io::Error::from(io::ErrorKind::TimedOut));
        assert_eq!(classify(&slow), FailureKind::Timeout);
    }

    #[test]
    fn length_and_storage() {
        let short = TransferError::PartialTransfer { expected: 10, received: 4 };
        assert_eq!(classify(&short), FailureKind::Length);
        assert_eq!(short.to_string(), "partial transfer: expected 10 bytes, got 4");
        let disk = TransferError::Storage(io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(classify(&disk), FailureKind::Storage);
        assert!(std::error::Error::source(&disk).is_some());
    }
}
