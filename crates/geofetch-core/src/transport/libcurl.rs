//! Streaming GET over a libcurl easy handle.

use std::cell::{Cell, RefCell};
use std::str;
use std::time::Duration;

use curl::easy::{Easy, List};

use super::{parse_response_head, BodySink, TransferError, Transport};
use crate::config::FetchConfig;

/// Per-transfer libcurl settings.
#[derive(Debug, Clone)]
pub struct CurlOptions {
    /// Receive buffer size; libcurl never hands more than this to one write callback.
    pub buffer_size: usize,
    pub connect_timeout: Duration,
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    pub timeout: Duration,
    pub follow_redirects: bool,
    pub max_redirections: u32,
    pub max_recv_speed: Option<u64>,
    pub user_agent: Option<String>,
}

impl From<&FetchConfig> for CurlOptions {
    fn from(cfg: &FetchConfig) -> Self {
        Self {
            buffer_size: cfg.chunk_size,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            low_speed_limit: cfg.low_speed_limit_bytes,
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
            follow_redirects: cfg.follow_redirects,
            max_redirections: cfg.max_redirections,
            max_recv_speed: cfg.max_bytes_per_sec,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self::from(&FetchConfig::default())
    }
}

/// [`Transport`] backed by libcurl. One easy handle per call, dropped on return.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: CurlOptions,
}

impl CurlTransport {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CurlOptions {
        &self.options
    }

    fn handle(&self, url: &str, headers: &[(String, String)]) -> Result<Easy, curl::Error> {
        let opts = &self.options;
        let mut easy = Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(opts.follow_redirects)?;
        easy.max_redirections(opts.max_redirections)?;
        easy.buffer_size(opts.buffer_size)?;
        easy.connect_timeout(opts.connect_timeout)?;
        // Abort when throughput stays under the limit; the hard timeout is only a backstop.
        easy.low_speed_limit(opts.low_speed_limit)?;
        easy.low_speed_time(opts.low_speed_time)?;
        easy.timeout(opts.timeout)?;
        if let Some(speed) = opts.max_recv_speed {
            easy.max_recv_speed(speed)?;
        }
        if let Some(agent) = &opts.user_agent {
            easy.useragent(agent)?;
        }

        if !headers.is_empty() {
            let mut list = List::new();
            for (k, v) in headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(easy)
    }
}

impl Transport for CurlTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
        sink: &mut dyn BodySink,
    ) -> Result<(), TransferError> {
        let mut easy = self.handle(url, headers)?;
        let header_lines: RefCell<Vec<String>> = RefCell::new(Vec::new());
        let announced = Cell::new(false);
        let mut sink_error: Option<TransferError> = None;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(line) = str::from_utf8(data) {
                    let line = line.trim_end();
                    let mut lines = header_lines.borrow_mut();
                    // A status line starts a new response (redirect hop, proxy CONNECT).
                    if line.starts_with("HTTP/") {
                        lines.clear();
                    }
                    if !line.is_empty() {
                        lines.push(line.to_string());
                    }
                }
                true
            })?;
            transfer.write_function(|data| {
                let result = if announced.replace(true) {
                    sink.on_chunk(data)
                } else {
                    let head = parse_response_head(&header_lines.borrow());
                    sink.on_response(&head).and_then(|()| sink.on_chunk(data))
                };
                match result {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        sink_error = Some(e);
                        Ok(0) // short count aborts the transfer
                    }
                }
            })?;
            transfer.perform()
        };

        if let Some(e) = sink_error {
            return Err(e);
        }
        performed?;

        // Empty body: the write callback never ran.
        if !announced.get() {
            let mut head = parse_response_head(&header_lines.into_inner());
            if head.status == 0 {
                head.status = easy.response_code()?;
            }
            sink.on_response(&head)?;
        }
        Ok(())
    }
}
