//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one static body on any path with a configurable framing mode and
//! an optional required `Authorization` value. Records every request it sees.

use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum Mode {
    /// `Content-Length` + full body.
    ContentLength,
    /// `Transfer-Encoding: chunked` with chunks of the given size.
    Chunked(usize),
    /// Announce the full length, send this many bytes, then close.
    DropAfter(usize),
    /// Respond with this status and a short text body.
    Status(u16),
    /// `302` with its own `Content-Length` body pointing at [`REDIRECT_TARGET`],
    /// which is then served chunked.
    Redirect,
}

/// Path the [`Mode::Redirect`] server sends clients to.
pub const REDIRECT_TARGET: &str = "/final";

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub mode: Mode,
    /// If set, requests without exactly this `Authorization` value get 401.
    pub required_auth: Option<String>,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            mode: Mode::ContentLength,
            required_auth: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub request_line: String,
    pub authorization: Option<String>,
}

pub struct TestServer {
    pub port: u16,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl TestServer {
    /// `http://127.0.0.1:<port><path>`
    pub fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }

    /// Same URL with inline credentials.
    pub fn url_with_credentials(&self, user: &str, pass: &str, path: &str) -> String {
        format!("http://{}:{}@127.0.0.1:{}{}", user, pass, self.port, path)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread serving `body`; it runs until the process exits.
pub fn start(body: Vec<u8>, opts: ServerOptions) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let recorded = Arc::clone(&recorded);
            let opts = opts.clone();
            thread::spawn(move || handle(stream, &body, &opts, &recorded));
        }
    });
    TestServer { port, requests }
}

/// A port nothing listens on (bound, then released).
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().unwrap().port()
}

fn handle(
    mut stream: TcpStream,
    body: &[u8],
    opts: &ServerOptions,
    recorded: &Mutex<Vec<RecordedRequest>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(10)));
    let Some(head) = read_request_head(&mut stream) else {
        return;
    };
    let request = parse_request(&head);
    recorded.lock().unwrap().push(request.clone());

    if let Some(expected) = &opts.required_auth {
        if request.authorization.as_deref() != Some(expected.as_str()) {
            let _ = stream.write_all(
                b"HTTP/1.1 401 Unauthorized\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
            return;
        }
    }

    match opts.mode {
        Mode::ContentLength => {
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(body);
        }
        Mode::Chunked(size) => write_chunked(&mut stream, body, size),
        Mode::DropAfter(sent) => {
            let header = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(&body[..sent.min(body.len())]);
            let _ = stream.flush();
            let _ = stream.shutdown(Shutdown::Both);
        }
        Mode::Status(code) => {
            let text = b"no such scene";
            let header = format!(
                "HTTP/1.1 {} Error\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                code,
                text.len()
            );
            let _ = stream.write_all(header.as_bytes());
            let _ = stream.write_all(text);
        }
        Mode::Redirect => {
            let path = request.request_line.split(' ').nth(1).unwrap_or("");
            if path == REDIRECT_TARGET {
                write_chunked(&mut stream, body, 4096);
            } else {
                let text = b"moved to the mirror";
                let header = format!(
                    "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: {}\r\n\
                     Connection: close\r\n\r\n",
                    REDIRECT_TARGET,
                    text.len()
                );
                let _ = stream.write_all(header.as_bytes());
                let _ = stream.write_all(text);
            }
        }
    }
}

fn write_chunked(stream: &mut TcpStream, body: &[u8], size: usize) {
    let _ = stream.write_all(
        b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
    );
    for chunk in body.chunks(size.max(1)) {
        let _ = stream.write_all(format!("{:x}\r\n", chunk.len()).as_bytes());
        let _ = stream.write_all(chunk);
        let _ = stream.write_all(b"\r\n");
    }
    let _ = stream.write_all(b"0\r\n\r\n");
}

/// Reads until the blank line ending the request head.
fn read_request_head(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
        if buf.len() > 64 * 1024 {
            return None;
        }
    }
    String::from_utf8(buf).ok()
}

fn parse_request(head: &str) -> RecordedRequest {
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or("").trim().to_string();
    let authorization = lines
        .take_while(|l| !l.trim().is_empty())
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("authorization"))
        .map(|(_, value)| value.trim().to_string());
    RecordedRequest {
        request_line,
        authorization,
    }
}
