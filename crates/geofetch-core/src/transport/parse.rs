//! Parse HTTP response header lines into a ResponseHead.

use super::ResponseHead;

/// Parse the header lines of one response (status line first).
///
/// `Content-Length` is ignored when `Transfer-Encoding: chunked` is present
/// or when it is not a plain decimal number.
pub fn parse_response_head<S: AsRef<str>>(lines: &[S]) -> ResponseHead {
    let mut status = 0;
    let mut content_length = None;
    let mut chunked = false;

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            status = line
                .split_whitespace()
                .nth(1)
                .and_then(|code| code.parse().ok())
                .unwrap_or(0);
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value
                    .bytes()
                    .all(|b| b.is_ascii_digit())
                    .then(|| value.parse::<u64>().ok())
                    .flatten();
            } else if name.eq_ignore_ascii_case("transfer-encoding") {
                chunked = value
                    .split(',')
                    .any(|coding| coding.trim().eq_ignore_ascii_case("chunked"));
            }
        }
    }

    ResponseHead {
        status,
        content_length: if chunked { None } else { content_length },
    }
}
