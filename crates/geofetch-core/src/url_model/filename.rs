//! Local filename derivation from a URL path.

/// Used when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Derives a safe local filename from the last non-empty path segment of `url`.
///
/// Inline credentials and the query string never contribute to the name.
/// Falls back to `download.bin` when the URL does not parse or the path is
/// empty, `.` or `..`.
pub fn derive_filename(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()?
                .filter(|s| !s.is_empty())
                .last()
                .map(sanitize_filename)
        })
        .filter(|name| !name.is_empty() && name != "." && name != "..")
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

/// Makes `name` safe as a single Linux path component.
///
/// Separators, NUL and control characters become `_` (runs collapsed),
/// leading/trailing dots, spaces and underscores are trimmed, and the result
/// is cut to `NAME_MAX` bytes on a char boundary.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let unsafe_char = matches!(c, '/' | '\\' | ' ' | '\t') || c.is_control();
        if unsafe_char {
            if !out.ends_with('_') {
                out.push('_');
            }
        } else {
            out.push(c);
        }
    }

    let mut trimmed = out.trim_matches(|c| matches!(c, '.' | ' ' | '_'));
    if trimmed.len() > NAME_MAX {
        let mut cut = NAME_MAX;
        while !trimmed.is_char_boundary(cut) {
            cut -= 1;
        }
        trimmed = &trimmed[..cut];
    }
    trimmed.to_string()
}
