//! URL modeling: inline credential extraction and local filename derivation.
//!
//! Only the sanitized form of a URL (credentials removed) may reach logs or
//! the HTTP client; the credentials travel separately as an `Authorization`
//! header.

mod credentials;
mod filename;

pub use credentials::{basic_auth_value, parse_credentials, ParsedCredentials};
pub use filename::{derive_filename, sanitize_filename};
