//! CLI command handlers, one file per command.

mod checksum;
mod fetch;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
