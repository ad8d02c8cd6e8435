//! CLI for the geofetch downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use geofetch_core::config;
use std::path::{Path, PathBuf};

use commands::{run_checksum, run_fetch};

/// Top-level CLI for geofetch.
#[derive(Debug, Parser)]
#[command(name = "geofetch")]
#[command(about = "geofetch: streaming downloader for imagery pipeline inputs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL to a local file.
    Fetch {
        /// HTTP/HTTPS URL; may embed `user:password@` credentials.
        url: String,

        /// Destination path (default: last URL path segment, in the current directory).
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Print the SHA-256 of the file after a successful download.
        #[arg(long)]
        sha256: bool,
    },

    /// Compute SHA-256 of a file (e.g. after download).
    Checksum {
        /// Path to the file.
        path: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                url,
                output,
                sha256,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg, &url, output.as_deref(), sha256)?;
            }
            CliCommand::Checksum { path } => run_checksum(Path::new(&path))?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
