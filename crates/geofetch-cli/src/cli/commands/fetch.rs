//! `geofetch fetch <url>` – download one URL to a local file.

use anyhow::{bail, Result};
use geofetch_core::checksum;
use geofetch_core::config::FetchConfig;
use geofetch_core::url_model::{derive_filename, parse_credentials};
use geofetch_core::{Downloader, TransferProgress};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// Downloads `url`; a failed transfer becomes an error so the process exits nonzero.
pub fn run_fetch(cfg: &FetchConfig, url: &str, output: Option<&Path>, sha256: bool) -> Result<()> {
    let destination = match output {
        Some(path) => path.to_path_buf(),
        None => default_destination(url)?,
    };

    let downloader = Downloader::from_config(cfg);
    let mut last_print: Option<Instant> = None;
    let report = downloader.download_with_progress(&destination, url, |p| {
        let now = Instant::now();
        let finished = p.total_size == Some(p.bytes_written);
        if finished || last_print.map_or(true, |t| now.duration_since(t) >= PROGRESS_INTERVAL) {
            eprint!("\r  {}  ", format_progress(p));
            let _ = std::io::stderr().flush();
            last_print = Some(now);
        }
    })?;
    if last_print.is_some() {
        eprintln!();
    }

    if let Some(err) = report.error() {
        bail!(
            "download of {} failed after {} bytes ({} left in place): {}",
            report.sanitized_url,
            report.bytes_written,
            destination.display(),
            err
        );
    }
    println!("{}  {} bytes", destination.display(), report.bytes_written);

    if sha256 {
        let digest = checksum::sha256_path(&destination)?;
        println!("{}  {}", digest, destination.display());
    }
    Ok(())
}

/// File name from the URL path, in the current directory.
fn default_destination(url: &str) -> Result<PathBuf> {
    let credentials = parse_credentials(url)?;
    Ok(PathBuf::from(derive_filename(&credentials.sanitized_url)))
}

pub(crate) fn format_progress(p: &TransferProgress) -> String {
    const MIB: f64 = 1_048_576.0;
    let done = p.bytes_written as f64 / MIB;
    match (p.total_size, p.percent()) {
        (Some(total), Some(pct)) => {
            format!("{:.1} / {:.1} MiB ({:.1}%)", done, total as f64 / MIB, pct)
        }
        _ => format!("{:.1} MiB", done),
    }
}
