//! Temporary artifacts owned by the operation that created them.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempPath;

const PREFIX: &str = "geofetch_";

/// A named temporary file, deleted when dropped.
///
/// The file exists (empty) on creation so an external tool can overwrite it
/// by path; no handle is kept open.
#[derive(Debug)]
pub struct TempArtifact {
    path: TempPath,
}

impl TempArtifact {
    /// New artifact in the system temp dir, e.g. `TempArtifact::new(".tif")`.
    pub fn new(suffix: &str) -> io::Result<Self> {
        Self::new_in(std::env::temp_dir(), suffix)
    }

    pub fn new_in(dir: impl AsRef<Path>, suffix: &str) -> io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix(PREFIX)
            .suffix(suffix)
            .tempfile_in(dir)?;
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keeps the file on disk and returns its path.
    pub fn keep(self) -> io::Result<PathBuf> {
        self.path.keep().map_err(|e| e.error)
    }

    /// Deletes the file now, reporting failures that `Drop` would ignore.
    pub fn close(self) -> io::Result<()> {
        self.path.close()
    }
}

impl AsRef<Path> for TempArtifact {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}
