//! External command-line tools (gdal_translate, gdalwarp, tiffinfo, ...).
//!
//! Imaging work is delegated to external binaries. This module only provides
//! the plumbing those wrappers share: running a tool with inherited
//! stdout/stderr, checking inputs exist, and owning temporary outputs.

mod error;
mod temp;

pub use error::ToolError;
pub use temp::TempArtifact;

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

/// Runs `program` with `args`, streaming its stdout/stderr to ours.
///
/// Arguments are passed directly (no shell), so paths need no quoting.
/// Fails with [`ToolError::Spawn`] if the binary cannot be started and
/// [`ToolError::Exit`] on a nonzero exit status.
pub fn run_tool<I, S>(program: &str, args: I) -> Result<(), ToolError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<S> = args.into_iter().collect();
    let command_line = std::iter::once(program.to_string())
        .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ");
    tracing::info!("{}", command_line);

    let status = Command::new(program)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|source| ToolError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !status.success() {
        tracing::warn!(%status, "{} failed", program);
        return Err(ToolError::Exit {
            program: program.to_string(),
            status,
        });
    }
    Ok(())
}

/// Returns [`ToolError::ResourceNotFound`] unless `path` is an existing file.
pub fn require_file(path: &Path) -> Result<(), ToolError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ToolError::ResourceNotFound {
            path: path.to_path_buf(),
        })
    }
}
