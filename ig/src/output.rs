//! Writing the generated `.gitignore`

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{IgnrError, Result};

/// Default target when neither the command line nor config names one
pub const DEFAULT_OUTPUT: &str = ".gitignore";

/// How content lands in the target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Create if missing, otherwise append
    Append,
    /// Replace any existing content
    Overwrite,
}

/// Decision taken before anything is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePlan {
    Write(OutputMode),
    /// Target exists; ask the user first
    Confirm,
}

/// Decide how to treat the target
///
/// Append and force always proceed. A missing target is a plain write. An
/// existing target is refused outside interactive sessions.
pub fn plan_write(path: &Path, append: bool, force: bool, interactive: bool) -> Result<WritePlan> {
    if append {
        return Ok(WritePlan::Write(OutputMode::Append));
    }
    if force || !path.exists() {
        return Ok(WritePlan::Write(OutputMode::Overwrite));
    }
    if !interactive {
        return Err(IgnrError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(WritePlan::Confirm)
}

/// Write `content` to `path`
pub fn write_output(path: &Path, content: &str, mode: OutputMode) -> Result<()> {
    debug!(?path, ?mode, bytes = content.len(), "write_output: called");
    let wrap = |source| IgnrError::Write {
        path: path.to_path_buf(),
        source,
    };

    match mode {
        OutputMode::Overwrite => fs::write(path, content).map_err(wrap)?,
        OutputMode::Append => {
            let mut file = OpenOptions::new().create(true).append(true).open(path).map_err(wrap)?;
            file.write_all(content.as_bytes()).map_err(wrap)?;
        }
    }
    info!(?path, ?mode, "Wrote output");
    Ok(())
}

/// Explicit path, then configured default, then `./.gitignore`
pub fn resolve_target(explicit: Option<&Path>, configured: Option<&str>) -> PathBuf {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return path.to_path_buf();
    }
    match configured.map(str::trim) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => Path::new(".").join(DEFAULT_OUTPUT),
    }
}
