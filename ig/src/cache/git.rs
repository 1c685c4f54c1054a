//! Thin wrapper over the `git` binary

use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{IgnrError, Result};

/// Shallow, single-branch clone of `url` into `dest`
pub fn clone_shallow(url: &str, dest: &Path) -> Result<()> {
    run(
        None,
        [
            OsStr::new("clone"),
            OsStr::new("--depth"),
            OsStr::new("1"),
            OsStr::new("--single-branch"),
            OsStr::new(url),
            dest.as_os_str(),
        ],
    )
    .map(|_| ())
}

/// Fast-forward the checkout at `repo`
pub fn pull_ff_only(repo: &Path) -> Result<()> {
    run(Some(repo), ["pull", "--ff-only"].map(OsStr::new)).map(|_| ())
}

/// Full SHA of `HEAD` at `repo`
pub fn head_commit(repo: &Path) -> Result<String> {
    run(Some(repo), ["rev-parse", "HEAD"].map(OsStr::new))
}

/// Run git and return trimmed stdout; failures carry the command line and stderr
fn run<'a>(cwd: Option<&Path>, args: impl IntoIterator<Item = &'a OsStr>) -> Result<String> {
    let args: Vec<&OsStr> = args.into_iter().collect();
    let line = command_line(&args);
    debug!(%line, ?cwd, "git::run: called");

    let mut command = Command::new("git");
    command.args(&args).stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command
        .output()
        .map_err(|e| IgnrError::Cache(format!("{}: {}", line, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(%line, status = ?output.status, "git::run: command failed");
        return Err(IgnrError::Cache(format!("{}: {}", line, stderr.trim())));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn command_line(args: &[&OsStr]) -> String {
    let mut line = String::from("git");
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let args = ["pull", "--ff-only"].map(OsStr::new);
        assert_eq!(command_line(&args), "git pull --ff-only");
    }

    #[test]
    fn test_failure_carries_command_line() {
        let dir = tempfile::TempDir::new().unwrap();
        // not a repository, so rev-parse fails (or git is missing entirely)
        let err = head_commit(dir.path()).unwrap_err().to_string();
        assert!(err.starts_with("git rev-parse HEAD: "), "{}", err);
    }
}
