//! Offline checkout of the upstream gitignore template repository
//!
//! The cache is a shallow git clone. It is created on first use by
//! `generate`/`list`/`search` and refreshed only by `ignr update`; every
//! other command works from whatever is on disk.

mod git;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{IgnrError, Result};

/// Upstream template repository
pub const UPSTREAM_URL: &str = "https://github.com/github/gitignore.git";

/// Snapshot of the cache for `ignr update` and status output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatus {
    pub initialized: bool,
    pub path: PathBuf,
    pub head_commit: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TemplateCache {
    path: PathBuf,
    remote: String,
}

impl TemplateCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            remote: UPSTREAM_URL.to_string(),
        }
    }

    /// Clone from somewhere other than upstream
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the checkout has a `.git` directory
    pub fn is_initialized(&self) -> bool {
        self.path.join(".git").is_dir()
    }

    /// Clone the repository unless it is already there; returns the checkout path
    pub fn initialize(&self) -> Result<PathBuf> {
        debug!(path = ?self.path, "TemplateCache::initialize: called");
        if self.is_initialized() {
            return Ok(self.path.clone());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| IgnrError::Cache(format!("create cache dir {}: {}", parent.display(), e)))?;
        }
        info!(remote = %self.remote, path = ?self.path, "Cloning template cache");
        git::clone_shallow(&self.remote, &self.path)?;
        Ok(self.path.clone())
    }

    /// Fast-forward an existing checkout
    pub fn update(&self) -> Result<PathBuf> {
        debug!(path = ?self.path, "TemplateCache::update: called");
        if !self.is_initialized() {
            return Err(IgnrError::Cache("cache not initialized; run generate first".to_string()));
        }
        git::pull_ff_only(&self.path)?;
        info!(path = ?self.path, "Updated template cache");
        Ok(self.path.clone())
    }

    pub fn status(&self) -> Result<CacheStatus> {
        let initialized = self.is_initialized();
        let head_commit = if initialized {
            Some(git::head_commit(&self.path)?)
        } else {
            None
        };
        Ok(CacheStatus {
            initialized,
            path: self.path.clone(),
            head_commit,
        })
    }
}
