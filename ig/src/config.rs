//! ignr configuration types and loading

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the platform config dir holding everything ignr owns
pub const CONFIG_DIR_NAME: &str = "ignr";

/// Main ignr configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output file used when `-o` is not given
    #[serde(rename = "default-output", skip_serializing_if = "String::is_empty")]
    pub default_output: String,

    /// Directory of user-authored templates
    #[serde(rename = "user-template-dir", skip_serializing_if = "String::is_empty")]
    pub user_template_dir: String,

    /// Override for the template cache checkout
    #[serde(rename = "cache-dir", skip_serializing_if = "String::is_empty")]
    pub cache_dir: String,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Generated header settings
    pub generator: GeneratorConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load; no fallback
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Project-local config: .ignr.yml
        let local_config = PathBuf::from(".ignr.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // User config: ~/.config/ignr/ignr.yml
        if let Ok(dir) = config_dir() {
            let user_config = dir.join("ignr.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Log level from config, read before logging is set up
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        // an empty file is a valid, all-defaults config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Configured default output, if any
    pub fn default_output(&self) -> Option<&str> {
        let output = self.default_output.trim();
        (!output.is_empty()).then_some(output)
    }

    /// User template directory, created if missing
    pub fn user_template_dir(&self) -> Result<PathBuf> {
        let path = match self.user_template_dir.trim() {
            "" => config_dir()?.join("templates"),
            configured => expand_path(configured),
        };
        fs::create_dir_all(&path).context(format!("create user templates dir {}", path.display()))?;
        Ok(path)
    }

    /// Template cache checkout
    pub fn cache_path(&self) -> Result<PathBuf> {
        match self.cache_dir.trim() {
            "" => Ok(config_dir()?.join("cache").join("github-gitignore")),
            configured => Ok(expand_path(configured)),
        }
    }
}

/// Generated header settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Name written after `# Generated by`
    pub name: String,

    /// Emit the header at all
    pub header: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            header: true,
        }
    }
}

/// `<config_dir>/ignr`
pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .ok_or_else(|| eyre!("could not determine the user config directory"))
}

/// Presets file, with its directory created
pub fn presets_path() -> Result<PathBuf> {
    let dir = config_dir()?;
    fs::create_dir_all(&dir).context(format!("create config dir {}", dir.display()))?;
    Ok(dir.join("presets.yaml"))
}

/// Resolve a leading `~/` against the home directory
pub fn expand_path(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
