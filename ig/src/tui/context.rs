//! Data shared by every screen in a session

use std::fmt;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::Utc;
use presetstore::{MemoryStore, Preset, PresetRepository, StoreError, sluggify};
use tracing::debug;

use super::theme::Theme;
use crate::output::DEFAULT_OUTPUT;
use crate::templates::{MergeOptions, TemplateIndex};

/// Name and version stamped into generated headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
    pub header: bool,
}

impl Default for GeneratorInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            header: true,
        }
    }
}

/// Session-wide state handed by `&mut` to the screen on top of the stack
pub struct SessionContext {
    pub theme: Theme,
    /// Loaded once per session
    pub catalog: Rc<TemplateIndex>,
    /// Reloaded from `store` after each mutation
    pub presets: Vec<Preset>,
    pub store: Box<dyn PresetRepository>,
    /// Where "use preset" writes
    pub output: PathBuf,
    pub generator: GeneratorInfo,
}

impl SessionContext {
    /// Build a context and load the current preset list
    pub fn new(theme: Theme, catalog: Rc<TemplateIndex>, store: Box<dyn PresetRepository>) -> Result<Self, StoreError> {
        let presets = store.list()?;
        Ok(Self {
            theme,
            catalog,
            presets,
            store,
            output: PathBuf::from(".").join(DEFAULT_OUTPUT),
            generator: GeneratorInfo::default(),
        })
    }

    /// Context for sessions that never persist presets
    pub fn detached(theme: Theme, catalog: Rc<TemplateIndex>, presets: Vec<Preset>) -> Self {
        Self {
            theme,
            catalog,
            store: Box::new(MemoryStore::with_presets(presets.clone())),
            presets,
            output: PathBuf::from(".").join(DEFAULT_OUTPUT),
            generator: GeneratorInfo::default(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_generator(mut self, generator: GeneratorInfo) -> Self {
        self.generator = generator;
        self
    }

    /// Re-read presets from the store
    pub fn reload_presets(&mut self) -> Result<(), StoreError> {
        self.presets = self.store.list()?;
        debug!(count = self.presets.len(), "SessionContext::reload_presets: reloaded");
        Ok(())
    }

    /// True when a preset already owns `key`
    pub fn key_exists(&self, key: &str) -> bool {
        let key = key.trim();
        self.presets.iter().any(|p| p.effective_key().eq_ignore_ascii_case(key))
    }

    /// Merge options for output written from inside the session
    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            deduplicate: true,
            add_header: self.generator.header,
            generator: self.generator.name.clone(),
            version: self.generator.version.clone(),
            timestamp: Utc::now(),
        }
    }

    /// Slug preview for a name being typed
    pub fn key_for(name: &str) -> String {
        sluggify(name.trim())
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("templates", &self.catalog.len())
            .field("presets", &self.presets.len())
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
