//! In-memory preset store

use tracing::debug;

use crate::preset::{Preset, PresetFile};
use crate::{PresetRepository, Result, StoreError, timestamp_now};

/// Presets held in memory; used by tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    file: PresetFile,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing presets
    pub fn with_presets(presets: Vec<Preset>) -> Self {
        let mut file = PresetFile { presets };
        file.normalize_keys();
        Self {
            file,
            fail_writes: false,
        }
    }

    /// Make every mutation fail with a write error
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes {
            return Err(StoreError::Write {
                path: "<memory>".into(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only store"),
            });
        }
        Ok(())
    }
}

impl PresetRepository for MemoryStore {
    fn list(&self) -> Result<Vec<Preset>> {
        Ok(self.file.presets.clone())
    }

    fn find(&self, identifier: &str) -> Result<Option<Preset>> {
        Ok(self.file.position(identifier).map(|i| self.file.presets[i].clone()))
    }

    fn create(&mut self, name: &str, templates: &[String]) -> Result<Preset> {
        debug!(%name, "MemoryStore::create: called");
        self.check_writable()?;
        let preset = Preset::new(name, templates.to_vec(), timestamp_now());
        if self.file.has_key(&preset.key) {
            return Err(StoreError::KeyExists(preset.key));
        }
        self.file.presets.push(preset.clone());
        Ok(preset)
    }

    fn edit(&mut self, identifier: &str, templates: &[String]) -> Result<Preset> {
        debug!(%identifier, "MemoryStore::edit: called");
        self.check_writable()?;
        let index = self
            .file
            .position(identifier)
            .ok_or_else(|| StoreError::NotFound(identifier.to_string()))?;
        let preset = &mut self.file.presets[index];
        preset.templates = templates.to_vec();
        preset.updated = timestamp_now();
        Ok(preset.clone())
    }

    fn delete(&mut self, identifier: &str) -> Result<Preset> {
        debug!(%identifier, "MemoryStore::delete: called");
        self.check_writable()?;
        let index = self
            .file
            .position(identifier)
            .ok_or_else(|| StoreError::NotFound(identifier.to_string()))?;
        Ok(self.file.presets.remove(index))
    }
}
