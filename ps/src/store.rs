//! File-backed preset store

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::preset::{Preset, PresetFile};
use crate::{PresetRepository, Result, StoreError, timestamp_now};

/// Empty document written when the presets file does not exist yet
const EMPTY_DOCUMENT: &str = "presets: []\n";

/// Presets persisted in a single YAML file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open the store at `path`, creating the file (and parents) if missing
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        debug!(?path, "FileStore::open: called");

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if !path.exists() {
            debug!("FileStore::open: creating empty presets file");
            fs::write(&path, EMPTY_DOCUMENT).map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;
        }

        Ok(Self { path })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document
    pub fn load(&self) -> Result<PresetFile> {
        debug!(path = ?self.path, "FileStore::load: called");
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("FileStore::load: file missing, treating as empty");
                return Ok(PresetFile::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(PresetFile::default());
        }

        let mut file: PresetFile = serde_yaml::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        file.normalize_keys();
        Ok(file)
    }

    /// Serialize and write the whole document
    pub fn save(&self, file: &PresetFile) -> Result<()> {
        debug!(count = file.presets.len(), "FileStore::save: called");
        let content = serde_yaml::to_string(file)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl PresetRepository for FileStore {
    fn list(&self) -> Result<Vec<Preset>> {
        Ok(self.load()?.presets)
    }

    fn find(&self, identifier: &str) -> Result<Option<Preset>> {
        let file = self.load()?;
        Ok(file.position(identifier).map(|i| file.presets[i].clone()))
    }

    fn create(&mut self, name: &str, templates: &[String]) -> Result<Preset> {
        let mut file = self.load()?;
        let preset = Preset::new(name, templates.to_vec(), timestamp_now());
        if file.has_key(&preset.key) {
            return Err(StoreError::KeyExists(preset.key));
        }
        file.presets.push(preset.clone());
        self.save(&file)?;
        info!(key = %preset.key, "Created preset");
        Ok(preset)
    }

    fn edit(&mut self, identifier: &str, templates: &[String]) -> Result<Preset> {
        let mut file = self.load()?;
        let index = file
            .position(identifier)
            .ok_or_else(|| StoreError::NotFound(identifier.to_string()))?;
        let preset = &mut file.presets[index];
        preset.templates = templates.to_vec();
        preset.updated = timestamp_now();
        let updated = preset.clone();
        self.save(&file)?;
        info!(key = %updated.key, "Updated preset");
        Ok(updated)
    }

    fn delete(&mut self, identifier: &str) -> Result<Preset> {
        let mut file = self.load()?;
        let index = file
            .position(identifier)
            .ok_or_else(|| StoreError::NotFound(identifier.to_string()))?;
        let removed = file.presets.remove(index);
        self.save(&file)?;
        info!(key = %removed.key, "Deleted preset");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn open_temp() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("ignr").join("presets.yaml")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_open_creates_empty_file() {
        let (_dir, store) = open_temp();
        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, EMPTY_DOCUMENT);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_and_find() {
        let (_dir, mut store) = open_temp();
        let created = store.create("Web Stack", &names(&["Node", "Python"])).unwrap();
        assert_eq!(created.key, "web-stack");
        assert_eq!(created.created, created.updated);

        let found = store.find("web stack").unwrap().unwrap();
        assert_eq!(found.name, "Web Stack");
        assert_eq!(found.templates, names(&["Node", "Python"]));
        assert!(store.find("missing").unwrap().is_none());
    }

    #[test]
    fn test_create_duplicate_key_fails() {
        let (_dir, mut store) = open_temp();
        store.create("Web Stack", &names(&["Node"])).unwrap();
        let err = store.create("web_stack", &names(&["Go"])).unwrap_err();
        assert!(matches!(err, StoreError::KeyExists(ref k) if k == "web-stack"));
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_edit_replaces_templates() {
        let (_dir, mut store) = open_temp();
        store.create("Go Service", &names(&["Go"])).unwrap();
        let edited = store.edit("go-service", &names(&["Go", "Docker"])).unwrap();
        assert_eq!(edited.templates, names(&["Go", "Docker"]));
        assert_eq!(store.list().unwrap()[0].templates, names(&["Go", "Docker"]));
    }

    #[test]
    fn test_edit_missing_fails() {
        let (_dir, mut store) = open_temp();
        let err = store.edit("nope", &names(&["Go"])).unwrap_err();
        assert_eq!(err.to_string(), "preset not found: nope");
    }

    #[test]
    fn test_delete_preserves_order_of_rest() {
        let (_dir, mut store) = open_temp();
        store.create("One", &names(&["Go"])).unwrap();
        store.create("Two", &names(&["Node"])).unwrap();
        store.create("Three", &names(&["Rust"])).unwrap();

        let removed = store.delete("Two").unwrap();
        assert_eq!(removed.key, "two");

        let keys: Vec<String> = store.list().unwrap().into_iter().map(|p| p.key).collect();
        assert_eq!(keys, vec!["one", "three"]);
    }

    #[test]
    fn test_load_fills_missing_keys() {
        let (_dir, store) = open_temp();
        fs::write(store.path(), "presets:\n  - name: Legacy Preset\n    templates: [Go]\n").unwrap();
        let presets = store.list().unwrap();
        assert_eq!(presets[0].key, "legacy-preset");
    }

    #[test]
    fn test_load_invalid_yaml_is_parse_error() {
        let (_dir, store) = open_temp();
        fs::write(store.path(), "presets: [unclosed").unwrap();
        let err = store.list().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_round_trip_through_disk() {
        let (dir, mut store) = open_temp();
        store.create("Round Trip", &names(&["Go", "macOS"])).unwrap();

        let reopened = FileStore::open(dir.path().join("ignr").join("presets.yaml")).unwrap();
        let presets = reopened.list().unwrap();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].templates, names(&["Go", "macOS"]));
    }
}
