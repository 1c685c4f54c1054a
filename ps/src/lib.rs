//! PresetStore - named groups of gitignore templates
//!
//! Presets are stored as a single YAML document. Each entry keeps the
//! template *names* the user picked, never resolved paths, so a preset keeps
//! working after the template cache is refreshed.
//!
//! # File layout
//!
//! ```text
//! presets:
//!   - key: web-stack
//!     name: Web Stack
//!     templates: [Node, Python]
//!     created: 2026-01-02T03:04:05Z
//!     updated: 2026-01-02T03:04:05Z
//! ```
//!
//! # Example
//!
//! ```ignore
//! use presetstore::{FileStore, PresetRepository};
//!
//! let mut store = FileStore::open("~/.config/ignr/presets.yaml")?;
//! store.create("Web Stack", &["Node".into(), "Python".into()])?;
//! let presets = store.list()?;
//! ```

mod error;
mod memory;
mod preset;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use preset::{Preset, PresetFile, matches_identifier, sluggify};
pub use store::FileStore;

/// Result alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistence boundary for presets
///
/// All mutating calls re-read the backing data first, so callers never
/// work against a stale copy. Callers reload with [`PresetRepository::list`]
/// after every mutation.
pub trait PresetRepository {
    /// All presets in stored order
    fn list(&self) -> Result<Vec<Preset>>;

    /// Find a preset by key, slug of the input, or display name
    fn find(&self, identifier: &str) -> Result<Option<Preset>>;

    /// Create a new preset; the key is derived from `name`
    fn create(&mut self, name: &str, templates: &[String]) -> Result<Preset>;

    /// Replace the template list of an existing preset
    fn edit(&mut self, identifier: &str, templates: &[String]) -> Result<Preset>;

    /// Remove a preset
    fn delete(&mut self, identifier: &str) -> Result<Preset>;
}

/// Current time in the format stored in `created`/`updated`
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
