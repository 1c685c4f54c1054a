//! Gitignore templates: records, discovery, lookup, loading and merging
//!
//! A [`Template`] is identified by its path; names may collide across
//! categories and the [`TemplateIndex`] resolves collisions first-wins in
//! discovery order.

mod discover;
mod index;
mod loader;
mod merge;

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

pub use discover::{discover_templates, discover_user_templates};
pub use index::{TemplateIndex, index_key, normalize_name};
pub use loader::{LoadedTemplate, load_template, load_templates};
pub use merge::{MergeOptions, merge_templates};

/// File suffix every template carries
pub const TEMPLATE_SUFFIX: &str = ".gitignore";

/// Where a template comes from within its source tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Root,
    Global,
    Community,
    User,
    /// Synthetic entry standing in for a preset in the browsing pool
    Preset,
}

impl Category {
    /// Label used in listings and the picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Global => "Global",
            Self::Community => "community",
            Self::User => "user",
            Self::Preset => "preset",
        }
    }

    /// Classify a path relative to the discovery root by its first component
    pub fn from_relative(first_component: &str) -> Self {
        match first_component.to_lowercase().as_str() {
            "global" => Self::Global,
            "community" => Self::Community,
            _ => Self::Root,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "root" => Ok(Self::Root),
            "global" => Ok(Self::Global),
            "community" => Ok(Self::Community),
            "user" => Ok(Self::User),
            _ => Err(format!("Unknown category: {}. Use: root, Global, community, or user", s)),
        }
    }
}

/// Which tree a template was discovered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cache,
    User,
}

/// A discovered template file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Template {
    /// File name without the `.gitignore` suffix, original casing
    pub name: String,
    pub category: Category,
    /// Identity key
    pub path: PathBuf,
    pub source: Source,
}

impl Template {
    pub fn new(name: impl Into<String>, category: Category, path: impl Into<PathBuf>, source: Source) -> Self {
        Self {
            name: name.into(),
            category,
            path: path.into(),
            source,
        }
    }

    /// Name as shown to the user; user templates carry a badge
    pub fn display_name(&self) -> String {
        match self.source {
            Source::User => format!("(User) {}", self.name),
            Source::Cache => self.name.clone(),
        }
    }
}
