//! Ordered template selection
//!
//! Membership is keyed by template path; the ordered list mirrors the order
//! in which the user picked templates and is what ends up in the output.

mod preset;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IgnrError, Result};
use crate::templates::{Template, TemplateIndex};

pub use preset::{PresetStatus, is_fully_applied, preset_status, resolve_members, toggle_preset};

/// Ordered, duplicate-free set of chosen templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    members: HashMap<PathBuf, Template>,
    order: Vec<Template>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.members.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected templates in selection order
    pub fn ordered(&self) -> &[Template] {
        &self.order
    }

    pub fn into_ordered(self) -> Vec<Template> {
        self.order
    }

    /// Add to the tail; returns false when already present
    pub fn insert(&mut self, template: &Template) -> bool {
        if self.members.contains_key(&template.path) {
            return false;
        }
        self.members.insert(template.path.clone(), template.clone());
        self.order.push(template.clone());
        true
    }

    /// Remove, keeping the relative order of the rest; returns false when absent
    pub fn remove(&mut self, path: &Path) -> bool {
        if self.members.remove(path).is_none() {
            return false;
        }
        self.order.retain(|t| t.path != path);
        true
    }

    /// Flip membership of one template
    pub fn toggle(&mut self, template: &Template) {
        if !self.remove(&template.path) {
            self.insert(template);
        }
    }
}

/// Paths flagged as suggested; display-only after seeding
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestedSet(HashSet<PathBuf>);

impl SuggestedSet {
    pub fn contains(&self, path: &Path) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Build the initial selection from preselected then suggested names
///
/// Unknown names are skipped. Suggested names that resolve are selected and
/// flagged in the returned overlay.
pub fn seed(index: &TemplateIndex, preselected: &[String], suggested: &[String]) -> (SelectionSet, SuggestedSet) {
    debug!(
        preselected = preselected.len(),
        suggested = suggested.len(),
        "seed: called"
    );
    let mut selection = SelectionSet::new();
    let mut overlay = SuggestedSet::default();

    for name in preselected {
        if let Some(template) = index.find(name) {
            selection.insert(template);
        }
    }
    for name in suggested {
        if let Some(template) = index.find(name) {
            overlay.0.insert(template.path.clone());
            selection.insert(template);
        }
    }

    (selection, overlay)
}

/// Resolve every name, failing on the first one the index doesn't know
///
/// Repeats collapse onto the first occurrence.
pub fn resolve_strict(index: &TemplateIndex, names: &[String]) -> Result<Vec<Template>> {
    let mut selection = SelectionSet::new();
    for name in names {
        let template = index
            .find(name)
            .ok_or_else(|| IgnrError::LookupMiss { name: name.clone() })?;
        selection.insert(template);
    }
    Ok(selection.into_ordered())
}
