//! Name → template lookup with first-wins collision handling

use std::collections::HashMap;

use tracing::debug;

use super::{TEMPLATE_SUFFIX, Template};

/// In-memory index over discovered templates
#[derive(Debug, Clone, Default)]
pub struct TemplateIndex {
    by_name: HashMap<String, usize>,
    list: Vec<Template>,
}

impl TemplateIndex {
    /// Build from records in discovery order
    ///
    /// The first record for each normalized name wins; later duplicates stay
    /// in [`TemplateIndex::templates`] but are never returned by lookup.
    pub fn build(templates: Vec<Template>) -> Self {
        debug!(count = templates.len(), "TemplateIndex::build: called");
        let mut by_name = HashMap::with_capacity(templates.len());
        for (i, template) in templates.iter().enumerate() {
            by_name.entry(index_key(&template.name)).or_insert(i);
        }
        Self { by_name, list: templates }
    }

    /// Case- and suffix-insensitive exact lookup
    pub fn find(&self, name: &str) -> Option<&Template> {
        self.by_name.get(&index_key(name)).map(|&i| &self.list[i])
    }

    /// Every record in discovery order, duplicates included
    pub fn templates(&self) -> &[Template] {
        &self.list
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// Strip a trailing `.gitignore` (any casing), keeping the rest verbatim
pub fn normalize_name(name: &str) -> &str {
    let cut = name.len().saturating_sub(TEMPLATE_SUFFIX.len());
    if name.len() >= TEMPLATE_SUFFIX.len()
        && name.is_char_boundary(cut)
        && name[cut..].eq_ignore_ascii_case(TEMPLATE_SUFFIX)
    {
        &name[..cut]
    } else {
        name
    }
}

/// Lookup key: suffix stripped, lower-cased
pub fn index_key(name: &str) -> String {
    normalize_name(name).to_lowercase()
}
