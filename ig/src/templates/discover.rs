//! Template discovery by directory walk

use std::path::Path;

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::index::normalize_name;
use super::{Category, Source, TEMPLATE_SUFFIX, Template};
use crate::error::Result;

/// Walk the cache tree and collect every `*.gitignore` file
///
/// Results are sorted by file name within each directory so discovery order
/// (and therefore first-wins lookup) is stable across platforms.
pub fn discover_templates(root: impl AsRef<Path>) -> Result<Vec<Template>> {
    let root = root.as_ref();
    debug!(?root, "discover_templates: called");
    walk(root, Source::Cache)
}

/// Collect templates from the user's own directory
///
/// An empty or missing path yields no templates.
pub fn discover_user_templates(path: impl AsRef<Path>) -> Result<Vec<Template>> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() || !path.is_dir() {
        debug!(?path, "discover_user_templates: nothing to scan");
        return Ok(Vec::new());
    }
    walk(path, Source::User)
}

fn walk(root: &Path, source: Source) -> Result<Vec<Template>> {
    let mut templates = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_git_dir(e));

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !file_name.to_lowercase().ends_with(TEMPLATE_SUFFIX) {
            continue;
        }

        let category = match source {
            Source::User => Category::User,
            Source::Cache => categorize(root, entry.path()),
        };

        templates.push(Template::new(
            normalize_name(&file_name),
            category,
            entry.path(),
            source,
        ));
    }

    debug!(count = templates.len(), ?source, "walk: discovered templates");
    Ok(templates)
}

fn is_git_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name() == ".git"
}

fn categorize(root: &Path, path: &Path) -> Category {
    path.strip_prefix(root)
        .ok()
        .and_then(|rel| rel.components().next())
        .map(|first| Category::from_relative(&first.as_os_str().to_string_lossy()))
        .unwrap_or(Category::Root)
}
