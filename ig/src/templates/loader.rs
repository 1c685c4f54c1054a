//! Template content loading

use std::fs;
use std::path::Path;

use tracing::debug;

use super::Template;
use crate::error::{IgnrError, Result};

/// A template paired with its file content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTemplate {
    pub template: Template,
    pub content: String,
}

/// Read one template file
pub fn load_template(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| IgnrError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read every template in order; the first failure aborts
pub fn load_templates(templates: &[Template]) -> Result<Vec<LoadedTemplate>> {
    debug!(count = templates.len(), "load_templates: called");
    templates
        .iter()
        .map(|template| {
            Ok(LoadedTemplate {
                content: load_template(&template.path)?,
                template: template.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{Category, Source};
    use tempfile::TempDir;

    #[test]
    fn test_load_in_order() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("A.gitignore");
        let b = dir.path().join("B.gitignore");
        fs::write(&a, "a/\n").unwrap();
        fs::write(&b, "b/\n").unwrap();

        let loaded = load_templates(&[
            Template::new("B", Category::Root, &b, Source::Cache),
            Template::new("A", Category::Root, &a, Source::Cache),
        ])
        .unwrap();

        assert_eq!(loaded[0].template.name, "B");
        assert_eq!(loaded[0].content, "b/\n");
        assert_eq!(loaded[1].content, "a/\n");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_template("/no/such/Thing.gitignore").unwrap_err();
        assert!(err.to_string().starts_with("read template /no/such/Thing.gitignore"));
    }
}
