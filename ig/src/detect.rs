//! Template suggestions from the files present in a project

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;

/// File patterns (lower-case, `/` suffix for directories) and the templates they suggest
const RULES: &[(&[&str], &[&str])] = &[
    (&["package.json"], &["Node"]),
    (&["go.mod"], &["Go"]),
    (&["requirements.txt", "setup.py", "pyproject.toml"], &["Python"]),
    (&["cargo.toml"], &["Rust"]),
    (&["pom.xml"], &["Maven"]),
    (&["build.gradle", "build.gradle.kts"], &["Gradle"]),
    (&["*.csproj"], &["VisualStudio"]),
    (&["composer.json"], &["Composer"]),
    (&["gemfile"], &["Ruby"]),
    (&["*.swift"], &["Swift"]),
    (&["*.kt", "*.kts"], &["Kotlin"]),
    (&["*.dart"], &["Dart"]),
    (&["*.ts", "*.tsx"], &["TypeScript"]),
    (&[".idea/"], &["IntelliJ"]),
    (&[".vscode/"], &["VisualStudioCode"]),
    (&["*.xcodeproj"], &["Xcode"]),
    (&["*.sln"], &["VisualStudio"]),
];

/// Lower-cased names of every file and `dir/` under `root`, sorted
///
/// `.git` is skipped; `root` itself is not included.
pub fn detect_files(root: &Path) -> Result<Vec<String>> {
    debug!(?root, "detect_files: called");
    let mut detected = BTreeSet::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| !(entry.file_type().is_dir() && entry.file_name() == ".git"));
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        let name = entry.file_name().to_string_lossy().to_lowercase();
        if entry.file_type().is_dir() {
            detected.insert(format!("{}/", name));
        } else {
            detected.insert(name);
        }
    }

    debug!(count = detected.len(), "detect_files: done");
    Ok(detected.into_iter().collect())
}

/// Templates suggested by `detected`, in rule order, deduplicated case-insensitively
pub fn suggest_templates(detected: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for (patterns, templates) in RULES {
        if !patterns.iter().any(|p| rule_matches(p, detected)) {
            continue;
        }
        for template in *templates {
            if seen.insert(template.to_lowercase()) {
                suggestions.push(template.to_string());
            }
        }
    }
    suggestions
}

/// Scan `root` and suggest templates in one step
pub fn suggest_for(root: &Path) -> Result<Vec<String>> {
    let suggestions = suggest_templates(&detect_files(root)?);
    debug!(?suggestions, "suggest_for: done");
    Ok(suggestions)
}

fn rule_matches(pattern: &str, detected: &[String]) -> bool {
    let Ok(glob) = Pattern::new(pattern) else {
        return detected.iter().any(|c| c == pattern);
    };
    detected.iter().any(|candidate| {
        // directory entries also match their bare name, so `*.xcodeproj` finds bundles
        let bare = candidate.strip_suffix('/').filter(|_| !pattern.ends_with('/'));
        glob.matches(candidate) || bare.is_some_and(|b| glob.matches(b))
    })
}
