//! Merge loaded templates into final `.gitignore` text

use std::collections::HashSet;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use super::LoadedTemplate;

/// Knobs for [`merge_templates`]
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Drop pattern lines already emitted by an earlier section
    pub deduplicate: bool,
    pub add_header: bool,
    pub generator: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            deduplicate: true,
            add_header: true,
            generator: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Compose the output text
///
/// Blocks (optional header, then one section per template) are separated by
/// a single blank line and the result ends with exactly one newline. Comment
/// and blank lines are never deduplicated.
pub fn merge_templates(selections: &[LoadedTemplate], options: &MergeOptions) -> String {
    debug!(
        count = selections.len(),
        deduplicate = options.deduplicate,
        add_header = options.add_header,
        "merge_templates: called"
    );

    let mut blocks: Vec<String> = Vec::with_capacity(selections.len() + 1);

    if options.add_header {
        let names: Vec<&str> = selections.iter().map(|s| s.template.name.as_str()).collect();
        blocks.push(format!(
            "# Generated by {} {}\n# Date: {}\n# Templates: {}",
            options.generator,
            options.version,
            options.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            names.join(", ")
        ));
    }

    let mut seen: HashSet<String> = HashSet::new();
    for selection in selections {
        let mut lines = vec![format!("### {} ###", selection.template.name)];
        for line in content_lines(&selection.content) {
            let trimmed = line.trim();
            let is_pattern = !trimmed.is_empty() && !trimmed.starts_with('#');
            if options.deduplicate && is_pattern && !seen.insert(trimmed.to_string()) {
                continue;
            }
            lines.push(line.to_string());
        }
        blocks.push(lines.join("\n"));
    }

    if blocks.is_empty() {
        return String::new();
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

/// Split on LF after dropping CRs, without trailing blank lines
fn content_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).collect();
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    lines
}
