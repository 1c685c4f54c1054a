//! Preset expansion and atomic toggling

use presetstore::Preset;
use tracing::debug;

use super::SelectionSet;
use crate::templates::{Template, TemplateIndex};

/// Resolve a preset's member names, in preset order
///
/// Returns the resolved templates and the names that did not resolve.
pub fn resolve_members(preset: &Preset, index: &TemplateIndex) -> (Vec<Template>, Vec<String>) {
    let mut resolved = Vec::with_capacity(preset.templates.len());
    let mut missing = Vec::new();
    for name in &preset.templates {
        match index.find(name) {
            Some(template) => {
                if !resolved.iter().any(|t: &Template| t.path == template.path) {
                    resolved.push(template.clone());
                }
            }
            None => missing.push(name.clone()),
        }
    }
    (resolved, missing)
}

/// How much of a preset is currently selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetStatus {
    /// Resolved members already selected
    pub selected: usize,
    /// Resolved members in total
    pub resolved: usize,
}

impl PresetStatus {
    pub fn is_full(&self) -> bool {
        self.resolved > 0 && self.selected == self.resolved
    }
}

pub fn preset_status(selection: &SelectionSet, preset: &Preset, index: &TemplateIndex) -> PresetStatus {
    let (resolved, _) = resolve_members(preset, index);
    PresetStatus {
        selected: resolved.iter().filter(|t| selection.contains(&t.path)).count(),
        resolved: resolved.len(),
    }
}

/// True when every resolvable member is selected (and there is at least one)
pub fn is_fully_applied(selection: &SelectionSet, preset: &Preset, index: &TemplateIndex) -> bool {
    preset_status(selection, preset, index).is_full()
}

/// Toggle a whole preset
///
/// Fully applied presets are removed; anything less selects the missing
/// members in preset order. Returns the member names that did not resolve.
pub fn toggle_preset(selection: &mut SelectionSet, preset: &Preset, index: &TemplateIndex) -> Vec<String> {
    let (resolved, missing) = resolve_members(preset, index);
    let selected = resolved.iter().filter(|t| selection.contains(&t.path)).count();
    debug!(
        preset = %preset.key,
        selected,
        resolved = resolved.len(),
        missing = missing.len(),
        "toggle_preset: called"
    );

    if !resolved.is_empty() && selected == resolved.len() {
        for template in &resolved {
            selection.remove(&template.path);
        }
    } else {
        for template in &resolved {
            selection.insert(template);
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{Category, Source};
    use proptest::prelude::*;

    fn t(name: &str) -> Template {
        Template::new(name, Category::Root, format!("/c/{}.gitignore", name), Source::Cache)
    }

    fn index() -> TemplateIndex {
        TemplateIndex::build(vec![t("Go"), t("Node"), t("Python"), t("Rust"), t("macOS")])
    }

    fn preset(members: &[&str]) -> Preset {
        Preset::new("Stack", members.iter().map(|s| s.to_string()).collect(), "2024-01-01T00:00:00Z")
    }

    fn names(set: &SelectionSet) -> Vec<String> {
        set.ordered().iter().map(|t| t.name.clone()).collect()
    }

    #[test]
    fn test_toggle_selects_then_deselects() {
        let index = index();
        let p = preset(&["Node", "macOS"]);
        let mut set = SelectionSet::new();
        set.insert(&t("Go"));

        assert!(toggle_preset(&mut set, &p, &index).is_empty());
        assert_eq!(names(&set), vec!["Go", "Node", "macOS"]);
        assert!(is_fully_applied(&set, &p, &index));

        toggle_preset(&mut set, &p, &index);
        assert_eq!(names(&set), vec!["Go"]);
        assert!(!is_fully_applied(&set, &p, &index));
    }

    #[test]
    fn test_partial_state_grows() {
        let index = index();
        let p = preset(&["Node", "Python", "Rust"]);
        let mut set = SelectionSet::new();
        set.insert(&t("Python"));

        toggle_preset(&mut set, &p, &index);
        assert_eq!(names(&set), vec!["Python", "Node", "Rust"]);
    }

    #[test]
    fn test_unresolved_members_reported_not_fatal() {
        let index = index();
        let p = preset(&["Go", "Cobol", "Fortran"]);
        let mut set = SelectionSet::new();

        let missing = toggle_preset(&mut set, &p, &index);
        assert_eq!(missing, vec!["Cobol", "Fortran"]);
        assert_eq!(names(&set), vec!["Go"]);
        assert!(is_fully_applied(&set, &p, &index));
    }

    #[test]
    fn test_preset_without_resolvable_members_is_never_applied() {
        let index = index();
        let p = preset(&["Cobol"]);
        let mut set = SelectionSet::new();
        assert!(!is_fully_applied(&set, &p, &index));
        toggle_preset(&mut set, &p, &index);
        assert!(set.is_empty());
        assert!(!is_fully_applied(&set, &p, &index));
    }

    #[test]
    fn test_duplicate_member_names_resolve_once() {
        let index = index();
        let p = preset(&["Go", "go.gitignore", "GO"]);
        let (resolved, missing) = resolve_members(&p, &index);
        assert_eq!(resolved.len(), 1);
        assert!(missing.is_empty());
    }

    proptest! {
        #[test]
        fn prop_partial_toggle_completes(
            members in proptest::sample::subsequence(vec!["Go", "Node", "Python", "Rust", "macOS"], 2..=5),
            preselect_mask in proptest::collection::vec(any::<bool>(), 5),
        ) {
            let index = index();
            let p = preset(&members);
            let mut set = SelectionSet::new();
            for (name, pick) in members.iter().zip(preselect_mask.iter()) {
                if *pick {
                    set.insert(index.find(name).unwrap());
                }
            }
            let status = preset_status(&set, &p, &index);
            prop_assume!(status.selected < status.resolved);

            toggle_preset(&mut set, &p, &index);
            prop_assert!(is_fully_applied(&set, &p, &index));
        }
    }
}
