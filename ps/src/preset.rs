//! Preset record and key derivation

use serde::{Deserialize, Serialize};

/// A named, ordered group of template names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Stable lookup key (slug of the name unless set explicitly)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub key: String,

    /// Display name
    pub name: String,

    /// Template names, resolved against the template index at use time
    #[serde(default)]
    pub templates: Vec<String>,

    /// RFC 3339 creation time
    #[serde(default)]
    pub created: String,

    /// RFC 3339 last modification time
    #[serde(default)]
    pub updated: String,
}

impl Preset {
    /// Build a preset stamped with the same created/updated time
    pub fn new(name: impl Into<String>, templates: Vec<String>, now: impl Into<String>) -> Self {
        let name = name.into();
        let now = now.into();
        Self {
            key: sluggify(&name),
            name,
            templates,
            created: now.clone(),
            updated: now,
        }
    }

    /// Key, falling back to the slug of the name for legacy entries
    pub fn effective_key(&self) -> String {
        if self.key.trim().is_empty() {
            sluggify(&self.name)
        } else {
            self.key.clone()
        }
    }
}

/// On-disk document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetFile {
    #[serde(default)]
    pub presets: Vec<Preset>,
}

impl PresetFile {
    /// Fill in missing keys from names
    pub fn normalize_keys(&mut self) {
        for preset in &mut self.presets {
            if preset.key.trim().is_empty() {
                preset.key = sluggify(&preset.name);
            }
        }
    }

    /// Position of the preset matching `identifier`
    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.presets.iter().position(|p| matches_identifier(p, identifier))
    }

    /// True when some preset already owns `key` (case-insensitive)
    pub fn has_key(&self, key: &str) -> bool {
        self.presets.iter().any(|p| p.effective_key().eq_ignore_ascii_case(key))
    }
}

/// Match on key, on the slug of the identifier, or on the display name
pub fn matches_identifier(preset: &Preset, identifier: &str) -> bool {
    let key = preset.effective_key();
    let target = sluggify(identifier);
    key.eq_ignore_ascii_case(identifier)
        || key.eq_ignore_ascii_case(&target)
        || preset.name.to_lowercase() == identifier.to_lowercase()
}

/// Derive a preset key from a display name
///
/// Lower-cases, keeps ASCII letters and digits, collapses runs of spaces,
/// underscores and hyphens into one hyphen and drops everything else.
pub fn sluggify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut last_hyphen = false;

    for c in lowered.chars() {
        match c {
            'a'..='z' | '0'..='9' => {
                slug.push(c);
                last_hyphen = false;
            }
            ' ' | '_' | '-' => {
                if !last_hyphen {
                    slug.push('-');
                    last_hyphen = true;
                }
            }
            _ => {}
        }
    }

    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "preset".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sluggify_basic() {
        assert_eq!(sluggify("Web Stack"), "web-stack");
        assert_eq!(sluggify("  my_Preset  "), "my-preset");
        assert_eq!(sluggify("a - b"), "a-b");
        assert_eq!(sluggify("C++ & Go!"), "c-go");
    }

    #[test]
    fn test_sluggify_empty_falls_back() {
        assert_eq!(sluggify(""), "preset");
        assert_eq!(sluggify("!!!"), "preset");
        assert_eq!(sluggify(" - "), "preset");
    }

    #[test]
    fn test_effective_key_for_legacy_entry() {
        let preset = Preset {
            key: String::new(),
            name: "Rust Things".to_string(),
            templates: vec![],
            created: String::new(),
            updated: String::new(),
        };
        assert_eq!(preset.effective_key(), "rust-things");
    }

    #[test]
    fn test_matches_identifier() {
        let preset = Preset::new("Web Stack", vec!["Node".to_string()], "t");
        assert!(matches_identifier(&preset, "web-stack"));
        assert!(matches_identifier(&preset, "WEB-STACK"));
        assert!(matches_identifier(&preset, "Web Stack"));
        assert!(matches_identifier(&preset, "web stack"));
        assert!(!matches_identifier(&preset, "web"));
    }

    #[test]
    fn test_deserialize_without_key() {
        let yaml = r#"
presets:
  - name: Data Science
    templates: [Python, Jupyter]
"#;
        let mut file: PresetFile = serde_yaml::from_str(yaml).unwrap();
        file.normalize_keys();
        assert_eq!(file.presets[0].key, "data-science");
        assert_eq!(file.presets[0].templates, vec!["Python", "Jupyter"]);
        assert!(file.has_key("DATA-SCIENCE"));
    }

    proptest! {
        #[test]
        fn prop_slug_is_idempotent(name in ".{0,40}") {
            let once = sluggify(&name);
            prop_assert_eq!(sluggify(&once), once.clone());
        }

        #[test]
        fn prop_slug_charset(name in ".{0,40}") {
            let slug = sluggify(&name);
            prop_assert!(!slug.is_empty());
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
