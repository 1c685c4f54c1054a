//! Error taxonomy for template lookup, generation and the preset session

use std::path::PathBuf;

use presetstore::StoreError;
use thiserror::Error;

/// Errors raised by the library side of ignr
#[derive(Debug, Error)]
pub enum IgnrError {
    #[error("template not found: {name}")]
    LookupMiss { name: String },

    #[error("template not found: {}", names.join(", "))]
    UnresolvedPresetMember { preset: String, names: Vec<String> },

    /// User backed out of an interactive session; not a failure
    #[error("cancelled")]
    Cancelled,

    #[error(transparent)]
    Persistence(#[from] StoreError),

    #[error("read template {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Cache(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no templates selected")]
    NoSelection,

    #[error("output file exists: {} (use --force or --append)", path.display())]
    OutputExists { path: PathBuf },
}

impl IgnrError {
    /// Whether this is the cancellation sentinel
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Library result alias
pub type Result<T> = std::result::Result<T, IgnrError>;

/// True when an eyre report wraps [`IgnrError::Cancelled`]
pub fn is_cancelled(report: &eyre::Report) -> bool {
    report
        .downcast_ref::<IgnrError>()
        .map(IgnrError::is_cancelled)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_message() {
        let err = IgnrError::LookupMiss { name: "Cobol".into() };
        assert_eq!(err.to_string(), "template not found: Cobol");
    }

    #[test]
    fn test_unresolved_members_message() {
        let err = IgnrError::UnresolvedPresetMember {
            preset: "web".into(),
            names: vec!["Foo".into(), "Bar".into()],
        };
        assert_eq!(err.to_string(), "template not found: Foo, Bar");
    }

    #[test]
    fn test_output_exists_message() {
        let err = IgnrError::OutputExists {
            path: PathBuf::from(".gitignore"),
        };
        assert_eq!(
            err.to_string(),
            "output file exists: .gitignore (use --force or --append)"
        );
    }

    #[test]
    fn test_persistence_is_verbatim() {
        let err: IgnrError = StoreError::NotFound("x".into()).into();
        assert_eq!(err.to_string(), "preset not found: x");
    }

    #[test]
    fn test_cancelled_survives_eyre() {
        let report = eyre::Report::new(IgnrError::Cancelled);
        assert!(is_cancelled(&report));
        let other = eyre::eyre!("boom");
        assert!(!is_cancelled(&other));
    }
}
