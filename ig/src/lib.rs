//! ignr - offline-first .gitignore generator
//!
//! Templates come from a local git checkout of the upstream gitignore
//! collection plus an optional directory of user templates. Users pick
//! templates on the command line or in an interactive selector, save groups
//! of them as presets, and ignr merges the picks into one `.gitignore`.
//!
//! # Modules
//!
//! - [`templates`] - discovery, name index, loading and merging
//! - [`selection`] - ordered selection set and preset toggling
//! - [`tui`] - interactive sessions on a screen stack
//! - [`cache`] - git-backed template cache
//! - [`detect`] - template suggestions from project files
//! - [`output`] - writing the result
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cache;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod fuzzy;
pub mod output;
pub mod selection;
pub mod templates;
pub mod tui;

pub use error::{IgnrError, is_cancelled};
