//! Browsing model shared by the selector and template-select screens
//!
//! Holds the search query, the filtered candidate pool (presets first, then
//! templates), the cursor and viewport, and the selection itself. It knows
//! nothing about rendering; views read it through [`BrowsingModel::visible_rows`].

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};
use presetstore::Preset;
use tracing::debug;

use super::events::{is_commit, is_interrupt, typed_char};
use crate::fuzzy::{Matcher, SkimMatcher};
use crate::selection::{SelectionSet, SuggestedSet, is_fully_applied, seed, toggle_preset};
use crate::templates::{Source, Template, TemplateIndex};

/// Rows shown before the first resize arrives
pub const DEFAULT_LIST_HEIGHT: usize = 10;

/// Entry in the filtered pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// Index into the preset list
    Preset(usize),
    /// Index into the catalog's template list
    Template(usize),
}

/// What the owning screen should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseAction {
    Continue,
    Commit,
    Cancel,
}

/// Transient line under the list; cleared by the next key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

impl Status {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }
}

/// Rendering view of one visible candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub category: &'static str,
    pub is_preset: bool,
    pub is_user: bool,
    pub selected: bool,
    pub suggested: bool,
    pub under_cursor: bool,
}

#[derive(Debug)]
pub struct BrowsingModel {
    catalog: Rc<TemplateIndex>,
    presets: Vec<Preset>,
    matcher: SkimMatcher,
    preset_names: Vec<String>,
    template_names: Vec<String>,
    query: String,
    focused: bool,
    presets_only: bool,
    filtered: Vec<Candidate>,
    cursor: usize,
    offset: usize,
    height: usize,
    selection: SelectionSet,
    suggested: SuggestedSet,
    status: Option<Status>,
}

impl BrowsingModel {
    /// Build over `catalog` with optional presets, seeding the selection
    pub fn new(catalog: Rc<TemplateIndex>, presets: Vec<Preset>, preselected: &[String], suggested: &[String]) -> Self {
        debug!(
            templates = catalog.len(),
            presets = presets.len(),
            "BrowsingModel::new: called"
        );
        let (selection, suggested) = seed(&catalog, preselected, suggested);
        let preset_names = presets.iter().map(|p| p.name.clone()).collect();
        let template_names = catalog.templates().iter().map(|t| t.name.clone()).collect();

        let mut model = Self {
            catalog,
            presets,
            matcher: SkimMatcher::default(),
            preset_names,
            template_names,
            query: String::new(),
            focused: false,
            presets_only: false,
            filtered: Vec::new(),
            cursor: 0,
            offset: 0,
            height: DEFAULT_LIST_HEIGHT,
            selection,
            suggested,
            status: None,
        };
        model.refilter();
        model
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn presets_only(&self) -> bool {
        self.presets_only
    }

    pub fn has_presets(&self) -> bool {
        !self.presets.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn list_height(&self) -> usize {
        self.height
    }

    pub fn filtered(&self) -> &[Candidate] {
        &self.filtered
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn into_selection(self) -> Vec<Template> {
        self.selection.into_ordered()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Candidate under the cursor
    pub fn current(&self) -> Option<Candidate> {
        self.filtered.get(self.cursor).copied()
    }

    /// Resize the list viewport
    pub fn set_list_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll_to_cursor();
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> BrowseAction {
        self.status = None;

        if is_interrupt(&key) {
            return BrowseAction::Cancel;
        }
        if is_commit(&key) {
            return BrowseAction::Commit;
        }

        match key.code {
            KeyCode::Esc => return self.escape(),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::Enter => self.toggle_current(),
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.refilter();
                }
            }
            _ => {
                if let Some(c) = typed_char(&key) {
                    if self.focused {
                        self.query.push(c);
                        self.refilter();
                    } else {
                        self.hotkey(c);
                    }
                }
            }
        }
        BrowseAction::Continue
    }

    fn hotkey(&mut self, c: char) {
        match c {
            '/' => self.focused = true,
            'k' => self.move_cursor(-1),
            'j' => self.move_cursor(1),
            ' ' => self.toggle_current(),
            'p' if self.has_presets() => {
                self.presets_only = !self.presets_only;
                self.refilter();
            }
            _ => {}
        }
    }

    /// Unfocus, then clear the query, then cancel
    fn escape(&mut self) -> BrowseAction {
        if self.focused {
            self.focused = false;
            return BrowseAction::Continue;
        }
        if !self.query.is_empty() {
            self.query.clear();
            self.refilter();
            return BrowseAction::Continue;
        }
        BrowseAction::Cancel
    }

    fn move_cursor(&mut self, delta: isize) {
        if self.filtered.is_empty() {
            self.cursor = 0;
            return;
        }
        let last = self.filtered.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.scroll_to_cursor();
    }

    fn scroll_to_cursor(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        let max_offset = self.filtered.len().saturating_sub(self.height);
        self.offset = self.offset.min(max_offset);
    }

    /// Toggle the row under the cursor
    pub fn toggle_current(&mut self) {
        match self.current() {
            Some(Candidate::Preset(i)) => {
                let missing = toggle_preset(&mut self.selection, &self.presets[i], &self.catalog);
                if !missing.is_empty() {
                    self.status = Some(Status::error(format!("template not found: {}", missing.join(", "))));
                }
            }
            Some(Candidate::Template(i)) => {
                let template = self.catalog.templates()[i].clone();
                self.selection.toggle(&template);
            }
            None => {}
        }
    }

    fn refilter(&mut self) {
        let mut filtered: Vec<Candidate> = self
            .matcher
            .find(&self.query, &self.preset_names)
            .into_iter()
            .map(|m| Candidate::Preset(m.index))
            .collect();

        if !self.presets_only {
            filtered.extend(
                self.matcher
                    .find(&self.query, &self.template_names)
                    .into_iter()
                    .map(|m| Candidate::Template(m.index)),
            );
        }

        self.filtered = filtered;
        self.cursor = if self.filtered.is_empty() {
            0
        } else {
            self.cursor.min(self.filtered.len() - 1)
        };
        self.scroll_to_cursor();
    }

    /// Rows inside the viewport, top to bottom
    pub fn visible_rows(&self) -> Vec<Row> {
        let end = (self.offset + self.height).min(self.filtered.len());
        (self.offset..end).map(|i| self.row(i)).collect()
    }

    fn row(&self, position: usize) -> Row {
        let under_cursor = position == self.cursor;
        match self.filtered[position] {
            Candidate::Preset(i) => {
                let preset = &self.presets[i];
                Row {
                    label: format!("[Preset] {} ({} templates)", preset.name, preset.templates.len()),
                    category: "preset",
                    is_preset: true,
                    is_user: false,
                    selected: is_fully_applied(&self.selection, preset, &self.catalog),
                    suggested: false,
                    under_cursor,
                }
            }
            Candidate::Template(i) => {
                let template = &self.catalog.templates()[i];
                Row {
                    label: template.name.clone(),
                    category: template.category.label(),
                    is_preset: false,
                    is_user: template.source == Source::User,
                    selected: self.selection.contains(&template.path),
                    suggested: self.suggested.contains(&template.path),
                    under_cursor,
                }
            }
        }
    }
}
