//! Screens that can sit on the view stack
//!
//! [`Screen`] is a closed set; the stack dispatches to the variant on top.

mod confirm;
mod name_input;
mod preset_detail;
mod preset_list;
mod preset_picker;
mod selector;
mod template_select;

pub use confirm::ConfirmOverwriteScreen;
pub use name_input::NameInputScreen;
pub use preset_detail::PresetDetailScreen;
pub use preset_list::PresetListScreen;
pub use preset_picker::PresetPickerScreen;
pub use selector::SelectorScreen;
pub use template_select::TemplateSelectScreen;

use crossterm::event::KeyEvent;
use presetstore::Preset;
use ratatui::Frame;

use super::context::SessionContext;
use super::stack::Message;
use crate::fuzzy::{Matcher, SkimMatcher};

#[derive(Debug)]
pub enum Screen {
    PresetList(PresetListScreen),
    NameInput(NameInputScreen),
    TemplateSelect(TemplateSelectScreen),
    PresetDetail(PresetDetailScreen),
    PresetPicker(PresetPickerScreen),
    Selector(SelectorScreen),
    Confirm(ConfirmOverwriteScreen),
}

impl Screen {
    pub fn title(&self) -> String {
        match self {
            Self::PresetList(_) => "Presets".to_string(),
            Self::NameInput(_) => "Create".to_string(),
            Self::TemplateSelect(s) => s.title().to_string(),
            Self::PresetDetail(s) => format!("View: {}", s.preset().name),
            Self::PresetPicker(_) => "Select Preset".to_string(),
            Self::Selector(s) => s.title().to_string(),
            Self::Confirm(_) => "Confirm Overwrite".to_string(),
        }
    }

    /// Key input; only ever called on the top screen
    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut SessionContext) -> Vec<Message> {
        match self {
            Self::PresetList(s) => s.handle_key(key, ctx),
            Self::NameInput(s) => s.handle_key(key, ctx),
            Self::TemplateSelect(s) => s.handle_key(key, ctx),
            Self::PresetDetail(s) => s.handle_key(key),
            Self::PresetPicker(s) => s.handle_key(key),
            Self::Selector(s) => s.handle_key(key),
            Self::Confirm(s) => s.handle_key(key),
        }
    }

    /// Reload shared data and set (or clear) the status line
    pub fn refresh(&mut self, status: Option<String>, ctx: &mut SessionContext) {
        match self {
            Self::PresetList(s) => s.refresh(status, ctx),
            Self::NameInput(s) => s.clear_error(),
            Self::TemplateSelect(s) => s.clear_status(),
            Self::PresetDetail(_) | Self::Confirm(_) => {}
            Self::PresetPicker(s) => s.clear_status(),
            Self::Selector(s) => s.clear_status(),
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        match self {
            Self::PresetList(s) => s.resize(width, height),
            Self::NameInput(_) | Self::PresetDetail(_) => {}
            Self::TemplateSelect(s) => s.resize(width, height),
            Self::PresetPicker(s) => s.resize(width, height),
            Self::Selector(s) => s.resize(width, height),
            Self::Confirm(s) => s.resize(width, height),
        }
    }

    pub fn render(&self, frame: &mut Frame, ctx: &SessionContext) {
        match self {
            Self::PresetList(s) => s.render(frame, ctx),
            Self::NameInput(s) => s.render(frame, ctx),
            Self::TemplateSelect(s) => s.render(frame, ctx),
            Self::PresetDetail(s) => s.render(frame, ctx),
            Self::PresetPicker(s) => s.render(frame, ctx),
            Self::Selector(s) => s.render(frame, ctx),
            Self::Confirm(s) => s.render(frame, ctx),
        }
    }
}

/// Row in a filtered preset list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetRow {
    Create,
    Preset(usize),
}

/// What a layered escape did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    Unfocused,
    Cleared,
    Exit,
}

/// Fuzzy-filtered preset list with cursor and viewport
///
/// Presets match on `"<name> <key>"`. With `with_create` a fixed
/// "create new" row leads the list regardless of the query.
#[derive(Debug)]
pub struct PresetFilter {
    matcher: SkimMatcher,
    with_create: bool,
    query: String,
    focused: bool,
    matches: Vec<usize>,
    cursor: usize,
    offset: usize,
    height: usize,
}

impl PresetFilter {
    pub fn new(presets: &[Preset], with_create: bool, height: usize) -> Self {
        let mut filter = Self {
            matcher: SkimMatcher::default(),
            with_create,
            query: String::new(),
            focused: false,
            matches: Vec::new(),
            cursor: 0,
            offset: 0,
            height: height.max(1),
        };
        filter.refilter(presets);
        filter
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.matches.len() + usize::from(self.with_create)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, position: usize) -> Option<PresetRow> {
        match (self.with_create, position) {
            (true, 0) => Some(PresetRow::Create),
            (true, p) => self.matches.get(p - 1).map(|&i| PresetRow::Preset(i)),
            (false, p) => self.matches.get(p).map(|&i| PresetRow::Preset(i)),
        }
    }

    pub fn current(&self) -> Option<PresetRow> {
        self.row(self.cursor)
    }

    /// Preset under the cursor, if the cursor is on one
    pub fn current_preset<'a>(&self, presets: &'a [Preset]) -> Option<&'a Preset> {
        match self.current() {
            Some(PresetRow::Preset(i)) => presets.get(i),
            _ => None,
        }
    }

    pub fn refilter(&mut self, presets: &[Preset]) {
        let haystack: Vec<String> = presets
            .iter()
            .map(|p| format!("{} {}", p.name, p.effective_key()))
            .collect();
        self.matches = self.matcher.find(&self.query, &haystack).into_iter().map(|m| m.index).collect();
        self.cursor = self.cursor.min(self.len().saturating_sub(1));
        self.scroll();
    }

    pub fn push_char(&mut self, c: char, presets: &[Preset]) {
        self.query.push(c);
        self.refilter(presets);
    }

    pub fn pop_char(&mut self, presets: &[Preset]) {
        if self.query.pop().is_some() {
            self.refilter(presets);
        }
    }

    pub fn escape(&mut self, presets: &[Preset]) -> Escape {
        if self.focused {
            self.focused = false;
            Escape::Unfocused
        } else if !self.query.is_empty() {
            self.query.clear();
            self.refilter(presets);
            Escape::Cleared
        } else {
            Escape::Exit
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let last = self.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
        self.scroll();
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll();
    }

    fn scroll(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.height {
            self.offset = self.cursor + 1 - self.height;
        }
        self.offset = self.offset.min(self.len().saturating_sub(self.height));
    }

    /// `(position, row, under_cursor)` for rows inside the viewport
    pub fn visible(&self) -> Vec<(usize, PresetRow, bool)> {
        let end = (self.offset + self.height).min(self.len());
        (self.offset..end)
            .filter_map(|p| self.row(p).map(|row| (p, row, p == self.cursor)))
            .collect()
    }
}
