//! TUI input sources
//!
//! The session loop pulls one event at a time from an [`EventSource`]. The
//! terminal source blocks on crossterm; the scripted source replays a fixed
//! queue and is what tests drive sessions with.

use std::collections::VecDeque;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use eyre::Result;

/// Terminal events the session cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
}

/// Where the session loop reads input from
pub trait EventSource {
    /// Next event, or `None` once the source is exhausted
    fn next_event(&mut self) -> Result<Option<Event>>;
}

/// Blocking reader over the real terminal
#[derive(Debug, Default)]
pub struct TerminalEvents;

impl EventSource for TerminalEvents {
    fn next_event(&mut self) -> Result<Option<Event>> {
        loop {
            match event::read()? {
                // release/repeat events show up on some platforms; only presses count
                event::Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(Some(Event::Key(key))),
                event::Event::Resize(w, h) => return Ok(Some(Event::Resize(w, h))),
                _ => continue,
            }
        }
    }
}

/// Replays a fixed list of events
#[derive(Debug, Default, Clone)]
pub struct ScriptedEvents {
    queue: VecDeque<Event>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// Append a key press
    pub fn key(mut self, code: KeyCode) -> Self {
        self.queue.push_back(key(code));
        self
    }

    /// Append one press per character
    pub fn text(mut self, text: &str) -> Self {
        self.queue.extend(text.chars().map(|c| key(KeyCode::Char(c))));
        self
    }

    /// Append a Ctrl-modified character
    pub fn ctrl(mut self, c: char) -> Self {
        self.queue.push_back(ctrl(c));
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Result<Option<Event>> {
        Ok(self.queue.pop_front())
    }
}

/// Plain key press event
pub fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Ctrl-modified character press
pub fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

/// True for Ctrl+C
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// True for the commit chords: Tab, Ctrl+Enter, Ctrl+J
pub fn is_commit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Tab => true,
        KeyCode::Enter => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('j') | KeyCode::Char('J') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Character typed without Ctrl/Alt, if any
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => Some(c),
        _ => None,
    }
}
