//! Standalone preset picker

use crossterm::event::{KeyCode, KeyEvent};
use presetstore::Preset;
use ratatui::Frame;
use ratatui::text::{Line, Span};

use super::{Escape, PresetFilter, PresetRow};
use crate::tui::browse::Status;
use crate::tui::context::SessionContext;
use crate::tui::events::{is_interrupt, typed_char};
use crate::tui::stack::{Message, SessionOutcome};
use crate::tui::views;

#[derive(Debug)]
pub struct PresetPickerScreen {
    presets: Vec<Preset>,
    filter: PresetFilter,
    status: Option<Status>,
}

impl PresetPickerScreen {
    pub fn new(presets: Vec<Preset>) -> Self {
        let filter = PresetFilter::new(&presets, false, 10);
        Self {
            presets,
            filter,
            status: None,
        }
    }

    pub fn filter(&self) -> &PresetFilter {
        &self.filter
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Message> {
        self.status = None;
        if is_interrupt(&key) {
            return vec![Message::Finish(SessionOutcome::Cancelled)];
        }

        match key.code {
            KeyCode::Esc => {
                if self.filter.escape(&self.presets) == Escape::Exit {
                    return vec![Message::Finish(SessionOutcome::Cancelled)];
                }
            }
            KeyCode::Enter => match self.filter.current_preset(&self.presets) {
                Some(preset) => return vec![Message::Finish(SessionOutcome::Picked(preset.clone()))],
                None => self.status = Some(Status::error("No preset selected")),
            },
            KeyCode::Up => self.filter.move_cursor(-1),
            KeyCode::Down => self.filter.move_cursor(1),
            KeyCode::Backspace => self.filter.pop_char(&self.presets),
            _ => match typed_char(&key) {
                Some('/') => self.filter.focus(),
                Some(c) if self.filter.is_focused() => self.filter.push_char(c, &self.presets),
                Some('k') => self.filter.move_cursor(-1),
                Some('j') => self.filter.move_cursor(1),
                _ => {}
            },
        }
        vec![]
    }

    pub fn resize(&mut self, _width: u16, height: u16) {
        self.filter.set_height(views::list_height(height, 9, 15));
    }

    pub fn render(&self, frame: &mut Frame, ctx: &SessionContext) {
        let theme = &ctx.theme;
        let width = views::content_width(frame.area().width);

        let mut lines = vec![
            views::search_line(theme, self.filter.query(), self.filter.is_focused()),
            Line::default(),
        ];

        let mut rows: Vec<Line<'static>> = self
            .filter
            .visible()
            .into_iter()
            .filter_map(|(_, row, under_cursor)| match row {
                PresetRow::Preset(i) => self.presets.get(i).map(|p| (p, under_cursor)),
                PresetRow::Create => None,
            })
            .map(|(preset, under_cursor)| {
                let cursor = if under_cursor { ">" } else { " " };
                let text = format!("{} {} ({} templates)", cursor, preset.name, preset.templates.len());
                if under_cursor {
                    Line::from(Span::styled(text, theme.selected))
                } else {
                    Line::from(text)
                }
            })
            .collect();
        if rows.is_empty() {
            rows.push(Line::from(Span::styled("(no presets)", theme.footer)));
        }
        while rows.len() < self.filter.height() {
            rows.push(Line::default());
        }
        lines.extend(rows);
        lines.push(Line::default());
        lines.push(views::status_line(theme, self.status.as_ref(), width));

        let footer = if self.filter.is_focused() {
            "Type to filter • ↑↓ navigate • Esc done"
        } else if !self.filter.query().is_empty() {
            "Enter select • / edit search • Esc clear"
        } else {
            "Enter select • / search • Esc cancel"
        };
        lines.push(views::footer_line(theme, footer));

        views::render_panel(frame, theme, "Select Preset", lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn presets() -> Vec<Preset> {
        vec![
            Preset::new("Web Stack", vec!["Node".into()], "t"),
            Preset::new("Systems", vec!["Rust".into()], "t"),
        ]
    }

    fn press(screen: &mut PresetPickerScreen, code: KeyCode) -> Vec<Message> {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_enter_picks_current() {
        let mut screen = PresetPickerScreen::new(presets());
        press(&mut screen, KeyCode::Char('j'));
        let out = press(&mut screen, KeyCode::Enter);
        assert!(matches!(
            out.as_slice(),
            [Message::Finish(SessionOutcome::Picked(p))] if p.key == "systems"
        ));
    }

    #[test]
    fn test_search_then_pick() {
        let mut screen = PresetPickerScreen::new(presets());
        press(&mut screen, KeyCode::Char('/'));
        for c in "web".chars() {
            press(&mut screen, KeyCode::Char(c));
        }
        let out = press(&mut screen, KeyCode::Enter);
        assert!(matches!(
            out.as_slice(),
            [Message::Finish(SessionOutcome::Picked(p))] if p.name == "Web Stack"
        ));
    }

    #[test]
    fn test_layered_escape_then_cancel() {
        let mut screen = PresetPickerScreen::new(presets());
        press(&mut screen, KeyCode::Char('/'));
        press(&mut screen, KeyCode::Char('s'));
        assert!(press(&mut screen, KeyCode::Esc).is_empty());
        assert!(press(&mut screen, KeyCode::Esc).is_empty());
        assert!(matches!(
            press(&mut screen, KeyCode::Esc).as_slice(),
            [Message::Finish(SessionOutcome::Cancelled)]
        ));
    }

    #[test]
    fn test_enter_without_presets_stays() {
        let mut screen = PresetPickerScreen::new(vec![]);
        assert!(press(&mut screen, KeyCode::Enter).is_empty());
        assert_eq!(screen.status, Some(Status::error("No preset selected")));
    }
}
