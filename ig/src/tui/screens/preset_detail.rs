//! Read-only view of one preset's members

use crossterm::event::{KeyCode, KeyEvent};
use presetstore::Preset;
use ratatui::Frame;
use ratatui::text::{Line, Span};

use crate::tui::context::SessionContext;
use crate::tui::events::is_interrupt;
use crate::tui::stack::Message;
use crate::tui::views;

#[derive(Debug)]
pub struct PresetDetailScreen {
    preset: Preset,
}

impl PresetDetailScreen {
    pub fn new(preset: Preset) -> Self {
        Self { preset }
    }

    pub fn preset(&self) -> &Preset {
        &self.preset
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Message> {
        if is_interrupt(&key) {
            return vec![Message::Pop];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => vec![Message::Pop],
            _ => vec![],
        }
    }

    /// Member lines: resolved display names, raw names when unresolved
    pub fn member_lines(&self, ctx: &SessionContext) -> Vec<String> {
        if self.preset.templates.is_empty() {
            return vec!["  No templates".to_string()];
        }
        self.preset
            .templates
            .iter()
            .map(|name| match ctx.catalog.find(name) {
                Some(template) => format!("  • {}", template.display_name()),
                None => format!("  • {}", name),
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, ctx: &SessionContext) {
        let theme = &ctx.theme;
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} [{}]", self.preset.name, self.preset.effective_key()),
                theme.selected,
            )),
            Line::default(),
        ];
        lines.extend(self.member_lines(ctx).into_iter().map(Line::from));
        lines.push(Line::default());
        lines.push(views::footer_line(theme, "Esc/Enter/Q back"));
        views::render_panel(frame, theme, &format!("View: {}", self.preset.name), lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{Category, Source, Template, TemplateIndex};
    use crate::tui::theme::Theme;
    use crossterm::event::KeyModifiers;
    use std::rc::Rc;

    #[test]
    fn test_member_lines_mark_unresolved_raw() {
        let catalog = Rc::new(TemplateIndex::build(vec![Template::new(
            "Mine",
            Category::User,
            "/u/Mine.gitignore",
            Source::User,
        )]));
        let ctx = SessionContext::detached(Theme::plain(), catalog, vec![]);
        let screen = PresetDetailScreen::new(Preset::new("P", vec!["mine".into(), "Ghost".into()], "t"));
        assert_eq!(screen.member_lines(&ctx), vec!["  • (User) Mine", "  • Ghost"]);
    }

    #[test]
    fn test_back_keys_pop() {
        let mut screen = PresetDetailScreen::new(Preset::new("P", vec![], "t"));
        for code in [KeyCode::Esc, KeyCode::Enter, KeyCode::Char('q')] {
            let out = screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
            assert!(matches!(out.as_slice(), [Message::Pop]));
        }
        assert!(screen.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)).is_empty());
    }
}
