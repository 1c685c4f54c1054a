//! Name entry for a new preset

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::text::{Line, Span};
use tracing::debug;

use super::{Screen, TemplateSelectScreen};
use crate::tui::context::SessionContext;
use crate::tui::events::{is_interrupt, typed_char};
use crate::tui::stack::Message;
use crate::tui::views;

#[derive(Debug, Default)]
pub struct NameInputScreen {
    input: String,
    error: Option<String>,
}

impl NameInputScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut SessionContext) -> Vec<Message> {
        if is_interrupt(&key) {
            return vec![Message::Pop];
        }
        match key.code {
            KeyCode::Esc => vec![Message::Pop],
            KeyCode::Enter => self.submit(ctx),
            KeyCode::Backspace => {
                self.input.pop();
                vec![]
            }
            _ => {
                if let Some(c) = typed_char(&key) {
                    self.input.push(c);
                    self.error = None;
                }
                vec![]
            }
        }
    }

    fn submit(&mut self, ctx: &mut SessionContext) -> Vec<Message> {
        let name = self.input.trim();
        if name.is_empty() {
            self.error = Some("Name is required".to_string());
            return vec![];
        }
        let key = SessionContext::key_for(name);
        if ctx.key_exists(&key) {
            self.error = Some(format!("Key already exists: {}", key));
            return vec![];
        }
        debug!(%name, %key, "NameInputScreen::submit: continuing to template selection");
        let next = TemplateSelectScreen::create(ctx, name.to_string());
        vec![Message::Push(Box::new(Screen::TemplateSelect(next)))]
    }

    pub fn render(&self, frame: &mut Frame, ctx: &SessionContext) {
        let theme = &ctx.theme;
        let mut lines = vec![
            Line::from(Span::styled("Create Preset", theme.selected)),
            Line::default(),
            Line::from(vec![
                Span::styled("Name: ", theme.subtle),
                Span::styled(format!("{}▏", self.input), theme.search),
            ]),
            Line::from(Span::styled(
                format!("Key: {}", SessionContext::key_for(&self.input)),
                theme.subtle,
            )),
        ];
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(error.clone(), theme.error)));
        }
        lines.push(Line::default());
        lines.push(views::footer_line(theme, "Enter continue • Esc back"));
        views::render_panel(frame, theme, "Create", lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateIndex;
    use crate::tui::theme::Theme;
    use crossterm::event::KeyModifiers;
    use presetstore::{MemoryStore, Preset};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::rc::Rc;

    fn ctx() -> SessionContext {
        let store = MemoryStore::with_presets(vec![Preset::new("Web Stack", vec![], "t")]);
        SessionContext::new(Theme::plain(), Rc::new(TemplateIndex::default()), Box::new(store)).unwrap()
    }

    fn type_text(screen: &mut NameInputScreen, ctx: &mut SessionContext, text: &str) {
        for c in text.chars() {
            screen.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), ctx);
        }
    }

    fn enter(screen: &mut NameInputScreen, ctx: &mut SessionContext) -> Vec<Message> {
        screen.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), ctx)
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut ctx = ctx();
        let mut screen = NameInputScreen::new();
        type_text(&mut screen, &mut ctx, "   ");
        assert!(enter(&mut screen, &mut ctx).is_empty());
        assert_eq!(screen.error(), Some("Name is required"));
    }

    #[test]
    fn test_existing_key_rejected() {
        let mut ctx = ctx();
        let mut screen = NameInputScreen::new();
        type_text(&mut screen, &mut ctx, "web_stack");
        assert!(enter(&mut screen, &mut ctx).is_empty());
        assert_eq!(screen.error(), Some("Key already exists: web-stack"));

        // typing clears the error
        type_text(&mut screen, &mut ctx, "2");
        assert!(screen.error().is_none());
    }

    #[test]
    fn test_valid_name_pushes_template_select() {
        let mut ctx = ctx();
        let mut screen = NameInputScreen::new();
        type_text(&mut screen, &mut ctx, "Go Service");
        let out = enter(&mut screen, &mut ctx);
        assert!(matches!(out.as_slice(), [Message::Push(s)] if matches!(**s, Screen::TemplateSelect(_))));
    }

    #[test]
    fn test_render_shows_key_preview() {
        let mut ctx = ctx();
        let mut screen = NameInputScreen::new();
        type_text(&mut screen, &mut ctx, "My Preset!");
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| screen.render(frame, &ctx)).unwrap();
        let text = views::buffer_text(terminal.backend().buffer());
        assert!(text.contains("Key: my-preset"));
        assert!(text.contains("Name: My Preset!"));
    }
}
