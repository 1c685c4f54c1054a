//! Overwrite confirmation shown before replacing an existing output file

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::text::{Line, Span};

use crate::templates::Template;
use crate::tui::context::SessionContext;
use crate::tui::events::is_interrupt;
use crate::tui::stack::{Message, SessionOutcome};
use crate::tui::views;

#[derive(Debug)]
pub struct ConfirmOverwriteScreen {
    path: PathBuf,
    templates: Vec<Template>,
    size: (u16, u16),
}

impl ConfirmOverwriteScreen {
    pub fn new(path: PathBuf, templates: Vec<Template>) -> Self {
        Self {
            path,
            templates,
            size: (0, 0),
        }
    }

    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// `y` confirms; Enter declines; `n`, Esc and Ctrl+C cancel
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Message> {
        if is_interrupt(&key) {
            return vec![Message::Finish(SessionOutcome::Cancelled)];
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => vec![Message::Finish(SessionOutcome::Confirmed(true))],
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => vec![Message::Finish(SessionOutcome::Cancelled)],
            KeyCode::Enter => vec![Message::Finish(SessionOutcome::Confirmed(false))],
            _ => vec![],
        }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    pub fn render(&self, frame: &mut Frame, ctx: &SessionContext) {
        let theme = &ctx.theme;
        let width = views::content_width(frame.area().width);

        let mut lines = vec![
            Line::from(format!("Output file exists: {}", self.path.display())),
            Line::default(),
        ];
        if !self.templates.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("Applying {} template(s):", self.templates.len()),
                theme.subtle,
            )));
            let names: Vec<String> = self.templates.iter().map(Template::display_name).collect();
            for line in wrap_names(&names, usize::from(width.saturating_sub(4)), "  ") {
                lines.push(Line::from(line));
            }
            lines.push(Line::default());
        }
        lines.push(Line::from("Overwrite? (y/N)"));
        lines.push(views::footer_line(theme, "Y confirm • N cancel • Esc cancel"));

        views::render_panel(frame, theme, "Confirm Overwrite", lines);
    }
}

/// Join names with ", " and break lines between names to stay within `width`
fn wrap_names(names: &[String], width: usize, prefix: &str) -> Vec<String> {
    let width = if width == 0 { 40 } else { width };
    let mut lines = Vec::new();
    let mut current = prefix.to_string();

    for (i, name) in names.iter().enumerate() {
        let last = i + 1 == names.len();
        let piece = if last { name.clone() } else { format!("{},", name) };
        let needed = if current.len() > prefix.len() { piece.len() + 1 } else { piece.len() };

        if current.len() > prefix.len() && current.len() + needed > width {
            lines.push(std::mem::replace(&mut current, prefix.to_string()));
        }
        if current.len() > prefix.len() {
            current.push(' ');
        }
        current.push_str(&piece);
    }

    if current.len() > prefix.len() {
        lines.push(current);
    }
    lines
}
