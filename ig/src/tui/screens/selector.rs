//! Standalone template selector

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::tui::browse::{BrowseAction, BrowsingModel};
use crate::tui::context::SessionContext;
use crate::tui::stack::{Message, SessionOutcome};
use crate::tui::views;

#[derive(Debug)]
pub struct SelectorScreen {
    title: String,
    model: BrowsingModel,
}

impl SelectorScreen {
    pub fn new(title: impl Into<String>, model: BrowsingModel) -> Self {
        Self {
            title: title.into(),
            model,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn model(&self) -> &BrowsingModel {
        &self.model
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Message> {
        match self.model.handle_key(key) {
            BrowseAction::Continue => vec![],
            BrowseAction::Commit => {
                let selected = self.model.selection().ordered().to_vec();
                vec![Message::Finish(SessionOutcome::Selected(selected))]
            }
            BrowseAction::Cancel => vec![Message::Finish(SessionOutcome::Cancelled)],
        }
    }

    pub fn clear_status(&mut self) {
        self.model.clear_status();
    }

    pub fn resize(&mut self, _width: u16, height: u16) {
        self.model.set_list_height(views::list_height(height, 10, 20));
    }

    pub fn render(&self, frame: &mut Frame, ctx: &SessionContext) {
        views::render_browser(frame, &ctx.theme, &self.title, &self.model);
    }
}
