//! Template selection for creating or editing a preset

use crossterm::event::KeyEvent;
use presetstore::Preset;
use ratatui::Frame;
use tracing::{info, warn};

use crate::tui::browse::{BrowseAction, BrowsingModel, Status};
use crate::tui::context::SessionContext;
use crate::tui::stack::Message;
use crate::tui::views;

#[derive(Debug)]
enum Mode {
    Create { name: String },
    Edit { preset: Preset },
}

#[derive(Debug)]
pub struct TemplateSelectScreen {
    mode: Mode,
    model: BrowsingModel,
}

impl TemplateSelectScreen {
    /// Pick templates for a preset that doesn't exist yet
    pub fn create(ctx: &SessionContext, name: String) -> Self {
        Self {
            mode: Mode::Create { name },
            model: BrowsingModel::new(ctx.catalog.clone(), Vec::new(), &[], &[]),
        }
    }

    /// Re-pick templates for `preset`, starting from its current members
    pub fn edit(ctx: &SessionContext, preset: Preset) -> Self {
        let model = BrowsingModel::new(ctx.catalog.clone(), Vec::new(), &preset.templates, &[]);
        Self {
            mode: Mode::Edit { preset },
            model,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            Mode::Create { .. } => "Create Templates",
            Mode::Edit { .. } => "Edit Templates",
        }
    }

    pub fn model(&self) -> &BrowsingModel {
        &self.model
    }

    pub fn clear_status(&mut self) {
        self.model.clear_status();
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut SessionContext) -> Vec<Message> {
        match self.model.handle_key(key) {
            BrowseAction::Continue => vec![],
            BrowseAction::Cancel => vec![Message::Pop],
            BrowseAction::Commit => self.save(ctx),
        }
    }

    fn save(&mut self, ctx: &mut SessionContext) -> Vec<Message> {
        if self.model.selection().is_empty() {
            self.model.set_status(Status::error("Select at least one template"));
            return vec![];
        }
        let names: Vec<String> = self
            .model
            .selection()
            .ordered()
            .iter()
            .map(|t| t.name.clone())
            .collect();

        let result = match &self.mode {
            Mode::Create { name } => ctx.store.create(name, &names),
            Mode::Edit { preset } => ctx.store.edit(&preset.effective_key(), &names),
        };
        let saved = match result {
            Ok(saved) => saved,
            Err(e) => {
                warn!(error = %e, "TemplateSelectScreen::save: persistence failed");
                self.model.set_status(Status::error(e.to_string()));
                return vec![];
            }
        };
        info!(key = %saved.key, templates = names.len(), "Saved preset");

        if let Err(e) = ctx.reload_presets() {
            warn!(error = %e, "TemplateSelectScreen::save: reload failed");
        }

        match &self.mode {
            Mode::Create { name } => vec![
                Message::Pop,
                Message::Pop,
                Message::Refresh(Some(format!("Created preset \"{}\"", name))),
            ],
            Mode::Edit { preset } => vec![
                Message::Pop,
                Message::Refresh(Some(format!("Updated preset \"{}\"", preset.name))),
            ],
        }
    }

    pub fn resize(&mut self, _width: u16, height: u16) {
        self.model.set_list_height(views::list_height(height, 10, 20));
    }

    pub fn render(&self, frame: &mut Frame, ctx: &SessionContext) {
        views::render_browser(frame, &ctx.theme, self.title(), &self.model);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{Category, Source, Template, TemplateIndex};
    use crate::tui::theme::Theme;
    use crossterm::event::{KeyCode, KeyModifiers};
    use presetstore::MemoryStore;
    use std::rc::Rc;

    fn catalog() -> Rc<TemplateIndex> {
        let t = |n: &str| Template::new(n, Category::Root, format!("/c/{}.gitignore", n), Source::Cache);
        Rc::new(TemplateIndex::build(vec![t("Go"), t("Node"), t("Rust")]))
    }

    fn ctx(store: MemoryStore) -> SessionContext {
        SessionContext::new(Theme::plain(), catalog(), Box::new(store)).unwrap()
    }

    fn press(screen: &mut TemplateSelectScreen, ctx: &mut SessionContext, code: KeyCode) -> Vec<Message> {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), ctx)
    }

    #[test]
    fn test_empty_commit_is_rejected() {
        let mut ctx = ctx(MemoryStore::new());
        let mut screen = TemplateSelectScreen::create(&ctx, "New".into());
        assert!(press(&mut screen, &mut ctx, KeyCode::Tab).is_empty());
        assert_eq!(
            screen.model().status(),
            Some(&Status::error("Select at least one template"))
        );
        assert!(ctx.presets.is_empty());
    }

    #[test]
    fn test_create_pops_twice_then_refreshes() {
        let mut ctx = ctx(MemoryStore::new());
        let mut screen = TemplateSelectScreen::create(&ctx, "Backend".into());
        press(&mut screen, &mut ctx, KeyCode::Char(' '));
        press(&mut screen, &mut ctx, KeyCode::Down);
        press(&mut screen, &mut ctx, KeyCode::Down);
        press(&mut screen, &mut ctx, KeyCode::Char(' '));

        let out = press(&mut screen, &mut ctx, KeyCode::Tab);
        assert!(matches!(
            out.as_slice(),
            [Message::Pop, Message::Pop, Message::Refresh(Some(msg))] if msg == "Created preset \"Backend\""
        ));
        assert_eq!(ctx.presets.len(), 1);
        assert_eq!(ctx.presets[0].templates, vec!["Go", "Rust"]);
    }

    #[test]
    fn test_edit_preselects_and_pops_once() {
        let existing = Preset::new("Web", vec!["Node".into()], "t");
        let mut ctx = ctx(MemoryStore::with_presets(vec![existing.clone()]));
        let mut screen = TemplateSelectScreen::edit(&ctx, existing);
        assert_eq!(screen.model().selection().len(), 1);

        press(&mut screen, &mut ctx, KeyCode::Enter);
        let out = press(&mut screen, &mut ctx, KeyCode::Tab);
        assert!(matches!(
            out.as_slice(),
            [Message::Pop, Message::Refresh(Some(msg))] if msg == "Updated preset \"Web\""
        ));
        assert_eq!(ctx.presets[0].templates, vec!["Node", "Go"]);
    }

    #[test]
    fn test_persistence_error_keeps_screen() {
        let mut ctx = ctx(MemoryStore::new().failing_writes());
        let mut screen = TemplateSelectScreen::create(&ctx, "X".into());
        press(&mut screen, &mut ctx, KeyCode::Enter);
        let out = press(&mut screen, &mut ctx, KeyCode::Tab);
        assert!(out.is_empty());
        let status = screen.model().status().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("write presets"));
    }

    #[test]
    fn test_cancel_pops() {
        let mut ctx = ctx(MemoryStore::new());
        let mut screen = TemplateSelectScreen::create(&ctx, "X".into());
        assert!(matches!(press(&mut screen, &mut ctx, KeyCode::Esc).as_slice(), [Message::Pop]));
    }
}
