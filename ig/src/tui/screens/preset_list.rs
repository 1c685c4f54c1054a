//! Root screen of the preset management session

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use presetstore::Preset;
use ratatui::Frame;
use ratatui::text::{Line, Span};
use tracing::{debug, info, warn};

use super::{Escape, NameInputScreen, PresetDetailScreen, PresetFilter, PresetRow, Screen, TemplateSelectScreen};
use crate::error::IgnrError;
use crate::output::{OutputMode, write_output};
use crate::templates::{Template, load_templates, merge_templates};
use crate::tui::context::SessionContext;
use crate::tui::events::{is_interrupt, typed_char};
use crate::tui::stack::Message;
use crate::tui::views;

/// Output waiting on a y/n answer
#[derive(Debug, Clone)]
struct PendingOverwrite {
    path: PathBuf,
    templates: Vec<Template>,
    preset_name: String,
}

#[derive(Debug)]
pub struct PresetListScreen {
    filter: PresetFilter,
    confirm_delete: Option<Preset>,
    confirm_overwrite: Option<PendingOverwrite>,
    error: Option<String>,
    status: Option<String>,
}

impl PresetListScreen {
    pub fn new(ctx: &SessionContext) -> Self {
        Self {
            filter: PresetFilter::new(&ctx.presets, true, 10),
            confirm_delete: None,
            confirm_overwrite: None,
            error: None,
            status: None,
        }
    }

    pub fn filter(&self) -> &PresetFilter {
        &self.filter
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm_delete.is_some() || self.confirm_overwrite.is_some()
    }

    pub fn refresh(&mut self, status: Option<String>, ctx: &mut SessionContext) {
        self.filter.refilter(&ctx.presets);
        self.status = status;
        self.error = None;
    }

    pub fn resize(&mut self, _width: u16, height: u16) {
        self.filter.set_height(views::list_height(height, 9, 20));
    }

    pub fn handle_key(&mut self, key: KeyEvent, ctx: &mut SessionContext) -> Vec<Message> {
        if self.confirm_overwrite.is_some() {
            self.answer_overwrite(key, ctx);
            return vec![];
        }
        if self.confirm_delete.is_some() {
            self.answer_delete(key, ctx);
            return vec![];
        }

        self.error = None;
        self.status = None;
        if is_interrupt(&key) {
            return vec![Message::Pop];
        }

        match key.code {
            KeyCode::Esc => {
                if self.filter.escape(&ctx.presets) == Escape::Exit {
                    return vec![Message::Pop];
                }
            }
            KeyCode::Up => self.filter.move_cursor(-1),
            KeyCode::Down => self.filter.move_cursor(1),
            KeyCode::Backspace => self.filter.pop_char(&ctx.presets),
            KeyCode::Enter => return self.activate(ctx),
            _ => {
                if let Some(c) = typed_char(&key) {
                    return self.typed(c, ctx);
                }
            }
        }
        vec![]
    }

    fn typed(&mut self, c: char, ctx: &mut SessionContext) -> Vec<Message> {
        if c == '/' {
            self.filter.focus();
            return vec![];
        }
        if self.filter.is_focused() {
            self.filter.push_char(c, &ctx.presets);
            return vec![];
        }

        let current = self.filter.current_preset(&ctx.presets).cloned();
        match (c, current) {
            ('c', _) => vec![push(Screen::NameInput(NameInputScreen::new()))],
            ('e', Some(preset)) => vec![push(Screen::TemplateSelect(TemplateSelectScreen::edit(ctx, preset)))],
            ('v', Some(preset)) => vec![push(Screen::PresetDetail(PresetDetailScreen::new(preset)))],
            ('d', Some(preset)) => {
                self.error = None;
                self.confirm_delete = Some(preset);
                vec![]
            }
            ('u', _) => self.activate(ctx),
            ('k', _) => {
                self.filter.move_cursor(-1);
                vec![]
            }
            ('j', _) => {
                self.filter.move_cursor(1);
                vec![]
            }
            _ => vec![],
        }
    }

    /// Enter / `u`: create on the create row, use on a preset row
    fn activate(&mut self, ctx: &mut SessionContext) -> Vec<Message> {
        match self.filter.current() {
            Some(PresetRow::Create) => vec![push(Screen::NameInput(NameInputScreen::new()))],
            Some(PresetRow::Preset(i)) => {
                if let Some(preset) = ctx.presets.get(i).cloned() {
                    self.use_preset(&preset, ctx);
                }
                vec![]
            }
            None => vec![],
        }
    }

    fn use_preset(&mut self, preset: &Preset, ctx: &mut SessionContext) {
        debug!(key = %preset.key, "PresetListScreen::use_preset: called");
        self.status = None;

        let mut selected = Vec::with_capacity(preset.templates.len());
        for name in &preset.templates {
            match ctx.catalog.find(name) {
                Some(template) => selected.push(template.clone()),
                None => {
                    self.error = Some(IgnrError::LookupMiss { name: name.clone() }.to_string());
                    return;
                }
            }
        }

        let path = ctx.output.clone();
        if path.exists() {
            self.confirm_overwrite = Some(PendingOverwrite {
                path,
                templates: selected,
                preset_name: preset.name.clone(),
            });
            return;
        }
        self.generate(&path, &selected, &preset.name, ctx);
    }

    fn generate(&mut self, path: &Path, templates: &[Template], preset_name: &str, ctx: &SessionContext) {
        let result = load_templates(templates).and_then(|loaded| {
            let content = merge_templates(&loaded, &ctx.merge_options());
            write_output(path, &content, OutputMode::Overwrite)
        });
        match result {
            Ok(()) => {
                info!(?path, preset = %preset_name, "Generated output from preset");
                self.error = None;
                self.status = Some(format!("Generated {} with preset \"{}\"", path.display(), preset_name));
            }
            Err(e) => {
                warn!(error = %e, "PresetListScreen::generate: failed");
                self.error = Some(e.to_string());
            }
        }
    }

    fn answer_overwrite(&mut self, key: KeyEvent, ctx: &mut SessionContext) {
        if is_interrupt(&key) {
            self.confirm_overwrite = None;
            return;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(pending) = self.confirm_overwrite.take() {
                    self.generate(&pending.path, &pending.templates, &pending.preset_name, ctx);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.confirm_overwrite = None,
            _ => {}
        }
    }

    fn answer_delete(&mut self, key: KeyEvent, ctx: &mut SessionContext) {
        if is_interrupt(&key) {
            self.confirm_delete = None;
            return;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                let Some(preset) = self.confirm_delete.take() else {
                    return;
                };
                if let Err(e) = ctx.store.delete(&preset.effective_key()) {
                    warn!(error = %e, "PresetListScreen::answer_delete: delete failed");
                    self.error = Some(e.to_string());
                    return;
                }
                if let Err(e) = ctx.reload_presets() {
                    self.error = Some(e.to_string());
                    return;
                }
                self.filter.refilter(&ctx.presets);
                self.error = None;
                self.status = Some(format!("Deleted preset \"{}\"", preset.name));
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.confirm_delete = None,
            _ => {}
        }
    }

    fn footer(&self) -> &'static str {
        if self.is_confirming() {
            "Y confirm • N cancel"
        } else if self.filter.is_focused() {
            "Type to filter • ↑↓ navigate • Enter use • Esc done"
        } else if !self.filter.query().is_empty() {
            "↑↓ navigate • Enter use • / edit search • Esc clear"
        } else if self.filter.current() == Some(PresetRow::Create) {
            "C/Enter create • / search • Esc exit"
        } else {
            "C new • E edit • D del • V view • U/Enter use • / search"
        }
    }

    /// Prompt, then error, then success
    fn status_line(&self, ctx: &SessionContext, width: u16) -> Line<'static> {
        let theme = &ctx.theme;
        if let Some(pending) = &self.confirm_overwrite {
            Line::from(Span::styled(
                format!("Overwrite {}? (Y/N)", pending.path.display()),
                theme.warning,
            ))
        } else if let Some(preset) = &self.confirm_delete {
            Line::from(Span::styled(format!("Delete preset \"{}\"? (Y/N)", preset.name), theme.warning))
        } else if let Some(error) = &self.error {
            Line::from(Span::styled(views::truncate(error, width), theme.error))
        } else if let Some(status) = &self.status {
            Line::from(Span::styled(views::truncate(status, width), theme.success))
        } else {
            Line::default()
        }
    }

    pub fn render(&self, frame: &mut Frame, ctx: &SessionContext) {
        let theme = &ctx.theme;
        let width = views::content_width(frame.area().width);

        let mut lines = vec![
            Line::from(Span::styled("Preset Management", theme.selected)),
            Line::default(),
            views::search_line(theme, self.filter.query(), self.filter.is_focused()),
            Line::default(),
        ];

        let mut rows: Vec<Line<'static>> = Vec::with_capacity(self.filter.height());
        for (_, row, under_cursor) in self.filter.visible() {
            let cursor = if under_cursor { "> " } else { "  " };
            let line = match row {
                PresetRow::Create => {
                    let style = if under_cursor { theme.preset_badge } else { theme.subtle };
                    Line::from(Span::styled(format!("{}[Create New Preset...]", cursor), style))
                }
                PresetRow::Preset(i) => {
                    let Some(preset) = ctx.presets.get(i) else { continue };
                    let text = format!("{}{} ({} templates)", cursor, preset.name, preset.templates.len());
                    if under_cursor {
                        Line::from(Span::styled(text, theme.selected))
                    } else {
                        Line::from(text)
                    }
                }
            };
            rows.push(line);
        }
        while rows.len() < self.filter.height() {
            rows.push(Line::default());
        }
        lines.extend(rows);
        lines.push(Line::default());
        lines.push(self.status_line(ctx, width));
        lines.push(views::footer_line(theme, self.footer()));

        views::render_panel(frame, theme, "Presets", lines);
    }
}

fn push(screen: Screen) -> Message {
    Message::Push(Box::new(screen))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{Category, Source, TemplateIndex};
    use crate::tui::theme::Theme;
    use crossterm::event::KeyModifiers;
    use presetstore::MemoryStore;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::fs;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        ctx: SessionContext,
        output: PathBuf,
    }

    fn fixture(presets: Vec<Preset>) -> Fixture {
        let dir = TempDir::new().unwrap();
        let go = dir.path().join("Go.gitignore");
        let node = dir.path().join("Node.gitignore");
        fs::write(&go, "bin/\nvendor/\n").unwrap();
        fs::write(&node, "node_modules/\nvendor/\n").unwrap();
        let catalog = Rc::new(TemplateIndex::build(vec![
            Template::new("Go", Category::Root, &go, Source::Cache),
            Template::new("Node", Category::Root, &node, Source::Cache),
        ]));

        let output = dir.path().join("out.gitignore");
        let ctx = SessionContext::new(Theme::plain(), catalog, Box::new(MemoryStore::with_presets(presets)))
            .unwrap()
            .with_output(&output);
        Fixture { _dir: dir, ctx, output }
    }

    fn press(screen: &mut PresetListScreen, ctx: &mut SessionContext, code: KeyCode) -> Vec<Message> {
        screen.handle_key(KeyEvent::new(code, KeyModifiers::NONE), ctx)
    }

    #[test]
    fn test_use_preset_writes_output() {
        let mut fx = fixture(vec![Preset::new("Full", vec!["Go".into(), "Node".into()], "t")]);
        let mut screen = PresetListScreen::new(&fx.ctx);
        press(&mut screen, &mut fx.ctx, KeyCode::Down);
        press(&mut screen, &mut fx.ctx, KeyCode::Char('u'));

        let content = fs::read_to_string(&fx.output).unwrap();
        assert!(content.starts_with("# Generated by ignr"));
        assert_eq!(content.matches("vendor/").count(), 1);
        assert_eq!(
            screen.status(),
            Some(format!("Generated {} with preset \"Full\"", fx.output.display()).as_str())
        );
    }

    #[test]
    fn test_use_preset_strict_lookup() {
        let mut fx = fixture(vec![Preset::new("Broken", vec!["Go".into(), "Cobol".into()], "t")]);
        let mut screen = PresetListScreen::new(&fx.ctx);
        press(&mut screen, &mut fx.ctx, KeyCode::Down);
        press(&mut screen, &mut fx.ctx, KeyCode::Enter);
        assert_eq!(screen.error(), Some("template not found: Cobol"));
        assert!(!fx.output.exists());
    }

    #[test]
    fn test_overwrite_confirmation_blocks_hotkeys() {
        let mut fx = fixture(vec![Preset::new("Go Only", vec!["Go".into()], "t")]);
        fs::write(&fx.output, "old\n").unwrap();
        let mut screen = PresetListScreen::new(&fx.ctx);
        press(&mut screen, &mut fx.ctx, KeyCode::Down);
        press(&mut screen, &mut fx.ctx, KeyCode::Char('u'));
        assert!(screen.is_confirming());

        // hotkeys are swallowed while the prompt is up
        assert!(press(&mut screen, &mut fx.ctx, KeyCode::Char('c')).is_empty());
        assert!(screen.is_confirming());

        press(&mut screen, &mut fx.ctx, KeyCode::Char('n'));
        assert!(!screen.is_confirming());
        assert_eq!(fs::read_to_string(&fx.output).unwrap(), "old\n");

        press(&mut screen, &mut fx.ctx, KeyCode::Enter);
        press(&mut screen, &mut fx.ctx, KeyCode::Char('Y'));
        assert!(fs::read_to_string(&fx.output).unwrap().contains("### Go ###"));
    }

    #[test]
    fn test_delete_with_confirmation() {
        let mut fx = fixture(vec![
            Preset::new("One", vec!["Go".into()], "t"),
            Preset::new("Two", vec!["Node".into()], "t"),
        ]);
        let mut screen = PresetListScreen::new(&fx.ctx);
        press(&mut screen, &mut fx.ctx, KeyCode::Down);
        press(&mut screen, &mut fx.ctx, KeyCode::Char('d'));
        assert!(screen.is_confirming());
        press(&mut screen, &mut fx.ctx, KeyCode::Char('y'));

        assert_eq!(screen.status(), Some("Deleted preset \"One\""));
        assert_eq!(fx.ctx.presets.len(), 1);
        assert_eq!(screen.filter().len(), 2);
    }

    #[test]
    fn test_create_row_and_hotkeys_push_screens() {
        let mut fx = fixture(vec![Preset::new("One", vec!["Go".into()], "t")]);
        let mut screen = PresetListScreen::new(&fx.ctx);

        let out = press(&mut screen, &mut fx.ctx, KeyCode::Enter);
        assert!(matches!(out.as_slice(), [Message::Push(s)] if matches!(**s, Screen::NameInput(_))));

        press(&mut screen, &mut fx.ctx, KeyCode::Char('j'));
        let out = press(&mut screen, &mut fx.ctx, KeyCode::Char('v'));
        assert!(matches!(out.as_slice(), [Message::Push(s)] if matches!(**s, Screen::PresetDetail(_))));
        let out = press(&mut screen, &mut fx.ctx, KeyCode::Char('e'));
        assert!(matches!(out.as_slice(), [Message::Push(s)] if matches!(**s, Screen::TemplateSelect(_))));
    }

    #[test]
    fn test_focused_search_types_hotkeys() {
        let mut fx = fixture(vec![Preset::new("Code", vec!["Go".into()], "t")]);
        let mut screen = PresetListScreen::new(&fx.ctx);
        press(&mut screen, &mut fx.ctx, KeyCode::Char('/'));
        for c in "cde".chars() {
            assert!(press(&mut screen, &mut fx.ctx, KeyCode::Char(c)).is_empty());
        }
        assert_eq!(screen.filter().query(), "cde");
        assert!(!screen.is_confirming());
    }

    #[test]
    fn test_escape_pops_when_idle() {
        let mut fx = fixture(vec![]);
        let mut screen = PresetListScreen::new(&fx.ctx);
        assert!(matches!(press(&mut screen, &mut fx.ctx, KeyCode::Esc).as_slice(), [Message::Pop]));
    }

    #[test]
    fn test_render_status_priority() {
        let mut fx = fixture(vec![Preset::new("One", vec!["Go".into()], "t")]);
        let mut screen = PresetListScreen::new(&fx.ctx);
        screen.refresh(Some("Created preset \"One\"".into()), &mut fx.ctx);
        press(&mut screen, &mut fx.ctx, KeyCode::Down);
        press(&mut screen, &mut fx.ctx, KeyCode::Char('d'));

        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|frame| screen.render(frame, &fx.ctx)).unwrap();
        let text = views::buffer_text(terminal.backend().buffer());
        assert!(text.contains("Delete preset \"One\"? (Y/N)"));
        assert!(text.contains("[Create New Preset...]"));
        assert!(text.contains("> One (1 templates)"));
        assert!(text.contains("Y confirm • N cancel"));
    }
}
