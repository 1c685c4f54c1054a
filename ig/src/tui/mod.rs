//! Interactive terminal sessions
//!
//! Every session is a [`ViewStack`] driven by a [`SessionRunner`]:
//! - the standalone template selector used by `generate` and `preset create|edit`
//! - the preset management app behind bare `ignr preset`
//! - the preset picker used when a preset subcommand gets no key
//! - the overwrite confirmation shown after an interactive selection

pub mod browse;
pub mod context;
pub mod events;
pub mod runner;
pub mod screens;
pub mod stack;
pub mod theme;
pub mod views;

pub use browse::BrowsingModel;
pub use context::{GeneratorInfo, SessionContext};
pub use events::{Event, EventSource, ScriptedEvents, TerminalEvents};
pub use runner::SessionRunner;
pub use screens::Screen;
pub use stack::{Message, SessionOutcome, ViewStack};
pub use theme::Theme;

use std::io::{self, Stdout};
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use presetstore::Preset;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::error::IgnrError;
use crate::templates::Template;
use screens::{ConfirmOverwriteScreen, PresetListScreen, PresetPickerScreen, SelectorScreen};

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Restores the terminal when dropped, on every exit path
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore();
    }
}

/// Run `root` on the real terminal
pub fn run_session(root: Screen, ctx: &mut SessionContext) -> Result<Option<SessionOutcome>> {
    debug!(title = %root.title(), "run_session: called");
    let terminal = init()?;
    let _guard = TerminalGuard;
    let mut stack = ViewStack::new(root);
    SessionRunner::new(terminal, TerminalEvents).run(&mut stack, ctx)
}

/// Standalone selector screen for `ctx`'s catalog and presets
pub fn selector_screen(title: &str, ctx: &SessionContext, preselected: &[String], suggested: &[String]) -> Screen {
    let model = BrowsingModel::new(ctx.catalog.clone(), ctx.presets.clone(), preselected, suggested);
    Screen::Selector(SelectorScreen::new(title, model))
}

/// Interactive template selection; `Err(Cancelled)` when the user backs out
pub fn run_selector(
    title: &str,
    ctx: &mut SessionContext,
    preselected: &[String],
    suggested: &[String],
) -> Result<Vec<Template>> {
    let root = selector_screen(title, ctx, preselected, suggested);
    selected_templates(run_session(root, ctx)?)
}

/// Preset management app; returns when the root list is closed
pub fn run_preset_app(ctx: &mut SessionContext) -> Result<()> {
    let root = Screen::PresetList(PresetListScreen::new(ctx));
    run_session(root, ctx)?;
    Ok(())
}

/// Pick one preset; `Err(Cancelled)` when the user backs out
pub fn run_preset_picker(ctx: &mut SessionContext) -> Result<Preset> {
    let root = Screen::PresetPicker(PresetPickerScreen::new(ctx.presets.clone()));
    picked_preset(run_session(root, ctx)?)
}

/// Ask before overwriting `path`; `Ok(false)` when declined
pub fn confirm_overwrite(ctx: &mut SessionContext, path: PathBuf, templates: Vec<Template>) -> Result<bool> {
    let root = Screen::Confirm(ConfirmOverwriteScreen::new(path, templates));
    Ok(confirmed(run_session(root, ctx)?))
}

pub(crate) fn selected_templates(outcome: Option<SessionOutcome>) -> Result<Vec<Template>> {
    match outcome {
        Some(SessionOutcome::Selected(templates)) => Ok(templates),
        _ => Err(IgnrError::Cancelled.into()),
    }
}

pub(crate) fn picked_preset(outcome: Option<SessionOutcome>) -> Result<Preset> {
    match outcome {
        Some(SessionOutcome::Picked(preset)) => Ok(preset),
        _ => Err(IgnrError::Cancelled.into()),
    }
}

pub(crate) fn confirmed(outcome: Option<SessionOutcome>) -> bool {
    matches!(outcome, Some(SessionOutcome::Confirmed(true)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::is_cancelled;

    #[test]
    fn test_outcome_mapping() {
        assert!(selected_templates(Some(SessionOutcome::Selected(vec![]))).is_ok());
        assert!(is_cancelled(&selected_templates(Some(SessionOutcome::Cancelled)).unwrap_err()));
        assert!(is_cancelled(&selected_templates(None).unwrap_err()));

        let preset = Preset::new("P", vec![], "t");
        assert_eq!(picked_preset(Some(SessionOutcome::Picked(preset.clone()))).unwrap(), preset);
        assert!(is_cancelled(&picked_preset(Some(SessionOutcome::Cancelled)).unwrap_err()));

        assert!(confirmed(Some(SessionOutcome::Confirmed(true))));
        assert!(!confirmed(Some(SessionOutcome::Confirmed(false))));
        assert!(!confirmed(None));
    }
}
