//! Screen stack and message queue
//!
//! The top screen is the only one that sees key input. Screens talk back to
//! the stack by returning [`Message`]s, which are queued and processed until
//! the queue is empty before the next input event is read.

use std::collections::VecDeque;

use crossterm::event::KeyEvent;
use presetstore::Preset;
use tracing::debug;

use super::context::SessionContext;
use super::screens::Screen;
use crate::templates::Template;

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Selected(Vec<Template>),
    Picked(Preset),
    /// Answer to a yes/no prompt; Enter counts as "no"
    Confirmed(bool),
    Cancelled,
}

/// Everything that flows through the queue
#[derive(Debug)]
pub enum Message {
    Key(KeyEvent),
    Resize(u16, u16),
    Push(Box<Screen>),
    Pop,
    /// Reload shared data on the top screen; `Some` sets its status line
    Refresh(Option<String>),
    Finish(SessionOutcome),
}

#[derive(Debug)]
pub struct ViewStack {
    screens: Vec<Screen>,
    queue: VecDeque<Message>,
    size: Option<(u16, u16)>,
    running: bool,
    outcome: Option<SessionOutcome>,
}

impl ViewStack {
    pub fn new(root: Screen) -> Self {
        Self {
            screens: vec![root],
            queue: VecDeque::new(),
            size: None,
            running: true,
            outcome: None,
        }
    }

    pub fn depth(&self) -> usize {
        self.screens.len()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn top(&self) -> Option<&Screen> {
        self.screens.last()
    }

    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    /// Outcome recorded by `Finish`, if any
    pub fn outcome(&self) -> Option<&SessionOutcome> {
        self.outcome.as_ref()
    }

    pub fn take_outcome(&mut self) -> Option<SessionOutcome> {
        self.outcome.take()
    }

    /// Queue `message` and drain the queue, including follow-ups
    pub fn dispatch(&mut self, message: Message, ctx: &mut SessionContext) {
        self.queue.push_back(message);
        while self.running {
            let Some(next) = self.queue.pop_front() else {
                break;
            };
            self.process(next, ctx);
        }
    }

    fn process(&mut self, message: Message, ctx: &mut SessionContext) {
        match message {
            Message::Key(key) => {
                if let Some(top) = self.screens.last_mut() {
                    let follow_ups = top.handle_key(key, ctx);
                    self.queue.extend(follow_ups);
                }
            }
            Message::Resize(width, height) => {
                self.size = Some((width, height));
                for screen in &mut self.screens {
                    screen.resize(width, height);
                }
            }
            Message::Push(screen) => {
                let mut screen = *screen;
                if let Some((width, height)) = self.size {
                    screen.resize(width, height);
                }
                debug!(title = %screen.title(), depth = self.screens.len() + 1, "ViewStack: push");
                self.screens.push(screen);
            }
            Message::Pop => {
                if self.screens.len() <= 1 {
                    debug!("ViewStack: pop on last screen, terminating");
                    self.terminate();
                    return;
                }
                self.screens.pop();
                debug!(depth = self.screens.len(), "ViewStack: pop");
                // delivered now so a queued Refresh(Some) lands after it
                if let Some(top) = self.screens.last_mut() {
                    top.refresh(None, ctx);
                }
            }
            Message::Refresh(status) => {
                if let Some(top) = self.screens.last_mut() {
                    top.refresh(status, ctx);
                }
            }
            Message::Finish(outcome) => {
                debug!(?outcome, "ViewStack: finish");
                self.outcome = Some(outcome);
                self.terminate();
            }
        }
    }

    fn terminate(&mut self) {
        self.running = false;
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::{ConfirmOverwriteScreen, PresetDetailScreen, PresetListScreen};
    use crate::tui::theme::Theme;
    use crossterm::event::{KeyCode, KeyModifiers};
    use presetstore::MemoryStore;
    use std::rc::Rc;

    fn ctx() -> SessionContext {
        let store = MemoryStore::with_presets(vec![Preset::new("Web", vec!["Node".into()], "t")]);
        SessionContext::new(Theme::plain(), Rc::new(Default::default()), Box::new(store)).unwrap()
    }

    fn detail(ctx: &SessionContext) -> Screen {
        Screen::PresetDetail(PresetDetailScreen::new(ctx.presets[0].clone()))
    }

    fn press(code: KeyCode) -> Message {
        Message::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_pop_on_single_screen_terminates() {
        let mut ctx = ctx();
        let mut stack = ViewStack::new(detail(&ctx));
        stack.dispatch(Message::Pop, &mut ctx);
        assert!(!stack.is_running());
        assert_eq!(stack.depth(), 1);
        assert!(stack.outcome().is_none());
    }

    #[test]
    fn test_push_routes_keys_to_top() {
        let mut ctx = ctx();
        let mut stack = ViewStack::new(Screen::PresetList(PresetListScreen::new(&ctx)));
        let screen = detail(&ctx);
        stack.dispatch(Message::Push(Box::new(screen)), &mut ctx);
        assert_eq!(stack.depth(), 2);

        // `q` pops the detail screen; the list underneath survives
        stack.dispatch(press(KeyCode::Char('q')), &mut ctx);
        assert_eq!(stack.depth(), 1);
        assert!(stack.is_running());
    }

    #[test]
    fn test_refresh_after_pop_keeps_status() {
        let mut ctx = ctx();
        let mut stack = ViewStack::new(Screen::PresetList(PresetListScreen::new(&ctx)));
        let one = detail(&ctx);
        let two = detail(&ctx);
        stack.dispatch(Message::Push(Box::new(one)), &mut ctx);
        stack.dispatch(Message::Push(Box::new(two)), &mut ctx);

        stack.dispatch(Message::Pop, &mut ctx);
        stack.queue.push_back(Message::Pop);
        stack.dispatch(Message::Refresh(Some("Created preset \"Web\"".into())), &mut ctx);

        assert_eq!(stack.depth(), 1);
        match stack.top() {
            Some(Screen::PresetList(list)) => assert_eq!(list.status(), Some("Created preset \"Web\"")),
            other => panic!("unexpected top: {:?}", other.map(Screen::title)),
        }
    }

    #[test]
    fn test_resize_reaches_every_screen_and_late_pushes() {
        let mut ctx = ctx();
        let mut stack = ViewStack::new(detail(&ctx));
        stack.dispatch(Message::Resize(100, 40), &mut ctx);
        assert_eq!(stack.size(), Some((100, 40)));

        let confirm = Screen::Confirm(ConfirmOverwriteScreen::new(".gitignore".into(), vec![]));
        stack.dispatch(Message::Push(Box::new(confirm)), &mut ctx);
        match stack.top() {
            Some(Screen::Confirm(c)) => assert_eq!(c.size(), (100, 40)),
            other => panic!("unexpected top: {:?}", other.map(Screen::title)),
        }
    }

    #[test]
    fn test_finish_records_outcome_and_drops_queue() {
        let mut ctx = ctx();
        let mut stack = ViewStack::new(detail(&ctx));
        stack.queue.push_back(Message::Finish(SessionOutcome::Confirmed(true)));
        stack.queue.push_back(Message::Pop);
        stack.dispatch(Message::Refresh(None), &mut ctx);
        assert!(!stack.is_running());
        assert_eq!(stack.take_outcome(), Some(SessionOutcome::Confirmed(true)));
        assert!(stack.queue.is_empty());
    }
}
