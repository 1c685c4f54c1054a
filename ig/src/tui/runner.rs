//! Session loop: draw the top screen, read one event, drain the queue

use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, info};

use super::context::SessionContext;
use super::events::{Event, EventSource};
use super::stack::{Message, SessionOutcome, ViewStack};

/// Drives a [`ViewStack`] against a terminal and an input source
pub struct SessionRunner<B: Backend, E: EventSource> {
    terminal: Terminal<B>,
    events: E,
}

impl<B, E> SessionRunner<B, E>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    E: EventSource,
{
    pub fn new(terminal: Terminal<B>, events: E) -> Self {
        Self { terminal, events }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Run until the stack terminates
    ///
    /// Returns the outcome recorded by `Finish`, `None` when the last screen
    /// popped itself, and `Cancelled` if the input source runs dry first.
    pub fn run(&mut self, stack: &mut ViewStack, ctx: &mut SessionContext) -> Result<Option<SessionOutcome>> {
        info!(depth = stack.depth(), "SessionRunner::run: session started");
        let size = self.terminal.size()?;
        stack.dispatch(Message::Resize(size.width, size.height), ctx);

        while stack.is_running() {
            self.terminal.draw(|frame| {
                if let Some(top) = stack.top() {
                    top.render(frame, ctx);
                }
            })?;

            match self.events.next_event()? {
                Some(Event::Key(key)) => stack.dispatch(Message::Key(key), ctx),
                Some(Event::Resize(width, height)) => stack.dispatch(Message::Resize(width, height), ctx),
                None => {
                    debug!("SessionRunner::run: input exhausted");
                    return Ok(Some(SessionOutcome::Cancelled));
                }
            }
        }

        let outcome = stack.take_outcome();
        info!(?outcome, "SessionRunner::run: session ended");
        Ok(outcome)
    }
}
