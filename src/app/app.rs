use std::io;
use std::time::Duration;

use crossterm::event;
use ratatui::prelude::*;
use tracing::info;

use cd_base::config::constants::IDLE_POLL_MS;

use super::actions::apply_action;
use super::events::handle_event;
use super::state::State;
use crate::ui;

pub struct App {
    pub state: State,
}

impl App {
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        self.state.sync_session();

        loop {
            // === INPUT FIRST ===
            if event::poll(self.poll_timeout())? {
                let evt = event::read()?;
                let Some(action) = handle_event(&evt, &self.state) else {
                    info!(channel = %self.state.session.current(), "quit");
                    break;
                };
                apply_action(&mut self.state, action);
            }

            // === SCHEDULED OPERATIONS ===
            self.state.tick();

            if self.state.dirty {
                terminal.draw(|frame| ui::render(frame, &mut self.state))?;
                self.state.dirty = false;
            }
        }

        Ok(())
    }

    /// Sleep until the next scheduled change, or the idle interval when nothing is pending.
    fn poll_timeout(&self) -> Duration {
        let now = self.state.session.now_ms();
        let wait = match self.state.session.next_deadline() {
            Some(deadline) => deadline.saturating_sub(now).min(IDLE_POLL_MS),
            None => IDLE_POLL_MS,
        };
        Duration::from_millis(wait)
    }
}
