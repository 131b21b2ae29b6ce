use ratatui::layout::Rect;
use tracing::debug;

use cd_base::autocomplete::AutocompleteState;
use cd_base::session::{ChannelSession, SessionEvent};

use super::input::InputLine;
use super::viewport::Viewport;

/// Screen regions recorded by the last render, for mouse hit-testing.
#[derive(Debug, Clone, Default)]
pub struct HitAreas {
    pub sidebar: Option<Rect>,
    /// One row per sidebar channel, with its index in the channel list
    pub channel_rows: Vec<(Rect, usize)>,
    pub conversation: Option<Rect>,
    pub input: Option<Rect>,
    /// Suggestion rows, top to bottom, starting at the autocomplete scroll offset
    pub dropdown: Option<Rect>,
}

/// Everything the event loop mutates between frames.
pub struct State {
    pub session: ChannelSession,
    pub input: InputLine,
    pub autocomplete: AutocompleteState,
    pub viewport: Viewport,
    pub hits: HitAreas,
    /// Lines scrolled up from the bottom of the transcript
    pub scroll_back: u16,
    pub dirty: bool,
}

impl State {
    pub fn new(session: ChannelSession, width: u16, height: u16) -> Self {
        Self {
            session,
            input: InputLine::new(),
            autocomplete: AutocompleteState::new(),
            viewport: Viewport::new(width, height),
            hits: HitAreas::default(),
            scroll_back: 0,
            dirty: true,
        }
    }

    /// Fire due session operations and mark the frame dirty if anything could have changed.
    pub fn tick(&mut self) {
        let due = self.session.next_deadline().is_some_and(|d| d <= self.session.now_ms());
        self.session.tick();
        if due {
            self.dirty = true;
        }
        self.sync_session();
    }

    /// Apply queued session signals to the presentation state.
    pub fn sync_session(&mut self) {
        for event in self.session.drain_events() {
            match event {
                SessionEvent::ShowInterface => self.viewport.show_interface(),
                SessionEvent::ChannelChanged(channel) => {
                    debug!(channel = %channel, "channel changed");
                    self.scroll_back = 0;
                }
                SessionEvent::LocationChanged(fragment) => debug!(%fragment, "location updated"),
            }
            self.dirty = true;
        }
    }

    pub fn refresh_autocomplete(&mut self) {
        self.autocomplete.update(self.input.text(), self.session.commands());
    }
}
