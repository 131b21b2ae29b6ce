//! Presentation state around the session: sidebar visibility and the narrow-terminal breakpoint.
//!
//! Consumes the session's interface signal but never touches channel state.

use cd_base::config::constants::NARROW_BREAKPOINT;

#[derive(Debug, Clone)]
pub struct Viewport {
    width: u16,
    height: u16,
    interface_shown: bool,
    sidebar_open: bool,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height, interface_shown: false, sidebar_open: false }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_BREAKPOINT
    }

    /// Reveal the command input, and the sidebar when there is room for it.
    pub fn show_interface(&mut self) {
        if self.interface_shown {
            return;
        }
        self.interface_shown = true;
        if !self.is_narrow() {
            self.sidebar_open = true;
        }
    }

    pub fn toggle_sidebar(&mut self) -> bool {
        if !self.interface_shown {
            return false;
        }
        self.sidebar_open = !self.sidebar_open;
        true
    }

    pub fn close_sidebar(&mut self) {
        self.sidebar_open = false;
    }

    /// A sidebar pick in a narrow terminal gets the sidebar out of the way.
    pub fn channel_selected(&mut self) {
        if self.is_narrow() {
            self.sidebar_open = false;
        }
    }

    /// Crossing the breakpoint: going narrow hides the sidebar, going wide docks it again once revealed.
    pub fn resize(&mut self, width: u16, height: u16) {
        let was_narrow = self.is_narrow();
        self.width = width;
        self.height = height;
        match (was_narrow, self.is_narrow()) {
            (false, true) => self.sidebar_open = false,
            (true, false) => self.sidebar_open = self.interface_shown,
            _ => {}
        }
    }

    pub fn interface_shown(&self) -> bool {
        self.interface_shown
    }

    pub fn input_visible(&self) -> bool {
        self.interface_shown
    }

    pub fn sidebar_visible(&self) -> bool {
        self.interface_shown && self.sidebar_open
    }

    /// Narrow terminals draw the sidebar over the conversation instead of beside it.
    pub fn sidebar_overlays(&self) -> bool {
        self.is_narrow()
    }
}
