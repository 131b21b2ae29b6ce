/// The single shared "someone is typing" signal.
///
/// Visible exactly when a hide deadline is set, so there is never more than one live timer.
#[derive(Debug, Default)]
pub struct TypingIndicator {
    hide_at_ms: Option<u64>,
    shown_count: u64,
}

impl TypingIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show for `duration_ms`. Showing while visible replaces the deadline instead of stacking.
    pub fn show(&mut self, now_ms: u64, duration_ms: u64) {
        self.hide_at_ms = Some(now_ms.saturating_add(duration_ms));
        self.shown_count += 1;
    }

    /// Returns whether the indicator was visible.
    pub fn hide(&mut self) -> bool {
        self.hide_at_ms.take().is_some()
    }

    /// Hide if the deadline has passed. Returns true when this call hid it.
    pub fn expire(&mut self, now_ms: u64) -> bool {
        match self.hide_at_ms {
            Some(deadline) if deadline <= now_ms => self.hide(),
            _ => false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.hide_at_ms.is_some()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.hide_at_ms
    }

    /// Number of `show` calls so far.
    pub fn shown_count(&self) -> u64 {
        self.shown_count
    }
}
