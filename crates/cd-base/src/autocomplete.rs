//! Slash-command autocomplete for the command input.
//!
//! Recomputed on every keystroke from the full input text. Owned by the app next to the input
//! line; the session never sees it.

use crate::command::{CommandSpec, CommandTable};

/// Maximum number of matches shown at once in the dropdown.
pub const AUTOCOMPLETE_MAX_VISIBLE: usize = 8;

/// State for the `/`-triggered suggestion list.
#[derive(Debug, Clone, Default)]
pub struct AutocompleteState {
    /// Text typed after `/`, lowercased.
    query: String,
    /// Matching commands in table order.
    matches: Vec<CommandSpec>,
    /// Highlighted match; `None` while hidden.
    selected: Option<usize>,
    /// First visible row when there are more matches than fit.
    scroll_offset: usize,
    /// Rows the dropdown can actually draw; `None` means the full `AUTOCOMPLETE_MAX_VISIBLE`.
    window: Option<usize>,
}

impl AutocompleteState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refilter against the current input. Hidden unless it starts with `/` and something matches.
    pub fn update(&mut self, input: &str, commands: &CommandTable) {
        let Some(rest) = input.strip_prefix('/') else {
            self.close();
            return;
        };
        let matches: Vec<CommandSpec> = commands.matching_prefix(rest).into_iter().cloned().collect();
        self.query = rest.to_lowercase();
        if matches.is_empty() {
            self.close();
            return;
        }
        if matches != self.matches || self.selected.is_none() {
            self.selected = Some(0);
            self.scroll_offset = 0;
        }
        self.matches = matches;
    }

    /// Hide the list without touching the input.
    pub fn close(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.selected = None;
        self.scroll_offset = 0;
    }

    pub fn is_open(&self) -> bool {
        !self.matches.is_empty()
    }

    /// Move selection down, stopping at the last match.
    pub fn select_next(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let next = match self.selected {
            Some(i) => (i + 1).min(self.matches.len() - 1),
            None => 0,
        };
        self.selected = Some(next);
        self.keep_selection_visible();
    }

    /// Move selection up, stopping at the first match.
    pub fn select_prev(&mut self) {
        if self.matches.is_empty() {
            return;
        }
        let prev = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.selected = Some(prev);
        self.keep_selection_visible();
    }

    /// Shrink (or restore) the visible window to the rows the dropdown has room for.
    pub fn set_window(&mut self, rows: usize) {
        self.window = Some(rows.clamp(1, AUTOCOMPLETE_MAX_VISIBLE));
        self.keep_selection_visible();
    }

    /// Rows shown at once.
    pub fn window(&self) -> usize {
        self.window.unwrap_or(AUTOCOMPLETE_MAX_VISIBLE)
    }

    fn keep_selection_visible(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        let window = self.window();
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        } else if selected >= self.scroll_offset + window {
            self.scroll_offset = selected + 1 - window;
        }
    }

    /// Highlight a specific row (mouse hover/click). Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.matches.len() {
            self.selected = Some(index);
        }
    }

    /// Take the highlighted command as input text (`/name`) and close the list.
    pub fn commit(&mut self) -> Option<String> {
        let name = self.selected_match()?.name.clone();
        self.close();
        Some(format!("/{name}"))
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_match(&self) -> Option<&CommandSpec> {
        self.selected.and_then(|i| self.matches.get(i))
    }

    pub fn matches(&self) -> &[CommandSpec] {
        &self.matches
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// The visible window of matches for rendering.
    pub fn visible_matches(&self) -> &[CommandSpec] {
        let end = (self.scroll_offset + self.window()).min(self.matches.len());
        &self.matches[self.scroll_offset..end]
    }
}
