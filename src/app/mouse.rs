use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

use cd_base::config::constants::SCROLL_LINE_AMOUNT;

use super::actions::Action;
use super::state::State;

/// Handle mouse events using the regions recorded by the last render
pub fn handle_mouse(event: &MouseEvent, state: &State) -> Action {
    let at = Position::new(event.column, event.row);

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_left_click(at, state),
        MouseEventKind::ScrollUp => Action::ScrollUp(SCROLL_LINE_AMOUNT),
        MouseEventKind::ScrollDown => Action::ScrollDown(SCROLL_LINE_AMOUNT),
        _ => Action::None,
    }
}

fn handle_left_click(at: Position, state: &State) -> Action {
    let hits = &state.hits;
    let inside = |rect: Option<Rect>| rect.is_some_and(|r| r.contains(at));

    if state.autocomplete.is_open()
        && let Some(dropdown) = hits.dropdown
        && dropdown.contains(at)
    {
        let row = (at.y - dropdown.y) as usize;
        if row < state.autocomplete.visible_matches().len() {
            return Action::AutocompleteClick(state.autocomplete.scroll_offset() + row);
        }
        return Action::None;
    }

    if let Some((_, index)) = hits.channel_rows.iter().find(|(rect, _)| rect.contains(at)) {
        return Action::SelectChannel(*index);
    }

    // Anywhere outside the input and the dropdown dismisses the suggestions
    if state.autocomplete.is_open() && !inside(hits.input) {
        return Action::AutocompleteClose;
    }

    // Tapping past an overlay sidebar dismisses it
    if state.viewport.sidebar_overlays() && state.viewport.sidebar_visible() && !inside(hits.sidebar) {
        return Action::CloseSidebar;
    }

    Action::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    use crate::app::test_support::{started_state, type_text};

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent { kind: MouseEventKind::Down(MouseButton::Left), column, row, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn click_on_channel_row_selects_it() {
        let (mut state, _clock) = started_state("#about", 120);
        state.hits.channel_rows = vec![(Rect::new(0, 2, 28, 1), 0), (Rect::new(0, 3, 28, 1), 1)];
        assert_eq!(handle_mouse(&click(5, 3), &state), Action::SelectChannel(1));
        assert_eq!(handle_mouse(&click(40, 3), &state), Action::None);
    }

    #[test]
    fn click_outside_input_and_dropdown_closes_suggestions() {
        let (mut state, _clock) = started_state("#about", 120);
        type_text(&mut state, "/");
        state.hits.input = Some(Rect::new(30, 35, 90, 3));
        state.hits.dropdown = Some(Rect::new(30, 27, 90, 8));

        assert_eq!(handle_mouse(&click(50, 36), &state), Action::None, "input keeps it open");
        assert_eq!(handle_mouse(&click(50, 29), &state), Action::AutocompleteClick(2));
        assert_eq!(handle_mouse(&click(50, 10), &state), Action::AutocompleteClose);
    }

    #[test]
    fn click_below_last_suggestion_row_is_ignored() {
        let (mut state, _clock) = started_state("#about", 120);
        type_text(&mut state, "/fe");
        state.hits.dropdown = Some(Rect::new(30, 27, 90, 8));
        assert_eq!(handle_mouse(&click(50, 27), &state), Action::AutocompleteClick(0));
        assert_eq!(handle_mouse(&click(50, 30), &state), Action::None);
    }

    #[test]
    fn wheel_scrolls() {
        let (state, _clock) = started_state("#about", 120);
        let wheel = MouseEvent { kind: MouseEventKind::ScrollUp, column: 0, row: 0, modifiers: KeyModifiers::NONE };
        assert_eq!(handle_mouse(&wheel, &state), Action::ScrollUp(SCROLL_LINE_AMOUNT));
    }
}
