use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use cd_base::config::constants::{SCROLL_LINE_AMOUNT, SCROLL_PAGE_AMOUNT};

use super::actions::Action;
use super::mouse::handle_mouse;
use super::state::State;

/// Map a terminal event to an action. `None` means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(key, state),
        // Bracketed paste: one line only, so newlines become spaces
        Event::Paste(text) => Some(Action::PasteText(text.replace("\r\n", " ").replace(['\r', '\n'], " "))),
        Event::Mouse(mouse) => Some(handle_mouse(mouse, state)),
        Event::Resize(width, height) => Some(Action::Resize(*width, *height)),
        _ => Some(Action::None),
    }
}

fn handle_key(key: &KeyEvent, state: &State) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return Some(Action::None);
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    // Global Ctrl shortcuts (always handled first)
    if ctrl {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => None,
            KeyCode::Char('b') => Some(Action::ToggleSidebar),
            KeyCode::Char('n') => Some(Action::NextChannel),
            KeyCode::Char('p') => Some(Action::PrevChannel),
            _ => Some(Action::None),
        };
    }

    if alt {
        return Some(match key.code {
            KeyCode::Left => Action::HistoryBack,
            KeyCode::Right => Action::HistoryForward,
            _ => Action::None,
        });
    }

    // Open suggestion list owns navigation keys
    if state.autocomplete.is_open() {
        match key.code {
            KeyCode::Up => return Some(Action::AutocompletePrev),
            KeyCode::Down => return Some(Action::AutocompleteNext),
            KeyCode::Enter | KeyCode::Tab => return Some(Action::AutocompleteAccept),
            KeyCode::Esc => return Some(Action::AutocompleteClose),
            _ => {}
        }
    }

    let action = match key.code {
        KeyCode::Esc if state.viewport.sidebar_overlays() && state.viewport.sidebar_visible() => Action::CloseSidebar,
        KeyCode::Enter => Action::InputSubmit,
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Delete => Action::InputDelete,
        KeyCode::Left => Action::CursorLeft,
        KeyCode::Right => Action::CursorRight,
        KeyCode::Home => Action::CursorHome,
        KeyCode::End => Action::CursorEnd,
        KeyCode::Up => Action::ScrollUp(SCROLL_LINE_AMOUNT),
        KeyCode::Down => Action::ScrollDown(SCROLL_LINE_AMOUNT),
        KeyCode::PageUp => Action::ScrollUp(SCROLL_PAGE_AMOUNT),
        KeyCode::PageDown => Action::ScrollDown(SCROLL_PAGE_AMOUNT),
        KeyCode::Char(c) => Action::InputChar(c),
        _ => Action::None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::actions::apply_action;
    use crate::app::test_support::{started_state, type_text};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn ctrl_q_and_ctrl_c_quit() {
        let (state, _clock) = started_state("#about", 120);
        assert_eq!(handle_event(&ctrl('q'), &state), None);
        assert_eq!(handle_event(&ctrl('c'), &state), None);
        assert_eq!(handle_event(&ctrl('b'), &state), Some(Action::ToggleSidebar));
    }

    #[test]
    fn arrows_drive_open_suggestions() {
        let (mut state, _clock) = started_state("#about", 120);
        assert_eq!(handle_event(&key(KeyCode::Down), &state), Some(Action::ScrollDown(SCROLL_LINE_AMOUNT)));
        type_text(&mut state, "/");
        assert_eq!(handle_event(&key(KeyCode::Down), &state), Some(Action::AutocompleteNext));
        assert_eq!(handle_event(&key(KeyCode::Up), &state), Some(Action::AutocompletePrev));
        assert_eq!(handle_event(&key(KeyCode::Tab), &state), Some(Action::AutocompleteAccept));
        assert_eq!(handle_event(&key(KeyCode::Enter), &state), Some(Action::AutocompleteAccept));
        assert_eq!(handle_event(&key(KeyCode::Esc), &state), Some(Action::AutocompleteClose));
    }

    #[test]
    fn enter_submits_when_suggestions_closed() {
        let (mut state, _clock) = started_state("#about", 120);
        type_text(&mut state, "/zzz");
        assert_eq!(handle_event(&key(KeyCode::Enter), &state), Some(Action::InputSubmit));
    }

    #[test]
    fn alt_arrows_walk_history() {
        let (state, _clock) = started_state("#about", 120);
        let back = Event::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT));
        assert_eq!(handle_event(&back, &state), Some(Action::HistoryBack));
    }

    #[test]
    fn paste_is_flattened_to_one_line() {
        let (state, _clock) = started_state("#about", 120);
        let paste = Event::Paste("/feat\r\nures".to_string());
        assert_eq!(handle_event(&paste, &state), Some(Action::PasteText("/feat ures".to_string())));
    }

    #[test]
    fn escape_closes_overlay_sidebar() {
        let (mut state, _clock) = started_state("#about", 80);
        apply_action(&mut state, Action::ToggleSidebar);
        assert_eq!(handle_event(&key(KeyCode::Esc), &state), Some(Action::CloseSidebar));
    }
}
