use cd_base::session::SwitchOrigin;

use super::state::State;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    InputChar(char),
    PasteText(String),
    InputBackspace,
    InputDelete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    InputSubmit,
    AutocompleteNext,
    AutocompletePrev,
    /// Put the highlighted command into the input without submitting
    AutocompleteAccept,
    AutocompleteClose,
    /// Mouse pick of a suggestion row (index into the full match list)
    AutocompleteClick(usize),
    SelectChannel(usize),
    NextChannel,
    PrevChannel,
    ToggleSidebar,
    CloseSidebar,
    HistoryBack,
    HistoryForward,
    ScrollUp(u16),
    ScrollDown(u16),
    Resize(u16, u16),
}

pub fn apply_action(state: &mut State, action: Action) {
    let input_visible = state.viewport.input_visible();
    match action {
        Action::None => return,
        Action::InputChar(_)
        | Action::PasteText(_)
        | Action::InputBackspace
        | Action::InputDelete
        | Action::InputSubmit
            if !input_visible =>
        {
            return;
        }
        Action::InputChar(c) => {
            state.input.insert_char(c);
            state.refresh_autocomplete();
        }
        Action::PasteText(text) => {
            state.input.insert_str(&text);
            state.refresh_autocomplete();
        }
        Action::InputBackspace => {
            if state.input.backspace() {
                state.refresh_autocomplete();
            }
        }
        Action::InputDelete => {
            if state.input.delete() {
                state.refresh_autocomplete();
            }
        }
        Action::CursorLeft => state.input.move_left(),
        Action::CursorRight => state.input.move_right(),
        Action::CursorHome => state.input.home(),
        Action::CursorEnd => state.input.end(),
        Action::InputSubmit => {
            let text = state.input.take();
            state.autocomplete.close();
            state.session.submit(&text);
        }
        Action::AutocompleteNext => state.autocomplete.select_next(),
        Action::AutocompletePrev => state.autocomplete.select_prev(),
        Action::AutocompleteAccept => accept_suggestion(state),
        Action::AutocompleteClose => state.autocomplete.close(),
        Action::AutocompleteClick(index) => {
            state.autocomplete.select(index);
            accept_suggestion(state);
        }
        Action::SelectChannel(index) => select_channel(state, index),
        Action::NextChannel => step_channel(state, true),
        Action::PrevChannel => step_channel(state, false),
        Action::ToggleSidebar => {
            state.viewport.toggle_sidebar();
        }
        Action::CloseSidebar => state.viewport.close_sidebar(),
        Action::HistoryBack => {
            state.session.back();
        }
        Action::HistoryForward => {
            state.session.forward();
        }
        Action::ScrollUp(lines) => state.scroll_back = state.scroll_back.saturating_add(lines),
        Action::ScrollDown(lines) => state.scroll_back = state.scroll_back.saturating_sub(lines),
        Action::Resize(width, height) => state.viewport.resize(width, height),
    }
    state.sync_session();
    state.dirty = true;
}

fn accept_suggestion(state: &mut State) {
    if let Some(text) = state.autocomplete.commit() {
        state.input.set(text);
    }
}

/// Ctrl+N / Ctrl+P: neighbouring sidebar channel, wrapping at both ends.
fn step_channel(state: &mut State, forward: bool) {
    let count = state.session.channels().len();
    if !state.viewport.interface_shown() || count == 0 {
        return;
    }
    let current = state.session.channels().iter().position(|c| c == state.session.current());
    let index = match current {
        Some(i) if forward => (i + 1) % count,
        Some(i) => (i + count - 1) % count,
        None => 0,
    };
    select_channel(state, index);
}

fn select_channel(state: &mut State, index: usize) {
    state.autocomplete.close();
    let Some(channel) = state.session.channels().get(index).cloned() else {
        return;
    };
    state.session.switch_to(&channel, SwitchOrigin::User);
    state.viewport.channel_selected();
}
