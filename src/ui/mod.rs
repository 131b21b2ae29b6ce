mod autocomplete;
mod conversation;
mod helpers;
mod input;
pub mod markup;
mod sidebar;
mod theme;

use ratatui::{prelude::*, widgets::Block};

use cd_base::config::constants::SIDEBAR_WIDTH;

use crate::app::state::{HitAreas, State};

/// Height of the command bar, borders included
const INPUT_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, state: &mut State) {
    let area = frame.area();
    state.hits = HitAreas::default();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);

    // Main layout: body + footer (no header)
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),     // Body
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    render_body(frame, state, main_layout[0]);
    input::render_status_bar(frame, state, main_layout[1]);
}

fn render_body(frame: &mut Frame, state: &mut State, area: Rect) {
    let sidebar = state.viewport.sidebar_visible();
    let overlay = state.viewport.sidebar_overlays();

    if sidebar && !overlay {
        let body_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(SIDEBAR_WIDTH),  // Sidebar
                Constraint::Min(1),                 // Main content
            ])
            .split(area);
        sidebar::render_sidebar(frame, state, body_layout[0]);
        render_main_content(frame, state, body_layout[1]);
        return;
    }

    render_main_content(frame, state, area);
    if sidebar {
        let drawer = Rect::new(area.x, area.y, SIDEBAR_WIDTH.min(area.width), area.height);
        sidebar::render_sidebar(frame, state, drawer);
    }
}

fn render_main_content(frame: &mut Frame, state: &mut State, area: Rect) {
    let content_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Channel header
            Constraint::Min(1),                // Conversation
            Constraint::Length(1),             // Typing indicator
            Constraint::Length(INPUT_HEIGHT),  // Input area
        ])
        .split(area);

    conversation::render_header(frame, state, content_layout[0]);
    conversation::render_conversation(frame, state, content_layout[1]);
    conversation::render_typing(frame, state, content_layout[2]);
    input::render_input(frame, state, content_layout[3]);

    if state.autocomplete.is_open()
        && let Some(input_area) = state.hits.input
    {
        autocomplete::render_autocomplete(frame, state, input_area, content_layout[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    use crate::app::actions::{Action, apply_action};
    use crate::app::test_support::{started_state, type_text};

    fn draw(state: &mut State, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn deep_link_renders_header_sidebar_and_messages() {
        let (mut state, _clock) = started_state("#about", 120);
        let screen = draw(&mut state, 120, 40);
        assert!(screen.contains("#about"));
        assert!(screen.contains("CHANNELS"));
        assert!(screen.contains("Dungeon Master"));
        assert_eq!(state.hits.channel_rows.len(), state.session.channels().len());
        assert!(state.hits.input.is_some());
    }

    #[test]
    fn input_hidden_before_reveal() {
        let (mut state, _clock) = started_state("", 120);
        let screen = draw(&mut state, 120, 40);
        assert!(!screen.contains("CHANNELS"));
        assert!(state.hits.input.is_none());
        assert!(state.hits.channel_rows.is_empty());
    }

    #[test]
    fn dropdown_lists_matches_above_input() {
        let (mut state, _clock) = started_state("#about", 120);
        type_text(&mut state, "/");
        let screen = draw(&mut state, 120, 40);
        assert!(screen.contains("/how-to-play"));
        assert!(screen.contains("Tab/Enter select"));
        let dropdown = state.hits.dropdown.unwrap();
        let input = state.hits.input.unwrap();
        assert_eq!(dropdown.bottom() + 1, input.y, "footer row sits between items and input");
        assert_eq!(dropdown.height as usize, state.session.commands().len());
    }

    #[test]
    fn features_command_updates_channel_header() {
        let (mut state, _clock) = started_state("#about", 120);
        assert!(draw(&mut state, 120, 40).lines().next().unwrap().contains("#about"));

        type_text(&mut state, "/features");
        apply_action(&mut state, Action::InputSubmit);
        let screen = draw(&mut state, 120, 40);
        let header = screen.lines().next().unwrap();
        assert!(header.contains("#features"), "header row: {header}");
        assert!(!header.contains("#about"));
        assert!(header.contains("Everything the bot can do"));
    }

    #[test]
    fn status_bar_shows_title_and_count() {
        let (mut state, _clock) = started_state("#about", 120);
        let screen = draw(&mut state, 120, 40);
        let status = screen.lines().last().unwrap();
        assert!(status.contains("#about"));
        assert!(status.contains("4 messages"));
        assert!(status.contains("Channel Dungeons"));
    }

    #[test]
    fn short_dropdown_keeps_selection_drawn() {
        let (mut state, _clock) = started_state("#about", 120);
        type_text(&mut state, "/");
        draw(&mut state, 120, 12);
        let rows = state.hits.dropdown.unwrap().height as usize;
        assert!(rows < state.session.commands().len());
        assert_eq!(state.autocomplete.window(), rows);

        for _ in 0..state.session.commands().len() {
            apply_action(&mut state, Action::AutocompleteNext);
        }
        let screen = draw(&mut state, 120, 12);
        assert!(screen.contains(" > /help"));
        assert_eq!(state.hits.dropdown.unwrap().height as usize, rows);
    }

    #[test]
    fn narrow_sidebar_overlays_conversation() {
        let (mut state, _clock) = started_state("#about", 80);
        apply_action(&mut state, Action::ToggleSidebar);
        draw(&mut state, 80, 30);
        let sidebar = state.hits.sidebar.unwrap();
        assert_eq!(sidebar.x, 0);
        assert_eq!(state.hits.conversation.unwrap().x, 0, "conversation keeps the full width underneath");
    }

    #[test]
    fn scroll_back_is_clamped_to_content() {
        let (mut state, _clock) = started_state("#about", 120);
        apply_action(&mut state, Action::ScrollUp(u16::MAX));
        draw(&mut state, 120, 40);
        assert!(state.scroll_back < u16::MAX);
    }
}
