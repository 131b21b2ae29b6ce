use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};

use crate::app::state::State;
use super::{helpers::{padding, truncate_string}, theme};

/// Render the suggestion dropdown directly above the input, inside `bounds`.
pub fn render_autocomplete(frame: &mut Frame, state: &mut State, input: Rect, bounds: Rect) {
    // Rows left for items once the footer is placed; navigation scrolls within exactly these
    let room = input.y.saturating_sub(bounds.y).saturating_sub(1);
    if room == 0 {
        return;
    }
    state.autocomplete.set_window(room as usize);

    let ac = &state.autocomplete;
    let visible_count = ac.visible_matches().len() as u16;
    if visible_count == 0 {
        return;
    }

    // Height: one line per visible item + one line for a hint footer
    let height = visible_count + 1;
    let width = input.width;
    let popup_area = Rect::new(input.x, input.y - height, width, height);

    frame.render_widget(Clear, popup_area);
    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_SIDEBAR)), popup_area);

    // Split: items on top, footer on bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(popup_area);

    let name_width = ac.visible_matches().iter().map(|c| c.name.len() + 1).max().unwrap_or(0);
    let mut item_lines: Vec<Line> = Vec::new();
    for (i, command) in ac.visible_matches().iter().enumerate() {
        let is_selected = ac.selected() == Some(ac.scroll_offset() + i);
        let (prefix, bg, fg) = if is_selected {
            (" > ", theme::BG_ELEVATED, theme::TEXT)
        } else {
            ("   ", theme::BG_SIDEBAR, theme::TEXT_SECONDARY)
        };

        let name = format!("/{:<name_width$}", command.name);
        let used = prefix.len() + name.len() + 2;
        let description = truncate_string(&command.description, (width as usize).saturating_sub(used));
        let fill = padding(width, used + description.chars().count());

        item_lines.push(Line::from(vec![
            Span::styled(prefix, Style::default().fg(theme::ACCENT).bg(bg)),
            Span::styled(name, Style::default().fg(fg).bg(bg).bold()),
            Span::styled("  ", Style::default().bg(bg)),
            Span::styled(description, Style::default().fg(theme::TEXT_MUTED).bg(bg)),
            Span::styled(fill, Style::default().bg(bg)),
        ]));
    }

    let items_area = chunks[0];
    frame.render_widget(Paragraph::new(item_lines).style(Style::default().bg(theme::BG_SIDEBAR)), items_area);
    state.hits.dropdown = Some(items_area);

    // Footer hint
    let ac = &state.autocomplete;
    let hint = format!(
        " ↑↓ navigate  Tab/Enter select  Esc cancel  ({}/{})",
        ac.selected().map_or(0, |i| i + 1),
        ac.matches().len()
    );
    let footer = Paragraph::new(Line::from(vec![Span::styled(
        hint,
        Style::default().fg(theme::TEXT_MUTED).bg(theme::BG_SIDEBAR),
    )]));
    frame.render_widget(footer, chunks[1]);
}
