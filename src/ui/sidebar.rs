use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};

use cd_base::config::constants::CHANNEL_LIST_START_ROW;

use crate::app::state::State;
use super::{helpers::{padding, truncate_string}, theme};

const SIDEBAR_HELP: [&str; 4] = ["Ctrl+B  sidebar", "Ctrl+N/P  channels", "Alt+←/→  history", "Ctrl+Q  quit"];

pub fn render_sidebar(frame: &mut Frame, state: &mut State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_SIDEBAR);
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(base_style), area);
    state.hits.sidebar = Some(area);

    let sidebar_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),                               // Channel list
            Constraint::Length(SIDEBAR_HELP.len() as u16),    // Key hints
        ])
        .split(area);
    let list_area = sidebar_layout[0];

    let mut lines: Vec<Line> = vec![
        Line::from(vec![Span::styled("  CHANNELS", Style::default().fg(theme::TEXT_MUTED).bold())]),
        Line::from(""),
    ];

    let width = area.width as usize;
    let current = state.session.current().clone();
    for (i, channel) in state.session.channels().iter().enumerate() {
        let active = *channel == current;
        let label = truncate_string(&format!("  # {}", channel), width.saturating_sub(1));
        let style = if active {
            Style::default().fg(theme::TEXT).bg(theme::BG_ELEVATED).bold()
        } else {
            Style::default().fg(theme::TEXT_SECONDARY).bg(theme::BG_SIDEBAR)
        };
        let fill = padding(area.width, label.chars().count());
        lines.push(Line::from(vec![Span::styled(label, style), Span::styled(fill, style)]));

        let row = list_area.y + CHANNEL_LIST_START_ROW + i as u16;
        if row < list_area.bottom() {
            state.hits.channel_rows.push((Rect::new(area.x, row, area.width, 1), i));
        }
    }
    frame.render_widget(Paragraph::new(lines).style(base_style), list_area);

    let hints: Vec<Line> = SIDEBAR_HELP
        .iter()
        .map(|h| Line::from(Span::styled(format!("  {}", h), Style::default().fg(theme::TEXT_MUTED))))
        .collect();
    frame.render_widget(Paragraph::new(hints).style(base_style), sidebar_layout[1]);
}
