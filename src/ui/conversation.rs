use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use cd_base::channel::MessageKind;
use cd_base::config::{CHANNELS, CONFIG};

use crate::app::state::State;
use super::{helpers::truncate_string, markup, theme};

/// Channel label and topic above the conversation.
pub fn render_header(frame: &mut Frame, state: &State, area: Rect) {
    let channel = state.session.current();
    let topic = CHANNELS.topic(channel).unwrap_or_default();
    let name = channel.fragment();
    let room = (area.width as usize).saturating_sub(name.len() + 5);

    let mut spans = vec![Span::styled(format!(" {} ", name), Style::default().fg(theme::TEXT).bold())];
    if !topic.is_empty() {
        spans.push(Span::styled("│ ", Style::default().fg(theme::BORDER)));
        spans.push(Span::styled(truncate_string(topic, room), Style::default().fg(theme::TEXT_MUTED)));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme::BG_BASE))
        .style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

pub fn render_conversation(frame: &mut Frame, state: &mut State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_SURFACE).fg(theme::TEXT);
    state.hits.conversation = Some(area);

    let width = area.width.saturating_sub(2) as usize;
    let mut text: Vec<Line<'static>> = Vec::new();

    for msg in state.session.transcript() {
        let author_color = match msg.kind {
            MessageKind::Normal => theme::AUTHOR,
            MessageKind::System => theme::SYSTEM,
        };
        text.push(Line::from(vec![
            Span::styled(msg.author.clone(), Style::default().fg(author_color).bold()),
            Span::styled(format!("  {}", msg.timestamp), Style::default().fg(theme::TEXT_MUTED)),
        ]));
        for line in markup::markup_lines(&msg.body, base_style) {
            text.extend(markup::wrap_line(line, width));
        }
        text.push(Line::from(""));
    }

    // Bottom-anchored: scroll_back counts rows up from the newest line
    let visible = area.height as usize;
    let max_scroll = text.len().saturating_sub(visible);
    let scroll_back = (state.scroll_back as usize).min(max_scroll);
    state.scroll_back = scroll_back as u16;
    let start = max_scroll - scroll_back;
    let shown: Vec<Line> = text.into_iter().skip(start).take(visible).collect();

    let inner = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), area.height);
    frame.render_widget(Block::default().style(base_style), area);
    frame.render_widget(Paragraph::new(shown).style(base_style), inner);
}

/// "… is typing" row under the conversation. Blank when the indicator is hidden.
pub fn render_typing(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_SURFACE);
    let line = if state.session.is_typing() {
        Line::from(vec![
            Span::styled(" ● ● ● ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(format!("{}...", CONFIG.ui.typing_label), Style::default().fg(theme::TEXT_MUTED).italic()),
        ])
    } else {
        Line::from("")
    };
    frame.render_widget(Paragraph::new(line).style(base_style), area);
}
