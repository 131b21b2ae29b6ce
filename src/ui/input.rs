use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use cd_base::config::CONFIG;

use crate::app::state::State;
use super::{helpers::padding, theme};

/// Command bar. Until the interface is revealed only a loading hint is shown.
pub fn render_input(frame: &mut Frame, state: &mut State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_SURFACE);

    if !state.viewport.input_visible() {
        let hint = Paragraph::new(Line::from(Span::styled(
            format!("  {}", CONFIG.ui.hidden_input_hint),
            Style::default().fg(theme::TEXT_MUTED).italic(),
        )))
        .style(base_style);
        frame.render_widget(hint, area);
        return;
    }
    state.hits.input = Some(area);

    let border = if state.autocomplete.is_open() { theme::BORDER_FOCUS } else { theme::BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme::BG_INPUT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.input.is_empty() {
        let placeholder = Span::styled(CONFIG.ui.input_placeholder.as_str(), Style::default().fg(theme::TEXT_MUTED));
        frame.render_widget(Paragraph::new(Line::from(placeholder)), inner);
        frame.set_cursor_position(Position::new(inner.x, inner.y));
        return;
    }

    // Keep the cursor in view on long input
    let cursor_col = state.input.before_cursor().width() as u16;
    let offset = cursor_col.saturating_sub(inner.width.saturating_sub(1));
    let text = Paragraph::new(state.input.text()).style(Style::default().fg(theme::TEXT)).scroll((0, offset));
    frame.render_widget(text, inner);
    frame.set_cursor_position(Position::new(inner.x + cursor_col - offset, inner.y));
}

pub fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_BASE).fg(theme::TEXT_MUTED);

    let mut spans = vec![Span::styled(" ", base_style)];

    let fragment = state.session.location().fragment();
    let location = if fragment.is_empty() { "(home)" } else { fragment };
    spans.push(Span::styled(format!(" {} ", location), Style::default().fg(theme::TEXT).bg(theme::ACCENT_DIM).bold()));
    spans.push(Span::styled(" ", base_style));

    if state.session.is_typing() {
        spans.push(Span::styled(" TYPING ", Style::default().fg(theme::BG_BASE).bg(theme::SUCCESS).bold()));
        spans.push(Span::styled(" ", base_style));
    } else if state.session.is_animating() {
        spans.push(Span::styled(" LOADING ", Style::default().fg(theme::BG_BASE).bg(theme::WARNING).bold()));
        spans.push(Span::styled(" ", base_style));
    } else {
        spans.push(Span::styled(" READY ", Style::default().fg(theme::BG_BASE).bg(theme::TEXT_MUTED).bold()));
        spans.push(Span::styled(" ", base_style));
    }

    let right_info = format!("{} messages │ {} ", state.session.transcript().len(), CONFIG.ui.title);
    let left_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let fill = padding(area.width, left_width + right_info.width());

    spans.push(Span::styled(fill, base_style));
    spans.push(Span::styled(right_info, base_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
