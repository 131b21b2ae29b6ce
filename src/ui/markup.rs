//! Message bodies are a small HTML-like markup subset. This turns them into styled ratatui lines.
//!
//! Known: `<strong>`, `<em>`, `<code>`, `<br>`, `<span class='discord-command'>`, `<a href='…'>`.
//! Any other tag is dropped and its text kept.

use std::sync::LazyLock;

use ratatui::prelude::*;
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme;

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)([^>]*?)(/?)>").expect("invalid RE_TAG regex"));
static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"class\s*=\s*['"]([^'"]*)['"]"#).expect("invalid RE_CLASS regex"));

const COMMAND_CLASS: &str = "discord-command";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Strong,
    Emphasis,
    Code,
    Command,
    Link,
    Other,
}

fn mark_for(tag: &str, attrs: &str) -> Mark {
    match tag {
        "strong" | "b" => Mark::Strong,
        "em" | "i" => Mark::Emphasis,
        "code" => Mark::Code,
        "a" => Mark::Link,
        "span" if RE_CLASS
            .captures(attrs)
            .and_then(|c| c.get(1))
            .is_some_and(|classes| classes.as_str().split_whitespace().any(|c| c == COMMAND_CLASS)) =>
        {
            Mark::Command
        }
        _ => Mark::Other,
    }
}

fn style_for(base: Style, stack: &[(String, Mark)]) -> Style {
    stack.iter().fold(base, |style, (_, mark)| match mark {
        Mark::Strong => style.add_modifier(Modifier::BOLD),
        Mark::Emphasis => style.add_modifier(Modifier::ITALIC),
        Mark::Code => style.fg(theme::CODE).bg(theme::BG_ELEVATED),
        Mark::Command => style.fg(theme::COMMAND).bg(theme::ACCENT_DIM).add_modifier(Modifier::BOLD),
        Mark::Link => style.fg(theme::LINK).add_modifier(Modifier::UNDERLINED),
        Mark::Other => style,
    })
}

/// Parse a message body into logical lines (split at `<br>`), before wrapping.
pub fn markup_lines(body: &str, base: Style) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];
    let mut stack: Vec<(String, Mark)> = Vec::new();
    let mut last = 0;

    for caps in RE_TAG.captures_iter(body) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut lines, &body[last..whole.start()], style_for(base, &stack));
        last = whole.end();

        let closing = !caps[1].is_empty();
        let tag = caps[2].to_ascii_lowercase();
        if tag == "br" {
            lines.push(Line::default());
            continue;
        }
        if closing {
            if let Some(pos) = stack.iter().rposition(|(open, _)| *open == tag) {
                stack.truncate(pos);
            }
            continue;
        }
        if caps[4].is_empty() {
            let mark = mark_for(&tag, &caps[3]);
            stack.push((tag, mark));
        }
    }
    push_text(&mut lines, &body[last..], style_for(base, &stack));
    lines
}

/// Body with tags removed, `<br>` as newlines.
pub fn strip_markup(body: &str) -> String {
    markup_lines(body, Style::default())
        .iter()
        .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn push_text(lines: &mut Vec<Line<'static>>, raw: &str, style: Style) {
    let text = collapse_whitespace(&decode_entities(raw));
    if text.is_empty() {
        return;
    }
    let at_line_start = lines.last().is_none_or(|l| l.spans.is_empty());
    let text = if at_line_start { text.trim_start().to_string() } else { text };
    if text.is_empty() {
        return;
    }
    if let Some(line) = lines.last_mut() {
        line.push_span(Span::styled(text, style));
    }
}

fn decode_entities(raw: &str) -> String {
    raw.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// HTML whitespace: any run becomes one space, edges kept so adjacent spans stay separated.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Greedy word wrap of one styled line to `width` columns. Words longer than a row are split.
pub fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![line];
    }
    let mut out = vec![Line::default()];
    let mut col = 0;

    for span in line.spans {
        let style = span.style;
        for word in split_words(&span.content) {
            let w = word.width();
            let is_space = word.starts_with(char::is_whitespace);
            if col > 0 && col + w > width {
                out.push(Line::default());
                col = 0;
                if is_space {
                    continue;
                }
            }
            if is_space && col == 0 && out.len() > 1 {
                continue;
            }
            if w > width {
                for ch in word.chars() {
                    let cw = ch.width().unwrap_or(0);
                    if col > 0 && col + cw > width {
                        out.push(Line::default());
                        col = 0;
                    }
                    push_span(&mut out, ch.to_string(), style);
                    col += cw;
                }
                continue;
            }
            push_span(&mut out, word.to_string(), style);
            col += w;
        }
    }
    for row in &mut out {
        while row.spans.last().is_some_and(|s| s.content.trim().is_empty()) {
            row.spans.pop();
        }
    }
    out
}

fn push_span(out: &mut [Line<'static>], text: String, style: Style) {
    if let Some(line) = out.last_mut() {
        line.push_span(Span::styled(text, style));
    }
}

/// Alternating runs of whitespace and non-whitespace.
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut prev_space = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if prev_space.is_some_and(|p| p != space) {
            words.push(&text[start..i]);
            start = i;
        }
        prev_space = Some(space);
    }
    if start < text.len() {
        words.push(&text[start..]);
    }
    words
}
