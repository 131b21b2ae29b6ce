use unicode_width::UnicodeWidthStr;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        s.to_string()
    } else {
        let mut result = String::new();
        let mut width = 0;
        for c in s.chars() {
            let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if width + cw + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            width += cw;
        }
        result
    }
}

/// Spaces needed after `used` columns to fill `width`.
pub fn padding(width: u16, used: usize) -> String {
    " ".repeat((width as usize).saturating_sub(used))
}
