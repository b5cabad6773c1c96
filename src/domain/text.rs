use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn wrap_text(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(s.len() + s.len() / width);
    let mut current_line_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);

        if current_line_width + char_width > width {
            result.push('\n');
            current_line_width = char_width;
        } else {
            current_line_width += char_width;
        }

        result.push(c);
    }

    result
}

/// Cut `s` to at most `width` terminal columns, marking the cut with `…`
pub fn truncate_width(s: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    if s.width() <= width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut used = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        // reserve one column for the ellipsis
        if used + char_width > width - 1 {
            break;
        }
        used += char_width;
        result.push(c);
    }
    result.push('…');
    result
}
