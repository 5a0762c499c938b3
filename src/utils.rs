use unicode_width::UnicodeWidthStr;

pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Uppercase the first non-whitespace character, leaving the rest untouched.
pub fn capitalize_first(s: &str) -> String {
    let Some((idx, first)) = s.char_indices().find(|(_, c)| !c.is_whitespace()) else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..idx]);
    out.extend(first.to_uppercase());
    out.push_str(&s[idx + first.len_utf8()..]);
    out
}

/// Display column of a byte cursor inside a single-line input.
pub fn cursor_column(text: &str, cursor_position: usize) -> usize {
    let end = cursor_position.min(text.len());
    text.get(..end).map(UnicodeWidthStr::width).unwrap_or(0)
}

/// Byte index of the char boundary before `pos`.
pub fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos.min(text.len())]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

/// Byte index of the char boundary after `pos`.
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    let pos = pos.min(text.len());
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
