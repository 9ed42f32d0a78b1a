//! Shared unicode-width-aware column utilities.
//!
//! Used by the feature grid, the sidebar and the text outline. Single
//! call site for width measurement: labels come in any language, and
//! accented or CJK text must still line up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
///
/// Thin wrapper around `UnicodeWidthStr::width()`. CJK = 2, ASCII = 1,
/// combining marks = 0.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Left-align `content` in `target_width` columns (no truncation).
pub fn pad_right(content: &str, target_width: usize) -> String {
    let pad = target_width.saturating_sub(display_width(content));
    format!("{}{}", content, " ".repeat(pad))
}

/// Cut `content` to at most `max_width` columns, ending in `…` when cut.
pub fn truncate(content: &str, max_width: usize) -> String {
    if display_width(content) <= max_width {
        return content.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let budget = max_width - 1; // room for the ellipsis
    let mut out = String::new();
    let mut used = 0;
    for c in content.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Build a horizontal rule of `width` columns, `─` by default.
pub fn rule(width: usize) -> String {
    "─".repeat(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ascii() {
        assert_eq!(display_width("hello"), 5);
    }

    #[test]
    fn display_width_accented() {
        assert_eq!(display_width("Configuração"), 12);
    }

    #[test]
    fn display_width_cjk() {
        assert_eq!(display_width("漢字"), 4);
    }

    #[test]
    fn pad_right_ascii() {
        assert_eq!(pad_right("hi", 5), "hi   ");
    }

    #[test]
    fn pad_right_wide() {
        // "漢" is 2 cols wide, target 5 → 3 spaces of padding
        assert_eq!(pad_right("漢", 5), "漢   ");
    }

    #[test]
    fn pad_right_never_truncates() {
        assert_eq!(pad_right("abcdef", 3), "abcdef");
    }

    #[test]
    fn truncate_short_is_unchanged() {
        assert_eq!(truncate("Date", 10), "Date");
        assert_eq!(truncate("Date", 4), "Date");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Multiplication", 6), "Multi…");
        assert_eq!(display_width(&truncate("漢字漢字", 5)), 5);
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn rule_width() {
        assert_eq!(rule(3), "───");
    }
}
