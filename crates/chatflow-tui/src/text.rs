//! Text width, truncation and wrapping.
//!
//! Widths are measured in terminal cells, so wide characters count twice.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual width of a string in terminal cells.
pub fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_width` cells, appending "..." when cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if visual_width(s) <= max_width {
        return s.to_string();
    }

    let target_width = max_width.saturating_sub(3);
    if target_width == 0 {
        return ".".repeat(max_width.min(3));
    }

    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push_str("...");
    result
}

/// Pad `s` with spaces on the left so it ends at `width` cells.
pub fn right_align(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visual_width(s));
    format!("{}{s}", " ".repeat(pad))
}

/// Wrap text to `width` cells, keeping explicit line breaks.
///
/// Empty input yields a single empty line so bubbles never collapse.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(
            textwrap::wrap(paragraph, width)
                .into_iter()
                .map(std::borrow::Cow::into_owned),
        );
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_width() {
        assert_eq!(visual_width("hello"), 5);
        assert_eq!(visual_width(""), 0);
        assert_eq!(visual_width("你好"), 4);
    }

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("Simon", 10), "Simon");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate_to_width("Hello there friend", 10), "Hello t...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_to_width("Hello", 2), "..");
        assert_eq!(truncate_to_width("Hello", 0), "");
    }

    #[test]
    fn test_truncate_wide_chars_on_boundary() {
        // Never split a double-width character.
        let out = truncate_to_width("你好世界你好", 8);
        assert_eq!(out, "你好...");
        assert!(visual_width(&out) <= 8);
    }

    #[test]
    fn test_right_align() {
        assert_eq!(right_align("ab", 5), "   ab");
        assert_eq!(right_align("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_wrap_keeps_line_breaks() {
        let lines = wrap("one two three\nfour", 8);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }
}
