//! Fixed-width column helpers
//!
//! Receipt columns are measured in characters (Unicode scalar values),
//! which is how the printer's font grid lays out UTF-8 text in
//! single-byte-per-glyph code pages.

/// Get the display width of a string in characters
pub fn char_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to at most `max_width` characters
pub fn truncate_chars(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to exactly `width` characters
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_chars(s: &str, width: usize, align_right: bool) -> String {
    let current_width = char_width(s);
    if current_width >= width {
        return truncate_chars(s, width);
    }
    let spaces = " ".repeat(width - current_width);
    if align_right {
        format!("{}{}", spaces, s)
    } else {
        format!("{}{}", s, spaces)
    }
}

/// Right-justify a string in `width` characters without truncating
pub fn justify_right(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_width() {
        assert_eq!(char_width("hello"), 5);
        assert_eq!(char_width("café"), 4);
        assert_eq!(char_width(""), 0);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("café au lait", 4), "café");
        assert_eq!(truncate_chars("hi", 5), "hi");
    }

    #[test]
    fn test_pad_chars() {
        assert_eq!(pad_chars("hi", 5, false), "hi   ");
        assert_eq!(pad_chars("hi", 5, true), "   hi");
        assert_eq!(pad_chars("hello world", 5, false), "hello");
        assert_eq!(pad_chars("", 3, false), "   ");
    }

    #[test]
    fn test_justify_right() {
        assert_eq!(justify_right("1", 4), "   1");
        assert_eq!(justify_right("12345", 4), "12345");
    }
}
