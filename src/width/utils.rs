use unicode_width::UnicodeWidthStr;

use crate::escape::strip;

/// Visible width of text that contains no escape sequences.
///
/// Implementations must be monotonic: appending text never shrinks the width.
pub trait WidthOracle {
    fn measured_width(&self, text: &str) -> usize;
}

/// Default oracle backed by the `unicode-width` tables (wide glyphs count 2).
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeWidthOracle;

impl WidthOracle for UnicodeWidthOracle {
    fn measured_width(&self, text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }
}

impl<W: WidthOracle + ?Sized> WidthOracle for &W {
    fn measured_width(&self, text: &str) -> usize {
        (**self).measured_width(text)
    }
}

/// Width of a possibly escaped line, stripped with the engine's own scanner.
pub fn measure<W: WidthOracle + ?Sized>(oracle: &W, line: &str) -> usize {
    oracle.measured_width(&strip(line))
}

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    measure(&UnicodeWidthOracle, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_cost_no_columns() {
        assert_eq!(display_width("\x1b[31mabc\x1b[0m"), 3);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn wide_glyphs_count_double() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width("\x1b[1m日\x1b[0ma"), 3);
        assert_eq!(display_width("┌─┐"), 3);
    }

    #[test]
    fn width_differs_from_bytes_and_chars() {
        let line = "\x1b[32mé日\x1b[0m";
        assert_eq!(display_width(line), 3);
        assert_eq!(strip(line).chars().count(), 2);
        assert_ne!(line.len(), 3);
    }
}
