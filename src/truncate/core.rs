use crate::escape::{EscapeScanner, RESET, Span};
use crate::width::{UnicodeWidthOracle, WidthOracle};

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const REGIONAL_INDICATORS: std::ops::RangeInclusive<char> = '\u{1F1E6}'..='\u{1F1FF}';

/// Cut `line` to at most `max_columns` visible columns using the default oracle.
pub fn truncate(line: &str, max_columns: usize) -> String {
    truncate_with(&UnicodeWidthOracle, line, max_columns)
}

/// Cut `line` to at most `max_columns` visible columns.
///
/// Escape runs are copied verbatim wherever they occur, including after the
/// cut point, so a trailing reset survives. Visible text is copied one
/// measured unit at a time: a char together with the zero-width chars that
/// follow it, joined emoji sequences and flag pairs. Each unit is measured as
/// part of everything visible copied so far, so sequences the oracle sizes
/// as a whole (`❤\u{FE0F}` is two columns) are never undercounted. Copying
/// stops at the first unit that does not fit or once the budget is spent; a
/// wide glyph is dropped whole rather than split.
///
/// The result never ends with a sequence left open. A line that already fits
/// and closes its sequences comes back byte-identical.
pub fn truncate_with<W: WidthOracle + ?Sized>(oracle: &W, line: &str, max_columns: usize) -> String {
    let mut scanner = EscapeScanner::new(line);
    let mut out = String::with_capacity(line.len() + RESET.len());
    let mut visible = String::new();
    let mut used = 0;
    let mut cut = false;

    for span in scanner.by_ref() {
        match span {
            Span::Escape(run) => out.push_str(run.text),
            Span::Visible(_) if cut => {}
            Span::Visible(span) => {
                let mut rest = span.text;
                while !rest.is_empty() {
                    if used >= max_columns {
                        cut = true;
                        break;
                    }
                    let unit = &rest[..unit_len(oracle, rest)];
                    visible.push_str(unit);
                    let width = oracle.measured_width(&visible);
                    if width > max_columns {
                        visible.truncate(visible.len() - unit.len());
                        cut = true;
                        break;
                    }
                    out.push_str(unit);
                    used = width;
                    rest = &rest[unit.len()..];
                }
            }
        }
    }

    if scanner.ended_mid_escape() || scanner.is_open() {
        out.push_str(RESET);
    }

    out
}

/// Byte length of the measured unit at the front of non-empty `text`.
fn unit_len<W: WidthOracle + ?Sized>(oracle: &W, text: &str) -> usize {
    let mut chars = text.char_indices();
    let Some((_, base)) = chars.next() else {
        return 0;
    };
    let mut end = base.len_utf8();
    let mut joined = false;
    let mut flag_open = REGIONAL_INDICATORS.contains(&base);

    for (offset, ch) in chars {
        let mut buf = [0; 4];
        let attaches = joined
            || (flag_open && REGIONAL_INDICATORS.contains(&ch))
            || oracle.measured_width(ch.encode_utf8(&mut buf)) == 0;
        if !attaches {
            break;
        }
        flag_open = false;
        joined = ch == ZERO_WIDTH_JOINER;
        end = offset + ch.len_utf8();
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::{has_unclosed_escape, strip};
    use crate::width::display_width;

    /// Oracle that counts one column per char, to exercise injection.
    struct CharCount;

    impl WidthOracle for CharCount {
        fn measured_width(&self, text: &str) -> usize {
            text.chars().count()
        }
    }

    const SAMPLES: &[&str] = &[
        "",
        "abc",
        "\x1b[31mabc\x1b[0m",
        "\x1b[1;32mgreen\x1b[0m and \x1b[34mblue\x1b[0m",
        "日本語テキスト",
        "\x1b[33m日本\x1b[0mabc",
        "cafe\u{301} au lait",
        "unterminated \x1b[31",
        "\x1b[31mno reset at all",
        "\x1b(Bcharset then text",
        "\x1b[31\x1b[0mabandoned",
        "▁▂▃▄▅▆▇█ 100%",
        "\x1b[31m❤\u{FE0F}\x1b[0m love ❤\u{FE0F}❤\u{FE0F}",
        "flags 🇺🇸🇯🇵 end",
        "family 👨\u{200D}👩\u{200D}👧 ok",
    ];

    fn closes_cleanly(line: &str) -> bool {
        let mut scanner = EscapeScanner::new(line);
        scanner.by_ref().for_each(drop);
        !scanner.is_open() && !scanner.ended_mid_escape()
    }

    #[test]
    fn plain_line_is_cut_to_budget() {
        assert_eq!(truncate("abc", 2), "ab");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn colour_codes_survive_the_cut() {
        assert_eq!(truncate("\x1b[31mabc\x1b[0m", 2), "\x1b[31mab\x1b[0m");
        assert_eq!(truncate("\x1b[31mabc\x1b[0m", 0), "\x1b[31m\x1b[0m");
    }

    #[test]
    fn width_invariant_holds_for_every_budget() {
        for line in SAMPLES {
            for budget in 0..=20 {
                let cut = truncate(line, budget);
                assert!(
                    display_width(&cut) <= budget,
                    "{line:?} at {budget} gave {cut:?}"
                );
            }
        }
    }

    #[test]
    fn output_never_leaves_an_escape_open() {
        for line in SAMPLES {
            for budget in 0..=20 {
                let cut = truncate(line, budget);
                assert!(!has_unclosed_escape(&cut), "{line:?} at {budget} gave {cut:?}");
            }
        }
    }

    #[test]
    fn fitting_line_is_returned_unchanged() {
        for line in SAMPLES.iter().filter(|line| closes_cleanly(line)) {
            let wide = display_width(line) + 1;
            assert_eq!(truncate(line, wide), *line);
        }
    }

    #[test]
    fn open_sequence_gets_closed_even_when_it_fits() {
        assert_eq!(truncate("ab\x1b[31", 10), "ab\x1b[31\x1b[0m");
        assert_eq!(truncate("ab\x1b(", 10), "ab\x1b(\x1b[0m");
    }

    #[test]
    fn wide_glyph_is_never_split() {
        assert_eq!(truncate("日本語", 3), "日");
        assert_eq!(truncate("a日", 2), "a");
        assert_eq!(display_width(&truncate("日本語", 5)), 4);
    }

    #[test]
    fn combining_marks_stay_with_their_base() {
        let cut = truncate("e\u{301}x", 1);
        assert_eq!(cut, "e\u{301}");
        assert_eq!(strip(&cut).chars().count(), 2);
    }

    #[test]
    fn injected_oracle_drives_measurement() {
        assert_eq!(truncate_with(&CharCount, "日本語", 2), "日本");
        assert_eq!(truncate("日本語", 2), "日");
    }

    #[test]
    fn later_escape_runs_are_kept_after_the_cut() {
        let line = "\x1b[31mab\x1b[0m cd \x1b[32mef\x1b[0m";
        assert_eq!(truncate(line, 1), "\x1b[31ma\x1b[0m\x1b[32m\x1b[0m");
    }

    #[test]
    fn emoji_presentation_sequence_is_measured_whole() {
        assert_eq!(truncate("❤\u{FE0F}x", 1), "");
        assert_eq!(truncate("❤\u{FE0F}x", 2), "❤\u{FE0F}");
        assert_eq!(truncate("❤\u{FE0F}x", 3), "❤\u{FE0F}x");
        assert_eq!(display_width(&truncate("❤\u{FE0F}❤\u{FE0F}", 3)), 2);
    }

    #[test]
    fn joined_emoji_and_flags_are_never_split() {
        let family = "👨\u{200D}👩\u{200D}👧";
        assert_eq!(truncate(&format!("{family}x"), 2), family);
        assert_eq!(truncate(&format!("{family}x"), 1), "");
        assert_eq!(truncate("🇺🇸🇯🇵", 3), "🇺🇸");
    }

    #[test]
    fn zero_width_text_after_a_spent_budget_is_dropped() {
        assert_eq!(truncate("ab\x1b[0m\u{301}", 2), "ab\x1b[0m");
        assert_eq!(truncate("\u{301}abc", 0), "");
    }
}
