/// Escape character that opens every terminal control sequence.
pub const ESC: char = '\x1b';
/// Second character of a control sequence introducer (`ESC [`).
pub const CSI_INTRO: char = '[';
/// Final character of a select-graphic-rendition sequence.
pub const SGR_TERMINATOR: char = 'm';
/// Canonical reset appended whenever a line must not leak style.
pub const RESET: &str = "\x1b[0m";

/// Contiguous escape sequence inside a line.
///
/// Offsets are byte offsets into the scanned line; `end` is exclusive and
/// includes the terminator when one was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeRun<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
    /// Opened with `ESC [`; only these runs count towards the open counter.
    pub is_csi: bool,
    /// Closed by `m` rather than by end of input or a following `ESC`.
    pub terminated: bool,
}

impl<'a> EscapeRun<'a> {
    /// Parameter list of a complete `ESC [ ... m` run (`"31;1"` for `ESC[31;1m`).
    pub fn sgr_params(&self) -> Option<&'a str> {
        if !(self.is_csi && self.terminated) {
            return None;
        }
        let inner_start = ESC.len_utf8() + CSI_INTRO.len_utf8();
        let inner_end = self.text.len() - SGR_TERMINATOR.len_utf8();
        self.text.get(inner_start..inner_end)
    }
}

/// Contiguous run of content that occupies terminal columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSpan<'a> {
    pub start: usize,
    pub end: usize,
    pub text: &'a str,
}

/// One classified piece of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Escape(EscapeRun<'a>),
    Visible(VisibleSpan<'a>),
}

impl<'a> Span<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Span::Escape(run) => run.text,
            Span::Visible(span) => span.text,
        }
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, Span::Escape(_))
    }
}

/// Left-to-right classifier over the chars of a single line.
///
/// Every `ESC` starts a run. A run ends at the first `m` (inclusive), at the
/// next `ESC` (the partial run is abandoned, as a terminal would abort it), or
/// at end of input. The open counter rises on each `ESC [` and falls when a
/// counted run terminates or is abandoned; it never goes below zero.
#[derive(Debug, Clone)]
pub struct EscapeScanner<'a> {
    line: &'a str,
    pos: usize,
    depth: usize,
    mid_escape: bool,
}

impl<'a> EscapeScanner<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            line,
            pos: 0,
            depth: 0,
            mid_escape: false,
        }
    }

    /// Current value of the open-sequence counter.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True when a recognised sequence is still open at the scan position.
    pub fn is_open(&self) -> bool {
        self.depth > 0
    }

    /// True when the input ended inside an escape run.
    pub fn ended_mid_escape(&self) -> bool {
        self.mid_escape
    }

    fn scan_escape(&mut self) -> EscapeRun<'a> {
        let start = self.pos;
        let rest = &self.line[start..];
        let is_csi = rest[ESC.len_utf8()..].starts_with(CSI_INTRO);
        if is_csi {
            self.depth += 1;
        }

        let mut end = self.line.len();
        let mut terminated = false;
        let mut abandoned = false;
        for (offset, ch) in rest.char_indices().skip(1) {
            if ch == ESC {
                end = start + offset;
                abandoned = true;
                break;
            }
            if ch == SGR_TERMINATOR {
                end = start + offset + ch.len_utf8();
                terminated = true;
                break;
            }
        }

        if terminated || (abandoned && is_csi) {
            self.depth = self.depth.saturating_sub(1);
        }
        self.mid_escape = !terminated && !abandoned;
        self.pos = end;

        EscapeRun {
            start,
            end,
            text: &self.line[start..end],
            is_csi,
            terminated,
        }
    }

    fn scan_visible(&mut self) -> VisibleSpan<'a> {
        let start = self.pos;
        let end = self.line[start..]
            .find(ESC)
            .map_or(self.line.len(), |offset| start + offset);
        self.pos = end;
        VisibleSpan {
            start,
            end,
            text: &self.line[start..end],
        }
    }
}

impl<'a> Iterator for EscapeScanner<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.line[self.pos..].chars().next()?;
        if first == ESC {
            Some(Span::Escape(self.scan_escape()))
        } else {
            Some(Span::Visible(self.scan_visible()))
        }
    }
}

/// Classify a line into ordered escape runs and visible spans.
pub fn classify(line: &str) -> Vec<Span<'_>> {
    EscapeScanner::new(line).collect()
}

/// Report whether a line ends with an escape sequence still open.
pub fn has_unclosed_escape(line: &str) -> bool {
    let mut scanner = EscapeScanner::new(line);
    scanner.by_ref().for_each(drop);
    scanner.is_open()
}

/// Remove every escape run, keeping only visible text for measurement.
pub fn strip(line: &str) -> String {
    let mut visible = String::with_capacity(line.len());
    for span in EscapeScanner::new(line) {
        if let Span::Visible(span) = span {
            visible.push_str(span.text);
        }
    }
    visible
}

/// Report whether the complete SGR sequences of a line leave a non-default
/// style set at its end (`"\x1b[31mred"` does, `"\x1b[31mred\x1b[0m"` does not).
pub fn leaves_style_active(line: &str) -> bool {
    EscapeScanner::new(line)
        .filter_map(|span| match span {
            Span::Escape(run) => run.sgr_params(),
            Span::Visible(_) => None,
        })
        .fold(false, apply_sgr)
}

fn apply_sgr(mut active: bool, params: &str) -> bool {
    let mut codes = params.split(';');
    while let Some(code) = codes.next() {
        match code.parse::<u16>() {
            Ok(0) => active = false,
            Ok(38 | 48 | 58) => {
                active = true;
                // Skip the colour operands so a trailing `0` channel is not read as a reset.
                match codes.next() {
                    Some("5") => {
                        codes.next();
                    }
                    Some("2") => {
                        codes.nth(2);
                    }
                    _ => {}
                }
            }
            Ok(_) => active = true,
            Err(_) if code.is_empty() => active = false,
            Err(_) => active = true,
        }
    }
    active
}
