use std::borrow::Cow;
use std::fmt;

use super::glyphs::{BorderGlyphs, DOUBLE};
use super::spec::{FrameSpec, LabelMode};
use crate::escape::{RESET, has_unclosed_escape, leaves_style_active};
use crate::logging::{LogEvent, LogLevel, Logger};
use crate::metrics::FrameStats;
use crate::truncate::truncate_with;
use crate::width::{UnicodeWidthOracle, WidthOracle, measure};

/// Log target used for every event a frame emits.
pub const FRAME_TARGET: &str = "boxframe::frame";

/// Horizontal glyphs between the corner and the title in a title bar header.
const TITLE_LEAD: usize = 3;

/// Newline-terminated output of a complete frame plus what it took to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    pub text: String,
    pub stats: FrameStats,
}

impl RenderedFrame {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

impl fmt::Display for RenderedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Composes bordered rows for one [`FrameSpec`].
///
/// Every operation is total: widths smaller than the border overhead clamp
/// fills and padding to zero instead of failing, and labels too wide for the
/// top edge get no fill at all. Single-row operations return the row without
/// a trailing newline; multi-row operations terminate every row.
#[derive(Debug, Clone)]
pub struct Frame<W = UnicodeWidthOracle> {
    spec: FrameSpec,
    oracle: W,
    logger: Option<Logger>,
}

impl Frame {
    pub fn new(spec: FrameSpec) -> Self {
        Self::with_oracle(spec, UnicodeWidthOracle)
    }
}

impl<W: WidthOracle> Frame<W> {
    pub fn with_oracle(spec: FrameSpec, oracle: W) -> Self {
        Self {
            spec,
            oracle,
            logger: None,
        }
    }

    /// Attach a logger that receives debug events for truncations and clamps.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn spec(&self) -> &FrameSpec {
        &self.spec
    }

    /// Columns available to content: the width minus a border glyph and a
    /// padding space on each side.
    pub fn content_width(&self) -> usize {
        let border = self.oracle.measured_width(self.spec.glyphs().vertical);
        self.spec.width.saturating_sub(2 * (border + 1))
    }

    /// Top edge, labeled according to the label mode.
    pub fn top_border(&self) -> String {
        self.compose_top(&mut FrameStats::new())
    }

    /// Bottom edge: corners around a uniform horizontal run.
    pub fn bottom_border(&self) -> String {
        self.bottom_edge(self.spec.glyphs())
    }

    fn bottom_edge(&self, glyphs: &BorderGlyphs) -> String {
        let run = self.edge_run(glyphs.bottom_left, glyphs.bottom_right);
        let mut row = String::new();
        self.paint(
            &mut row,
            &format!(
                "{}{}{}",
                glyphs.bottom_left,
                glyphs.horizontal.repeat(run),
                glyphs.bottom_right
            ),
        );
        row
    }

    /// One padded content row, or `None` for an empty line.
    pub fn content_row(&self, line: &str) -> Option<String> {
        self.compose_row(line, &mut FrameStats::new())
    }

    /// Content rows for every line of `content`, each newline-terminated.
    pub fn wrap_content(&self, content: &str) -> String {
        self.compose_rows(content, &mut FrameStats::new())
    }

    /// Title bar header: `╔═══ TITLE ═════╗`, double-line whatever the
    /// border style.
    pub fn title_bar(&self) -> String {
        self.compose_title(&mut FrameStats::new())
    }

    /// Content between double-line vertical glyphs, without truncation or
    /// padding.
    pub fn info_row(&self, content: &str) -> String {
        let vertical = DOUBLE.vertical;
        let mut row = String::with_capacity(content.len() + 32);
        self.paint(&mut row, vertical);
        row.push_str(content);
        close_dangling(&mut row, content);
        self.paint(&mut row, vertical);
        row
    }

    /// Top border, content rows and bottom border as one frame.
    pub fn render(&self, content: &str) -> RenderedFrame {
        let mut stats = FrameStats::new();
        let mut text = self.compose_top(&mut stats);
        text.push('\n');
        text.push_str(&self.compose_rows(content, &mut stats));
        text.push_str(&self.bottom_border());
        text.push('\n');
        self.finish(text, stats)
    }

    /// Title bar header, info rows and bottom border as one frame.
    pub fn render_title(&self, info: &str) -> RenderedFrame {
        let mut stats = FrameStats::new();
        let mut text = self.compose_title(&mut stats);
        text.push('\n');
        for line in split_lines(info) {
            if line.is_empty() {
                stats.record_dropped();
                continue;
            }
            text.push_str(&self.info_row(line));
            text.push('\n');
            stats.record_row(false);
        }
        text.push_str(&self.bottom_edge(&DOUBLE));
        text.push('\n');
        self.finish(text, stats)
    }

    fn finish(&self, text: String, stats: FrameStats) -> RenderedFrame {
        if let Some(logger) = self.logger.as_ref() {
            let _ = logger.log(stats.to_log_event(FRAME_TARGET));
        }
        RenderedFrame { text, stats }
    }

    fn compose_top(&self, stats: &mut FrameStats) -> String {
        match (self.spec.label_mode, self.spec.label()) {
            (LabelMode::CornerLabel, Some(label)) => self.corner_label_top(label, stats),
            (LabelMode::CenteredTitle, Some(label)) => self.centered_title_top(label, stats),
            _ => {
                let glyphs = self.spec.glyphs();
                let run = self.edge_run(glyphs.top_left, glyphs.top_right);
                let mut row = String::new();
                self.paint(
                    &mut row,
                    &format!(
                        "{}{}{}",
                        glyphs.top_left,
                        glyphs.horizontal.repeat(run),
                        glyphs.top_right
                    ),
                );
                row
            }
        }
    }

    fn corner_label_top(&self, label: &str, stats: &mut FrameStats) -> String {
        let glyphs = self.spec.glyphs();
        let prefix = format!("{}{} ", glyphs.top_left, glyphs.horizontal);
        let fixed = self.oracle.measured_width(&prefix) + self.oracle.measured_width(glyphs.top_right);
        let fill = self.fill_for(label, fixed, stats);

        let mut row = String::new();
        self.paint(&mut row, &prefix);
        row.push_str(label);
        close_dangling(&mut row, label);
        self.paint(
            &mut row,
            &format!("{}{}", glyphs.horizontal.repeat(fill), glyphs.top_right),
        );
        row
    }

    fn centered_title_top(&self, label: &str, stats: &mut FrameStats) -> String {
        let glyphs = self.spec.glyphs();
        let fixed = self.oracle.measured_width(glyphs.top_left)
            + self.oracle.measured_width(glyphs.top_right)
            + 2;
        let spare = self.fill_for(label, fixed, stats);
        let left = spare / 2;

        let mut row = String::new();
        self.paint(
            &mut row,
            &format!("{}{}", glyphs.top_left, glyphs.horizontal.repeat(left)),
        );
        row.push(' ');
        row.push_str(label);
        close_dangling(&mut row, label);
        row.push(' ');
        self.paint(
            &mut row,
            &format!("{}{}", glyphs.horizontal.repeat(spare - left), glyphs.top_right),
        );
        row
    }

    fn compose_title(&self, stats: &mut FrameStats) -> String {
        let glyphs = &DOUBLE;
        let title = self.spec.label().unwrap_or_default();
        let prefix = format!("{}{} ", glyphs.top_left, glyphs.horizontal.repeat(TITLE_LEAD));
        let fixed = self.oracle.measured_width(&prefix) + 1 + self.oracle.measured_width(glyphs.top_right);
        let fill = self.fill_for(title, fixed, stats);

        let mut row = String::new();
        self.paint(&mut row, &prefix);
        row.push_str(title);
        close_dangling(&mut row, title);
        row.push(' ');
        self.paint(
            &mut row,
            &format!("{}{}", glyphs.horizontal.repeat(fill), glyphs.top_right),
        );
        row
    }

    fn compose_rows(&self, content: &str, stats: &mut FrameStats) -> String {
        let mut rows = String::with_capacity(content.len() + 64);
        for line in split_lines(content) {
            if let Some(row) = self.compose_row(line, stats) {
                rows.push_str(&row);
                rows.push('\n');
            }
        }
        rows
    }

    fn compose_row(&self, line: &str, stats: &mut FrameStats) -> Option<String> {
        if line.is_empty() {
            stats.record_dropped();
            return None;
        }

        let budget = self.content_width();
        let mut width = measure(&self.oracle, line);
        let truncated = width > budget;
        let content = if truncated {
            let cut = truncate_with(&self.oracle, line, budget);
            self.emit("frame.line_truncated", |event| {
                event.field("width", width).field("budget", budget)
            });
            width = measure(&self.oracle, &cut);
            Cow::Owned(cut)
        } else {
            Cow::Borrowed(line)
        };

        let vertical = self.spec.glyphs().vertical;
        let mut row = String::with_capacity(content.len() + budget + 32);
        self.paint(&mut row, vertical);
        row.push(' ');
        row.push_str(&content);
        close_dangling(&mut row, &content);
        row.extend(std::iter::repeat_n(' ', budget.saturating_sub(width)));
        row.push(' ');
        self.paint(&mut row, vertical);

        stats.record_row(truncated);
        Some(row)
    }

    /// Horizontal glyphs needed between two corners; `width - 2` for the
    /// built-in glyph sets.
    fn edge_run(&self, left: &str, right: &str) -> usize {
        let corners = self.oracle.measured_width(left) + self.oracle.measured_width(right);
        self.spec.width.saturating_sub(corners)
    }

    /// Fill left over after `label` and `fixed` border columns, or zero when
    /// the label does not fit.
    fn fill_for(&self, label: &str, fixed: usize, stats: &mut FrameStats) -> usize {
        let used = measure(&self.oracle, label) + fixed;
        match self.spec.width.checked_sub(used) {
            Some(fill) => fill,
            None => {
                stats.record_label_clamp();
                self.emit("frame.label_clamped", |event| {
                    event
                        .field("label", label)
                        .field("needed", used)
                        .field("width", self.spec.width)
                });
                0
            }
        }
    }

    /// Append border glyphs wrapped in the accent colour, reset right after.
    fn paint(&self, out: &mut String, glyphs: &str) {
        match self.spec.color.as_ref() {
            Some(accent) => {
                out.push_str(accent.sgr());
                out.push_str(glyphs);
                out.push_str(RESET);
            }
            None => out.push_str(glyphs),
        }
    }

    /// Debug event, built only when an attached logger would keep it.
    fn emit(&self, message: &str, fields: impl FnOnce(LogEvent) -> LogEvent) {
        if let Some(logger) = self.logger.as_ref() {
            if logger.enabled(LogLevel::Debug) {
                let _ = logger.log(fields(LogEvent::new(LogLevel::Debug, FRAME_TARGET, message)));
            }
        }
    }
}

/// Close whatever style `content` leaves behind so it cannot bleed past it.
fn close_dangling(out: &mut String, content: &str) {
    if has_unclosed_escape(content) || leaves_style_active(content) {
        out.push_str(RESET);
    }
}

fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
