//! ANSI-aware bounded-width framing for terminal output.
//!
//! Content produced elsewhere (charts, heatmaps, status text) arrives as lines
//! that may carry colour escapes and may be wider than the space available.
//! The modules here measure those lines by visible width, cut them without
//! splitting glyphs or escape sequences, and wrap them in fixed-width borders
//! whose rows all line up:
//!
//! - [`escape`] classifies escape runs and visible spans.
//! - [`truncate`] cuts a line to a column budget and closes dangling escapes.
//! - [`frame`] builds borders, labels, title bars and padded content rows.
//!
//! ```
//! use boxframe::{Frame, FrameSpec, display_width};
//!
//! let frame = Frame::new(FrameSpec::new(20).with_label("TEST"));
//! let rendered = frame.render("\x1b[31mhello\x1b[0m");
//! assert!(rendered.lines().all(|row| display_width(row) == 20));
//! ```

pub mod cache;
pub mod error;
pub mod escape;
pub mod frame;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod truncate;
pub mod width;

pub use cache::{FrameCache, PanelId};
pub use error::{FrameError, Result};
pub use escape::{EscapeRun, EscapeScanner, RESET, Span, VisibleSpan, classify, has_unclosed_escape, strip};
pub use frame::{Accent, BorderGlyphs, BorderStyle, Frame, FrameSpec, LabelMode, RenderedFrame};
pub use logging::{
    FileSink, JsonLinesSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError,
    LoggingResult, NullSink,
};
pub use metrics::FrameStats;
pub use render::{FrameRenderer, RendererSettings};
pub use truncate::{truncate, truncate_with};
pub use width::{UnicodeWidthOracle, WidthOracle, display_width};
