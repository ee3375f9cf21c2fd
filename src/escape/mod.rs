//! Escape scanner module orchestrator.
//!
//! Splits a line into escape runs and visible spans so width measurement and
//! truncation can treat colour codes as zero-width content.

mod core;

pub use self::core::{
    CSI_INTRO, ESC, EscapeRun, EscapeScanner, RESET, SGR_TERMINATOR, Span, VisibleSpan, classify,
    has_unclosed_escape, leaves_style_active, strip,
};
