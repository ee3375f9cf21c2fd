//! Frame composer module orchestrator.
//!
//! A [`Frame`] turns a [`FrameSpec`] plus pre-rendered content lines into
//! bordered terminal output whose rows all measure exactly the frame width.

mod accent;
mod core;
mod glyphs;
mod spec;

pub use accent::Accent;
pub use self::core::{FRAME_TARGET, Frame, RenderedFrame};
pub use glyphs::{BorderGlyphs, DOUBLE, LIGHT};
pub use spec::{BorderStyle, FrameSpec, LabelMode};
