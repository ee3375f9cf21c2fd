//! Output module orchestrator: writes rendered frames to a terminal handle.

mod core;

pub use self::core::{FrameRenderer, RendererSettings};
