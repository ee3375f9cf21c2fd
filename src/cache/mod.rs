//! Render cache module orchestrator.

mod core;

pub use self::core::{FrameCache, PanelId};
