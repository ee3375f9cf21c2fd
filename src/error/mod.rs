//! Error module orchestrator.

mod types;

pub use types::{FrameError, Result};
