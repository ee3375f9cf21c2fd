use thiserror::Error;

use crate::logging::LoggingError;

/// Unified result type for the frame engine crate.
pub type Result<T> = std::result::Result<T, FrameError>;

/// Errors surfaced while configuring or emitting frames.
///
/// Rendering itself never fails; these cover the fallible edges around it.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("invalid accent colour `{0}`")]
    InvalidColor(String),
    #[error("unknown border style `{0}` (expected `light` or `title`)")]
    UnknownStyle(String),
    #[error("unknown label mode `{0}` (expected `none`, `corner-label` or `centered-title`)")]
    UnknownLabelMode(String),
    #[error("frame configuration error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
