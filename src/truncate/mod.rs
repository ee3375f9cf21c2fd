//! Bounded truncation of escaped lines.

mod core;

pub use self::core::{truncate, truncate_with};
