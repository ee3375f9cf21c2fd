//! Terminal display width helpers.
//!
//! The frame engine never measures bytes or chars directly; every width goes
//! through a [`WidthOracle`] applied to escape-stripped text.

mod utils;

pub use utils::{UnicodeWidthOracle, WidthOracle, display_width, measure};
