use crossterm::Command;
use crossterm::style::{Color, SetForegroundColor};
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

/// Foreground colour applied to border glyphs.
///
/// Parsed from `#RRGGBB` (truecolour) or a crossterm colour name such as
/// `red` or `dark_blue`. Serialises back to the text it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Accent {
    source: String,
    sgr: String,
}

impl Accent {
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let invalid = || FrameError::InvalidColor(value.to_string());
        let color = match trimmed.strip_prefix('#') {
            Some(hex) => parse_hex(hex).ok_or_else(invalid)?,
            None => Color::try_from(trimmed).map_err(|_| invalid())?,
        };
        Self::from_color(trimmed, color)
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Result<Self> {
        Self::from_color(&format!("#{r:02x}{g:02x}{b:02x}"), Color::Rgb { r, g, b })
    }

    fn from_color(source: &str, color: Color) -> Result<Self> {
        let mut sgr = String::new();
        SetForegroundColor(color).write_ansi(&mut sgr)?;
        Ok(Self {
            source: source.to_string(),
            sgr,
        })
    }

    /// Escape sequence that switches the foreground to this colour.
    pub fn sgr(&self) -> &str {
        &self.sgr
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

impl TryFrom<String> for Accent {
    type Error = FrameError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Accent> for String {
    fn from(accent: Accent) -> Self {
        accent.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::{has_unclosed_escape, strip};

    #[test]
    fn hex_accent_becomes_truecolour_sgr() {
        let accent = Accent::parse("#2196F3").unwrap();
        assert_eq!(accent.sgr(), "\x1b[38;2;33;150;243m");
        assert_eq!(accent.as_str(), "#2196F3");
    }

    #[test]
    fn rgb_constructor_matches_hex() {
        let accent = Accent::rgb(0x7d, 0x56, 0xf4).unwrap();
        assert_eq!(accent.as_str(), "#7d56f4");
        assert_eq!(accent.sgr(), Accent::parse("#7D56F4").unwrap().sgr());
    }

    #[test]
    fn named_colours_are_accepted() {
        let accent = Accent::parse("red").unwrap();
        assert!(accent.sgr().starts_with("\x1b["));
        assert!(strip(accent.sgr()).is_empty());
        assert!(!has_unclosed_escape(accent.sgr()));
    }

    #[test]
    fn malformed_colours_are_rejected() {
        for value in ["#12345", "#GGGGGG", "#12345678", "not-a-colour", "#ééé"] {
            assert!(
                matches!(Accent::parse(value), Err(FrameError::InvalidColor(_))),
                "{value} should be rejected"
            );
        }
    }
}
