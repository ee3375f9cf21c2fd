use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::accent::Accent;
use super::glyphs::{BorderGlyphs, DOUBLE, LIGHT};
use crate::error::{FrameError, Result};

/// Glyph family used for every edge of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    Light,
    /// Double-line glyphs, used for title bars.
    Title,
}

impl BorderStyle {
    pub fn glyphs(self) -> &'static BorderGlyphs {
        match self {
            BorderStyle::Light => &LIGHT,
            BorderStyle::Title => &DOUBLE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BorderStyle::Light => "light",
            BorderStyle::Title => "title",
        }
    }
}

impl FromStr for BorderStyle {
    type Err = FrameError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(BorderStyle::Light),
            "title" | "double" => Ok(BorderStyle::Title),
            _ => Err(FrameError::UnknownStyle(value.to_string())),
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement of the label inside the top border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LabelMode {
    /// Uniform top edge; the label is ignored.
    None,
    /// `┌─ LABEL ────┐`
    #[default]
    CornerLabel,
    /// `┌──── LABEL ────┐`
    CenteredTitle,
}

impl LabelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelMode::None => "none",
            LabelMode::CornerLabel => "corner-label",
            LabelMode::CenteredTitle => "centered-title",
        }
    }
}

impl FromStr for LabelMode {
    type Err = FrameError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(LabelMode::None),
            "corner-label" | "corner" => Ok(LabelMode::CornerLabel),
            "centered-title" | "centered" => Ok(LabelMode::CenteredTitle),
            _ => Err(FrameError::UnknownLabelMode(value.to_string())),
        }
    }
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target region for one frame: width in columns, optional label, border
/// style, label placement and an accent used for border glyphs only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrameSpec {
    pub width: usize,
    pub label: Option<String>,
    pub style: BorderStyle,
    pub label_mode: LabelMode,
    pub color: Option<Accent>,
}

impl Default for FrameSpec {
    fn default() -> Self {
        Self {
            width: 80,
            label: None,
            style: BorderStyle::default(),
            label_mode: LabelMode::default(),
            color: None,
        }
    }
}

impl FrameSpec {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Parse a spec from JSON, e.g. `{"width": 70, "label": "CPU", "color": "#2196F3"}`.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_style(mut self, style: BorderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_label_mode(mut self, mode: LabelMode) -> Self {
        self.label_mode = mode;
        self
    }

    pub fn with_color(mut self, accent: Accent) -> Self {
        self.color = Some(accent);
        self
    }

    /// Label text, treating an empty string the same as no label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref().filter(|label| !label.is_empty())
    }

    pub fn glyphs(&self) -> &'static BorderGlyphs {
        self.style.glyphs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognised_option_names_parse() {
        assert_eq!("light".parse::<BorderStyle>().unwrap(), BorderStyle::Light);
        assert_eq!(" Title ".parse::<BorderStyle>().unwrap(), BorderStyle::Title);
        assert_eq!("none".parse::<LabelMode>().unwrap(), LabelMode::None);
        assert_eq!(
            "corner-label".parse::<LabelMode>().unwrap(),
            LabelMode::CornerLabel
        );
        assert_eq!(
            "centered-title".parse::<LabelMode>().unwrap(),
            LabelMode::CenteredTitle
        );
    }

    #[test]
    fn unknown_option_names_are_errors() {
        assert!(matches!(
            "heavy".parse::<BorderStyle>(),
            Err(FrameError::UnknownStyle(name)) if name == "heavy"
        ));
        assert!(matches!(
            "left".parse::<LabelMode>(),
            Err(FrameError::UnknownLabelMode(_))
        ));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in [LabelMode::None, LabelMode::CornerLabel, LabelMode::CenteredTitle] {
            assert_eq!(mode.to_string().parse::<LabelMode>().unwrap(), mode);
        }
    }

    #[test]
    fn json_spec_fills_defaults() {
        let spec = FrameSpec::from_json(
            r##"{"width": 70, "label": "HEATMAP", "style": "title", "label-mode": "centered-title", "color": "#2196F3"}"##,
        )
        .unwrap();
        assert_eq!(spec.width, 70);
        assert_eq!(spec.label(), Some("HEATMAP"));
        assert_eq!(spec.style, BorderStyle::Title);
        assert_eq!(spec.label_mode, LabelMode::CenteredTitle);
        assert_eq!(spec.color.as_ref().map(Accent::as_str), Some("#2196F3"));

        let minimal = FrameSpec::from_json("{}").unwrap();
        assert_eq!(minimal, FrameSpec::default());
    }

    #[test]
    fn json_spec_rejects_bad_colour() {
        let err = FrameSpec::from_json(r##"{"color": "#zzzzzz"}"##).unwrap_err();
        assert!(matches!(err, FrameError::Config(_)));
    }

    #[test]
    fn empty_label_counts_as_none() {
        assert_eq!(FrameSpec::new(20).with_label("").label(), None);
        assert_eq!(FrameSpec::new(20).glyphs(), &LIGHT);
        assert_eq!(
            FrameSpec::new(20).with_style(BorderStyle::Title).glyphs(),
            &DOUBLE
        );
    }
}
