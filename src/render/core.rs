use std::io::Write;

use crate::error::Result;
use crate::frame::RenderedFrame;

/// Renderer runtime parameters.
#[derive(Debug, Clone, Default)]
pub struct RendererSettings {
    /// Zero-based `(row, col)` of the first frame. When set, every row is
    /// cursor-addressed instead of newline-separated.
    pub origin: Option<(u16, u16)>,
    /// Blank rows left between consecutive frames.
    pub gap: u16,
}

/// Writes frames to a terminal stream, one after another.
#[derive(Debug)]
pub struct FrameRenderer {
    settings: RendererSettings,
    next_row: u16,
}

impl FrameRenderer {
    pub fn new(settings: RendererSettings) -> Self {
        let next_row = settings.origin.map_or(0, |(row, _)| row);
        Self { settings, next_row }
    }

    pub fn with_default() -> Self {
        Self::new(RendererSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut RendererSettings {
        &mut self.settings
    }

    /// Move the write position back to the configured origin.
    pub fn reset(&mut self) {
        self.next_row = self.settings.origin.map_or(0, |(row, _)| row);
    }

    /// Write a sequence of frames from the origin and flush.
    pub fn render(&mut self, writer: &mut impl Write, frames: &[RenderedFrame]) -> Result<()> {
        self.reset();
        for (index, frame) in frames.iter().enumerate() {
            if index > 0 {
                self.write_gap(writer)?;
            }
            self.write_frame(writer, frame)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write one frame at the current position without flushing.
    pub fn write_frame(&mut self, writer: &mut impl Write, frame: &RenderedFrame) -> Result<()> {
        match self.settings.origin {
            Some((_, col)) => {
                for line in frame.lines() {
                    write!(writer, "\x1b[{};{}H{}", self.next_row + 1, col + 1, line)?;
                    self.next_row = self.next_row.saturating_add(1);
                }
            }
            None => writer.write_all(frame.text.as_bytes())?,
        }
        Ok(())
    }

    fn write_gap(&mut self, writer: &mut impl Write) -> Result<()> {
        match self.settings.origin {
            Some(_) => self.next_row = self.next_row.saturating_add(self.settings.gap),
            None => {
                for _ in 0..self.settings.gap {
                    writer.write_all(b"\n")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Frame, FrameSpec};

    fn frames() -> Vec<RenderedFrame> {
        let frame = Frame::new(FrameSpec::new(8).with_label("A"));
        vec![frame.render("one"), frame.render("two")]
    }

    #[test]
    fn frames_are_written_with_blank_gap() {
        let mut output = Vec::new();
        let mut renderer = FrameRenderer::new(RendererSettings {
            origin: None,
            gap: 1,
        });
        renderer.render(&mut output, &frames()).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "┌─ A───┐");
        assert_eq!(lines[1], "│ one  │");
        assert_eq!(lines[3], "");
        assert_eq!(lines[5], "│ two  │");
    }

    #[test]
    fn origin_addresses_every_row() {
        let mut output = Vec::new();
        let mut renderer = FrameRenderer::new(RendererSettings {
            origin: Some((2, 4)),
            gap: 1,
        });
        renderer.render(&mut output, &frames()).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.starts_with("\u{1b}[3;5H┌─ A"));
        assert!(rendered.contains("\u{1b}[4;5H│ one"));
        assert!(rendered.contains("\u{1b}[7;5H┌─ A"));
        assert!(rendered.contains("\u{1b}[9;5H└"));
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn render_restarts_from_origin() {
        let mut renderer = FrameRenderer::new(RendererSettings {
            origin: Some((0, 0)),
            gap: 0,
        });
        let mut first = Vec::new();
        let mut second = Vec::new();
        renderer.render(&mut first, &frames()).unwrap();
        renderer.render(&mut second, &frames()).unwrap();
        assert_eq!(first, second);
    }
}
