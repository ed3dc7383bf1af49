//! Text measurement
//!
//! The renderer never touches glyphs itself: it asks a [`TextMeasure`] for the
//! extent of a string under a [`TextStyle`] and hands the same style to the
//! surface when drawing. [`FontMetrics`] measures with a real font via
//! fontdue; [`MonospaceMetrics`] uses a fixed advance and needs no font file.

use std::ops::Range;
use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::error::{Error, Result};
use crate::ui::Color;

/// Font size and box constraints for one piece of text
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    /// Wrap width in pixels, 0 for unbounded
    pub max_width: f32,
    /// Height clamp in pixels, 0 for unbounded
    pub max_height: f32,
    pub color: Color,
}

impl TextStyle {
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            max_width: 0.0,
            max_height: 0.0,
            color,
        }
    }

    pub fn with_max_width(self, max_width: f32) -> Self {
        Self { max_width, ..self }
    }

    pub fn with_max_height(self, max_height: f32) -> Self {
        Self { max_height, ..self }
    }
}

/// Measured size of laid-out text
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Measures text against a style
pub trait TextMeasure {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtent;
}

/// One wrapped line: byte range into the source text and its advance width
#[derive(Clone, Debug, PartialEq)]
pub struct TextLine {
    pub range: Range<usize>,
    pub width: f32,
}

/// Break `text` into lines at newlines and, when `max_width > 0`, at the
/// character that would overflow the width. A line always holds at least one
/// character so narrow limits cannot loop.
pub fn layout_lines(
    text: &str,
    max_width: f32,
    mut advance: impl FnMut(char) -> f32,
) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut width = 0.0;

    for (idx, ch) in text.char_indices() {
        if ch == '\n' {
            lines.push(TextLine { range: start..idx, width });
            start = idx + ch.len_utf8();
            width = 0.0;
            continue;
        }
        let w = advance(ch);
        if max_width > 0.0 && idx > start && width + w > max_width {
            lines.push(TextLine { range: start..idx, width });
            start = idx;
            width = 0.0;
        }
        width += w;
    }
    lines.push(TextLine { range: start..text.len(), width });
    lines
}

/// Number of lines that fit in `max_height` (always at least one)
pub fn visible_lines(line_count: usize, line_height: f32, max_height: f32) -> usize {
    if max_height <= 0.0 || line_height <= 0.0 {
        return line_count;
    }
    let fit = (max_height / line_height).floor() as usize;
    line_count.min(fit.max(1))
}

fn extent_of(lines: &[TextLine], line_height: f32, max_height: f32) -> TextExtent {
    let width = lines.iter().map(|l| l.width).fold(0.0, f32::max);
    let mut height = lines.len() as f32 * line_height;
    if max_height > 0.0 {
        height = height.min(max_height);
    }
    TextExtent { width, height }
}

/// Font-backed text metrics
pub struct FontMetrics {
    font: Font,
}

impl FontMetrics {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| Error::Font(e.to_string()))?;
        Ok(Self { font })
    }

    /// Load a TrueType/OpenType font file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded font");
        Self::from_bytes(&bytes)
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    /// Distance between baselines at `size`
    pub fn line_height(&self, size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(size)
            .map(|m| m.new_line_size)
            .unwrap_or(size * 1.2)
    }

    /// Distance from the top of a line to its baseline at `size`
    pub fn ascent(&self, size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(size)
            .map(|m| m.ascent)
            .unwrap_or(size)
    }

    pub fn advance(&self, ch: char, size: f32) -> f32 {
        self.font.metrics(ch, size).advance_width
    }

    pub fn lines(&self, text: &str, style: &TextStyle) -> Vec<TextLine> {
        layout_lines(text, style.max_width, |ch| self.advance(ch, style.size))
    }
}

impl TextMeasure for FontMetrics {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtent {
        let lines = self.lines(text, style);
        extent_of(&lines, self.line_height(style.size), style.max_height)
    }
}

/// Fixed-advance metrics: every character is `size * advance_ratio` wide and
/// a line is `size * line_ratio` tall
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMetrics {
    pub advance_ratio: f32,
    pub line_ratio: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.5,
            line_ratio: 1.0,
        }
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure(&self, text: &str, style: &TextStyle) -> TextExtent {
        let advance = style.size * self.advance_ratio;
        let lines = layout_lines(text, style.max_width, |_| advance);
        extent_of(&lines, style.size * self.line_ratio, style.max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_unbounded_single_line() {
        let lines = layout_lines("main", 0.0, |_| 5.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].range, 0..4);
        assert!((lines[0].width - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_layout_wraps_at_max_width() {
        let lines = layout_lines("abcdefg", 15.0, |_| 5.0);
        let ranges: Vec<_> = lines.iter().map(|l| l.range.clone()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn test_layout_keeps_one_char_per_line_when_too_narrow() {
        let lines = layout_lines("ab", 1.0, |_| 5.0);
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| (l.width - 5.0).abs() < 0.01));
    }

    #[test]
    fn test_layout_breaks_on_newline() {
        let lines = layout_lines("ab\ncd", 0.0, |_| 1.0);
        let ranges: Vec<_> = lines.iter().map(|l| l.range.clone()).collect();
        assert_eq!(ranges, vec![0..2, 3..5]);
    }

    #[test]
    fn test_monospace_measure() {
        let m = MonospaceMetrics::default();
        let style = TextStyle::new(10.0, Color::default());
        let extent = m.measure("main", &style);
        assert!((extent.width - 20.0).abs() < 0.01);
        assert!((extent.height - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_monospace_measure_clamps_height() {
        let m = MonospaceMetrics::default();
        let style = TextStyle::new(10.0, Color::default())
            .with_max_width(20.0)
            .with_max_height(15.0);
        // "abcdefghij" wraps into three lines of 20, 20, 10
        let extent = m.measure("abcdefghij", &style);
        assert!((extent.width - 20.0).abs() < 0.01);
        assert!((extent.height - 15.0).abs() < 0.01);
    }

    #[test]
    fn test_visible_lines() {
        assert_eq!(visible_lines(3, 10.0, 0.0), 3);
        assert_eq!(visible_lines(3, 10.0, 25.0), 2);
        assert_eq!(visible_lines(3, 10.0, 5.0), 1);
    }
}
