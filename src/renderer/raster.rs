use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::renderer::{Stroke, Surface};
use crate::ui::{Color, FontMetrics, Point, Rect, TextStyle, visible_lines};

/// Software surface drawing into an RGBA image.
///
/// Shapes are filled by pixel-center sampling with a one pixel soft edge on
/// lines. Text needs a font; without one text calls are ignored.
pub struct RasterSurface<'f> {
    image: RgbaImage,
    font: Option<&'f FontMetrics>,
}

impl<'f> RasterSurface<'f> {
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Surface { width, height });
        }
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background.to_rgba8())),
            font: None,
        })
    }

    pub fn with_font(self, font: &'f FontMetrics) -> Self {
        Self {
            font: Some(font),
            ..self
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Write the canvas as PNG (or whatever the extension names)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.image.save(path.as_ref())?;
        tracing::debug!(
            path = %path.as_ref().display(),
            width = self.image.width(),
            height = self.image.height(),
            "saved image"
        );
        Ok(())
    }

    /// Source-over blend of `color` scaled by `coverage` into one pixel
    fn blend(&mut self, x: i64, y: i64, color: Color, coverage: f32) {
        if x < 0
            || y < 0
            || x >= i64::from(self.image.width())
            || y >= i64::from(self.image.height())
        {
            return;
        }
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let src = color.to_rgba8();
        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        for i in 0..3 {
            let blended = f32::from(src[i]) * alpha + f32::from(dst.0[i]) * (1.0 - alpha);
            dst.0[i] = blended.round().clamp(0.0, 255.0) as u8;
        }
        let dst_a = f32::from(dst.0[3]) / 255.0;
        dst.0[3] = ((alpha + dst_a * (1.0 - alpha)) * 255.0).round() as u8;
    }

    /// Pixel index range whose centers fall inside `[lo, hi)`
    fn span(lo: f32, hi: f32) -> std::ops::Range<i64> {
        (lo - 0.5).ceil() as i64..(hi - 0.5).ceil() as i64
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        for y in Self::span(rect.y, rect.bottom()) {
            for x in Self::span(rect.x, rect.right()) {
                self.blend(x, y, color, 1.0);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        // Pen centered on the border
        let w = stroke.width;
        let h = w / 2.0;
        let outer = Rect::new(rect.x - h, rect.y - h, rect.width + w, rect.height + w);
        self.fill_rect(Rect::new(outer.x, outer.y, outer.width, w), stroke.color);
        self.fill_rect(Rect::new(outer.x, outer.bottom() - w, outer.width, w), stroke.color);
        self.fill_rect(
            Rect::new(outer.x, outer.y + w, w, (outer.height - 2.0 * w).max(0.0)),
            stroke.color,
        );
        self.fill_rect(
            Rect::new(outer.right() - w, outer.y + w, w, (outer.height - 2.0 * w).max(0.0)),
            stroke.color,
        );
    }

    fn ellipse_contains(center: Point, rx: f32, ry: f32, px: f32, py: f32) -> bool {
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let dx = (px - center.x) / rx;
        let dy = (py - center.y) / ry;
        dx * dx + dy * dy <= 1.0
    }
}

/// Distance from `p` to the segment `a`-`b`
fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let (vx, vy) = (b.x - a.x, b.y - a.y);
    let len_sq = vx * vx + vy * vy;
    let t = if len_sq > 0.0 {
        (((p.x - a.x) * vx + (p.y - a.y) * vy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.x + t * vx, a.y + t * vy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

impl Surface for RasterSurface<'_> {
    fn draw_rectangle(&mut self, fill: Color, outline: Option<Stroke>, rect: Rect) {
        self.fill_rect(rect, fill);
        if let Some(stroke) = outline {
            self.stroke_rect(rect, stroke);
        }
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, origin: Point) {
        let Some(font) = self.font else {
            return;
        };
        let line_height = font.line_height(style.size);
        let ascent = font.ascent(style.size);
        let lines = font.lines(text, style);
        let shown = visible_lines(lines.len(), line_height, style.max_height);

        for (i, line) in lines.iter().take(shown).enumerate() {
            let baseline = origin.y + ascent + i as f32 * line_height;
            let mut pen_x = origin.x;
            for ch in text[line.range.clone()].chars() {
                let (metrics, bitmap) = font.font().rasterize(ch, style.size);
                let left = (pen_x + metrics.xmin as f32).round() as i64;
                let top = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i64;
                for gy in 0..metrics.height {
                    for gx in 0..metrics.width {
                        let coverage = f32::from(bitmap[gy * metrics.width + gx]) / 255.0;
                        self.blend(left + gx as i64, top + gy as i64, style.color, coverage);
                    }
                }
                pen_x += metrics.advance_width;
            }
        }
    }

    fn draw_line(&mut self, stroke: Stroke, from: Point, to: Point) {
        let half = stroke.width / 2.0;
        let bounds = Rect::from_points(from, to);
        for y in Self::span(bounds.y - half - 1.0, bounds.bottom() + half + 1.0) {
            for x in Self::span(bounds.x - half - 1.0, bounds.right() + half + 1.0) {
                let center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = segment_distance(center, from, to);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, stroke.color, coverage);
                }
            }
        }
    }

    fn draw_ellipse(
        &mut self,
        fill: Color,
        outline: Option<Stroke>,
        center: Point,
        radius_x: f32,
        radius_y: f32,
    ) {
        let pad = outline.map_or(0.0, |s| s.width / 2.0);
        let (rx, ry) = (radius_x + pad, radius_y + pad);
        for y in Self::span(center.y - ry, center.y + ry) {
            for x in Self::span(center.x - rx, center.x + rx) {
                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
                let inner = Self::ellipse_contains(center, radius_x - pad, radius_y - pad, px, py);
                if let Some(stroke) = outline {
                    if !inner && Self::ellipse_contains(center, rx, ry, px, py) {
                        self.blend(x, y, stroke.color, 1.0);
                        continue;
                    }
                }
                if Self::ellipse_contains(center, radius_x, radius_y, px, py)
                    && (outline.is_none() || inner)
                {
                    self.blend(x, y, fill, 1.0);
                }
            }
        }
    }
}
