//! Drawing back ends and the plot renderer
//!
//! Everything that ends up on screen or in an image goes through [`Surface`],
//! a small immediate-mode interface with four primitives. The plot renderer
//! emits calls against it; [`DisplayList`] records them and [`RasterSurface`]
//! turns them into pixels.

mod config;
mod display_list;
pub mod paint;
mod plot_renderer;
mod raster;

pub use config::{LaneColoring, RenderConfig};
pub use display_list::{DisplayList, DrawCommand};
pub use paint::{PlotPainter, paint_commit};
pub use plot_renderer::{LEGEND_REFS, PlotRenderer};
pub use raster::RasterSurface;

use crate::ui::{Color, Point, Rect, TextStyle};

/// Pen used for lines and outlines
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

impl Stroke {
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A 2D immediate-mode drawing target
pub trait Surface {
    /// Fill `rect`, then stroke its border if an outline is given
    fn draw_rectangle(&mut self, fill: Color, outline: Option<Stroke>, rect: Rect);

    /// Draw `text` with its top-left corner at `origin`
    fn draw_text(&mut self, text: &str, style: &TextStyle, origin: Point);

    fn draw_line(&mut self, stroke: Stroke, from: Point, to: Point);

    fn draw_ellipse(
        &mut self,
        fill: Color,
        outline: Option<Stroke>,
        center: Point,
        radius_x: f32,
        radius_y: f32,
    );
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn draw_rectangle(&mut self, fill: Color, outline: Option<Stroke>, rect: Rect) {
        (**self).draw_rectangle(fill, outline, rect)
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, origin: Point) {
        (**self).draw_text(text, style, origin)
    }

    fn draw_line(&mut self, stroke: Stroke, from: Point, to: Point) {
        (**self).draw_line(stroke, from, to)
    }

    fn draw_ellipse(
        &mut self,
        fill: Color,
        outline: Option<Stroke>,
        center: Point,
        radius_x: f32,
        radius_y: f32,
    ) {
        (**self).draw_ellipse(fill, outline, center, radius_x, radius_y)
    }
}

/// Offsets every primitive before forwarding it, so per-row drawing can be
/// stacked into one canvas
pub struct Translate<'a, S: Surface + ?Sized> {
    inner: &'a mut S,
    dx: f32,
    dy: f32,
}

impl<'a, S: Surface + ?Sized> Translate<'a, S> {
    pub fn new(inner: &'a mut S, dx: f32, dy: f32) -> Self {
        Self { inner, dx, dy }
    }
}

impl<S: Surface + ?Sized> Surface for Translate<'_, S> {
    fn draw_rectangle(&mut self, fill: Color, outline: Option<Stroke>, rect: Rect) {
        self.inner
            .draw_rectangle(fill, outline, rect.translate(self.dx, self.dy))
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, origin: Point) {
        self.inner
            .draw_text(text, style, origin.offset(self.dx, self.dy))
    }

    fn draw_line(&mut self, stroke: Stroke, from: Point, to: Point) {
        self.inner.draw_line(
            stroke,
            from.offset(self.dx, self.dy),
            to.offset(self.dx, self.dy),
        )
    }

    fn draw_ellipse(
        &mut self,
        fill: Color,
        outline: Option<Stroke>,
        center: Point,
        radius_x: f32,
        radius_y: f32,
    ) {
        self.inner.draw_ellipse(
            fill,
            outline,
            center.offset(self.dx, self.dy),
            radius_x,
            radius_y,
        )
    }
}
