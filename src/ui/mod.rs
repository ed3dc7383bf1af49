mod layout;
mod text;
pub mod theme;

pub use layout::{Color, Point, Rect};
pub use text::{
    FontMetrics, MonospaceMetrics, TextExtent, TextLine, TextMeasure, TextStyle, layout_lines,
    visible_lines,
};
