use crate::plot::PlotLane;
use crate::renderer::Stroke;
use crate::ui::{Color, theme};

/// How lane lines are colored
#[derive(Clone, Debug, PartialEq)]
pub enum LaneColoring {
    /// Every lane uses the same color
    Single(Color),
    /// Cycle through a palette by lane position
    Palette(Vec<Color>),
}

impl LaneColoring {
    pub fn color(&self, lane: PlotLane) -> Color {
        match self {
            LaneColoring::Single(color) => *color,
            LaneColoring::Palette(colors) if !colors.is_empty() => {
                colors[lane.position % colors.len()]
            }
            LaneColoring::Palette(_) => theme::LANE,
        }
    }

    /// The theme's lane palette
    pub fn palette() -> Self {
        LaneColoring::Palette(theme::LANE_COLORS.to_vec())
    }
}

impl Default for LaneColoring {
    fn default() -> Self {
        LaneColoring::Single(theme::LANE)
    }
}

/// Sizes and styling shared by every draw call of a renderer.
///
/// Built once by the host and moved into the renderer, which never mutates
/// it afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    row_height: i32,
    font_size: f32,
    text_max_width: f32,
    label_max_width: f32,
    label_margin: i32,
    label_outline: Option<Stroke>,
    lane_coloring: LaneColoring,
}

impl RenderConfig {
    /// Configuration for rows `row_height` pixels tall; text is half as tall
    pub fn new(row_height: i32) -> Self {
        let row_height = row_height.max(1);
        Self {
            row_height,
            font_size: (row_height / 2) as f32,
            text_max_width: 0.0,
            label_max_width: 0.0,
            label_margin: 2,
            label_outline: Some(Stroke::new(theme::LABEL_OUTLINE, 1.0)),
            lane_coloring: LaneColoring::default(),
        }
    }

    /// Wrap width for captions, 0 for unbounded
    pub fn with_text_max_width(self, text_max_width: f32) -> Self {
        Self { text_max_width: text_max_width.max(0.0), ..self }
    }

    /// Wrap width for label text, 0 for unbounded
    pub fn with_label_max_width(self, label_max_width: f32) -> Self {
        Self { label_max_width: label_max_width.max(0.0), ..self }
    }

    /// Space after each label block
    pub fn with_label_margin(self, label_margin: i32) -> Self {
        Self { label_margin, ..self }
    }

    pub fn with_label_outline(self, label_outline: Option<Stroke>) -> Self {
        Self { label_outline, ..self }
    }

    pub fn with_lane_coloring(self, lane_coloring: LaneColoring) -> Self {
        Self { lane_coloring, ..self }
    }

    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn text_max_width(&self) -> f32 {
        self.text_max_width
    }

    pub fn label_max_width(&self) -> f32 {
        self.label_max_width
    }

    pub fn label_margin(&self) -> i32 {
        self.label_margin
    }

    pub fn label_outline(&self) -> Option<Stroke> {
        self.label_outline
    }

    pub fn lane_coloring(&self) -> &LaneColoring {
        &self.lane_coloring
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(20)
    }
}
