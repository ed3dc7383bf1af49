//! Per-commit graph geometry
//!
//! [`paint_commit`] decides where the lane lines, the commit dot, the ref
//! labels and the subject go for one row, and emits them through a
//! [`PlotPainter`]. It knows nothing about colors or surfaces; any back end
//! that implements the trait can draw the graph.

use crate::plot::{PlotCommit, PlotLane};

/// Horizontal distance between lane centers
pub const LANE_WIDTH: i32 = 14;
/// Stroke width of lane lines
pub const LINE_WIDTH: i32 = 2;
/// Space left of lane 0
pub const LEFT_PAD: i32 = 2;

/// Drawing capabilities the paint routine needs
pub trait PlotPainter {
    type Color: Copy;

    fn lane_color(&self, lane: PlotLane) -> Self::Color;

    fn draw_line(&mut self, color: Self::Color, x1: i32, y1: i32, x2: i32, y2: i32, width: i32);

    /// Dot for a commit inside the walked range, inscribed in the given box
    fn draw_commit_dot(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Dot for a commit whose history continues outside the walked range
    fn draw_boundary_dot(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Draw a ref label with `y` as its vertical center; returns the advance
    fn draw_label(&mut self, x: i32, y: i32, ref_name: &str) -> i32;

    /// Draw a caption with `y` as its vertical center
    fn draw_text(&mut self, msg: &str, x: i32, y: i32);
}

fn lane_x(lane: PlotLane) -> i32 {
    LEFT_PAD + LANE_WIDTH * lane.position as i32
}

/// Center x of a lane
pub fn lane_center(lane: PlotLane) -> i32 {
    lane_x(lane) + LANE_WIDTH / 2
}

/// Diameter of the commit dot for a row of height `h`, always even
pub fn dot_size(h: i32) -> i32 {
    let d = (h.min(LANE_WIDTH) as f32 * 0.5) as i32;
    d + (d & 1)
}

/// Paint one commit row of height `h`
pub fn paint_commit<P: PlotPainter + ?Sized>(painter: &mut P, commit: &PlotCommit, h: i32) {
    let dot = dot_size(h);
    let my_x = lane_center(commit.lane);
    let my_color = painter.lane_color(commit.lane);

    let mut max_center = my_x;
    for &passing in &commit.passing_lanes {
        let cx = lane_center(passing);
        let color = painter.lane_color(passing);
        painter.draw_line(color, cx, 0, cx, h, LINE_WIDTH);
        max_center = max_center.max(cx);
    }

    for &parent in &commit.parent_lanes {
        let color = painter.lane_color(parent);
        let cx = lane_center(parent);

        if (my_x - cx).abs() > LANE_WIDTH {
            // Run along the row, then bend down into the parent's lane
            let ix = if my_x < cx {
                cx - LANE_WIDTH / 2
            } else {
                cx + LANE_WIDTH / 2
            };
            painter.draw_line(color, my_x, h / 2, ix, h / 2, LINE_WIDTH);
            painter.draw_line(color, ix, h / 2, cx, h, LINE_WIDTH);
        } else {
            painter.draw_line(color, my_x, h / 2, cx, h, LINE_WIDTH);
        }
        max_center = max_center.max(cx);
    }

    let dot_x = my_x - dot / 2 - 1;
    let dot_y = (h - dot) / 2;

    if commit.has_children {
        painter.draw_line(my_color, my_x, 0, my_x, dot_y, LINE_WIDTH);
    }

    if commit.boundary {
        painter.draw_boundary_dot(dot_x, dot_y, dot, dot);
    } else {
        painter.draw_commit_dot(dot_x, dot_y, dot, dot);
    }

    let mut text_x = (max_center + LANE_WIDTH / 2).max(dot_x + dot) + 8;
    for name in &commit.refs {
        text_x += painter.draw_label(text_x + dot, h / 2, name);
    }

    let ref_gap = 2 * commit.refs.len() as i32;
    painter.draw_text(&commit.short_message, text_x + dot + ref_gap, h / 2);
}
