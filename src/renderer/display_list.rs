use crate::renderer::{Stroke, Surface};
use crate::ui::{Color, Point, Rect, TextMeasure, TextStyle};

/// One recorded primitive
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Rectangle {
        fill: Color,
        outline: Option<Stroke>,
        rect: Rect,
    },
    Text {
        text: String,
        style: TextStyle,
        origin: Point,
    },
    Line {
        stroke: Stroke,
        from: Point,
        to: Point,
    },
    Ellipse {
        fill: Color,
        outline: Option<Stroke>,
        center: Point,
        radius_x: f32,
        radius_y: f32,
    },
}

impl DrawCommand {
    /// Area covered by the primitive; text is sized with `metrics`
    pub fn bounds(&self, metrics: &dyn TextMeasure) -> Rect {
        match self {
            DrawCommand::Rectangle { outline, rect, .. } => {
                let half = outline.map_or(0.0, |s| s.width / 2.0);
                Rect::new(
                    rect.x - half,
                    rect.y - half,
                    rect.width + 2.0 * half,
                    rect.height + 2.0 * half,
                )
            }
            DrawCommand::Text { text, style, origin } => {
                let extent = metrics.measure(text, style);
                Rect::new(origin.x, origin.y, extent.width, extent.height)
            }
            DrawCommand::Line { stroke, from, to } => {
                let half = stroke.width / 2.0;
                let r = Rect::from_points(*from, *to);
                Rect::new(r.x - half, r.y - half, r.width + stroke.width, r.height + stroke.width)
            }
            DrawCommand::Ellipse {
                outline,
                center,
                radius_x,
                radius_y,
                ..
            } => {
                let half = outline.map_or(0.0, |s| s.width / 2.0);
                let rx = radius_x + half;
                let ry = radius_y + half;
                Rect::new(center.x - rx, center.y - ry, 2.0 * rx, 2.0 * ry)
            }
        }
    }
}

/// A finished drawing: the primitives issued against it, in order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Union of every primitive's bounds, `None` when nothing was drawn
    pub fn bounds(&self, metrics: &dyn TextMeasure) -> Option<Rect> {
        self.commands
            .iter()
            .map(|c| c.bounds(metrics))
            .reduce(|a, b| a.union(&b))
    }

    /// Issue the recorded primitives against another surface
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Rectangle { fill, outline, rect } => {
                    surface.draw_rectangle(*fill, *outline, *rect)
                }
                DrawCommand::Text { text, style, origin } => {
                    surface.draw_text(text, style, *origin)
                }
                DrawCommand::Line { stroke, from, to } => surface.draw_line(*stroke, *from, *to),
                DrawCommand::Ellipse {
                    fill,
                    outline,
                    center,
                    radius_x,
                    radius_y,
                } => surface.draw_ellipse(*fill, *outline, *center, *radius_x, *radius_y),
            }
        }
    }
}

impl Surface for DisplayList {
    fn draw_rectangle(&mut self, fill: Color, outline: Option<Stroke>, rect: Rect) {
        self.commands.push(DrawCommand::Rectangle { fill, outline, rect });
    }

    fn draw_text(&mut self, text: &str, style: &TextStyle, origin: Point) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            style: *style,
            origin,
        });
    }

    fn draw_line(&mut self, stroke: Stroke, from: Point, to: Point) {
        self.commands.push(DrawCommand::Line { stroke, from, to });
    }

    fn draw_ellipse(
        &mut self,
        fill: Color,
        outline: Option<Stroke>,
        center: Point,
        radius_x: f32,
        radius_y: f32,
    ) {
        self.commands.push(DrawCommand::Ellipse {
            fill,
            outline,
            center,
            radius_x,
            radius_y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MonospaceMetrics;

    fn sample() -> DisplayList {
        let mut list = DisplayList::new();
        list.draw_rectangle(Color::default(), None, Rect::new(0.0, 0.0, 10.0, 4.0));
        list.draw_text("abc", &TextStyle::new(10.0, Color::default()), Point::new(2.0, 1.0));
        list.draw_line(
            Stroke::new(Color::default(), 2.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 15.0),
        );
        list.draw_ellipse(Color::default(), None, Point::new(30.0, 10.0), 4.0, 4.0);
        list
    }

    #[test]
    fn test_records_in_order() {
        let list = sample();
        assert_eq!(list.len(), 4);
        assert!(matches!(list.commands()[0], DrawCommand::Rectangle { .. }));
        assert!(matches!(list.commands()[1], DrawCommand::Text { .. }));
        assert!(matches!(list.commands()[2], DrawCommand::Line { .. }));
        assert!(matches!(list.commands()[3], DrawCommand::Ellipse { .. }));
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let list = sample();
        let mut copy = DisplayList::new();
        list.replay(&mut copy);
        assert_eq!(copy, list);
    }

    #[test]
    fn test_bounds() {
        let list = sample();
        let bounds = list.bounds(&MonospaceMetrics::default()).unwrap();
        // Text spans 2..17, the line reaches 16 in y, the ellipse 26..34
        assert!((bounds.x - 0.0).abs() < 0.01);
        assert!((bounds.y - 0.0).abs() < 0.01);
        assert!((bounds.right() - 34.0).abs() < 0.01);
        assert!((bounds.bottom() - 16.0).abs() < 0.01);

        assert!(DisplayList::new().bounds(&MonospaceMetrics::default()).is_none());
    }
}
