use crate::plot::{PlotCommit, PlotLane};
use crate::refs::classify;
use crate::renderer::{DisplayList, PlotPainter, RenderConfig, Stroke, Surface, paint_commit};
use crate::ui::{Color, Point, Rect, TextMeasure, TextStyle, theme};

/// Legend inputs. Each carries its namespace twice: the classifier strips the
/// first copy, so the swatch shows the namespace token itself.
pub const LEGEND_REFS: [&str; 4] = [
    "refs/tags/refs/tags/",
    "refs/heads/refs/heads/",
    "refs/remotes/refs/remotes/",
    "other",
];

/// Draws plotted commits onto any [`Surface`].
///
/// The renderer keeps only its configuration and text metrics. The surface
/// and the running width live in a [`RenderPass`] that exists for one call,
/// so a single renderer can be shared by every row of a view.
pub struct PlotRenderer<M> {
    config: RenderConfig,
    metrics: M,
}

impl<M: TextMeasure> PlotRenderer<M> {
    pub fn new(config: RenderConfig, metrics: M) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Draw one commit row and return the width it used. `None` draws nothing
    /// and returns 0.
    pub fn draw_commit<S: Surface + ?Sized>(
        &self,
        commit: Option<&PlotCommit>,
        surface: &mut S,
    ) -> f32 {
        let Some(commit) = commit else {
            return 0.0;
        };
        let mut pass = RenderPass::new(self, surface);
        paint_commit(&mut pass, commit, self.config.row_height());
        tracing::trace!(row = commit.row, width = pass.max_x, "drew commit");
        pass.max_x
    }

    /// One swatch per ref namespace, left to right at y = 0
    pub fn build_legend(&self) -> DisplayList {
        let mut legend = DisplayList::new();
        let mut pass = RenderPass::new(self, &mut legend);
        let mut x = 0;
        for name in LEGEND_REFS {
            x += pass.draw_label_block(x, 0, name);
        }
        legend
    }
}

/// State of a single draw call: the bound surface and the widest x reached
struct RenderPass<'a, M, S: ?Sized> {
    renderer: &'a PlotRenderer<M>,
    surface: &'a mut S,
    max_x: f32,
}

impl<'a, M: TextMeasure, S: Surface + ?Sized> RenderPass<'a, M, S> {
    fn new(renderer: &'a PlotRenderer<M>, surface: &'a mut S) -> Self {
        Self {
            renderer,
            surface,
            max_x: 0.0,
        }
    }

    fn push_max_x(&mut self, x: f32) {
        if self.max_x < x {
            self.max_x = x;
        }
    }

    fn draw_label_block(&mut self, x: i32, y: i32, ref_name: &str) -> i32 {
        let renderer = self.renderer;
        let config = &renderer.config;
        let (category, display) = classify(ref_name);

        let font_size = config.font_size();
        let style = TextStyle::new(font_size, theme::TEXT)
            .with_max_width(config.label_max_width())
            .with_max_height(config.row_height() as f32);
        let extent = renderer.metrics.measure(display, &style);

        // y is the center; the background overhangs the text by one pixel
        let origin = Point::new(x as f32 - 1.0, y as f32 - font_size / 2.0 - 1.0);
        let end = Point::new(origin.x + extent.width + 2.0, origin.y + extent.height + 2.0);
        let label_width = (end.x - origin.x + 1.0) as i32;

        self.surface.draw_rectangle(
            category.fill_color(),
            config.label_outline(),
            Rect::from_points(origin, end),
        );
        self.surface.draw_text(display, &style, origin.offset(1.0, 1.0));
        self.push_max_x(end.x);

        label_width + config.label_margin()
    }
}

impl<M: TextMeasure, S: Surface + ?Sized> PlotPainter for RenderPass<'_, M, S> {
    type Color = Color;

    fn lane_color(&self, lane: PlotLane) -> Color {
        self.renderer.config.lane_coloring().color(lane)
    }

    fn draw_line(&mut self, color: Color, x1: i32, y1: i32, x2: i32, y2: i32, width: i32) {
        self.surface.draw_line(
            Stroke::new(color, width as f32),
            Point::new(x1 as f32, y1 as f32),
            Point::new(x2 as f32, y2 as f32),
        );
        self.push_max_x(x1.max(x2) as f32);
    }

    fn draw_commit_dot(&mut self, x: i32, y: i32, w: i32, h: i32) {
        draw_dot(&mut *self.surface, theme::COMMIT_DOT, x, y, w, h);
    }

    fn draw_boundary_dot(&mut self, x: i32, y: i32, w: i32, h: i32) {
        draw_dot(&mut *self.surface, theme::BOUNDARY_DOT, x, y, w, h);
    }

    fn draw_label(&mut self, x: i32, y: i32, ref_name: &str) -> i32 {
        self.draw_label_block(x, y, ref_name)
    }

    fn draw_text(&mut self, msg: &str, x: i32, y: i32) {
        let renderer = self.renderer;
        let config = &renderer.config;
        let font_size = config.font_size();
        let style = TextStyle::new(font_size, theme::TEXT)
            .with_max_width(config.text_max_width())
            .with_max_height(config.row_height() as f32);
        let extent = renderer.metrics.measure(msg, &style);

        self.surface
            .draw_text(msg, &style, Point::new(x as f32, y as f32 - font_size / 2.0));
        self.push_max_x(x as f32 + extent.width);
    }
}

fn draw_dot<S: Surface + ?Sized>(surface: &mut S, fill: Color, x: i32, y: i32, w: i32, h: i32) {
    let rx = (w / 2) as f32;
    let ry = (h / 2) as f32;
    surface.draw_ellipse(fill, None, Point::new(x as f32 + rx, y as f32 + ry), rx, ry);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refs::RefCategory;
    use crate::renderer::{DrawCommand, LaneColoring};
    use crate::ui::MonospaceMetrics;
    use git2::Oid;

    fn renderer() -> PlotRenderer<MonospaceMetrics> {
        PlotRenderer::new(RenderConfig::new(20), MonospaceMetrics::default())
    }

    fn label_texts(list: &DisplayList) -> Vec<String> {
        list.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn right_edge(command: &DrawCommand, metrics: &MonospaceMetrics) -> f32 {
        match command {
            DrawCommand::Rectangle { rect, .. } => rect.right(),
            DrawCommand::Text { text, style, origin } => {
                origin.x + metrics.measure(text, style).width
            }
            DrawCommand::Line { from, to, .. } => from.x.max(to.x),
            DrawCommand::Ellipse { center, radius_x, .. } => center.x + radius_x,
        }
    }

    #[test]
    fn test_absent_commit_draws_nothing() {
        let r = renderer();
        let mut list = DisplayList::new();
        assert_eq!(r.draw_commit(None, &mut list), 0.0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_label_block_geometry() {
        let r = renderer();
        let mut list = DisplayList::new();
        let advance = RenderPass::new(&r, &mut list).draw_label_block(0, 0, "refs/heads/main");

        // "main" measures 20x10 at font size 10; rect spans -1..21 and -6..6
        assert_eq!(advance, 23 + 2);
        match &list.commands()[0] {
            DrawCommand::Rectangle { fill, outline, rect } => {
                assert_eq!(*fill, RefCategory::Head.fill_color());
                assert_eq!(*outline, Some(Stroke::new(theme::LABEL_OUTLINE, 1.0)));
                assert_eq!(*rect, Rect::new(-1.0, -6.0, 22.0, 12.0));
            }
            other => panic!("expected rectangle, got {other:?}"),
        }
        match &list.commands()[1] {
            DrawCommand::Text { text, origin, style } => {
                assert_eq!(text, "main");
                assert_eq!(*origin, Point::new(0.0, -5.0));
                assert_eq!(style.max_width, 0.0);
                assert_eq!(style.max_height, 20.0);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_other_label_keeps_name_and_color() {
        let r = renderer();
        let mut list = DisplayList::new();
        RenderPass::new(&r, &mut list).draw_label_block(10, 10, "feature/x");
        match &list.commands()[0] {
            DrawCommand::Rectangle { fill, .. } => assert_eq!(*fill, theme::LABEL_OTHER),
            other => panic!("expected rectangle, got {other:?}"),
        }
        assert_eq!(label_texts(&list), vec!["feature/x".to_string()]);
    }

    #[test]
    fn test_legend() {
        let r = renderer();
        let legend = r.build_legend();

        let fills: Vec<Color> = legend
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rectangle { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            vec![
                RefCategory::Tag.fill_color(),
                RefCategory::Head.fill_color(),
                RefCategory::Remote.fill_color(),
                RefCategory::Other.fill_color(),
            ]
        );
        assert_eq!(
            label_texts(&legend),
            vec!["refs/tags/", "refs/heads/", "refs/remotes/", "other"]
        );

        // Swatches advance by their width plus margin: 10 chars -> 50 + 3 + 2
        let xs: Vec<f32> = legend
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { origin, .. } => Some(origin.x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![0.0, 55.0, 115.0, 185.0]);
    }

    #[test]
    fn test_renderer_can_be_shared_across_threads() {
        fn assert_shareable<T: Send + Sync>() {}
        assert_shareable::<PlotRenderer<MonospaceMetrics>>();
    }

    #[test]
    fn test_legend_is_idempotent() {
        let r = renderer();
        assert_eq!(r.build_legend(), r.build_legend());
    }

    #[test]
    fn test_width_is_max_right_edge() {
        let r = renderer();
        let metrics = MonospaceMetrics::default();
        let mut c = PlotCommit::new(Oid::zero(), "add renderer");
        c.lane = PlotLane::new(1);
        c.passing_lanes = vec![PlotLane::new(0)];
        c.parent_lanes = vec![PlotLane::new(1)];
        c.has_children = true;
        c.refs = vec!["refs/tags/v1.0".to_string(), "refs/remotes/origin/main".to_string()];

        let mut list = DisplayList::new();
        let width = r.draw_commit(Some(&c), &mut list);

        let max_edge = list
            .commands()
            .iter()
            .map(|cmd| right_edge(cmd, &metrics))
            .fold(0.0, f32::max);
        assert!((width - max_edge).abs() < 0.01);

        // Caption comes last and is the rightmost primitive
        match list.commands().last() {
            Some(DrawCommand::Text { text, origin, .. }) => {
                assert_eq!(text, "add renderer");
                assert!((width - (origin.x + 60.0)).abs() < 0.01);
            }
            other => panic!("expected caption, got {other:?}"),
        }
    }

    #[test]
    fn test_calls_do_not_leak_state() {
        let r = renderer();
        let mut wide = PlotCommit::new(Oid::zero(), "a much longer subject line than the next one");
        wide.refs = vec!["refs/heads/a-very-long-branch-name".to_string()];
        let narrow = PlotCommit::new(Oid::zero(), "short");

        let fresh = r.draw_commit(Some(&narrow), &mut DisplayList::new());
        let first = r.draw_commit(Some(&wide), &mut DisplayList::new());
        let second = r.draw_commit(Some(&narrow), &mut DisplayList::new());

        assert!(first > second);
        assert_eq!(second, fresh);
    }

    #[test]
    fn test_dots_use_distinct_colors() {
        let r = renderer();
        let mut regular = PlotCommit::new(Oid::zero(), "");
        let mut list = DisplayList::new();
        r.draw_commit(Some(&regular), &mut list);
        regular.boundary = true;
        r.draw_commit(Some(&regular), &mut list);

        let fills: Vec<Color> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Ellipse { fill, center, radius_x, radius_y, .. } => {
                    assert_eq!(*center, Point::new(8.0, 10.0));
                    assert_eq!((*radius_x, *radius_y), (4.0, 4.0));
                    Some(*fill)
                }
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![theme::COMMIT_DOT, theme::BOUNDARY_DOT]);
    }

    #[test]
    fn test_lane_palette_colors_lines() {
        let config = RenderConfig::new(20).with_lane_coloring(LaneColoring::palette());
        let r = PlotRenderer::new(config, MonospaceMetrics::default());
        let mut c = PlotCommit::new(Oid::zero(), "");
        c.passing_lanes = vec![PlotLane::new(1)];

        let mut list = DisplayList::new();
        r.draw_commit(Some(&c), &mut list);
        match &list.commands()[0] {
            DrawCommand::Line { stroke, .. } => {
                assert_eq!(stroke.color, theme::LANE_COLORS[1]);
                assert_eq!(stroke.width, 2.0);
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn test_lines_raise_width() {
        let r = renderer();
        let mut list = DisplayList::new();
        let mut pass = RenderPass::new(&r, &mut list);

        // Label "main" at x 0 ends at 21
        pass.draw_label_block(0, 0, "refs/heads/main");
        assert_eq!(pass.max_x, 21.0);

        pass.draw_line(theme::LANE, 5, 0, 40, 20, 2);
        assert_eq!(pass.max_x, 40.0);

        // The larger endpoint counts whichever end it is
        pass.draw_line(theme::LANE, 50, 0, 30, 20, 2);
        assert_eq!(pass.max_x, 50.0);

        // Lines left of the running width leave it alone
        pass.draw_line(theme::LANE, 0, 0, 10, 20, 2);
        assert_eq!(pass.max_x, 50.0);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_label_max_width_wraps() {
        let config = RenderConfig::new(40).with_label_max_width(30.0);
        let r = PlotRenderer::new(config, MonospaceMetrics::default());
        let mut list = DisplayList::new();
        // font 20: 10px per char, "abcdef" wraps into two 30px lines
        let advance = RenderPass::new(&r, &mut list).draw_label_block(0, 20, "abcdef");
        assert_eq!(advance, 33 + 2);
        match &list.commands()[0] {
            DrawCommand::Rectangle { rect, .. } => assert_eq!(rect.height, 42.0),
            other => panic!("expected rectangle, got {other:?}"),
        }
    }
}
