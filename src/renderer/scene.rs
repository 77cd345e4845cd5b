//! Scene drawing
//!
//! Stateless functions that turn points and draw commands into primitive
//! calls on a `DrawSurface`. Nothing here reads the animation state: every
//! input arrives as an explicit parameter.

use glam::Vec2;

use super::shapes::{self, CIRCLE_SEGMENTS};
use super::vertex::{Vertex, colors};
use crate::settings::AnimationConfig;
use crate::sim::{DrawCommand, Frame, Point, SceneGeometry};

pub type Color = [f32; 4];

/// Anything the scene can be drawn onto
pub trait DrawSurface {
    /// Erase the previous frame
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);
}

/// Colors and sizes for scene elements
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    pub background: Color,
    pub point: Color,
    pub line: Color,
    pub point_radius: f32,
    pub line_width: f32,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self::from_config(&AnimationConfig::default())
    }
}

impl SceneStyle {
    pub fn from_config(config: &AnimationConfig) -> Self {
        Self {
            background: colors::BACKGROUND,
            point: colors::POINT,
            line: colors::LINE,
            point_radius: config.point_radius,
            line_width: config.line_width,
        }
    }
}

/// Fill the scene disk
pub fn render_background(surface: &mut impl DrawSurface, geometry: &SceneGeometry, style: &SceneStyle) {
    surface.fill_circle(geometry.center, geometry.radius, style.background);
}

/// Draw a point at its position for `phase`
pub fn render_point(
    surface: &mut impl DrawSurface,
    point: &Point,
    phase: f32,
    geometry: &SceneGeometry,
    style: &SceneStyle,
) {
    surface.fill_circle(point.position(phase, geometry), style.point_radius, style.point);
}

/// Draw the diameter a point oscillates along
pub fn render_diameter_line(
    surface: &mut impl DrawSurface,
    point: &Point,
    geometry: &SceneGeometry,
    style: &SceneStyle,
) {
    let (from, to) = point.axis_endpoints(geometry);
    surface.stroke_line(from, to, style.line_width, style.line);
}

/// Execute a frame's commands in order
pub fn render_frame(
    surface: &mut impl DrawSurface,
    frame: &Frame,
    geometry: &SceneGeometry,
    style: &SceneStyle,
) {
    for command in &frame.commands {
        match command {
            DrawCommand::Clear => surface.clear(),
            DrawCommand::Background => render_background(surface, geometry, style),
            DrawCommand::DiameterLine(point) => render_diameter_line(surface, point, geometry, style),
            DrawCommand::Point { point, phase } => render_point(surface, point, *phase, geometry, style),
        }
    }
}

/// Tessellates draw calls into a triangle list for the GPU pipeline
#[derive(Debug, Default)]
pub struct VertexSurface {
    vertices: Vec<Vertex>,
}

impl VertexSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl DrawSurface for VertexSurface {
    fn clear(&mut self) {
        self.vertices.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.vertices
            .extend(shapes::circle(center, radius, color, CIRCLE_SEGMENTS));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.vertices.extend(shapes::line(from, to, width, color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{AnimationState, TickInput, tick};

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Clear,
        Circle(Vec2, f32, Color),
        Line(Vec2, Vec2, f32, Color),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl DrawSurface for Recorder {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ops.push(Op::Circle(center, radius, color));
        }

        fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
            self.ops.push(Op::Line(from, to, width, color));
        }
    }

    #[test]
    fn test_background_is_scene_disk() {
        let geometry = SceneGeometry::new(Vec2::new(250.0, 250.0), 220.0);
        let mut surface = Recorder::default();
        render_background(&mut surface, &geometry, &SceneStyle::default());
        assert_eq!(
            surface.ops,
            vec![Op::Circle(Vec2::new(250.0, 250.0), 220.0, colors::BACKGROUND)]
        );
    }

    #[test]
    fn test_diameter_line_spans_disk() {
        let geometry = SceneGeometry::default();
        let style = SceneStyle::default();
        let mut surface = Recorder::default();
        render_diameter_line(&mut surface, &Point::new(0.0), &geometry, &style);

        match &surface.ops[..] {
            [Op::Line(from, to, width, color)] => {
                assert!((*from - Vec2::new(-220.0, 0.0)).length() < 1e-4);
                assert!((*to - Vec2::new(220.0, 0.0)).length() < 1e-4);
                assert_eq!(*width, style.line_width);
                assert_eq!(*color, colors::LINE);
            }
            other => panic!("unexpected ops {:?}", other),
        }
    }

    #[test]
    fn test_phase2_frame_order() {
        let config = AnimationConfig {
            phase1_frames: 0,
            ..Default::default()
        };
        let mut state = AnimationState::new();
        state.start(&config);
        // First frame flips straight into phase 2
        tick(&mut state, &TickInput::default(), &config);
        state.visible_line_count = 4;
        let frame = tick(&mut state, &TickInput::with_speed(0.1), &config)
            .frame
            .unwrap();

        let geometry = SceneGeometry::default();
        let mut surface = Recorder::default();
        render_frame(&mut surface, &frame, &geometry, &SceneStyle::default());

        assert_eq!(surface.ops[0], Op::Clear);
        assert!(matches!(surface.ops[1], Op::Circle(_, r, c) if r == 220.0 && c == colors::BACKGROUND));
        let body = &surface.ops[2..];
        assert_eq!(body.len(), 8);
        assert!(body[..4].iter().all(|op| matches!(op, Op::Line(..))));
        assert!(body[4..].iter().all(|op| matches!(op, Op::Circle(_, r, c) if *r == 12.0 && *c == colors::POINT)));
    }

    #[test]
    fn test_vertex_surface_clear_discards_previous_frame() {
        let geometry = SceneGeometry::default();
        let style = SceneStyle::default();
        let mut surface = VertexSurface::new();

        let mut frame = crate::sim::background_frame();
        frame.push(DrawCommand::DiameterLine(Point::new(0.3)));
        render_frame(&mut surface, &frame, &geometry, &style);
        let first = surface.vertices().len();
        assert_eq!(first, (CIRCLE_SEGMENTS * 3) as usize + 6);

        render_frame(&mut surface, &crate::sim::background_frame(), &geometry, &style);
        assert_eq!(surface.vertices().len(), (CIRCLE_SEGMENTS * 3) as usize);
    }
}
