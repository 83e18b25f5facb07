//! Immediate-mode 2D drawing surface
//!
//! Coordinates are logical pixels with the origin at the top-left corner and y pointing
//! down. Backends decide how primitives become pixels; `RecordingCanvas` just keeps them.

use crate::color::Color;
use glam::Vec2;

pub trait Canvas {
    /// Surface size in logical pixels
    fn size(&self) -> Vec2;

    /// Erase everything inside the rectangle
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);

    /// Filled circle (`arc` + `fill`)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Single stroked segment (`moveTo` + `lineTo` + `stroke`)
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    /// Filled convex quad, corners in drawing order
    fn fill_quad(&mut self, corners: [Vec2; 4], color: Color);

    fn width(&self) -> f32 {
        self.size().x
    }

    fn height(&self) -> f32 {
        self.size().y
    }

    /// Clear the whole surface
    fn clear(&mut self) {
        let size = self.size();
        self.clear_rect(Vec2::ZERO, size);
    }

    /// Axis-aligned filled rectangle
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Color) {
        let corners = [min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)];
        self.fill_quad(corners, color);
    }
}

/// A primitive captured by `RecordingCanvas`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        origin: Vec2,
        size: Vec2,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Quad {
        corners: [Vec2; 4],
        color: Color,
    },
}

/// Canvas that records draw calls instead of rasterizing them
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    size: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn quads(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Quad { .. }))
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        self.commands.push(DrawCommand::Clear { origin, size });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_quad(&mut self, corners: [Vec2; 4], color: Color) {
        self.commands.push(DrawCommand::Quad { corners, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_covers_whole_surface() {
        let mut canvas = RecordingCanvas::new(320.0, 200.0);
        canvas.clear();
        assert_eq!(
            canvas.commands,
            vec![DrawCommand::Clear {
                origin: Vec2::ZERO,
                size: Vec2::new(320.0, 200.0)
            }]
        );
    }

    #[test]
    fn test_fill_rect_is_a_quad() {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        let red = Color::rgb(1.0, 0.0, 0.0);
        canvas.fill_rect(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), red);

        let quads: Vec<_> = canvas.quads().collect();
        assert_eq!(quads.len(), 1);
        match quads[0] {
            DrawCommand::Quad { corners, .. } => {
                assert_eq!(corners[0], Vec2::new(10.0, 20.0));
                assert_eq!(corners[2], Vec2::new(30.0, 40.0));
            }
            _ => unreachable!(),
        }
    }
}
