//! `Canvas` backend that tessellates draw calls into a triangle mesh
//!
//! Geometry only: the mesh is uploaded and drawn by `CanvasRenderer`. Primitives that
//! would not produce visible pixels (transparent, zero radius, zero length) are dropped.

use crate::mesh::Mesh;
use field_core::{Canvas, Color};
use glam::Vec2;
use std::f32::consts::TAU;

const MIN_CIRCLE_SEGMENTS: u32 = 8;
const MAX_CIRCLE_SEGMENTS: u32 = 48;

/// Number of rim vertices for a circle of the given radius
fn circle_segments(radius: f32) -> u32 {
    ((radius * 4.0).ceil() as u32).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}

pub struct MeshCanvas {
    size: Vec2,
    mesh: Mesh,
    /// Color used to paint over partial clears
    background: Color,
}

impl MeshCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            mesh: Mesh::with_capacity(4096, 8192),
            background: Color::transparent(),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

impl Canvas for MeshCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        let covers_surface = origin.x <= 0.0
            && origin.y <= 0.0
            && origin.x + size.x >= self.size.x
            && origin.y + size.y >= self.size.y;

        if covers_surface {
            // The render pass clears to the background color
            self.mesh.clear();
        } else if self.background.is_visible() {
            let background = self.background;
            self.fill_rect(origin, origin + size, background);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !color.is_visible() || radius <= 0.0 {
            return;
        }

        let segments = circle_segments(radius);
        let step = TAU / segments as f32;
        let rim = (0..segments).map(|i| center + Vec2::from_angle(step * i as f32) * radius);
        self.mesh.push_fan(center, rim, color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if !color.is_visible() || width <= 0.0 {
            return;
        }

        let direction = to - from;
        let length = direction.length();
        if length <= f32::EPSILON {
            return;
        }

        let half = direction.perp() / length * (width * 0.5);
        self.mesh
            .push_quad([from + half, to + half, to - half, from - half], color);
    }

    fn fill_quad(&mut self, corners: [Vec2; 4], color: Color) {
        if color.is_visible() {
            self.mesh.push_quad(corners, color);
        }
    }
}
