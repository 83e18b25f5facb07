//! Pointer tracking

use crate::constants::INTERACTION_RADIUS;
use glam::Vec2;

/// Last known pointer position and the radius of its repulsion field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// `None` until the first cursor move (or after the cursor leaves the window)
    pub position: Option<Vec2>,
    pub radius: f32,
}

impl Pointer {
    pub fn new(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = Some(position);
    }

    pub fn clear(&mut self) {
        self.position = None;
    }
}

impl Default for Pointer {
    fn default() -> Self {
        Self::new(INTERACTION_RADIUS)
    }
}
