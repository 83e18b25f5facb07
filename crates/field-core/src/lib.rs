//! # Field Core
//!
//! Particle records, pointer state, forces and the drawing-surface abstraction
//! shared by the ambient particle background and the page effects.

pub mod canvas;
pub mod color;
pub mod constants;
pub mod forces;
pub mod particle;
pub mod pointer;
pub mod theme;

pub use canvas::*;
pub use color::Color;
pub use constants::*;
pub use forces::*;
pub use particle::*;
pub use pointer::*;
pub use theme::*;
