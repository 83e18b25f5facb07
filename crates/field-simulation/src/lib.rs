//! # Field Simulation
//!
//! CPU particle field with pointer repulsion and proximity lines, plus the
//! self-rescheduling loop that drives it one frame at a time.

pub mod frame_loop;
pub mod params;
pub mod simulation;

pub use frame_loop::*;
pub use params::*;
pub use simulation::*;
