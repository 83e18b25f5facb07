//! # Page Effects
//!
//! Scroll-triggered reveal and 3D hover tilt over a retained document of page elements.

pub mod element;
pub mod reveal;
pub mod tilt;
pub mod transition;

pub use element::*;
pub use reveal::*;
pub use tilt::*;
pub use transition::*;
