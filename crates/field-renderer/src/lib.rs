//! # Field Renderer
//!
//! Turns `Canvas` draw calls into triangles and draws them with wgpu.

pub mod error;
pub mod mesh;
pub mod renderer;
pub mod tessellate;
mod vertex;

pub use error::*;
pub use mesh::*;
pub use renderer::*;
pub use tessellate::*;
