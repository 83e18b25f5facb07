//! Tuning constants for the ambient particle field
//!
//! All distances are logical pixels. These are the defaults `FieldParams` starts from.

/// Surface area (px²) that accounts for one particle
pub const AREA_PER_PARTICLE: f32 = 9000.0;

/// Radius around the pointer inside which particles are pushed away
pub const INTERACTION_RADIUS: f32 = 150.0;

/// Fraction of the offset to base position removed each frame outside the radius
pub const RETURN_RATE: f32 = 0.1;

/// Largest drift speed per axis (px per frame)
pub const MAX_DRIFT: f32 = 0.25;

/// Particle radius range: `MIN_SIZE..MIN_SIZE + SIZE_SPREAD`
pub const MIN_SIZE: f32 = 1.0;
pub const SIZE_SPREAD: f32 = 2.0;

/// Repulsion strength range: `MIN_DENSITY..MIN_DENSITY + DENSITY_SPREAD`
pub const MIN_DENSITY: f32 = 1.0;
pub const DENSITY_SPREAD: f32 = 30.0;

/// Connection threshold is `width * height / CONNECT_AREA_DIVISOR` (squared px)
pub const CONNECT_AREA_DIVISOR: f32 = 100.0;

/// Squared distance at which a connecting line fades to fully transparent
pub const OPACITY_FALLOFF: f32 = 20000.0;

/// Stroke width of connecting lines
pub const LINE_WIDTH: f32 = 1.0;

/// Alpha of particle dots
pub const PARTICLE_ALPHA: f32 = 0.5;

/// Serialized `--text-color` value of the dark page theme
pub const DARK_TEXT_COLOR: &str = "#f0f0f0";
