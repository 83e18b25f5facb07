//! Field parameters for runtime tuning

use field_core::{
    ParticleSpawn, AREA_PER_PARTICLE, CONNECT_AREA_DIVISOR, INTERACTION_RADIUS, LINE_WIDTH,
    OPACITY_FALLOFF, PARTICLE_ALPHA, RETURN_RATE,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldParams {
    // Population: one particle per `area_per_particle` px²
    pub area_per_particle: f32,
    pub spawn: ParticleSpawn,

    // Pointer interaction
    pub interaction_radius: f32,
    pub return_rate: f32,

    // Connections: threshold is width * height / connect_area_divisor (squared px),
    // alpha is 1 - d² / opacity_falloff
    pub connect_area_divisor: f32,
    pub opacity_falloff: f32,
    pub line_width: f32,
    /// Also visit (i, i) pairs, which always produce a zero-length segment
    pub connect_self_pairs: bool,

    pub particle_alpha: f32,
}

impl FieldParams {
    /// Squared connection distance for a surface of the given size
    pub fn connect_threshold(&self, width: f32, height: f32) -> f32 {
        width * height / self.connect_area_divisor
    }

    /// Line alpha for a squared distance, clamped to [0, 1]
    pub fn line_opacity(&self, distance_sq: f32) -> f32 {
        (1.0 - distance_sq / self.opacity_falloff).clamp(0.0, 1.0)
    }
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            area_per_particle: AREA_PER_PARTICLE,
            spawn: ParticleSpawn::default(),
            interaction_radius: INTERACTION_RADIUS,
            return_rate: RETURN_RATE,
            connect_area_divisor: CONNECT_AREA_DIVISOR,
            opacity_falloff: OPACITY_FALLOFF,
            line_width: LINE_WIDTH,
            connect_self_pairs: true,
            particle_alpha: PARTICLE_ALPHA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_threshold_scales_with_area() {
        let params = FieldParams::default();
        assert_eq!(params.connect_threshold(1000.0, 900.0), 9000.0);
    }

    #[test]
    fn test_line_opacity_is_clamped() {
        let params = FieldParams::default();
        assert_eq!(params.line_opacity(0.0), 1.0);
        assert_eq!(params.line_opacity(10000.0), 0.5);
        assert_eq!(params.line_opacity(25000.0), 0.0);
        assert_eq!(params.line_opacity(-5.0), 1.0);
    }
}
