//! Particle records and the per-frame update rule

use crate::constants::*;
use crate::forces::{bounce, repulsion, return_to_base};
use crate::pointer::Pointer;
use glam::Vec2;
use rand::Rng;

/// Ranges particles are sampled from when a field is (re)built
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpawn {
    /// Each drift component is uniform in `[-max_drift, max_drift)`
    pub max_drift: f32,
    pub min_size: f32,
    pub size_spread: f32,
    pub min_density: f32,
    pub density_spread: f32,
}

impl Default for ParticleSpawn {
    fn default() -> Self {
        Self {
            max_drift: MAX_DRIFT,
            min_size: MIN_SIZE,
            size_spread: SIZE_SPREAD,
            min_density: MIN_DENSITY,
            density_spread: DENSITY_SPREAD,
        }
    }
}

/// A single background particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Current position
    pub position: Vec2,
    /// Rest position the particle drifts back to
    pub base: Vec2,
    /// Constant drift added every frame (sign flips on bounce)
    pub velocity: Vec2,
    /// Radius of the drawn dot
    pub size: f32,
    /// Scales how hard the pointer pushes this particle
    pub density: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, size: f32, density: f32) -> Self {
        Self {
            position,
            base: position,
            velocity,
            size,
            density,
        }
    }

    /// Sample a particle anywhere inside `[0, extent)`
    pub fn random<R: Rng + ?Sized>(rng: &mut R, extent: Vec2, spawn: &ParticleSpawn) -> Self {
        let position = Vec2::new(
            rng.random::<f32>() * extent.x,
            rng.random::<f32>() * extent.y,
        );
        let velocity = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * spawn.max_drift,
            (rng.random::<f32>() - 0.5) * 2.0 * spawn.max_drift,
        );
        let size = rng.random::<f32>() * spawn.size_spread + spawn.min_size;
        let density = rng.random::<f32>() * spawn.density_spread + spawn.min_density;

        Self::new(position, velocity, size, density)
    }

    /// Advance one frame.
    ///
    /// Inside the pointer radius the particle is pushed away; otherwise (or with no pointer)
    /// it relaxes toward `base` by `return_rate`. Drift is then applied and the velocity
    /// reflected on any axis that left `[0, extent]`.
    pub fn update(&mut self, pointer: &Pointer, extent: Vec2, return_rate: f32) {
        let radius = pointer.radius;
        let push = pointer
            .position
            .and_then(|p| repulsion(self.position, p, radius, self.density));

        match push {
            Some(push) => self.position += push,
            None => self.position += return_to_base(self.position, self.base, return_rate),
        }

        self.position += self.velocity;
        self.velocity = bounce(self.position, self.velocity, extent);
    }

    /// Distance from rest position
    pub fn displacement(&self) -> f32 {
        self.position.distance(self.base)
    }
}

/// Number of particles for a surface of the given size: `floor(width * height / area_per_particle)`
pub fn particle_count(width: f32, height: f32, area_per_particle: f32) -> usize {
    // f32 products lose integer precision past 2^24 px²
    let count = (f64::from(width) * f64::from(height) / f64::from(area_per_particle)).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_particle_count_matches_area() {
        assert_eq!(particle_count(1000.0, 900.0, AREA_PER_PARTICLE), 100);
        assert_eq!(particle_count(1920.0, 1080.0, AREA_PER_PARTICLE), 230);
        assert_eq!(particle_count(89.0, 100.0, AREA_PER_PARTICLE), 0);
    }

    #[test]
    fn test_particle_count_on_large_surfaces() {
        // 4199 * 4201 = 17_639_999, one short of 1960 * 9000
        assert_eq!(particle_count(4199.0, 4201.0, AREA_PER_PARTICLE), 1959);
        assert_eq!(particle_count(3941.0, 4339.0, AREA_PER_PARTICLE), 1899);
        assert_eq!(particle_count(4297.0, 4367.0, AREA_PER_PARTICLE), 2084);
    }

    #[test]
    fn test_particle_count_degenerate_sizes() {
        assert_eq!(particle_count(0.0, 900.0, AREA_PER_PARTICLE), 0);
        assert_eq!(particle_count(-10.0, 900.0, AREA_PER_PARTICLE), 0);
        assert_eq!(particle_count(100.0, 100.0, 0.0), 0);
    }

    #[test]
    fn test_random_particle_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let extent = Vec2::new(640.0, 480.0);
        let spawn = ParticleSpawn::default();
        let densities = MIN_DENSITY..MIN_DENSITY + DENSITY_SPREAD;

        for _ in 0..500 {
            let p = Particle::random(&mut rng, extent, &spawn);
            assert!(p.position.x >= 0.0 && p.position.x < extent.x);
            assert!(p.position.y >= 0.0 && p.position.y < extent.y);
            assert_eq!(p.position, p.base);
            assert!(p.velocity.abs().max_element() <= MAX_DRIFT);
            assert!(p.size >= MIN_SIZE && p.size < MIN_SIZE + SIZE_SPREAD);
            assert!(densities.contains(&p.density));
        }
    }

    #[test]
    fn test_bounce_at_origin_corner() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(-0.5, -0.5), 2.0, 10.0);
        p.update(&Pointer::default(), Vec2::new(800.0, 600.0), RETURN_RATE);

        // Overshoots one frame, velocity reversed on both axes
        assert_eq!(p.position, Vec2::new(-0.5, -0.5));
        assert_eq!(p.velocity, Vec2::new(0.5, 0.5));

        p.update(&Pointer::default(), Vec2::new(800.0, 600.0), RETURN_RATE);
        assert!(p.position.x > -0.5 && p.position.y > -0.5);
    }

    #[test]
    fn test_returns_to_base_outside_radius() {
        let mut p = Particle::new(Vec2::new(300.0, 300.0), Vec2::ZERO, 2.0, 10.0);
        p.position = Vec2::new(360.0, 250.0);

        let mut pointer = Pointer::default();
        pointer.move_to(Vec2::new(900.0, 900.0));

        let mut last = p.displacement();
        for _ in 0..50 {
            p.update(&pointer, Vec2::new(1000.0, 1000.0), RETURN_RATE);
            let now = p.displacement();
            assert!(now < last);
            last = now;
        }
        assert!(last < 1.0);
    }

    #[test]
    fn test_absent_pointer_takes_return_branch() {
        let mut p = Particle::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 2.0, 10.0);
        p.position = Vec2::new(110.0, 100.0);
        p.update(&Pointer::default(), Vec2::new(500.0, 500.0), RETURN_RATE);
        assert!((p.position.x - 109.0).abs() < 1e-4);
    }

    #[test]
    fn test_repelled_inside_radius() {
        let mut p = Particle::new(Vec2::new(200.0, 200.0), Vec2::ZERO, 2.0, 10.0);
        let mut pointer = Pointer::default();
        pointer.move_to(Vec2::new(150.0, 200.0));

        p.update(&pointer, Vec2::new(1000.0, 1000.0), RETURN_RATE);

        // (150 - 50) / 150 * 10 along +x
        assert!((p.position.x - (200.0 + 100.0 / 150.0 * 10.0)).abs() < 1e-3);
        assert_eq!(p.position.y, 200.0);
    }
}
