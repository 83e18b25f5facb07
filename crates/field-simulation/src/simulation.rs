//! CPU particle field
//!
//! Owns everything the background animation needs between frames: surface size, the
//! particle set, pointer state and the theme. One `frame` call clears the canvas, updates
//! and draws every particle, then draws the connecting lines.

use crate::FieldParams;
use field_core::{distance_sq, particle_count, Canvas, Particle, Pointer, Theme};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A line between two particles closer than the connection threshold
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    /// Particle indices, `pair.0 <= pair.1`
    pub pair: (usize, usize),
    pub from: Vec2,
    pub to: Vec2,
    pub distance_sq: f32,
    /// Line alpha in [0, 1]
    pub opacity: f32,
}

pub struct ParticleField {
    params: FieldParams,
    size: Vec2,
    particles: Vec<Particle>,
    pointer: Pointer,
    theme: Theme,
    rng: StdRng,
}

impl ParticleField {
    /// Build a field seeded from the OS entropy source
    pub fn new(width: f32, height: f32, params: FieldParams) -> Self {
        Self::with_rng(width, height, params, StdRng::from_os_rng())
    }

    /// Build a reproducible field
    pub fn with_seed(width: f32, height: f32, params: FieldParams, seed: u64) -> Self {
        Self::with_rng(width, height, params, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: f32, height: f32, params: FieldParams, rng: StdRng) -> Self {
        let mut field = Self {
            params,
            size: Vec2::new(width, height),
            particles: Vec::new(),
            pointer: Pointer::new(params.interaction_radius),
            theme: Theme::default(),
            rng,
        };
        field.rebuild();
        log::info!(
            "✓ Particle field initialized: {} particles on {}x{}",
            field.particles.len(),
            width,
            height
        );
        field
    }

    /// Adopt a new surface size. Old particles are discarded, not rescaled.
    ///
    /// Returns `false`, keeping the current particles, when the size did not change.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let size = Vec2::new(width, height);
        if size == self.size {
            return false;
        }

        self.size = size;
        self.rebuild();
        log::debug!(
            "Particle field rebuilt for {}x{}: {} particles",
            width,
            height,
            self.particles.len()
        );
        true
    }

    /// Replace the particle set with a fresh random one for the current size
    pub fn rebuild(&mut self) {
        let count = particle_count(self.size.x, self.size.y, self.params.area_per_particle);
        let extent = self.size;
        let spawn = self.params.spawn;

        self.particles = (0..count)
            .map(|_| Particle::random(&mut self.rng, extent, &spawn))
            .collect();
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    /// Apply tuned parameters. Population changes rebuild the particle set.
    pub fn set_params(&mut self, params: FieldParams) {
        let repopulate = params.area_per_particle != self.params.area_per_particle
            || params.spawn != self.params.spawn;

        self.params = params;
        self.pointer.radius = params.interaction_radius;

        if repopulate {
            self.rebuild();
            log::debug!(
                "Particle field repopulated: {} particles",
                self.particles.len()
            );
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    pub fn set_pointer(&mut self, position: Option<Vec2>) {
        match position {
            Some(p) => self.pointer.move_to(p),
            None => self.pointer.clear(),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// One full animation frame: clear, update + draw particles, connect
    pub fn frame<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        canvas.clear_rect(Vec2::ZERO, self.size);
        self.step(canvas);
        self.connect(canvas);
    }

    /// Update every particle and draw it right after its update
    pub fn step<C: Canvas + ?Sized>(&mut self, canvas: &mut C) {
        let dot = self.theme.ink(self.params.particle_alpha);

        for particle in &mut self.particles {
            particle.update(&self.pointer, self.size, self.params.return_rate);
            canvas.fill_circle(particle.position, particle.size, dot);
        }
    }

    /// Draw the current state without advancing it
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.clear_rect(Vec2::ZERO, self.size);

        let dot = self.theme.ink(self.params.particle_alpha);
        for particle in &self.particles {
            canvas.fill_circle(particle.position, particle.size, dot);
        }
        self.connect(canvas);
    }

    /// Draw a line for every pair closer than the connection threshold
    pub fn connect<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for connection in self.connections() {
            canvas.stroke_line(
                connection.from,
                connection.to,
                self.params.line_width,
                self.theme.ink(connection.opacity),
            );
        }
    }

    /// All unordered pairs `(i, j)`, `j >= i` (or `j > i` without self pairs), whose squared
    /// distance is below the threshold. O(n²).
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let params = self.params;
        let threshold = params.connect_threshold(self.size.x, self.size.y);
        let skip = usize::from(!params.connect_self_pairs);
        let particles = &self.particles;

        particles.iter().enumerate().flat_map(move |(i, a)| {
            let start = i + skip;
            particles[start..]
                .iter()
                .enumerate()
                .filter_map(move |(k, b)| {
                    let d2 = distance_sq(a.position, b.position);
                    (d2 < threshold).then(|| Connection {
                        pair: (i, start + k),
                        from: a.position,
                        to: b.position,
                        distance_sq: d2,
                        opacity: params.line_opacity(d2),
                    })
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_core::{DrawCommand, RecordingCanvas};

    fn still_particle(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 2.0, 10.0)
    }

    #[test]
    fn test_initial_count_follows_area() {
        let field = ParticleField::with_seed(1000.0, 900.0, FieldParams::default(), 1);
        assert_eq!(field.particles().len(), 100);
    }

    #[test]
    fn test_resize_rebuilds_from_scratch() {
        let mut field = ParticleField::with_seed(1000.0, 900.0, FieldParams::default(), 2);
        let before = field.particles().to_vec();

        assert!(field.resize(600.0, 300.0));
        assert_eq!(field.particles().len(), 20);
        assert!(field
            .particles()
            .iter()
            .all(|p| p.position.x < 600.0 && p.position.y < 300.0));
        assert_ne!(&before[..20], field.particles());
    }

    #[test]
    fn test_same_size_keeps_particles() {
        let mut field = ParticleField::with_seed(1000.0, 900.0, FieldParams::default(), 4);
        let mut canvas = RecordingCanvas::new(1000.0, 900.0);
        field.frame(&mut canvas);
        let settled = field.particles().to_vec();

        assert!(!field.resize(1000.0, 900.0));
        assert_eq!(field.particles(), &settled[..]);
    }

    #[test]
    fn test_tiny_surface_has_no_particles() {
        let mut field = ParticleField::with_seed(50.0, 50.0, FieldParams::default(), 3);
        let mut canvas = RecordingCanvas::new(50.0, 50.0);
        field.frame(&mut canvas);
        assert!(field.particles().is_empty());
        assert_eq!(canvas.commands.len(), 1);
    }

    #[test]
    fn test_self_pairs_connect_at_zero_distance() {
        let mut field = ParticleField::with_seed(1000.0, 900.0, FieldParams::default(), 4);
        field.particles = vec![still_particle(10.0, 10.0), still_particle(900.0, 800.0)];

        let connections: Vec<_> = field.connections().collect();
        assert_eq!(connections.len(), 2);
        for c in &connections {
            assert_eq!(c.pair.0, c.pair.1);
            assert_eq!(c.distance_sq, 0.0);
            assert_eq!(c.opacity, 1.0);
        }
    }

    #[test]
    fn test_self_pairs_can_be_disabled() {
        let params = FieldParams {
            connect_self_pairs: false,
            ..Default::default()
        };
        let mut field = ParticleField::with_seed(1000.0, 900.0, params, 5);
        field.particles = vec![
            still_particle(10.0, 10.0),
            still_particle(10.0, 10.0),
            still_particle(20.0, 10.0),
        ];

        let pairs: Vec<_> = field.connections().map(|c| c.pair).collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_connection_threshold_and_opacity() {
        let mut field = ParticleField::with_seed(1000.0, 900.0, FieldParams::default(), 6);
        // threshold = 9000: 90 px apart connects (8100), 100 px apart does not (10000)
        field.particles = vec![
            still_particle(0.0, 0.0),
            still_particle(90.0, 0.0),
            still_particle(190.0, 0.0),
        ];

        let connections: Vec<_> = field
            .connections()
            .filter(|c| c.pair.0 != c.pair.1)
            .collect();
        assert_eq!(connections.len(), 1);
        assert_eq!(connections[0].pair, (0, 1));
        let expected = 1.0 - 8100.0 / 20000.0;
        assert!((connections[0].opacity - expected).abs() < 1e-6);
    }

    #[test]
    fn test_opacity_never_negative_on_large_surfaces() {
        // 1920x1080 threshold (20736) exceeds the fade distance (20000)
        let mut field = ParticleField::with_seed(1920.0, 1080.0, FieldParams::default(), 7);
        field.particles = vec![still_particle(0.0, 0.0), still_particle(143.0, 0.0)];

        let c = field
            .connections()
            .find(|c| c.pair == (0, 1))
            .expect("143² is below the threshold");
        assert_eq!(c.opacity, 0.0);
    }

    #[test]
    fn test_frame_clears_then_draws_particles_then_lines() {
        let mut field = ParticleField::with_seed(1000.0, 900.0, FieldParams::default(), 8);
        let mut canvas = RecordingCanvas::new(1000.0, 900.0);
        field.frame(&mut canvas);

        assert!(matches!(canvas.commands[0], DrawCommand::Clear { .. }));
        let circles = canvas.circles().count();
        assert_eq!(circles, 100);

        let first_line = canvas
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Line { .. }))
            .expect("self pairs always connect");
        assert_eq!(first_line, 1 + circles);
        assert!(canvas.lines().count() >= 100);
    }

    #[test]
    fn test_particle_color_follows_theme() {
        let mut field = ParticleField::with_seed(300.0, 300.0, FieldParams::default(), 9);
        field.set_theme(Theme::Light);
        let mut canvas = RecordingCanvas::new(300.0, 300.0);
        field.frame(&mut canvas);

        for command in canvas.circles() {
            if let DrawCommand::Circle { color, .. } = command {
                assert_eq!(*color, Theme::Light.ink(0.5));
            }
        }
    }

    #[test]
    fn test_draw_does_not_advance() {
        let field = ParticleField::with_seed(600.0, 600.0, FieldParams::default(), 10);
        let before = field.particles().to_vec();
        let mut canvas = RecordingCanvas::new(600.0, 600.0);
        field.draw(&mut canvas);
        assert_eq!(before, field.particles());
        assert_eq!(canvas.circles().count(), before.len());
    }

    #[test]
    fn test_set_params_rebuilds_only_on_population_change() {
        let mut field = ParticleField::with_seed(900.0, 900.0, FieldParams::default(), 12);
        let before = field.particles().to_vec();

        let tuned = FieldParams {
            interaction_radius: 60.0,
            ..*field.params()
        };
        field.set_params(tuned);
        assert_eq!(before, field.particles());
        assert_eq!(field.pointer().radius, 60.0);

        let denser = FieldParams {
            area_per_particle: 4500.0,
            ..tuned
        };
        field.set_params(denser);
        assert_eq!(field.particles().len(), 180);
    }

    #[test]
    fn test_pointer_repels_nearby_particles() {
        let mut field = ParticleField::with_seed(1000.0, 900.0, FieldParams::default(), 11);
        field.particles = vec![still_particle(500.0, 450.0)];
        field.set_pointer(Some(Vec2::new(480.0, 450.0)));

        let mut canvas = RecordingCanvas::new(1000.0, 900.0);
        field.frame(&mut canvas);
        assert!(field.particles()[0].position.x > 500.0);

        field.set_pointer(None);
        assert!(field.pointer().position.is_none());
    }
}
