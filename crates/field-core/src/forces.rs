//! Per-frame displacement rules for particles
//!
//! Positions are moved directly; there is no force accumulation or integration step.

use glam::Vec2;

/// Displacement pushing a particle at `position` away from `pointer`.
///
/// Magnitude is `(radius - distance) / radius * density`, decaying linearly to zero at the
/// edge of the radius. Returns `None` when the particle is outside the radius
/// (`distance >= radius`), so the caller can fall back to the return rule.
///
/// A particle sitting exactly on the pointer has no defined direction and gets a zero
/// displacement instead of NaN.
pub fn repulsion(position: Vec2, pointer: Vec2, radius: f32, density: f32) -> Option<Vec2> {
    let away = position - pointer;
    let distance = away.length();

    if distance >= radius {
        return None;
    }

    let force = (radius - distance) / radius;
    Some(away.normalize_or_zero() * force * density)
}

/// Displacement pulling `position` a fraction `rate` of the way back to `base`
pub fn return_to_base(position: Vec2, base: Vec2, rate: f32) -> Vec2 {
    (base - position) * rate
}

/// Negate each velocity component whose position axis has left `[0, extent]`.
///
/// The position itself is not clamped and may overshoot for a frame.
pub fn bounce(position: Vec2, velocity: Vec2, extent: Vec2) -> Vec2 {
    let mut velocity = velocity;
    if position.x < 0.0 || position.x > extent.x {
        velocity.x = -velocity.x;
    }
    if position.y < 0.0 || position.y > extent.y {
        velocity.y = -velocity.y;
    }
    velocity
}

/// Squared distance between two points
pub fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    a.distance_squared(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repulsion_points_away_from_pointer() {
        let pointer = Vec2::new(100.0, 100.0);
        let samples = [
            Vec2::new(120.0, 100.0),
            Vec2::new(40.0, 130.0),
            Vec2::new(100.0, 10.0),
            Vec2::new(199.0, 101.0),
        ];

        for position in samples {
            let push = repulsion(position, pointer, 150.0, 12.0).expect("inside radius");
            assert!(push.dot(position - pointer) >= 0.0);
        }
    }

    #[test]
    fn test_repulsion_decays_with_distance() {
        let pointer = Vec2::ZERO;
        let near = repulsion(Vec2::new(10.0, 0.0), pointer, 150.0, 5.0).unwrap();
        let far = repulsion(Vec2::new(140.0, 0.0), pointer, 150.0, 5.0).unwrap();
        assert!(near.length() > far.length());
    }

    #[test]
    fn test_repulsion_boundary_is_exclusive() {
        let push_at = |x: f32| repulsion(Vec2::new(x, 0.0), Vec2::ZERO, 150.0, 5.0);
        assert!(push_at(150.0).is_none());
        assert!(push_at(149.9).is_some());
    }

    #[test]
    fn test_repulsion_zero_distance_is_finite() {
        let pointer = Vec2::new(50.0, 50.0);
        let push = repulsion(pointer, pointer, 150.0, 20.0).unwrap();
        assert_eq!(push, Vec2::ZERO);
    }

    #[test]
    fn test_return_to_base_moves_ten_percent() {
        let step = return_to_base(Vec2::new(110.0, 50.0), Vec2::new(100.0, 100.0), 0.1);
        assert!((step.x - -1.0).abs() < 1e-5);
        assert!((step.y - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_flips_only_escaped_axes() {
        let extent = Vec2::new(100.0, 100.0);
        let v = Vec2::new(0.5, -0.5);
        assert_eq!(
            bounce(Vec2::new(101.0, 50.0), v, extent),
            Vec2::new(-0.5, -0.5)
        );
        assert_eq!(
            bounce(Vec2::new(50.0, -1.0), v, extent),
            Vec2::new(0.5, 0.5)
        );
        assert_eq!(bounce(Vec2::new(50.0, 50.0), v, extent), v);
    }

    #[test]
    fn test_distance_sq_identical_points_is_zero() {
        let p = Vec2::new(3.5, -7.25);
        assert_eq!(distance_sq(p, p), 0.0);
    }
}
