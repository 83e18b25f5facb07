//! Eased, frame-driven progress for reveal and tilt animations

/// Maps linear progress in [0, 1] to eased progress in [0, 1]
pub type EasingFn = fn(f32) -> f32;

/// Quadratic ease-out, the stand-in for CSS `ease-out`
pub fn ease_out(t: f32) -> f32 {
    t * (2.0 - t)
}

/// Cubic ease-out: quick start, long settle
pub fn ease_out_cubic(t: f32) -> f32 {
    let u = 1.0 - t;
    1.0 - u * u * u
}

pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Progress from 0 to 1 over `duration` seconds, advanced by frame deltas
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    duration: f32,
    easing: EasingFn,
    elapsed: f32,
}

impl Tween {
    /// A tween at its start
    pub fn new(duration: f32, easing: EasingFn) -> Self {
        Self {
            duration: duration.max(0.0),
            easing,
            elapsed: 0.0,
        }
    }

    /// A tween that has already run to completion
    pub fn finished(duration: f32, easing: EasingFn) -> Self {
        let mut tween = Self::new(duration, easing);
        tween.elapsed = tween.duration;
        tween
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
    }

    /// Move forward by `dt` seconds; never runs past the end
    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Eased progress in [0, 1]; zero-length tweens are always complete
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.easing)((self.elapsed / self.duration).clamp(0.0, 1.0))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
