//! Page colors.
//!
//! The page states its colors the CSS way (sRGB bytes, or `0xRRGGBB`, plus a
//! float alpha). The canvas renders into an sRGB surface, so everything is
//! stored linearized.

/// Linear RGBA, premultiplication is left to the blend state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// sRGB transfer function, one 8-bit channel
fn linearize(channel: u8) -> f32 {
    let encoded = f32::from(channel) / 255.0;
    if encoded <= 0.04045 {
        encoded / 12.92
    } else {
        ((encoded + 0.055) / 1.055).powf(2.4)
    }
}

fn sanitize_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    }
}

impl Color {
    /// Already-linear components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// `rgba(r, g, b, alpha)` as a stylesheet would write it
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            r: linearize(r),
            g: linearize(g),
            b: linearize(b),
            a: sanitize_alpha(alpha),
        }
    }

    /// Opaque `#rrggbb`; bits above the low 24 are ignored
    pub fn hex(code: u32) -> Self {
        let [_, r, g, b] = code.to_be_bytes();
        Self::rgba(r, g, b, 1.0)
    }

    /// Replace alpha; NaN reads as fully transparent
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: sanitize_alpha(alpha),
            ..self
        }
    }

    /// Scale alpha by an element opacity
    pub fn fade(self, opacity: f32) -> Self {
        self.with_alpha(self.a * opacity)
    }

    pub fn is_visible(&self) -> bool {
        self.a > 0.0
    }
}

/// Page chrome colors for one theme, as `0xRRGGBB` sRGB codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: u32,
    pub surface: u32,
    pub text: u32,
    pub subtext: u32,
    /// Recipe, method and feedback card accents, in that order
    pub accents: [u32; 3],
}

/// Catppuccin Mocha
pub const DARK_PALETTE: Palette = Palette {
    base: 0x1e1e2e,
    surface: 0x313244,
    text: 0xcdd6f4,
    subtext: 0xa6adc8,
    accents: [0xfab387, 0x94e2d5, 0xcba6f7],
};

/// Catppuccin Latte
pub const LIGHT_PALETTE: Palette = Palette {
    base: 0xeff1f5,
    surface: 0xccd0da,
    text: 0x4c4f69,
    subtext: 0x6c6f85,
    accents: [0xfe640b, 0x179299, 0x8839ef],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_clamps_alpha() {
        assert_eq!(Color::rgba(0, 0, 0, 1.7).a, 1.0);
        assert_eq!(Color::rgba(0, 0, 0, -0.3).a, 0.0);
        assert_eq!(Color::rgba(0, 0, 0, f32::NAN).a, 0.0);
        assert_eq!(Color::rgba(255, 255, 255, 0.5).a, 0.5);
    }

    #[test]
    fn test_linearize_known_points() {
        assert_eq!(linearize(0), 0.0);
        assert!((linearize(255) - 1.0).abs() < 1e-6);
        // mid-grey 0x80 is about 21.6% linear
        assert!((linearize(128) - 0.2158).abs() < 1e-3);
    }

    #[test]
    fn test_hex_splits_channels() {
        assert_eq!(Color::hex(0xff0000), Color::rgba(255, 0, 0, 1.0));
        assert_eq!(Color::hex(0xab00ff00), Color::rgba(0, 255, 0, 1.0));
    }

    #[test]
    fn test_fade_multiplies_alpha() {
        let c = Color::rgba(10, 20, 30, 0.5).fade(0.5);
        assert_eq!(c.a, 0.25);
        assert!(!c.fade(0.0).is_visible());
    }
}
