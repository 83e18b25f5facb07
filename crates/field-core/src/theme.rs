//! Light/dark page theme

use crate::color::{Color, Palette, DARK_PALETTE, LIGHT_PALETTE};
use crate::constants::DARK_TEXT_COLOR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Map a serialized `--text-color` custom property to a theme.
    ///
    /// Only the exact dark-theme value selects `Dark`; anything else is `Light`.
    pub fn from_text_color(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case(DARK_TEXT_COLOR) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// sRGB components particles and lines are drawn in
    pub fn ink_rgb(self) -> (u8, u8, u8) {
        match self {
            Theme::Dark => (255, 255, 255),
            Theme::Light => (0, 0, 0),
        }
    }

    /// Ink color at the given alpha
    pub fn ink(self, alpha: f32) -> Color {
        let (r, g, b) = self.ink_rgb();
        Color::rgba(r, g, b, alpha)
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK_PALETTE,
            Theme::Light => &LIGHT_PALETTE,
        }
    }

    pub fn background(self) -> Color {
        Color::hex(self.palette().base)
    }

    pub fn surface(self) -> Color {
        Color::hex(self.palette().surface)
    }

    pub fn text(self) -> Color {
        Color::hex(self.palette().text)
    }

    pub fn subtext(self) -> Color {
        Color::hex(self.palette().subtext)
    }

    /// Accent colors for the three card families
    pub fn accents(self) -> [Color; 3] {
        self.palette().accents.map(Color::hex)
    }
}
