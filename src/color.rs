// Simple color struct, created from an unsigned 32 representing RRGGBBAA,
// plus the translucent paint handed to a drawing surface

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // The color's own alpha byte scales the requested alpha, so a fully
    // opaque base color passes `alpha` through unchanged
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        let scale = self.a as f64 / 255.0;
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            alpha: (alpha * scale).max(0.0).min(1.0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f64,
}

// Formats as a CSS color string, e.g. `rgba(37, 99, 235, 0.5)`
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.alpha)
    }
}
