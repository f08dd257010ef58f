//! RGBA color value

use serde::{Deserialize, Serialize};

/// RGBA color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// HLS lightness in `[0, 1]`
    pub fn lum(&self) -> f64 {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        (max + min) / 2.0
    }

    /// Alpha-composite `self` over `base` (the `%` operator)
    ///
    /// Channels are the alpha-weighted blend of both colors, truncated to
    /// whole channel values; the result alpha combines both alphas.
    pub fn blend_over(&self, base: &Color) -> Color {
        let fg_weight = f64::from(self.a) / 255.0;
        let bg_weight = f64::from(base.a) / 255.0 * (1.0 - fg_weight);
        let alpha = fg_weight + bg_weight;

        let channel = |fg: u8, bg: u8| -> u8 {
            if alpha == 0.0 {
                0
            } else {
                ((f64::from(fg) * fg_weight + f64::from(bg) * bg_weight) / alpha) as u8
            }
        };

        Color::new(
            channel(self.r, base.r),
            channel(self.g, base.g),
            channel(self.b, base.b),
            (255.0 * alpha) as u8,
        )
    }
}
