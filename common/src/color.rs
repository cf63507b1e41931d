use serde::{Deserialize, Serialize};

/// Linear RGBA color with `f32` channels.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RgbaColor {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const MAGENTA: Self = Self { r: 1.0, g: 0.0, b: 1.0, a: 1.0 };

    /// Creates an opaque color from its red, green and blue channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns the same color with alpha forced to 1.0.
    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }

    /// Quantizes a channel to 8 bits, rounding half away from zero.
    ///
    /// The product is taken in `f64` so that values such as `0.7f32` land on
    /// 178 instead of drifting up through `f32` rounding. Out of range values
    /// are clamped to `0..=255`.
    pub fn quantize_channel(value: f32) -> u8 {
        let scaled = (f64::from(value) * 255.0).round();
        scaled.clamp(0.0, 255.0) as u8
    }

    /// Returns the 8-bit quantized red, green and blue channels.
    pub fn quantized_rgb(&self) -> [u8; 3] {
        [
            Self::quantize_channel(self.r),
            Self::quantize_channel(self.g),
            Self::quantize_channel(self.b),
        ]
    }
}

impl Default for RgbaColor {
    fn default() -> Self {
        Self::WHITE
    }
}
