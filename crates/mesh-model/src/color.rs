use std::fmt;

use thiserror::Error;

/// Straight RGB color with channels in `[0, 1]`.
///
/// Gradient points carry no alpha: the blend kernel always produces opaque output.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Returned by [`Rgb::from_hex`] for strings that are not `#rgb` / `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color {0:?}")]
pub struct ColorParseError(pub String);

impl Rgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parses `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(err());
        }

        let byte = |h: &str| u8::from_str_radix(h, 16).map_err(|_| err());

        match hex.len() {
            6 => Ok(Self::from_u8(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?)),
            3 => {
                // `#abc` expands to `#aabbcc`.
                let nibble = |i: usize| byte(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::from_u8(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => Err(err()),
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    #[inline]
    pub fn to_u8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    #[inline]
    pub fn clamped(self) -> Self {
        Self::new(self.r.clamp(0.0, 1.0), self.g.clamp(0.0, 1.0), self.b.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }

    /// Relative luminance (Rec. 709 weights on the stored channels).
    #[inline]
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    /// Converts to `(hue_degrees, saturation, lightness)`.
    pub fn to_hsl(self) -> (f32, f32, f32) {
        let Rgb { r, g, b } = self.clamped();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) * 0.5;
        let delta = max - min;

        if delta <= f32::EPSILON {
            return (0.0, 0.0, l);
        }

        let s = if l > 0.5 { delta / (2.0 - max - min) } else { delta / (max + min) };

        let h = if max == r {
            (g - b) / delta + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };

        (h * 60.0, s, l)
    }

    pub fn from_hsl(hue: f32, s: f32, l: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Self::new(l, l, l);
        }

        let h = hue.rem_euclid(360.0) / 360.0;
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Rotates the hue by `degrees`, keeping saturation and lightness.
    pub fn rotate_hue(self, degrees: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h + degrees, s, l)
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
