//! CPU evaluation of the mesh blend kernel.
//!
//! This mirrors `mesh_fragment.wgsl` in dedicated packing mode and is used for
//! raster export, color sampling when adding points, and tests.

use crate::color::Rgb;
use crate::point::{GradientPoint, Position};

/// Scales normalized distance so falloff reads well at typical canvas sizes.
pub const DISTANCE_SCALE: f32 = 4.0;
/// Keeps the weight finite at zero distance.
pub const DISTANCE_BIAS: f32 = 0.1;

/// Unnormalized contribution of `point` at `uv`.
#[inline]
pub fn weight(point: &GradientPoint, uv: Position) -> f32 {
    let dist = uv.distance(point.position);
    point.intensity / (dist * DISTANCE_SCALE + DISTANCE_BIAS).powf(point.bend)
}

/// Blended RGBA at `uv` (bottom-left origin). Alpha is always `1`.
///
/// When the total weight is zero (no points, all intensities zero, or every
/// weight underflowed) the result is opaque black.
pub fn shade(points: &[GradientPoint], uv: Position) -> [f32; 4] {
    let mut total = 0.0f32;
    let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);

    for p in points {
        let w = weight(p, uv);
        total += w;
        r += p.color.r * w;
        g += p.color.g * w;
        b += p.color.b * w;
    }

    if total > 0.0 {
        r /= total;
        g /= total;
        b /= total;
    }

    [r, g, b, 1.0]
}

/// [`shade`] without the alpha channel.
#[inline]
pub fn sample(points: &[GradientPoint], uv: Position) -> Rgb {
    let [r, g, b, _] = shade(points, uv);
    Rgb::new(r, g, b)
}

/// Center of pixel `(px, py)` in a `width` x `height` image, as a kernel `uv`.
///
/// Pixel rows run top to bottom, so `y` is inverted.
#[inline]
pub fn pixel_uv(px: u32, py: u32, width: u32, height: u32) -> Position {
    Position::new(
        (px as f32 + 0.5) / width.max(1) as f32,
        1.0 - (py as f32 + 0.5) / height.max(1) as f32,
    )
}
