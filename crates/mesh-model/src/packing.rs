//! Uniform block layout shared with the mesh fragment shader.
//!
//! WGSL uniform arrays require a 16-byte element stride, so each per-point
//! scalar array (`float[32]`) is stored as `vec4[8]`: point `i` lives in
//! component `i % 4` of element `i / 4`.
//!
//! Layout (1696 bytes):
//!
//!  offset    0  resolution     vec2<f32>
//!  offset    8  num_points     u32
//!  offset   12  noise_amount   f32
//!  offset   16  packing        u32        (0 = dedicated, 1 = legacy)
//!  offset   20  _pad           3 x u32
//!  offset   32  points         vec4<f32>[32]   (x, y, r, g)
//!  offset  544  colors         vec4<f32>[32]   (r, g, b, 0)
//!  offset 1056  intensities    vec4<f32>[8]
//!  offset 1184  bend_factors   vec4<f32>[8]
//!  offset 1312  elongations    vec4<f32>[8]
//!  offset 1440  rotations      vec4<f32>[8]
//!  offset 1568  s_bends        vec4<f32>[8]

use bytemuck::{Pod, Zeroable};

use crate::point::GradientPoint;
use crate::state::MAX_POINTS;

const SCALAR_VEC4S: usize = MAX_POINTS / 4;

/// How per-point colors reach the shader.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PackingMode {
    /// Colors in their own `colors` array; positions are never aliased.
    #[default]
    Dedicated,
    /// Bit-compatible with the old shader contract: blue of point `i` is stored
    /// in `points[i + 1].x`, and the last point's blue overwrites its own `x`.
    /// Positions read back from aliased slots are corrupted by design of that
    /// contract; only use this to reproduce old renders.
    Legacy,
}

impl PackingMode {
    #[inline]
    pub const fn as_u32(self) -> u32 {
        match self {
            PackingMode::Dedicated => 0,
            PackingMode::Legacy => 1,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshUniforms {
    pub resolution: [f32; 2],
    pub num_points: u32,
    pub noise_amount: f32,
    pub packing: u32,
    pub _pad: [u32; 3],
    pub points: [[f32; 4]; MAX_POINTS],
    pub colors: [[f32; 4]; MAX_POINTS],
    pub intensities: [[f32; 4]; SCALAR_VEC4S],
    pub bend_factors: [[f32; 4]; SCALAR_VEC4S],
    pub elongations: [[f32; 4]; SCALAR_VEC4S],
    pub rotations: [[f32; 4]; SCALAR_VEC4S],
    pub s_bends: [[f32; 4]; SCALAR_VEC4S],
}

impl Default for MeshUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl MeshUniforms {
    /// Byte size of the block as seen by the shader.
    pub const SIZE: u64 = std::mem::size_of::<MeshUniforms>() as u64;

    /// Reads back the scalar for point `i` from one of the `vec4[8]` arrays.
    #[inline]
    pub fn scalar(array: &[[f32; 4]; SCALAR_VEC4S], i: usize) -> f32 {
        array[i / 4][i % 4]
    }
}

/// Packs `points` into the uniform block.
///
/// At most [`MAX_POINTS`] points are packed; extra points are ignored (the
/// point model never produces more). Unused slots are zero.
pub fn pack(
    points: &[GradientPoint],
    noise_amount: f32,
    resolution: [f32; 2],
    mode: PackingMode,
) -> MeshUniforms {
    let n = points.len().min(MAX_POINTS);
    let points = &points[..n];

    let mut u = MeshUniforms {
        resolution,
        num_points: n as u32,
        noise_amount,
        packing: mode.as_u32(),
        ..MeshUniforms::zeroed()
    };

    for (i, p) in points.iter().enumerate() {
        u.points[i] = [p.position.x, p.position.y, p.color.r, p.color.g];
        set_scalar(&mut u.intensities, i, p.intensity);
        set_scalar(&mut u.bend_factors, i, p.bend);
        set_scalar(&mut u.elongations, i, p.elongation);
        set_scalar(&mut u.rotations, i, p.rotation);
        set_scalar(&mut u.s_bends, i, p.s_bend);
    }

    match mode {
        PackingMode::Dedicated => {
            for (i, p) in points.iter().enumerate() {
                u.colors[i] = [p.color.r, p.color.g, p.color.b, 0.0];
            }
        }
        PackingMode::Legacy => {
            // Second pass, in index order, after all positions are written.
            for (i, p) in points.iter().enumerate() {
                let slot = if i + 1 < n { i + 1 } else { i };
                u.points[slot][0] = p.color.b;
            }
        }
    }

    u
}

#[inline]
fn set_scalar(array: &mut [[f32; 4]; SCALAR_VEC4S], i: usize, v: f32) {
    array[i / 4][i % 4] = v;
}
