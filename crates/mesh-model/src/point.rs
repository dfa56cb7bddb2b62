use core::ops::{Add, Sub};

use crate::color::Rgb;

/// Normalized image-space position.
///
/// Both axes are in `[0, 1]`; the origin is the bottom-left corner of the image.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        let d = self - other;
        (d.x * d.x + d.y * d.y).sqrt()
    }

    /// Clamps both axes into `[0, 1]`. Non-finite components become `0.5`.
    #[inline]
    pub fn clamped(self) -> Self {
        let c = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        Self::new(c(self.x), c(self.y))
    }
}

impl Add for Position {
    type Output = Position;
    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;
    #[inline]
    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

pub const DEFAULT_INTENSITY: f32 = 1.0;
pub const DEFAULT_BEND: f32 = 3.0;
pub const DEFAULT_ELONGATION: f32 = 1.0;

pub const BEND_RANGE: (f32, f32) = (0.1, 10.0);
pub const ELONGATION_RANGE: (f32, f32) = (0.05, 4.0);
pub const INTENSITY_MAX: f32 = 10.0;

/// One color point of the mesh gradient.
///
/// The blend kernel reads `position`, `color`, `intensity` and `bend`.
/// `elongation` only sizes the radial falloff of the SVG export.
/// `rotation` and `s_bend` are packed into the uniform block but ignored by the
/// kernel; do not rely on them having a visual effect.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientPoint {
    pub position: Position,
    pub color: Rgb,
    /// Contribution weight multiplier, `>= 0`.
    pub intensity: f32,
    /// Falloff exponent, `> 0`. Higher values give a tighter region of influence.
    pub bend: f32,
    pub elongation: f32,
    /// Radians.
    pub rotation: f32,
    /// In `[-1, 1]`.
    pub s_bend: f32,
}

impl GradientPoint {
    /// A point with default shape parameters.
    pub fn new(position: Position, color: Rgb) -> Self {
        Self {
            position: position.clamped(),
            color: color.clamped(),
            intensity: DEFAULT_INTENSITY,
            bend: DEFAULT_BEND,
            elongation: DEFAULT_ELONGATION,
            rotation: 0.0,
            s_bend: 0.0,
        }
    }

    #[inline]
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.apply(PointField::Intensity(intensity));
        self
    }

    #[inline]
    pub fn with_bend(mut self, bend: f32) -> Self {
        self.apply(PointField::Bend(bend));
        self
    }

    #[inline]
    pub fn with_elongation(mut self, elongation: f32) -> Self {
        self.apply(PointField::Elongation(elongation));
        self
    }

    /// Writes one field, clamping the value into its domain.
    ///
    /// Non-finite values leave the field unchanged.
    pub fn apply(&mut self, field: PointField) {
        match field {
            PointField::Position(p) => self.position = p.clamped(),
            PointField::Color(c) if c.is_finite() => self.color = c.clamped(),
            PointField::Intensity(v) if v.is_finite() => {
                self.intensity = v.clamp(0.0, INTENSITY_MAX)
            }
            PointField::Bend(v) if v.is_finite() => self.bend = v.clamp(BEND_RANGE.0, BEND_RANGE.1),
            PointField::Elongation(v) if v.is_finite() => {
                self.elongation = v.clamp(ELONGATION_RANGE.0, ELONGATION_RANGE.1)
            }
            PointField::Rotation(v) if v.is_finite() => {
                self.rotation = v.rem_euclid(core::f32::consts::TAU)
            }
            PointField::SBend(v) if v.is_finite() => self.s_bend = v.clamp(-1.0, 1.0),
            _ => {}
        }
    }
}

/// A single editable field of a [`GradientPoint`] together with its new value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PointField {
    Position(Position),
    Color(Rgb),
    Intensity(f32),
    Bend(f32),
    Elongation(f32),
    Rotation(f32),
    SBend(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_point_uses_defaults_and_clamps_position() {
        let p = GradientPoint::new(Position::new(1.5, -0.2), Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(p.position, Position::new(1.0, 0.0));
        assert_eq!(p.intensity, 1.0);
        assert_eq!(p.bend, 3.0);
        assert_eq!(p.elongation, 1.0);
        assert_eq!((p.rotation, p.s_bend), (0.0, 0.0));
    }

    #[test]
    fn apply_clamps_into_domains() {
        let mut p = GradientPoint::new(Position::new(0.5, 0.5), Rgb::default());
        p.apply(PointField::Bend(0.0));
        assert_eq!(p.bend, BEND_RANGE.0);
        p.apply(PointField::Intensity(-3.0));
        assert_eq!(p.intensity, 0.0);
        p.apply(PointField::SBend(4.0));
        assert_eq!(p.s_bend, 1.0);
        p.apply(PointField::Elongation(100.0));
        assert_eq!(p.elongation, ELONGATION_RANGE.1);
    }

    #[test]
    fn apply_ignores_nan() {
        let mut p = GradientPoint::new(Position::new(0.5, 0.5), Rgb::default());
        p.apply(PointField::Bend(f32::NAN));
        assert_eq!(p.bend, DEFAULT_BEND);
        p.apply(PointField::Position(Position::new(f32::NAN, 0.25)));
        assert_eq!(p.position, Position::new(0.5, 0.25));
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((Position::new(0.0, 0.0).distance(Position::new(0.3, 0.4)) - 0.5).abs() < 1e-6);
    }
}
