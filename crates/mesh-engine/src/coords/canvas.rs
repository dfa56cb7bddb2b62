use mesh_model::Position;

use super::{Rect, Vec2, Viewport};

/// Maps between window logical pixels and normalized gradient coordinates.
///
/// The gradient fills `rect`. Normalized `y` grows upward, so the top edge of
/// `rect` is `y = 1`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CanvasMapping {
    rect: Rect,
}

impl CanvasMapping {
    #[inline]
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Mapping for a gradient that covers the whole viewport.
    #[inline]
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self::new(Rect::new(0.0, 0.0, viewport.width, viewport.height))
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Pointer position to gradient space, clamped to `[0, 1]²`.
    ///
    /// A degenerate rect maps everything to the center.
    pub fn to_normalized(&self, p: Vec2) -> Position {
        if self.rect.is_empty() {
            return Position::new(0.5, 0.5);
        }
        let x = (p.x - self.rect.origin.x) / self.rect.size.x;
        let y = 1.0 - (p.y - self.rect.origin.y) / self.rect.size.y;
        Position::new(x, y).clamped()
    }

    /// Gradient-space position to window logical pixels.
    pub fn to_logical(&self, pos: Position) -> Vec2 {
        Vec2::new(
            self.rect.origin.x + pos.x * self.rect.size.x,
            self.rect.origin.y + (1.0 - pos.y) * self.rect.size.y,
        )
    }

    /// Whether `p` lies over the gradient.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.rect.contains(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> CanvasMapping {
        CanvasMapping::from_viewport(Viewport::new(800.0, 400.0))
    }

    #[test]
    fn top_left_pixel_is_normalized_top_left() {
        let p = mapping().to_normalized(Vec2::new(0.0, 0.0));
        assert_eq!(p, Position::new(0.0, 1.0));
    }

    #[test]
    fn y_is_inverted() {
        let p = mapping().to_normalized(Vec2::new(200.0, 300.0));
        assert!((p.x - 0.25).abs() < 1e-6);
        assert!((p.y - 0.25).abs() < 1e-6);
    }

    #[test]
    fn outside_points_are_clamped() {
        let m = mapping();
        assert_eq!(m.to_normalized(Vec2::new(-50.0, 900.0)), Position::new(0.0, 0.0));
        assert_eq!(m.to_normalized(Vec2::new(1000.0, -10.0)), Position::new(1.0, 1.0));
    }

    #[test]
    fn logical_round_trip() {
        let m = CanvasMapping::new(Rect::new(10.0, 20.0, 200.0, 100.0));
        let pos = Position::new(0.3, 0.6);
        let back = m.to_normalized(m.to_logical(pos));
        assert!((back.x - pos.x).abs() < 1e-5 && (back.y - pos.y).abs() < 1e-5);
    }

    #[test]
    fn empty_rect_maps_to_center() {
        let m = CanvasMapping::new(Rect::new(0.0, 0.0, 0.0, 0.0));
        assert_eq!(m.to_normalized(Vec2::new(3.0, 4.0)), Position::new(0.5, 0.5));
    }
}
