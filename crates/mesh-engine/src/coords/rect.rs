use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of size `size` centered on `center`.
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            origin: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x < self.origin.x + self.size.x
            && p.y < self.origin.y + self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_round_trips_center() {
        let r = Rect::centered(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r, Rect::new(8.0, 17.0, 4.0, 6.0));
        assert_eq!(r.center(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(!r.contains(Vec2::new(10.0, 10.0)));
        assert!(!r.contains(Vec2::new(-1.0, 5.0)));
    }

    #[test]
    fn is_empty_zero_size() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
