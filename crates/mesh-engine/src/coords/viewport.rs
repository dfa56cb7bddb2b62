/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `false` for zero, negative or non-finite sizes (e.g. a minimized window).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Size in physical pixels, rounded, at least 1x1.
    #[inline]
    pub fn physical(self, scale_factor: f32) -> (u32, u32) {
        let w = (self.width * scale_factor).round().max(1.0) as u32;
        let h = (self.height * scale_factor).round().max(1.0) as u32;
        (w, h)
    }
}
