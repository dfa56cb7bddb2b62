//! Coordinate and geometry types.
//!
//! Window space is logical pixels (DPI-aware), origin top-left, +Y down.
//! Gradient space is normalized `[0, 1]²`, origin bottom-left, +Y up;
//! [`CanvasMapping`] converts between the two.

mod canvas;
mod rect;
mod vec2;
mod viewport;

pub use canvas::CanvasMapping;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
