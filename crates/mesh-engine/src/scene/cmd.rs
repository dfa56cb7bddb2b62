use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::{DrawList, ZIndex};

/// Outline drawn inside a shape's edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub const fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

/// One overlay draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect {
        rect: Rect,
        color: Color,
    },
    Disc {
        center: Vec2,
        radius: f32,
        fill: Color,
        border: Option<Border>,
    },
    DashedRing {
        center: Vec2,
        radius: f32,
        width: f32,
        dashes: u32,
        color: Color,
    },
    Digit {
        center: Vec2,
        height: f32,
        digit: u8,
        color: Color,
    },
}

impl DrawList {
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push(z, DrawCmd::Rect { rect, color });
    }

    #[inline]
    pub fn push_disc(&mut self, z: ZIndex, center: Vec2, radius: f32, fill: Color, border: Option<Border>) {
        self.push(z, DrawCmd::Disc { center, radius, fill, border });
    }

    #[inline]
    pub fn push_dashed_ring(
        &mut self,
        z: ZIndex,
        center: Vec2,
        radius: f32,
        width: f32,
        dashes: u32,
        color: Color,
    ) {
        self.push(z, DrawCmd::DashedRing { center, radius, width, dashes, color });
    }

    /// Records a decimal number as a row of digit glyphs centered on `center`.
    pub fn push_number(&mut self, z: ZIndex, center: Vec2, height: f32, value: u32, color: Color) {
        let text = value.to_string();
        let advance = height * 0.62;
        let width = advance * text.len() as f32;
        let mut x = center.x - width * 0.5 + advance * 0.5;

        for b in text.bytes() {
            let digit = b - b'0';
            self.push(z, DrawCmd::Digit { center: Vec2::new(x, center.y), height, digit, color });
            x += advance;
        }
    }
}
