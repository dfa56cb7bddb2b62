use crate::coords::Viewport;
use crate::paint::Color;

/// Renderer-facing context for one frame.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub surface_format: wgpu::TextureFormat,
    /// Logical size.
    pub viewport: Viewport,
    pub scale_factor: f32,
    /// Drawable size in physical pixels, as configured on the surface.
    pub surface_size: (u32, u32),
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        viewport: Viewport,
        scale_factor: f32,
        surface_size: (u32, u32),
    ) -> Self {
        Self { device, queue, surface_format, viewport, scale_factor, surface_size }
    }

    /// `false` when there is nothing to draw into.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.surface_size.0 > 0 && self.surface_size.1 > 0 && self.viewport.is_valid()
    }
}

/// Encoder + color view of the frame being recorded.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    #[inline]
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Records a pass that only clears to `color`.
    pub fn clear(&mut self, color: Color) {
        let _pass = super::common::begin_pass(self, "mesh clear pass", wgpu::LoadOp::Clear(color.to_wgpu()));
    }
}
