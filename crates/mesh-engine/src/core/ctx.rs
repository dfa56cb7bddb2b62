use winit::window::{CursorIcon, Window};

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::{InputFrame, InputState};
use crate::render::{RenderCtx, RenderTarget};
use crate::window::RuntimeCtx;

use super::app::AppControl;

pub struct WindowCtx<'a> {
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Logical client size.
    pub fn viewport(&self) -> Viewport {
        let logical: winit::dpi::LogicalSize<f64> =
            self.window.inner_size().to_logical(self.window.scale_factor());
        Viewport::new(logical.width as f32, logical.height as f32)
    }

    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }

    pub fn set_cursor(&self, cursor: CursorIcon) {
        self.window.set_cursor(cursor);
    }
}

/// Per-frame context passed to [`App::on_frame`](super::App::on_frame).
///
/// `gpu` is `None` when the graphics context could not be created; the app
/// still receives input and can keep its model and exports working.
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu: Option<&'a mut Gpu<'w>>,
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Acquires a frame, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then presents.
    ///
    /// Skipped without a GPU, while the surface has zero size, or when the
    /// surface cannot provide a texture this frame.
    pub fn render<F>(&mut self, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let viewport = self.window.viewport();
        let scale_factor = self.window.scale_factor();
        let Some(gpu) = self.gpu.as_deref_mut() else {
            return AppControl::Continue;
        };
        if !gpu.is_drawable() {
            return AppControl::Continue;
        }

        let mut frame = match gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                return match gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => {
                        self.runtime.request_redraw();
                        AppControl::Continue
                    }
                };
            }
        };

        let size = gpu.size();
        let rctx = RenderCtx::new(
            gpu.device(),
            gpu.queue(),
            gpu.surface_format(),
            viewport,
            scale_factor,
            (size.width, size.height),
        );

        // RenderTarget borrows the encoder; dropped before submit() takes the frame.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        gpu.submit(frame);

        AppControl::Continue
    }
}
