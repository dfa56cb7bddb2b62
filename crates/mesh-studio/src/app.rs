use mesh_engine::core::{App, AppControl, FrameCtx};
use mesh_engine::coords::{CanvasMapping, Vec2};
use mesh_engine::input::{InputEvent, KeyState, MouseButtonState};
use mesh_engine::overlay::{build_overlay, OverlayStyle};
use mesh_engine::paint::Color;
use mesh_engine::render::{HandleRenderer, MeshRenderer, MeshRendererConfig};
use mesh_engine::scene::DrawList;
use mesh_engine::window::CursorIcon;

use crate::config::StudioConfig;
use crate::editor::Editor;
use crate::export::Exporter;
use crate::keymap;

/// Shown in place of the gradient when its renderer could not be built.
const PLACEHOLDER: Color = Color::from_premul(0.18, 0.18, 0.2, 1.0);

/// Gradient renderer lifecycle. Built on the first frame that has a GPU.
enum MeshSlot {
    Pending,
    Ready(MeshRenderer),
    Failed,
}

pub struct StudioApp {
    config: StudioConfig,
    editor: Editor,
    exporter: Exporter,

    overlay_style: OverlayStyle,
    overlay: DrawList,

    mesh: MeshSlot,
    handles: HandleRenderer,

    title: String,
    cursor: Option<CursorIcon>,
}

impl StudioApp {
    pub fn new(config: StudioConfig) -> Self {
        let exporter = Exporter::new(&config);
        let editor = match config.preset.as_deref() {
            Some(name) => Editor::from_preset(name).unwrap_or_else(|| {
                log::warn!("unknown preset '{name}', starting from defaults");
                Editor::default()
            }),
            None => Editor::default(),
        };
        Self {
            config,
            editor,
            exporter,
            overlay_style: OverlayStyle::default(),
            overlay: DrawList::new(),
            mesh: MeshSlot::Pending,
            handles: HandleRenderer::new(),
            title: String::new(),
            cursor: None,
        }
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMoved(p) => self.editor.pointer_moved(Vec2::new(p.x, p.y)),
            InputEvent::PointerLeft => self.editor.pointer_left(),
            InputEvent::PointerButton(b) => match b.state {
                MouseButtonState::Pressed => self.editor.pointer_down(b.button, Vec2::new(b.x, b.y)),
                MouseButtonState::Released => self.editor.pointer_up(b.button),
            },
            InputEvent::Focused(false) => self.editor.focus_lost(),
            InputEvent::Key { key, state: KeyState::Pressed, modifiers, .. } => {
                if let Some(cmd) = keymap::command_for(*key, *modifiers) {
                    log::trace!("{key} -> {cmd:?}");
                    if let Some(kind) = self.editor.apply(cmd) {
                        self.exporter.run_logged(kind, self.editor.points());
                    }
                }
            }
            _ => {}
        }
    }

    fn sync_window(&mut self, ctx: &mut FrameCtx<'_, '_>) {
        let cursor = self.editor.cursor();
        if self.cursor != Some(cursor) {
            ctx.window.set_cursor(cursor);
            self.cursor = Some(cursor);
        }

        let title = self.editor.title();
        if title != self.title {
            ctx.runtime.set_title(title.clone());
            self.title = title;
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.editor.set_canvas(CanvasMapping::from_viewport(ctx.window.viewport()));

        for event in &ctx.input_frame.events {
            self.handle_event(event);
        }
        self.sync_window(ctx);

        build_overlay(
            self.editor.points(),
            self.editor.canvas(),
            &self.editor.overlay_state(),
            &self.overlay_style,
            &mut self.overlay,
        );

        let packing = self.config.packing;
        let mesh = &mut self.mesh;
        let handles = &mut self.handles;
        let overlay = &mut self.overlay;
        let state = self.editor.state();

        ctx.render(|rctx, target| {
            if let MeshSlot::Pending = mesh {
                *mesh = match MeshRenderer::new(rctx, MeshRendererConfig { packing }) {
                    Ok(r) => MeshSlot::Ready(r),
                    Err(e) => {
                        log::error!("{e}; gradient disabled");
                        MeshSlot::Failed
                    }
                };
            }

            match mesh {
                MeshSlot::Ready(renderer) => renderer.draw(rctx, target, state),
                _ => target.clear(PLACEHOLDER),
            }
            handles.render(rctx, target, overlay);
        })
    }
}
