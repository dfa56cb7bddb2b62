use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    begin_pass, premul_alpha_blend, primitive_state, uniform_layout_entry, QuadVertex,
    ViewportUniform, QUAD_INDICES, QUAD_VERTICES,
};

const KIND_RECT: u32 = 0;
const KIND_DISC: u32 = 1;
const KIND_RING: u32 = 2;
const KIND_DIGIT: u32 = 3;

/// Instanced renderer for the overlay's [`DrawCmd`]s.
///
/// Every command becomes one SDF quad instance; the whole list is drawn in a
/// single call on top of what is already in the target.
#[derive(Default)]
pub struct HandleRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,

    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,

    quad_vbo: Option<wgpu::Buffer>,
    quad_ibo: Option<wgpu::Buffer>,

    instance_vbo: Option<wgpu::Buffer>,
    instance_capacity: usize,
    instances: Vec<HandleInstance>,

    warned_bad_digit: bool,
}

impl HandleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, draw_list: &mut DrawList) {
        if !ctx.is_drawable() {
            return;
        }

        self.instances.clear();
        for item in draw_list.iter_in_paint_order() {
            if let Some(inst) = HandleInstance::from_cmd(&item.cmd, &mut self.warned_bad_digit) {
                self.instances.push(inst);
            }
        }
        if self.instances.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_static_buffers(ctx);
        self.ensure_bindings(ctx);
        self.write_viewport_uniform(ctx);
        self.ensure_instance_capacity(ctx, self.instances.len());

        let Some(instance_vbo) = self.instance_vbo.as_ref() else { return };
        ctx.queue.write_buffer(instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let Some(pipeline) = self.pipeline.as_ref() else { return };
        let Some(bind_group) = self.bind_group.as_ref() else { return };
        let Some(quad_vbo) = self.quad_vbo.as_ref() else { return };
        let Some(quad_ibo) = self.quad_ibo.as_ref() else { return };

        let (w, h) = ctx.surface_size;
        let mut rpass = begin_pass(target, "mesh handle pass", wgpu::LoadOp::Load);
        rpass.set_viewport(0.0, 0.0, w as f32, h as f32, 0.0, 1.0);
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, quad_vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..self.instances.len() as u32);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh handle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/handles.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("mesh handle bgl"),
                entries: &[uniform_layout_entry(
                    wgpu::ShaderStages::VERTEX,
                    std::mem::size_of::<ViewportUniform>() as u64,
                )],
            });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh handle pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh handle pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout(), HandleInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(premul_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: primitive_state(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh handle viewport ubo"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh handle bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }

    fn ensure_static_buffers(&mut self, ctx: &RenderCtx<'_>) {
        if self.quad_vbo.is_some() && self.quad_ibo.is_some() {
            return;
        }

        self.quad_vbo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh handle quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.quad_ibo = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh handle quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return };
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform {
                viewport: [ctx.viewport.width.max(1.0), ctx.viewport.height.max(1.0)],
                _pad: [0.0; 2],
            }),
        );
    }

    fn ensure_instance_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.instance_capacity && self.instance_vbo.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(64);
        self.instance_vbo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh handle instance vbo"),
            size: (new_cap * std::mem::size_of::<HandleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.instance_capacity = new_cap;
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (64 bytes):
///
///  offset  0  center   [f32; 2]  loc 1
///  offset  8  geom     [f32; 4]  loc 2  (half extents, stroke width, unused)
///  offset 24  fill     [f32; 4]  loc 3
///  offset 40  stroke   [f32; 4]  loc 4
///  offset 56  shape    [u32; 2]  loc 5  (kind, dash count or digit)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct HandleInstance {
    center: [f32; 2],
    geom: [f32; 4],
    fill: [f32; 4],
    stroke: [f32; 4],
    shape: [u32; 2],
}

impl HandleInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x4, // geom
        3 => Float32x4, // fill
        4 => Float32x4, // stroke
        5 => Uint32x2   // shape
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<HandleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for commands with nothing to draw.
    fn from_cmd(cmd: &DrawCmd, warned_bad_digit: &mut bool) -> Option<Self> {
        let inst = match *cmd {
            DrawCmd::Rect { rect, color } => {
                if rect.is_empty() {
                    return None;
                }
                let c = rect.center();
                Self {
                    center: [c.x, c.y],
                    geom: [rect.size.x * 0.5, rect.size.y * 0.5, 0.0, 0.0],
                    fill: color.to_array(),
                    stroke: [0.0; 4],
                    shape: [KIND_RECT, 0],
                }
            }
            DrawCmd::Disc { center, radius, fill, border } => {
                if radius <= 0.0 {
                    return None;
                }
                let (width, stroke) = match border {
                    Some(b) => (b.width.clamp(0.0, radius), b.color.to_array()),
                    None => (0.0, [0.0; 4]),
                };
                Self {
                    center: [center.x, center.y],
                    geom: [radius, radius, width, 0.0],
                    fill: fill.to_array(),
                    stroke,
                    shape: [KIND_DISC, 0],
                }
            }
            DrawCmd::DashedRing { center, radius, width, dashes, color } => {
                if radius <= 0.0 || width <= 0.0 {
                    return None;
                }
                let outer = radius + width * 0.5;
                Self {
                    center: [center.x, center.y],
                    geom: [outer, outer, width, 0.0],
                    fill: [0.0; 4],
                    stroke: color.to_array(),
                    shape: [KIND_RING, dashes.max(1)],
                }
            }
            DrawCmd::Digit { center, height, digit, color } => {
                if digit > 9 && !*warned_bad_digit {
                    log::debug!("digit glyph {digit} out of range; drawing 9");
                    *warned_bad_digit = true;
                }
                Self {
                    center: [center.x, center.y],
                    geom: [height * 0.25, height * 0.5, 0.0, 0.0],
                    fill: color.to_array(),
                    stroke: [0.0; 4],
                    shape: [KIND_DIGIT, u32::from(digit.min(9))],
                }
            }
        };
        Some(inst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::Border;

    fn convert(cmd: DrawCmd) -> Option<HandleInstance> {
        let mut warned = false;
        HandleInstance::from_cmd(&cmd, &mut warned)
    }

    #[test]
    fn instance_is_64_bytes() {
        assert_eq!(std::mem::size_of::<HandleInstance>(), 64);
    }

    #[test]
    fn rect_uses_center_and_half_extents() {
        let inst = convert(DrawCmd::Rect { rect: Rect::new(10.0, 20.0, 30.0, 2.0), color: Color::WHITE }).unwrap();
        assert_eq!(inst.center, [25.0, 21.0]);
        assert_eq!(&inst.geom[..2], &[15.0, 1.0]);
        assert_eq!(inst.shape[0], KIND_RECT);
    }

    #[test]
    fn disc_border_is_clamped_to_radius() {
        let inst = convert(DrawCmd::Disc {
            center: Vec2::new(0.0, 0.0),
            radius: 4.0,
            fill: Color::BLACK,
            border: Some(Border::new(10.0, Color::WHITE)),
        })
        .unwrap();
        assert_eq!(inst.geom[2], 4.0);
        assert_eq!(inst.stroke, Color::WHITE.to_array());
    }

    #[test]
    fn ring_quad_covers_stroke() {
        let inst = convert(DrawCmd::DashedRing {
            center: Vec2::new(5.0, 5.0),
            radius: 10.0,
            width: 2.0,
            dashes: 0,
            color: Color::WHITE,
        })
        .unwrap();
        assert_eq!(inst.geom[0], 11.0);
        assert_eq!(inst.shape, [KIND_RING, 1]);
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        assert!(convert(DrawCmd::Rect { rect: Rect::new(0.0, 0.0, 0.0, 4.0), color: Color::WHITE }).is_none());
        assert!(convert(DrawCmd::Disc {
            center: Vec2::new(0.0, 0.0),
            radius: 0.0,
            fill: Color::WHITE,
            border: None
        })
        .is_none());
    }

    #[test]
    fn out_of_range_digit_is_clamped_once() {
        let mut warned = false;
        let cmd = DrawCmd::Digit { center: Vec2::new(0.0, 0.0), height: 10.0, digit: 12, color: Color::WHITE };
        let inst = HandleInstance::from_cmd(&cmd, &mut warned).unwrap();
        assert_eq!(inst.shape, [KIND_DIGIT, 9]);
        assert!(warned);
    }
}
