use std::borrow::Cow;

use mesh_model::{pack, GradientState, MeshUniforms, PackingMode};
use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::common::{
    begin_pass, primitive_state, uniform_layout_entry, QuadVertex, QUAD_INDICES, QUAD_VERTICES,
};
use super::program::{ShaderProgram, FRAGMENT_ENTRY, VERTEX_ENTRY};

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct MeshRendererConfig {
    pub packing: PackingMode,
}

/// GPU objects the mesh renderer creates once and reuses every frame.
pub struct RendererResources {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vbo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
}

impl RendererResources {
    /// Builds the pipeline and buffers for a linked `program`.
    pub fn new(ctx: &RenderCtx<'_>, program: &ShaderProgram) -> Self {
        let vs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh vertex shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(program.vertex_source())),
        });
        let fs = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh fragment shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(program.fragment_source())),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("mesh uniforms bgl"),
                entries: &[uniform_layout_entry(wgpu::ShaderStages::FRAGMENT, MeshUniforms::SIZE)],
            });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("mesh pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vs,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fs,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: primitive_state(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let uniform_buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("mesh uniforms"),
            size: MeshUniforms::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh uniforms bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let quad_vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh quad vbo"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            format: ctx.surface_format,
            pipeline,
            uniform_buffer,
            bind_group,
            quad_vbo,
            quad_ibo,
        }
    }

    #[inline]
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

/// Draws the mesh gradient over the whole surface.
///
/// Each `draw` packs the current point set, clears the target and issues a
/// single indexed draw of the full-canvas quad.
pub struct MeshRenderer {
    program: ShaderProgram,
    resources: RendererResources,
    config: MeshRendererConfig,

    /// Last uploaded block; unchanged frames skip the buffer write.
    uploaded: Option<MeshUniforms>,
    warned_not_drawable: bool,
}

impl MeshRenderer {
    /// Compiles and links the mesh program, then creates its GPU resources.
    pub fn new(ctx: &RenderCtx<'_>, config: MeshRendererConfig) -> Result<Self, RenderError> {
        let mut program = ShaderProgram::mesh();
        program.build()?;

        let resources = RendererResources::new(ctx, &program);
        program.mark_ready();
        log::info!("mesh renderer ready ({:?} packing, {:?})", config.packing, ctx.surface_format);

        Ok(Self {
            program,
            resources,
            config,
            uploaded: None,
            warned_not_drawable: false,
        })
    }

    #[inline]
    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    #[inline]
    pub fn config(&self) -> MeshRendererConfig {
        self.config
    }

    pub fn set_packing(&mut self, packing: PackingMode) {
        if self.config.packing != packing {
            self.config.packing = packing;
            self.uploaded = None;
        }
    }

    pub fn draw(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, state: &GradientState) {
        if !ctx.is_drawable() {
            if !self.warned_not_drawable {
                log::debug!("surface has zero size; skipping mesh draw");
                self.warned_not_drawable = true;
            }
            return;
        }
        self.warned_not_drawable = false;

        self.ensure_format(ctx);

        let (w, h) = ctx.surface_size;
        let uniforms = pack(
            state.points(),
            state.noise_amount(),
            [w as f32, h as f32],
            self.config.packing,
        );
        if self.uploaded.as_ref() != Some(&uniforms) {
            ctx.queue.write_buffer(&self.resources.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            self.uploaded = Some(uniforms);
        }

        let res = &self.resources;
        let mut rpass = begin_pass(target, "mesh pass", wgpu::LoadOp::Clear(Color::TRANSPARENT.to_wgpu()));
        rpass.set_viewport(0.0, 0.0, w as f32, h as f32, 0.0, 1.0);
        rpass.set_pipeline(&res.pipeline);
        rpass.set_bind_group(0, &res.bind_group, &[]);
        rpass.set_vertex_buffer(0, res.quad_vbo.slice(..));
        rpass.set_index_buffer(res.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    /// Rebuilds resources if the surface format changed.
    fn ensure_format(&mut self, ctx: &RenderCtx<'_>) {
        if self.resources.format() == ctx.surface_format {
            return;
        }
        log::debug!("surface format changed to {:?}; rebuilding mesh pipeline", ctx.surface_format);
        self.resources = RendererResources::new(ctx, &self.program);
        self.uploaded = None;
    }
}
