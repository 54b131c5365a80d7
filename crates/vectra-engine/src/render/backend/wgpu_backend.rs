use anyhow::Context;

use crate::coords::Mat4;
use crate::paint::Color;
use crate::render::batch::Topology;
use crate::render::vertex::Vertex;
use crate::render::{RenderCtx, RenderTarget};

use super::GpuBackend;

const INDEX_SIZE: u64 = std::mem::size_of::<u32>() as u64;
const MAT4_SIZE: u64 = std::mem::size_of::<Mat4>() as u64;

#[derive(Debug, Copy, Clone)]
struct PendingDraw {
    topology: Topology,
    index_count: u32,
    first_index: u32,
}

/// [`GpuBackend`] on a wgpu device.
///
/// Uploads go straight to the queue. Clears and draws are queued and replayed
/// by [`WgpuBackend::encode`] inside a single render pass, since a pass can
/// only be opened once the frame's target is known.
pub struct WgpuBackend {
    device: wgpu::Device,
    queue: wgpu::Queue,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    view_proj_ubo: wgpu::Buffer,

    /// Created by the first `resize_*` call; the renderer sizes both on construction.
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    max_buffer_size: u64,

    clear: Option<Color>,
    draws: Vec<PendingDraw>,
}

impl WgpuBackend {
    /// Creates the pipeline and view-projection uniform.
    ///
    /// Vertex and index storage is allocated by the `resize_*` calls that
    /// [`ShapeRenderer::new`](crate::render::ShapeRenderer::new) issues.
    pub fn new(ctx: &RenderCtx<'_>) -> anyhow::Result<Self> {
        let ubo_size = wgpu::BufferSize::new(MAT4_SIZE).context("view-projection uniform size is zero")?;

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("vectra shapes shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/shapes.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("vectra shapes bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(ubo_size),
                },
                count: None,
            }],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("vectra shapes pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("vectra shapes pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: Topology::Triangles.to_wgpu(),
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let view_proj_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("vectra view-projection ubo"),
            size: MAT4_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        ctx.queue.write_buffer(&view_proj_ubo, 0, bytemuck::bytes_of(&Mat4::IDENTITY));

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("vectra shapes bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_proj_ubo.as_entire_binding(),
            }],
        });

        let max_buffer_size = ctx.device.limits().max_buffer_size;
        log::debug!("shape backend ready (max buffer {max_buffer_size} bytes)");

        Ok(Self {
            device: ctx.device.clone(),
            queue: ctx.queue.clone(),
            pipeline,
            bind_group,
            view_proj_ubo,
            vertex_buffer: None,
            index_buffer: None,
            max_buffer_size,
            clear: None,
            draws: Vec::new(),
        })
    }

    /// Records the queued clear and draws into `target`, then empties the queue.
    ///
    /// Without a queued clear the pass loads the existing contents.
    pub fn encode(&mut self, target: &mut RenderTarget<'_>) {
        let load = match self.clear.take() {
            Some(c) => wgpu::LoadOp::Clear(c.to_wgpu()),
            None => wgpu::LoadOp::Load,
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("vectra shapes pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        if self.draws.is_empty() {
            return;
        }
        let (Some(vertices), Some(indices)) = (&self.vertex_buffer, &self.index_buffer) else {
            log::warn!("{} draws dropped: storage was never sized", self.draws.len());
            self.draws.clear();
            return;
        };

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, vertices.slice(..));
        rpass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);

        for d in self.draws.drain(..) {
            // Single pipeline; every topology is a triangle list today.
            let Topology::Triangles = d.topology;
            rpass.draw_indexed(d.first_index..d.first_index + d.index_count, 0, 0..1);
        }
    }

    fn write_checked(&self, buffer: Option<&wgpu::Buffer>, data: &[u8], byte_offset: u64, what: &str) {
        if data.is_empty() {
            return;
        }
        let Some(buffer) = buffer else {
            log::error!("{what} upload before storage was sized");
            return;
        };
        let end = byte_offset + data.len() as u64;
        if end > buffer.size() {
            log::error!("{what} upload [{byte_offset}, {end}) exceeds storage of {} bytes", buffer.size());
            return;
        }
        self.queue.write_buffer(buffer, byte_offset, data);
    }
}

/// Replaces `slot` with a buffer of `size` bytes. Sizes over the device limit
/// keep the old buffer; uploads past its end are then rejected by `write_checked`.
fn resize_storage(
    device: &wgpu::Device,
    slot: &mut Option<wgpu::Buffer>,
    max: u64,
    label: &str,
    size: u64,
    usage: wgpu::BufferUsages,
) {
    if size > max {
        log::error!("{label}: {size} bytes exceeds max_buffer_size {max}; keeping old storage");
        return;
    }
    log::debug!("{label} -> {size} bytes");
    // Sizes stay 4-byte aligned: records are 40 bytes, indices 4.
    *slot = Some(device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size.max(wgpu::COPY_BUFFER_ALIGNMENT),
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    }));
}

impl GpuBackend for WgpuBackend {
    fn resize_vertex_storage(&mut self, byte_len: u64) {
        resize_storage(
            &self.device,
            &mut self.vertex_buffer,
            self.max_buffer_size,
            "vectra vertex storage",
            byte_len,
            wgpu::BufferUsages::VERTEX,
        );
    }

    fn resize_index_storage(&mut self, byte_len: u64) {
        resize_storage(
            &self.device,
            &mut self.index_buffer,
            self.max_buffer_size,
            "vectra index storage",
            byte_len,
            wgpu::BufferUsages::INDEX,
        );
    }

    fn update_vertex_range(&mut self, data: &[u8], byte_offset: u64) {
        self.write_checked(self.vertex_buffer.as_ref(), data, byte_offset, "vertex");
    }

    fn update_index_range(&mut self, data: &[u8], byte_offset: u64) {
        self.write_checked(self.index_buffer.as_ref(), data, byte_offset, "index");
    }

    fn set_view_projection(&mut self, matrix: &Mat4) {
        self.queue.write_buffer(&self.view_proj_ubo, 0, bytemuck::bytes_of(matrix));
    }

    fn clear_surface(&mut self, color: Color) {
        self.clear = Some(color);
        self.draws.clear();
    }

    fn draw_indexed(&mut self, topology: Topology, index_count: u32, index_byte_offset: u64) {
        self.draws.push(PendingDraw {
            topology,
            index_count,
            first_index: (index_byte_offset / INDEX_SIZE) as u32,
        });
    }
}
