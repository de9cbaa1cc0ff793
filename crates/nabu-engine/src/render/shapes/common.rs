//! Shared GPU types and utilities used by all shape renderers.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::RenderCtx;

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

const VIEWPORT_UBO_SIZE: NonZeroU64 =
    match NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64) {
        Some(n) => n,
        None => panic!("ViewportUniform is zero-sized"),
    };

/// Group-0 binding shared by every pipeline: the viewport size in logical pixels.
pub(super) struct ViewportBinding {
    pub layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
    ubo: wgpu::Buffer,
}

impl ViewportBinding {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} viewport bgl")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(VIEWPORT_UBO_SIZE),
                },
                count: None,
            }],
        });

        let ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} viewport ubo")),
            size: VIEWPORT_UBO_SIZE.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} viewport bind group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.as_entire_binding(),
            }],
        });

        Self { layout, bind_group, ubo }
    }

    pub(super) fn write(&self, ctx: &RenderCtx<'_>) {
        let u = ViewportUniform { viewport: ctx.viewport.clamped(), _pad: [0.0; 2] };
        ctx.queue.write_buffer(&self.ubo, 0, bytemuck::bytes_of(&u));
    }
}

// ── quad vertex ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1, (0,0) bottom-left
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Unit quad vertex + index buffers for instanced renderers.
pub(super) struct UnitQuad {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl UnitQuad {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }
}

// ── growable vertex buffer ────────────────────────────────────────────────

/// Persistent vertex/instance buffer, rewritten in place each frame.
///
/// Capacity is a power of two of at least 64 elements and only grows.
pub(super) struct GrowableBuffer<T> {
    label: String,
    buffer: wgpu::Buffer,
    capacity: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Pod> GrowableBuffer<T> {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let label = label.to_string();
        let capacity = MIN_CAPACITY;
        let buffer = Self::allocate(ctx, &label, capacity);
        Self { label, buffer, capacity, _marker: std::marker::PhantomData }
    }

    /// Writes `data` at offset 0, reallocating first if it does not fit.
    pub(super) fn upload(&mut self, ctx: &RenderCtx<'_>, data: &[T]) {
        if data.len() > self.capacity {
            self.capacity = grown_capacity(data.len());
            self.buffer = Self::allocate(ctx, &self.label, self.capacity);
            log::debug!("{}: grew to {} elements", self.label, self.capacity);
        }
        if !data.is_empty() {
            ctx.queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
    }

    pub(super) fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    fn allocate(ctx: &RenderCtx<'_>, label: &str, capacity: usize) -> wgpu::Buffer {
        ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<T>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

const MIN_CAPACITY: usize = 64;

pub(super) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(MIN_CAPACITY)
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Everything that differs between the shape pipelines.
pub(super) struct PipelineSpec<'a> {
    pub label: &'a str,
    pub shader_src: &'a str,
    pub bind_group_layouts: &'a [&'a wgpu::BindGroupLayout],
    pub buffers: &'a [wgpu::VertexBufferLayout<'a>],
}

/// Triangle-list pipeline with premultiplied blending into the surface format.
pub(super) fn create_pipeline(ctx: &RenderCtx<'_>, spec: PipelineSpec<'_>) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{} shader", spec.label)),
        source: wgpu::ShaderSource::Wgsl(spec.shader_src.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{} pipeline layout", spec.label)),
        bind_group_layouts: spec.bind_group_layouts,
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{} pipeline", spec.label)),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: spec.buffers,
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

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
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
    })
}

/// Clamp-to-edge, linear-filtered sampler.
pub(super) fn linear_clamp_sampler(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Sampler {
    ctx.device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::MipmapFilterMode::Linear,
        ..Default::default()
    })
}

/// Bind group layout for one sampled 2D texture plus its sampler.
pub(super) fn texture_bind_group_layout(ctx: &RenderCtx<'_>, label: &str) -> wgpu::BindGroupLayout {
    ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// One mip level's tightly packed texels.
#[derive(Debug, Copy, Clone)]
pub(super) struct TexelLevel<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

/// Creates a texture of `format` holding `base` plus the smaller `mips`, in
/// order, and returns a view over all levels.
pub(super) fn upload_texture(
    ctx: &RenderCtx<'_>,
    label: &str,
    format: wgpu::TextureFormat,
    bytes_per_pixel: u32,
    base: TexelLevel<'_>,
    mips: &[TexelLevel<'_>],
) -> wgpu::TextureView {
    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d { width: base.width, height: base.height, depth_or_array_layers: 1 },
        mip_level_count: 1 + mips.len() as u32,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    // `write_texture` has no row-alignment requirement, so single-channel
    // glyph rows of any width upload directly.
    for (mip_level, level) in std::iter::once(&base).chain(mips).enumerate() {
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: mip_level as u32,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            level.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(level.width * bytes_per_pixel),
                rows_per_image: Some(level.height),
            },
            wgpu::Extent3d { width: level.width, height: level.height, depth_or_array_layers: 1 },
        );
    }

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Bind group for a texture view + sampler, matching [`texture_bind_group_layout`].
pub(super) fn texture_bind_group(
    ctx: &RenderCtx<'_>,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: wgpu::BindingResource::TextureView(view) },
            wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::Sampler(sampler) },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_is_power_of_two_with_floor() {
        assert_eq!(grown_capacity(1), 64);
        assert_eq!(grown_capacity(64), 64);
        assert_eq!(grown_capacity(65), 128);
        assert_eq!(grown_capacity(1000), 1024);
    }

    #[test]
    fn viewport_uniform_is_16_bytes() {
        assert_eq!(VIEWPORT_UBO_SIZE.get(), 16);
    }

    #[test]
    fn quad_indices_cover_two_ccw_triangles() {
        assert_eq!(QUAD_INDICES, [0, 1, 2, 0, 2, 3]);
        assert_eq!(QUAD_VERTICES[2].pos, [1.0, 1.0]);
    }
}
