use bytemuck::{Pod, Zeroable};

use crate::assets::DecodedImage;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, ImageCmd, TextureId};

use super::common::{
    create_pipeline, linear_clamp_sampler, texture_bind_group, texture_bind_group_layout,
    upload_texture, GrowableBuffer, PipelineSpec, QuadVertex, TexelLevel, UnitQuad,
    ViewportBinding,
};

struct ImageTexture {
    bind_group: wgpu::BindGroup,
    // Kept alive for the bind group.
    _view: wgpu::TextureView,
}

/// Renderer for `DrawCmd::Image`.
///
/// Textures are uploaded once with [`ImageRenderer::upload`] and referenced
/// from the draw list by [`TextureId`]. Each command is one instanced draw
/// with its texture bound at group 1.
pub struct ImageRenderer {
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    quad: UnitQuad,
    instances: GrowableBuffer<ImageInstance>,

    textures: Vec<ImageTexture>,
    scratch: Vec<(ImageInstance, TextureId)>,
    raw: Vec<ImageInstance>,
    warned_unknown: bool,
}

impl ImageRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let viewport = ViewportBinding::new(ctx, "nabu image");
        let texture_layout = texture_bind_group_layout(ctx, "nabu image texture bgl");
        let pipeline = create_pipeline(
            ctx,
            PipelineSpec {
                label: "nabu image",
                shader_src: include_str!("shaders/image.wgsl"),
                bind_group_layouts: &[&viewport.layout, &texture_layout],
                buffers: &[QuadVertex::layout(), ImageInstance::layout()],
            },
        );

        Self {
            pipeline,
            viewport,
            texture_layout,
            sampler: linear_clamp_sampler(ctx, "nabu image sampler"),
            quad: UnitQuad::new(ctx, "nabu image"),
            instances: GrowableBuffer::new(ctx, "nabu image instance vbo"),
            textures: Vec::new(),
            scratch: Vec::new(),
            raw: Vec::new(),
            warned_unknown: false,
        }
    }

    /// Uploads `image` and its mip chain as an `Rgba8Unorm` texture.
    pub fn upload(&mut self, ctx: &RenderCtx<'_>, image: &DecodedImage) -> TextureId {
        let id = TextureId::from_index(self.textures.len() as u32);
        let label = format!("nabu image texture #{}", id.index());

        let mips = image.mip_levels();
        let mip_levels: Vec<_> = mips.iter().map(texel_level).collect();
        let view = upload_texture(
            ctx,
            &label,
            wgpu::TextureFormat::Rgba8Unorm,
            4,
            texel_level(image),
            &mip_levels,
        );
        let bind_group = texture_bind_group(ctx, &label, &self.texture_layout, &view, &self.sampler);

        log::debug!(
            "uploaded {label} ({}x{}, {} mip levels)",
            image.width,
            image.height,
            1 + mip_levels.len()
        );
        self.textures.push(ImageTexture { bind_group, _view: view });
        id
    }

    /// Draws every `DrawCmd::Image` in `draw_list`, in list order. Returns the
    /// number of draw calls issued.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) -> usize {
        self.scratch.clear();
        for cmd in draw_list.iter() {
            let DrawCmd::Image(img) = cmd else { continue };
            if img.texture.index() as usize >= self.textures.len() {
                if !self.warned_unknown {
                    log::warn!("ImageRenderer: unknown {:?}, skipping", img.texture);
                    self.warned_unknown = true;
                }
                continue;
            }
            if let Some(inst) = ImageInstance::from_cmd(img) {
                self.scratch.push((inst, img.texture));
            }
        }

        if self.scratch.is_empty() {
            return 0;
        }

        self.raw.clear();
        self.raw.extend(self.scratch.iter().map(|(inst, _)| *inst));
        self.viewport.write(ctx);
        self.instances.upload(ctx, &self.raw);

        let mut rpass = target.begin_load_pass("nabu image pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.viewport.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        rpass.set_index_buffer(self.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);

        for (i, (_, texture)) in self.scratch.iter().enumerate() {
            let tex = &self.textures[texture.index() as usize];
            rpass.set_bind_group(1, &tex.bind_group, &[]);
            let i = i as u32;
            rpass.draw_indexed(0..6, 0, i..i + 1);
        }

        self.scratch.len()
    }
}

fn texel_level(image: &DecodedImage) -> TexelLevel<'_> {
    TexelLevel { width: image.width, height: image.height, data: &image.rgba }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct ImageInstance {
    origin: [f32; 2],
    size: [f32; 2],
}

impl ImageInstance {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2  // size
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    fn from_cmd(cmd: &ImageCmd) -> Option<Self> {
        let r = cmd.rect.normalized();
        if r.is_empty() || !r.is_finite() {
            return None;
        }
        Some(Self { origin: r.origin.to_array(), size: r.size.to_array() })
    }
}
