use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, RectCmd};

use super::common::{
    create_pipeline, GrowableBuffer, PipelineSpec, QuadVertex, UnitQuad, ViewportBinding,
};

/// Solid rectangle renderer.
///
/// Geometry is provided as logical pixels, converted to NDC in the vertex shader using viewport.
/// Color is expected to be premultiplied RGBA (`paint::Color`).
pub struct RectRenderer {
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    quad: UnitQuad,
    instances: GrowableBuffer<RectInstance>,
    scratch: Vec<RectInstance>,
}

impl RectRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let viewport = ViewportBinding::new(ctx, "nabu rect");
        let pipeline = create_pipeline(
            ctx,
            PipelineSpec {
                label: "nabu rect",
                shader_src: include_str!("shaders/rect.wgsl"),
                bind_group_layouts: &[&viewport.layout],
                buffers: &[QuadVertex::layout(), RectInstance::layout()],
            },
        );

        Self {
            pipeline,
            viewport,
            quad: UnitQuad::new(ctx, "nabu rect"),
            instances: GrowableBuffer::new(ctx, "nabu rect instance vbo"),
            scratch: Vec::new(),
        }
    }

    /// Draws every `DrawCmd::Rect` in `draw_list`, in list order, as one
    /// instanced call. Returns the number of rectangles drawn.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) -> usize {
        self.scratch.clear();
        self.scratch.extend(draw_list.iter().filter_map(|cmd| match cmd {
            DrawCmd::Rect(r) => RectInstance::from_cmd(r),
            _ => None,
        }));

        if self.scratch.is_empty() {
            return 0;
        }

        self.viewport.write(ctx);
        self.instances.upload(ctx, &self.scratch);

        let mut rpass = target.begin_load_pass("nabu rect pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.viewport.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, self.instances.buffer().slice(..));
        rpass.set_index_buffer(self.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..6, 0, 0..self.scratch.len() as u32);

        self.scratch.len()
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
}

impl RectInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// `None` for empty or non-finite rectangles.
    fn from_cmd(cmd: &RectCmd) -> Option<Self> {
        let r = cmd.rect.normalized();
        if r.is_empty() || !r.is_finite() || !cmd.color.is_finite() {
            return None;
        }
        Some(Self {
            origin: r.origin.to_array(),
            size: r.size.to_array(),
            color: cmd.color.to_array(),
        })
    }
}
