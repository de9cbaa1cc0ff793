use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, RoundedRectCmd};

use super::common::{
    create_pipeline, GrowableBuffer, PipelineSpec, QuadVertex, UnitQuad, ViewportBinding,
};

/// Renderer for `DrawCmd::RoundedRect`.
///
/// Each rectangle is one instance; the fragment shader evaluates a
/// rounded-box signed distance and uses it as anti-aliased coverage.
pub struct RoundedRectRenderer {
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    quad: UnitQuad,
    instances: GrowableBuffer<RoundedRectInstance>,
    scratch: Vec<RoundedRectInstance>,
}

impl RoundedRectRenderer {
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let viewport = ViewportBinding::new(ctx, "nabu rounded_rect");
        let pipeline = create_pipeline(
            ctx,
            PipelineSpec {
                label: "nabu rounded_rect",
                shader_src: include_str!("shaders/rounded_rect.wgsl"),
                bind_group_layouts: &[&viewport.layout],
                buffers: &[QuadVertex::layout(), RoundedRectInstance::layout()],
            },
        );

        Self {
            pipeline,
            viewport,
            quad: UnitQuad::new(ctx, "nabu rounded_rect"),
            instances: GrowableBuffer::new(ctx, "nabu rounded_rect instance vbo"),
            scratch: Vec::new(),
        }
    }

    /// Draws every `DrawCmd::RoundedRect` in `draw_list`. Returns the number drawn.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) -> usize {
        self.scratch.clear();
        self.scratch.extend(draw_list.iter().filter_map(|cmd| match cmd {
            DrawCmd::RoundedRect(r) => RoundedRectInstance::from_cmd(r),
            _ => None,
        }));

        if self.scratch.is_empty() {
            return 0;
        }

        self.viewport.write(ctx);
        self.instances.upload(ctx, &self.scratch);

        let mut rpass = target.begin_load_pass("nabu rounded_rect pass");
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
pub(crate) struct RoundedRectInstance {
    origin: [f32; 2],
    size: [f32; 2],
    color: [f32; 4],
    radius: f32,
}

impl RoundedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // origin
        2 => Float32x2, // size
        3 => Float32x4, // color
        4 => Float32    // radius
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RoundedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Builds the GPU instance for `cmd`.
    ///
    /// The radius is clamped to `[0, min(w, h) / 2]`. Output depends only on
    /// the command's fields. `None` for empty or non-finite input.
    pub(crate) fn from_cmd(cmd: &RoundedRectCmd) -> Option<Self> {
        let r = cmd.rect.normalized();
        if r.is_empty() || !r.is_finite() || !cmd.color.is_finite() || !cmd.radius.is_finite() {
            return None;
        }
        let max_radius = r.size.x.min(r.size.y) * 0.5;
        Some(Self {
            origin: r.origin.to_array(),
            size: r.size.to_array(),
            color: cmd.color.to_array(),
            radius: cmd.radius.clamp(0.0, max_radius),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Rect;
    use crate::paint::Color;

    fn cmd(x: f32, y: f32, w: f32, h: f32, radius: f32) -> RoundedRectCmd {
        RoundedRectCmd::new(Rect::new(x, y, w, h), radius, Color::rgb(0.14, 0.18, 0.24))
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let c = cmd(490.0, 20.0, 600.0, 50.0, 15.0);
        let a = RoundedRectInstance::from_cmd(&c);
        let b = RoundedRectInstance::from_cmd(&c.clone());
        assert!(a.is_some());
        assert_eq!(bytemuck::bytes_of(&a.unwrap()), bytemuck::bytes_of(&b.unwrap()));
    }

    #[test]
    fn radius_clamps_to_half_short_side() {
        let inst = RoundedRectInstance::from_cmd(&cmd(0.0, 0.0, 90.0, 30.0, 40.0)).unwrap();
        assert_eq!(inst.radius, 15.0);
    }

    #[test]
    fn negative_radius_is_square() {
        let inst = RoundedRectInstance::from_cmd(&cmd(0.0, 0.0, 90.0, 30.0, -3.0)).unwrap();
        assert_eq!(inst.radius, 0.0);
    }

    #[test]
    fn empty_is_skipped() {
        assert!(RoundedRectInstance::from_cmd(&cmd(0.0, 0.0, 0.0, 30.0, 5.0)).is_none());
    }

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<RoundedRectInstance>(), 36);
        assert_eq!(std::mem::offset_of!(RoundedRectInstance, radius), 32);
    }
}
