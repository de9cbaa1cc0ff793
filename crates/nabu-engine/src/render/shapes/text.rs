use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};

use crate::coords::Vec2;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList, TextCmd};
use crate::text::{layout_text, GlyphCache};

use super::common::{
    create_pipeline, linear_clamp_sampler, texture_bind_group, texture_bind_group_layout,
    upload_texture, GrowableBuffer, PipelineSpec, TexelLevel, ViewportBinding,
};

// ── vertex ────────────────────────────────────────────────────────────────

/// One corner of a glyph quad.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct TextVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl TextVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TextVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub const VERTICES_PER_GLYPH: u32 = 6;

// ── batch ─────────────────────────────────────────────────────────────────

/// A glyph quad in a [`TextBatch`]: six vertices starting at `first_vertex`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlyphDraw {
    pub ch: char,
    pub first_vertex: u32,
}

/// CPU-side vertex stream for a frame's text runs.
///
/// Each glyph with a non-zero-area quad contributes six vertices (two
/// triangles, top-left first) and one [`GlyphDraw`].
#[derive(Debug, Clone, Default)]
pub struct TextBatch {
    vertices: Vec<TextVertex>,
    draws: Vec<GlyphDraw>,
    missing: Vec<char>,
}

impl TextBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draws.clear();
        self.missing.clear();
    }

    /// Appends one run and returns the cursor after its last character.
    pub fn push_run<T>(&mut self, cache: &GlyphCache<T>, cmd: &TextCmd) -> Vec2 {
        let layout = layout_text(cache, &cmd.text, cmd.origin, cmd.scale);
        let color = cmd.color.to_array();

        for placed in &layout.glyphs {
            let r = placed.rect;
            if r.is_empty() {
                continue;
            }
            let (lo, hi) = (r.origin, r.max());
            let v = |px: f32, py: f32, u: f32, t: f32| TextVertex { pos: [px, py], uv: [u, t], color };

            self.draws.push(GlyphDraw { ch: placed.ch, first_vertex: self.vertices.len() as u32 });
            self.vertices.extend_from_slice(&[
                v(lo.x, hi.y, 0.0, 0.0),
                v(lo.x, lo.y, 0.0, 1.0),
                v(hi.x, lo.y, 1.0, 1.0),
                v(lo.x, hi.y, 0.0, 0.0),
                v(hi.x, lo.y, 1.0, 1.0),
                v(hi.x, hi.y, 1.0, 0.0),
            ]);
        }

        self.missing.extend_from_slice(&layout.missing);
        layout.end
    }

    pub fn vertices(&self) -> &[TextVertex] {
        &self.vertices
    }

    pub fn draws(&self) -> &[GlyphDraw] {
        &self.draws
    }

    /// Characters that had no cached glyph, in the order they were met.
    pub fn missing(&self) -> &[char] {
        &self.missing
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// GPU side of one cached glyph.
pub struct GlyphTexture {
    bind_group: wgpu::BindGroup,
    _view: wgpu::TextureView,
}

/// What one [`TextRenderer::render`] call did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRenderReport {
    pub draw_calls: usize,
    pub missing: Vec<char>,
}

/// Renderer for `DrawCmd::Text`.
///
/// Owns the glyph cache: every glyph bitmap is uploaded at construction as
/// its own `R8Unorm` texture. Per frame, all runs are written into one
/// persistent vertex buffer and each glyph is drawn with its own texture bound.
pub struct TextRenderer {
    pipeline: wgpu::RenderPipeline,
    viewport: ViewportBinding,
    glyphs: GlyphCache<Option<GlyphTexture>>,
    vertices: GrowableBuffer<TextVertex>,
    batch: TextBatch,
    warned_missing: HashSet<char>,
}

impl TextRenderer {
    /// Uploads every glyph in `cache`; glyphs without ink get no texture.
    pub fn new(ctx: &RenderCtx<'_>, cache: GlyphCache<Vec<u8>>) -> Self {
        let viewport = ViewportBinding::new(ctx, "nabu text");
        let texture_layout = texture_bind_group_layout(ctx, "nabu glyph texture bgl");
        let sampler = linear_clamp_sampler(ctx, "nabu glyph sampler");

        let pipeline = create_pipeline(
            ctx,
            PipelineSpec {
                label: "nabu text",
                shader_src: include_str!("shaders/text.wgsl"),
                bind_group_layouts: &[&viewport.layout, &texture_layout],
                buffers: &[TextVertex::layout()],
            },
        );

        if cache.is_empty() {
            log::warn!("TextRenderer: glyph cache is empty; no text will be drawn");
        }
        let cached = cache.len();

        let glyphs = cache.map(|ch, metrics, bitmap| {
            if metrics.is_empty() {
                return None;
            }
            let label = format!("nabu glyph {:#04x}", ch as u32);
            let base = TexelLevel { width: metrics.width, height: metrics.height, data: &bitmap };
            let view = upload_texture(ctx, &label, wgpu::TextureFormat::R8Unorm, 1, base, &[]);
            let bind_group = texture_bind_group(ctx, &label, &texture_layout, &view, &sampler);
            Some(GlyphTexture { bind_group, _view: view })
        });
        log::debug!(
            "uploaded {} glyph textures for {cached} cached glyphs",
            glyphs.iter().filter(|(_, g)| g.data.is_some()).count()
        );

        Self {
            pipeline,
            viewport,
            glyphs,
            vertices: GrowableBuffer::new(ctx, "nabu text vertex vbo"),
            batch: TextBatch::new(),
            warned_missing: HashSet::new(),
        }
    }

    /// Draws every `DrawCmd::Text` in `draw_list`, one draw call per glyph.
    ///
    /// Characters missing from the cache are logged once and listed in the report.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) -> TextRenderReport {
        self.batch.clear();
        for cmd in draw_list.iter() {
            if let DrawCmd::Text(t) = cmd {
                self.batch.push_run(&self.glyphs, t);
            }
        }

        for &ch in self.batch.missing() {
            if self.warned_missing.insert(ch) {
                log::warn!("TextRenderer: no glyph for {ch:?}; drawn as nothing");
            }
        }

        let mut report = TextRenderReport {
            draw_calls: 0,
            missing: self.batch.missing().to_vec(),
        };
        if self.batch.draws().is_empty() {
            return report;
        }

        self.viewport.write(ctx);
        self.vertices.upload(ctx, self.batch.vertices());

        let mut rpass = target.begin_load_pass("nabu text pass");
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.viewport.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertices.buffer().slice(..));

        for draw in self.batch.draws() {
            let Some(texture) = self.glyphs.get(draw.ch).and_then(|g| g.data.as_ref()) else {
                continue;
            };
            rpass.set_bind_group(1, &texture.bind_group, &[]);
            rpass.draw(draw.first_vertex..draw.first_vertex + VERTICES_PER_GLYPH, 0..1);
            report.draw_calls += 1;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::text::fake::FakeRasterizer;
    use crate::text::GlyphCacheConfig;

    fn cache() -> GlyphCache<Vec<u8>> {
        GlyphCache::build(&FakeRasterizer::default(), &GlyphCacheConfig::default())
    }

    fn run(text: &str, x: f32, y: f32, scale: f32) -> TextCmd {
        TextCmd { text: text.into(), origin: Vec2::new(x, y), scale, color: Color::white() }
    }

    // ── draws ─────────────────────────────────────────────────────────────

    #[test]
    fn empty_string_draws_nothing() {
        let mut batch = TextBatch::new();
        let end = batch.push_run(&cache(), &run("", 20.0, 713.0, 0.45));
        assert!(batch.draws().is_empty());
        assert!(batch.vertices().is_empty());
        assert_eq!(end, Vec2::new(20.0, 713.0));
    }

    #[test]
    fn one_draw_per_inked_glyph() {
        let mut batch = TextBatch::new();
        batch.push_run(&cache(), &run("Ca va?", 0.0, 0.0, 0.4));
        // The space has no ink.
        assert_eq!(batch.draws().len(), 5);
        assert_eq!(batch.vertices().len(), 5 * VERTICES_PER_GLYPH as usize);
        assert_eq!(batch.draws()[2], GlyphDraw { ch: 'v', first_vertex: 12 });
    }

    #[test]
    fn runs_accumulate() {
        let mut batch = TextBatch::new();
        let c = cache();
        batch.push_run(&c, &run("ab", 0.0, 0.0, 1.0));
        batch.push_run(&c, &run("cd", 0.0, 100.0, 1.0));
        assert_eq!(batch.draws().len(), 4);
        assert_eq!(batch.draws()[3].first_vertex, 18);

        batch.clear();
        assert!(batch.draws().is_empty());
    }

    // ── vertices ──────────────────────────────────────────────────────────

    #[test]
    fn vertex_order_and_uvs() {
        // 20x30 box, bearing (1, 24); scale 1 from (100, 50).
        let mut batch = TextBatch::new();
        batch.push_run(&cache(), &run("H", 100.0, 50.0, 1.0));

        let (x, y, w, h) = (101.0, 44.0, 20.0, 30.0);
        let got: Vec<([f32; 2], [f32; 2])> =
            batch.vertices().iter().map(|v| (v.pos, v.uv)).collect();
        assert_eq!(
            got,
            vec![
                ([x, y + h], [0.0, 0.0]),
                ([x, y], [0.0, 1.0]),
                ([x + w, y], [1.0, 1.0]),
                ([x, y + h], [0.0, 0.0]),
                ([x + w, y], [1.0, 1.0]),
                ([x + w, y + h], [1.0, 0.0]),
            ]
        );
    }

    #[test]
    fn run_color_is_on_every_vertex() {
        let mut batch = TextBatch::new();
        let mut cmd = run("Hi", 0.0, 0.0, 1.0);
        cmd.color = Color::rgb(0.43, 0.47, 0.51);
        batch.push_run(&cache(), &cmd);
        assert!(batch.vertices().iter().all(|v| v.color == [0.43, 0.47, 0.51, 1.0]));
    }

    // ── missing ───────────────────────────────────────────────────────────

    #[test]
    fn missing_chars_are_collected() {
        let mut batch = TextBatch::new();
        let end = batch.push_run(&cache(), &run("ça", 0.0, 0.0, 1.0));
        assert_eq!(batch.missing(), &['ç']);
        assert_eq!(batch.draws().len(), 1);
        assert_eq!(end.x, 32.0);
    }
}
