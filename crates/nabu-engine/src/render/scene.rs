use std::fmt;

use crate::assets::DecodedImage;
use crate::scene::{DrawList, TextureId};
use crate::text::GlyphCache;

use super::shapes::image::ImageRenderer;
use super::shapes::rect::RectRenderer;
use super::shapes::rounded_rect::RoundedRectRenderer;
use super::shapes::text::{TextRenderReport, TextRenderer};
use super::{RenderCtx, RenderTarget};

/// Counts from one [`SceneRenderer::render`] call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneReport {
    pub rects: usize,
    pub rounded_rects: usize,
    pub images: usize,
    pub text: TextRenderReport,
}

impl fmt::Display for SceneReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rects, {} rounded rects, {} images, {} glyph draws",
            self.rects, self.rounded_rects, self.images, self.text.draw_calls
        )?;
        if !self.text.missing.is_empty() {
            write!(f, ", {} missing glyphs", self.text.missing.len())?;
        }
        Ok(())
    }
}

/// All shape renderers, created together during setup.
///
/// Layers are drawn in a fixed order: rectangles, rounded rectangles, images,
/// then text. Within a layer, draw list order is kept.
pub struct SceneRenderer {
    rects: RectRenderer,
    rounded_rects: RoundedRectRenderer,
    images: ImageRenderer,
    text: TextRenderer,
}

impl SceneRenderer {
    pub fn new(ctx: &RenderCtx<'_>, glyphs: GlyphCache<Vec<u8>>) -> Self {
        Self {
            rects: RectRenderer::new(ctx),
            rounded_rects: RoundedRectRenderer::new(ctx),
            images: ImageRenderer::new(ctx),
            text: TextRenderer::new(ctx, glyphs),
        }
    }

    pub fn upload_image(&mut self, ctx: &RenderCtx<'_>, image: &DecodedImage) -> TextureId {
        self.images.upload(ctx, image)
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &DrawList,
    ) -> SceneReport {
        SceneReport {
            rects: self.rects.render(ctx, target, draw_list),
            rounded_rects: self.rounded_rects.render(ctx, target, draw_list),
            images: self.images.render(ctx, target, draw_list),
            text: self.text.render(ctx, target, draw_list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_summarizes_each_layer() {
        let report = SceneReport {
            rects: 4,
            rounded_rects: 8,
            images: 7,
            text: TextRenderReport { draw_calls: 210, missing: vec![] },
        };
        assert_eq!(report.to_string(), "4 rects, 8 rounded rects, 7 images, 210 glyph draws");
    }

    #[test]
    fn report_mentions_missing_glyphs() {
        let report = SceneReport {
            text: TextRenderReport { draw_calls: 3, missing: vec!['\u{e9}', '\u{e7}'] },
            ..Default::default()
        };
        assert!(report.to_string().ends_with("3 glyph draws, 2 missing glyphs"));
    }
}
