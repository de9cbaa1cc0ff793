use crate::coords::{Rect, Vec2};

use super::cache::GlyphCache;

/// One glyph quad in screen space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlacedGlyph {
    pub ch: char,
    /// Bottom-left origin, y-up. May be zero-area (e.g. space).
    pub rect: Rect,
}

/// Result of laying out one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// Characters not in the cache, in string order. They produce no quad and
    /// do not move the cursor.
    pub missing: Vec<char>,
    /// Cursor after the last character; `y` is the baseline.
    pub end: Vec2,
}

/// Lays out `text` left to right from the baseline point `origin`.
///
/// Each glyph is scaled uniformly by `scale`. The cursor advances by the
/// whole-pixel advance (`advance >> 6`) times `scale`, independent of the
/// glyph's bitmap size or bearing. No kerning, wrapping or bidi.
pub fn layout_text<T>(cache: &GlyphCache<T>, text: &str, origin: Vec2, scale: f32) -> TextLayout {
    let mut out = TextLayout {
        glyphs: Vec::with_capacity(text.len()),
        missing: Vec::new(),
        end: origin,
    };
    let mut cursor = origin.x;

    for ch in text.chars() {
        let Some(glyph) = cache.get(ch) else {
            out.missing.push(ch);
            continue;
        };
        let m = glyph.metrics;

        let w = m.width as f32 * scale;
        let h = m.height as f32 * scale;
        let x = cursor + m.bearing_x as f32 * scale;
        // Descent below the baseline is `height - bearing_y`.
        let y = origin.y - (m.height as f32 - m.bearing_y as f32) * scale;

        out.glyphs.push(PlacedGlyph { ch, rect: Rect::new(x, y, w, h) });
        cursor += m.advance_px() as f32 * scale;
    }

    out.end = Vec2::new(cursor, origin.y);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::fake::FakeRasterizer;
    use crate::text::GlyphCacheConfig;

    fn cache_with(raster: FakeRasterizer) -> GlyphCache<Vec<u8>> {
        GlyphCache::build(&raster, &GlyphCacheConfig::default())
    }

    // ── cursor ────────────────────────────────────────────────────────────

    #[test]
    fn advance_2048_moves_32px_at_unit_scale() {
        let cache = cache_with(FakeRasterizer::default());
        let l = layout_text(&cache, "A", Vec2::new(0.0, 0.0), 1.0);
        assert_eq!(l.end.x, 32.0);
    }

    #[test]
    fn end_cursor_is_sum_of_advances() {
        // 100 (26.6) >> 6 == 1 px; the 36/64 fraction is dropped per glyph.
        let cache = cache_with(FakeRasterizer { advance: 100, ..Default::default() });
        let text = "Bonjour";
        let l = layout_text(&cache, text, Vec2::new(10.0, 5.0), 0.5);
        let expected = 10.0 + text.chars().count() as f32 * (100 >> 6) as f32 * 0.5;
        assert_eq!(l.end.x, expected);
        assert_eq!(l.end.y, 5.0);
    }

    #[test]
    fn cursor_ignores_bitmap_size_and_bearing() {
        let narrow = cache_with(FakeRasterizer { w: 2, bearing_x: -3, ..Default::default() });
        let wide = cache_with(FakeRasterizer { w: 60, bearing_x: 9, ..Default::default() });
        let a = layout_text(&narrow, "Super !", Vec2::new(115.0, 0.0), 0.4);
        let b = layout_text(&wide, "Super !", Vec2::new(115.0, 0.0), 0.4);
        assert_eq!(a.end, b.end);
    }

    #[test]
    fn empty_string_is_noop() {
        let cache = cache_with(FakeRasterizer::default());
        let origin = Vec2::new(42.0, 17.0);
        let l = layout_text(&cache, "", origin, 0.45);
        assert!(l.glyphs.is_empty());
        assert!(l.missing.is_empty());
        assert_eq!(l.end, origin);
    }

    // ── quads ─────────────────────────────────────────────────────────────

    #[test]
    fn quad_uses_bearing_and_baseline() {
        let cache = cache_with(FakeRasterizer {
            w: 20,
            h: 30,
            bearing_x: 2,
            bearing_y: 24,
            ..Default::default()
        });
        let l = layout_text(&cache, "g", Vec2::new(100.0, 50.0), 0.5);
        let r = l.glyphs[0].rect;
        assert_eq!(r.origin, Vec2::new(101.0, 47.0));
        assert_eq!(r.size, Vec2::new(10.0, 15.0));
        // Top edge sits bearing_y * scale above the baseline.
        assert_eq!(r.max().y, 50.0 + 24.0 * 0.5);
    }

    #[test]
    fn second_glyph_starts_at_advanced_cursor() {
        let cache = cache_with(FakeRasterizer { bearing_x: 0, ..Default::default() });
        let l = layout_text(&cache, "ab", Vec2::new(0.0, 0.0), 1.0);
        assert_eq!(l.glyphs[1].rect.origin.x, 32.0);
    }

    #[test]
    fn space_is_placed_with_zero_area() {
        let cache = cache_with(FakeRasterizer::default());
        let l = layout_text(&cache, "a b", Vec2::new(0.0, 0.0), 1.0);
        assert_eq!(l.glyphs.len(), 3);
        assert!(l.glyphs[1].rect.is_empty());
        assert_eq!(l.end.x, 96.0);
    }

    // ── missing ───────────────────────────────────────────────────────────

    #[test]
    fn missing_glyph_is_reported_without_advance() {
        let cache = cache_with(FakeRasterizer::default());
        let l = layout_text(&cache, "Ça va", Vec2::new(0.0, 0.0), 1.0);
        assert_eq!(l.missing, vec!['Ç']);
        assert_eq!(l.glyphs.len(), 4);
        assert_eq!(l.end.x, 4.0 * 32.0);
    }
}
