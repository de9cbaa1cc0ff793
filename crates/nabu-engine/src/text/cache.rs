use std::collections::HashMap;
use std::ops::Range;

use super::glyph::GlyphMetrics;
use super::raster::GlyphRasterizer;

/// Which codes to rasterize, and at what size.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCacheConfig {
    /// Rasterization size in pixels; text scale 1.0 draws glyphs at this size.
    pub pixel_size: f32,
    /// Character codes to rasterize. Codes that are not valid `char`s are ignored.
    pub codes: Range<u32>,
}

impl Default for GlyphCacheConfig {
    fn default() -> Self {
        Self { pixel_size: 48.0, codes: 0..128 }
    }
}

/// A cached glyph: metrics plus a payload.
///
/// The payload is the CPU bitmap right after [`GlyphCache::build`], and a GPU
/// texture handle once the text renderer has uploaded it.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph<T> {
    pub metrics: GlyphMetrics,
    pub data: T,
}

/// Immutable map from character to glyph.
///
/// Built once; entries are never added or changed afterwards.
#[derive(Debug, Clone)]
pub struct GlyphCache<T> {
    glyphs: HashMap<char, Glyph<T>>,
}

impl GlyphCache<Vec<u8>> {
    /// Rasterizes every code in `config.codes`.
    ///
    /// A glyph that fails to rasterize is logged and left out; the build
    /// itself never fails.
    pub fn build<R>(rasterizer: &R, config: &GlyphCacheConfig) -> Self
    where
        R: GlyphRasterizer + ?Sized,
    {
        let mut glyphs = HashMap::with_capacity(config.codes.len());

        for code in config.codes.clone() {
            let Some(ch) = char::from_u32(code) else { continue };
            match rasterizer.rasterize(ch, config.pixel_size) {
                Ok(g) => {
                    glyphs.insert(ch, Glyph { metrics: g.metrics, data: g.bitmap });
                }
                Err(err) => log::warn!("skipping glyph {code:#04x}: {err}"),
            }
        }

        log::debug!(
            "glyph cache built: {}/{} codes at {}px",
            glyphs.len(),
            config.codes.len(),
            config.pixel_size
        );

        Self { glyphs }
    }
}

impl<T> GlyphCache<T> {
    #[inline]
    pub fn get(&self, ch: char) -> Option<&Glyph<T>> {
        self.glyphs.get(&ch)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Glyph<T>)> {
        self.glyphs.iter().map(|(&ch, g)| (ch, g))
    }

    /// Replaces every payload, keeping keys and metrics.
    pub fn map<U, F>(self, mut f: F) -> GlyphCache<U>
    where
        F: FnMut(char, GlyphMetrics, T) -> U,
    {
        let glyphs = self
            .glyphs
            .into_iter()
            .map(|(ch, g)| (ch, Glyph { metrics: g.metrics, data: f(ch, g.metrics, g.data) }))
            .collect();
        GlyphCache { glyphs }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeRasterizer;
    use super::*;

    // ── build ─────────────────────────────────────────────────────────────

    #[test]
    fn default_range_fills_128_codes() {
        let cache = GlyphCache::build(&FakeRasterizer::default(), &GlyphCacheConfig::default());
        assert_eq!(cache.len(), 128);
        assert!(cache.get('\0').is_some());
        assert!(cache.get('~').is_some());
        assert!(cache.get('\u{80}').is_none());
        assert!(cache.get('é').is_none());
    }

    #[test]
    fn failed_glyphs_are_skipped() {
        let raster = FakeRasterizer { reject: vec!['A', 'z'], ..Default::default() };
        let cache = GlyphCache::build(&raster, &GlyphCacheConfig::default());
        assert_eq!(cache.len(), 126);
        assert!(cache.get('A').is_none());
        assert!(cache.get('B').is_some());
    }

    #[test]
    fn custom_range_is_respected() {
        let config = GlyphCacheConfig { pixel_size: 16.0, codes: 65..70 };
        let cache = GlyphCache::build(&FakeRasterizer::default(), &config);
        assert_eq!(cache.len(), 5);
        assert!(cache.get('@').is_none());
        assert!(cache.get('E').is_some());
        assert!(cache.get('F').is_none());
    }

    #[test]
    fn bitmap_matches_metrics() {
        let cache = GlyphCache::build(&FakeRasterizer::default(), &GlyphCacheConfig::default());
        let g = cache.get('A').unwrap();
        assert_eq!(g.data.len(), g.metrics.bitmap_len());
        assert_eq!(cache.get(' ').unwrap().data.len(), 0);
    }

    // ── map ───────────────────────────────────────────────────────────────

    #[test]
    fn map_keeps_keys_and_metrics() {
        let cache = GlyphCache::build(&FakeRasterizer::default(), &GlyphCacheConfig::default());
        let before = cache.get('Q').unwrap().metrics;

        let mapped = cache.map(|_, m, bitmap| (!m.is_empty()).then_some(bitmap.len()));
        assert_eq!(mapped.len(), 128);
        assert_eq!(mapped.get('Q').unwrap().metrics, before);
        assert_eq!(mapped.get('Q').unwrap().data, Some(600));
        assert_eq!(mapped.get(' ').unwrap().data, None);
    }
}
