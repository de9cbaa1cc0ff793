use std::fmt;

use super::glyph::GlyphMetrics;

/// Single-channel coverage bitmap plus its metrics.
///
/// `bitmap` is row-major, top row first, `metrics.width * metrics.height`
/// bytes long.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterizedGlyph {
    pub metrics: GlyphMetrics,
    pub bitmap: Vec<u8>,
}

/// Why a glyph could not be rasterized.
#[derive(Debug, Clone, PartialEq)]
pub enum RasterError {
    /// The face has no outline for this character.
    NoGlyph(char),
    /// Pixel size is not a positive finite number.
    InvalidSize(f32),
    /// The rasterizer returned a bitmap whose length disagrees with its metrics.
    BitmapSize { ch: char, expected: usize, actual: usize },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::NoGlyph(ch) => write!(f, "font has no glyph for {ch:?}"),
            RasterError::InvalidSize(px) => write!(f, "invalid pixel size {px}"),
            RasterError::BitmapSize { ch, expected, actual } => write!(
                f,
                "bitmap for {ch:?} has {actual} bytes, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for RasterError {}

/// Produces glyph bitmaps for the cache builder.
///
/// Implemented by [`FontFace`](super::FontFace); tests supply fakes.
pub trait GlyphRasterizer {
    fn rasterize(&self, ch: char, px: f32) -> Result<RasterizedGlyph, RasterError>;
}

/// Converts fontdue output to the cache's metric convention.
pub(crate) fn from_fontdue(
    ch: char,
    metrics: fontdue::Metrics,
    bitmap: Vec<u8>,
) -> Result<RasterizedGlyph, RasterError> {
    let width = metrics.width as u32;
    let height = metrics.height as u32;

    // fontdue reports the bitmap's bottom edge (`ymin`) relative to the
    // baseline; the cache stores the top edge.
    let metrics = GlyphMetrics {
        width,
        height,
        bearing_x: metrics.xmin,
        bearing_y: metrics.ymin + height as i32,
        advance: (metrics.advance_width.max(0.0) * 64.0).round() as u32,
    };

    let expected = metrics.bitmap_len();
    if bitmap.len() != expected {
        return Err(RasterError::BitmapSize { ch, expected, actual: bitmap.len() });
    }

    Ok(RasterizedGlyph { metrics, bitmap })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fontdue_metrics(xmin: i32, ymin: i32, w: usize, h: usize, adv: f32) -> fontdue::Metrics {
        fontdue::Metrics {
            xmin,
            ymin,
            width: w,
            height: h,
            advance_width: adv,
            advance_height: 0.0,
            bounds: fontdue::OutlineBounds::default(),
        }
    }

    #[test]
    fn bearing_y_is_top_edge() {
        // A descender: bitmap spans 4 px below the baseline to 10 px above.
        let g = from_fontdue('g', fontdue_metrics(1, -4, 8, 14, 9.0), vec![0; 8 * 14]).unwrap();
        assert_eq!(g.metrics.bearing_x, 1);
        assert_eq!(g.metrics.bearing_y, 10);
    }

    #[test]
    fn advance_is_fixed_point() {
        let g = from_fontdue('A', fontdue_metrics(0, 0, 2, 2, 32.0), vec![0; 4]).unwrap();
        assert_eq!(g.metrics.advance, 2048);
        assert_eq!(g.metrics.advance_px(), 32);
    }

    #[test]
    fn mismatched_bitmap_is_rejected() {
        let err = from_fontdue('x', fontdue_metrics(0, 0, 3, 3, 5.0), vec![0; 8]).unwrap_err();
        assert_eq!(err, RasterError::BitmapSize { ch: 'x', expected: 9, actual: 8 });
    }
}
