/// Size and placement of one rasterized glyph, in bitmap pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub width: u32,
    pub height: u32,
    /// Cursor to the bitmap's left edge.
    pub bearing_x: i32,
    /// Baseline up to the bitmap's top edge.
    pub bearing_y: i32,
    /// Horizontal advance in 26.6 fixed point.
    pub advance: u32,
}

impl GlyphMetrics {
    /// Whole-pixel advance (`advance >> 6`).
    #[inline]
    pub fn advance_px(self) -> u32 {
        self.advance >> 6
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of bytes in the glyph's single-channel bitmap.
    #[inline]
    pub fn bitmap_len(self) -> usize {
        self.width as usize * self.height as usize
    }
}
