//! Glyph cache and CPU text layout.
//!
//! The cache is built once at startup: every code in a fixed range is
//! rasterized from a single font face at one pixel size, and the face is
//! dropped afterwards. Layout walks a string against the cache and produces
//! one screen-space quad per glyph, y-up, baseline-anchored.

mod cache;
mod font;
mod glyph;
mod layout;
mod raster;

pub use cache::{Glyph, GlyphCache, GlyphCacheConfig};
pub use font::{FontFace, FontLoadError};
pub use glyph::GlyphMetrics;
pub use layout::{layout_text, PlacedGlyph, TextLayout};
pub use raster::{GlyphRasterizer, RasterError, RasterizedGlyph};

#[cfg(test)]
pub(crate) use cache::fake;
