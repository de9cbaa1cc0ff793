use std::fmt;
use std::path::{Path, PathBuf};

use super::raster::{self, GlyphRasterizer, RasterError, RasterizedGlyph};

/// Error returned by [`FontFace::load`] and [`FontFace::load_first`].
#[derive(Debug)]
pub enum FontLoadError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, reason: String },
    /// No candidate path could be loaded.
    NotFound { tried: Vec<PathBuf> },
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontLoadError::Io { path, source } => {
                write!(f, "failed to read font {}: {source}", path.display())
            }
            FontLoadError::Parse { path, reason } => {
                write!(f, "failed to parse font {}: {reason}", path.display())
            }
            FontLoadError::NotFound { tried } => {
                write!(f, "no usable font among {} candidate(s)", tried.len())?;
                for p in tried {
                    write!(f, "\n  {}", p.display())?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for FontLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FontLoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A parsed font file.
///
/// Only needed while the glyph cache is built; drop it afterwards.
pub struct FontFace {
    font: fontdue::Font,
}

impl FontFace {
    /// Reads and parses the font at `path`, tuned for rasterizing at `px`.
    pub fn load(path: impl AsRef<Path>, px: f32) -> Result<Self, FontLoadError> {
        let path = path.as_ref().to_path_buf();
        let bytes = std::fs::read(&path).map_err(|source| FontLoadError::Io {
            path: path.clone(),
            source,
        })?;

        let settings = fontdue::FontSettings { scale: px, ..Default::default() };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|reason| {
            FontLoadError::Parse { path: path.clone(), reason: reason.to_string() }
        })?;

        log::info!("loaded font {}", path.display());
        Ok(Self { font })
    }

    /// Loads the first candidate that reads and parses.
    pub fn load_first<P: AsRef<Path>>(candidates: &[P], px: f32) -> Result<Self, FontLoadError> {
        let mut tried = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            match Self::load(candidate, px) {
                Ok(face) => return Ok(face),
                Err(err) => {
                    log::debug!("{err}");
                    tried.push(candidate.as_ref().to_path_buf());
                }
            }
        }
        Err(FontLoadError::NotFound { tried })
    }
}

impl GlyphRasterizer for FontFace {
    fn rasterize(&self, ch: char, px: f32) -> Result<RasterizedGlyph, RasterError> {
        if !(px.is_finite() && px > 0.0) {
            return Err(RasterError::InvalidSize(px));
        }

        // Control codes map to the face's fallback glyph, the way FreeType
        // loads them; a printable character without an outline is an error.
        if self.font.lookup_glyph_index(ch) == 0 && !ch.is_control() {
            return Err(RasterError::NoGlyph(ch));
        }

        let (metrics, bitmap) = self.font.rasterize(ch, px);
        raster::from_fontdue(ch, metrics, bitmap)
    }
}
