use std::fmt;
use std::path::{Path, PathBuf};

use ::image::imageops::{self, FilterType};
use ::image::RgbaImage;

/// Tightly packed RGBA8 pixels, top row first.
#[derive(Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

impl DecodedImage {
    /// Downscaled copies for mip levels 1 and up, each half the previous size
    /// (rounded down, at least 1 px), ending at 1x1.
    ///
    /// Empty when the image is already 1x1 or its buffer does not match its size.
    pub fn mip_levels(&self) -> Vec<DecodedImage> {
        let Some(mut prev) = RgbaImage::from_raw(self.width, self.height, self.rgba.clone()) else {
            log::warn!("{self:?}: pixel buffer does not match its size; no mipmaps");
            return Vec::new();
        };

        let count = mip_level_count(self.width, self.height);
        let mut levels = Vec::with_capacity(count.saturating_sub(1) as usize);
        for _ in 1..count {
            let (w, h) = ((prev.width() / 2).max(1), (prev.height() / 2).max(1));
            let next = imageops::resize(&prev, w, h, FilterType::Triangle);
            levels.push(DecodedImage { width: w, height: h, rgba: next.as_raw().clone() });
            prev = next;
        }
        levels
    }
}

/// Levels in a full mip chain down to 1x1, base level included.
fn mip_level_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

/// Error returned by [`decode_image`].
#[derive(Debug)]
pub struct ImageLoadError {
    pub path: PathBuf,
    pub source: ::image::ImageError,
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to load image {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for ImageLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Reads and decodes `path` into RGBA8, whatever the file's channel count.
pub fn decode_image(path: impl AsRef<Path>) -> Result<DecodedImage, ImageLoadError> {
    let path = path.as_ref();
    let img = ::image::open(path).map_err(|source| ImageLoadError {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("decoded {} ({width}x{height})", path.display());

    Ok(DecodedImage { width, height, rgba: rgba.into_raw() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_names_the_path() {
        let err = decode_image("/nonexistent/nabu/face1.jpg").unwrap_err();
        assert_eq!(err.path, PathBuf::from("/nonexistent/nabu/face1.jpg"));
        assert!(err.to_string().contains("face1.jpg"));
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let path = std::env::temp_dir().join("nabu-engine-not-an-image.png");
        std::fs::write(&path, b"not a png").unwrap();
        let res = decode_image(&path);
        let _ = std::fs::remove_file(&path);
        assert!(res.is_err());
    }

    #[test]
    fn decodes_rgb_png_to_rgba() {
        let path = std::env::temp_dir().join("nabu-engine-2x1.png");
        let pixels = ::image::RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
        pixels.save(&path).unwrap();

        let img = decode_image(&path);
        let _ = std::fs::remove_file(&path);
        let img = img.unwrap();
        assert_eq!((img.width, img.height), (2, 1));
        assert_eq!(img.rgba, vec![255, 0, 0, 255, 0, 0, 255, 255]);
    }


    // ── mipmaps ───────────────────────────────────────────────────────────

    fn solid(width: u32, height: u32, px: [u8; 4]) -> DecodedImage {
        DecodedImage { width, height, rgba: px.repeat((width * height) as usize) }
    }

    #[test]
    fn level_count_follows_longest_side() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 1), 2);
        assert_eq!(mip_level_count(150, 150), 8);
        assert_eq!(mip_level_count(90, 90), 7);
    }

    #[test]
    fn product_photo_halves_down_to_one_pixel() {
        let levels = solid(150, 100, [10, 20, 30, 255]).mip_levels();
        let sizes: Vec<_> = levels.iter().map(|l| (l.width, l.height)).collect();
        assert_eq!(sizes, [(75, 50), (37, 25), (18, 12), (9, 6), (4, 3), (2, 1), (1, 1)]);
        for l in &levels {
            assert_eq!(l.rgba.len(), (l.width * l.height * 4) as usize);
        }
    }

    #[test]
    fn solid_image_keeps_its_color_in_every_level() {
        let levels = solid(16, 16, [200, 100, 50, 255]).mip_levels();
        assert_eq!(levels.len(), 4);
        assert!(levels.iter().all(|l| l.rgba.chunks(4).all(|p| p == [200, 100, 50, 255])));
    }

    #[test]
    fn single_pixel_and_bad_buffers_have_no_mips() {
        assert!(solid(1, 1, [0; 4]).mip_levels().is_empty());
        let bad = DecodedImage { width: 4, height: 4, rgba: vec![0; 15] };
        assert!(bad.mip_levels().is_empty());
    }
}
