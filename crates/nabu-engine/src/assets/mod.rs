//! Image files decoded on the CPU before the window opens.

mod image;

pub use self::image::{decode_image, DecodedImage, ImageLoadError};
