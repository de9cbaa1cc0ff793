//! Shape renderers.

mod common;

pub mod image;
pub mod rect;
pub mod rounded_rect;
pub mod text;
