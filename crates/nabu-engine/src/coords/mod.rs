//! Geometry types shared by the draw list, the text layout and the renderers.
//!
//! Canonical CPU space:
//! - logical pixels
//! - origin bottom-left
//! - +X right, +Y up
//!
//! Shaders map this space to NDC with a viewport uniform; no flip is needed
//! because NDC is also y-up.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
