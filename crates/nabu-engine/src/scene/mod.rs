//! Scene (draw stream) types.
//!
//! Responsibilities:
//! - store renderer-agnostic draw commands in insertion order
//! - keep shape-specific helpers isolated per shape file under `scene::shapes`

mod cmd;
mod list;

pub mod shapes;

pub use cmd::DrawCmd;
pub use list::DrawList;
pub use shapes::image::{ImageCmd, TextureId, PLACEHOLDER_COLOR};
pub use shapes::rect::RectCmd;
pub use shapes::rounded_rect::RoundedRectCmd;
pub use shapes::text::TextCmd;
