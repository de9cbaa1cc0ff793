use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Text run draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    /// Start of the baseline, y-up.
    pub origin: Vec2,
    /// Multiplier on the glyph cache's pixel size.
    pub scale: f32,
    pub color: Color,
}

impl DrawList {
    /// Records a single-line text run.
    pub fn push_text(&mut self, text: impl Into<String>, origin: Vec2, scale: f32, color: Color) {
        self.push(DrawCmd::Text(TextCmd { text: text.into(), origin, scale, color }));
    }
}
