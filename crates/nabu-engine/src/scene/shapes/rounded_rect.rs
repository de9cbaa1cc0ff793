use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Rounded rectangle draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    /// Uniform corner radius. The renderer clamps it to half the shorter side.
    pub radius: f32,
    pub color: Color,
}

impl RoundedRectCmd {
    #[inline]
    pub fn new(rect: Rect, radius: f32, color: Color) -> Self {
        Self { rect, radius, color }
    }
}

impl DrawList {
    /// Records a solid rounded rectangle with uniform corner radius.
    #[inline]
    pub fn push_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.push(DrawCmd::RoundedRect(RoundedRectCmd::new(rect, radius, color)));
    }
}
