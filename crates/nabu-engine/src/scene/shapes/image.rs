use crate::coords::Rect;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList};

/// Fill drawn where an image failed to load.
pub const PLACEHOLDER_COLOR: Color = Color::rgb(0.5, 0.5, 0.5);

/// Handle to a texture uploaded to the image renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(pub(crate) u32);

impl TextureId {
    #[inline]
    pub const fn from_index(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// Textured quad draw payload.
///
/// The image's first row lands at the top of `rect`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCmd {
    pub rect: Rect,
    pub texture: TextureId,
}

impl DrawList {
    /// Records `texture` stretched over `rect`, or a grey rectangle of the
    /// same size when the image is unavailable.
    pub fn push_image_or_placeholder(&mut self, rect: Rect, texture: Option<TextureId>) {
        match texture {
            Some(texture) => self.push(DrawCmd::Image(ImageCmd { rect, texture })),
            None => self.push_rect(rect, PLACEHOLDER_COLOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loaded_image_is_recorded() {
        let mut list = DrawList::new();
        let rect = Rect::new(10.0, 20.0, 90.0, 90.0);
        list.push_image_or_placeholder(rect, Some(TextureId::from_index(3)));

        let DrawCmd::Image(cmd) = &list.cmds()[0] else { panic!("expected image") };
        assert_eq!(cmd.texture.index(), 3);
        assert_eq!(cmd.rect, rect);
    }

    #[test]
    fn missing_image_becomes_placeholder() {
        let mut list = DrawList::new();
        let rect = Rect::new(50.0, 450.0, 150.0, 150.0);
        list.push_image_or_placeholder(rect, None);

        assert_eq!(list.len(), 1);
        let DrawCmd::Rect(placeholder) = &list.cmds()[0] else { panic!("expected rect") };
        assert_eq!(placeholder.color, PLACEHOLDER_COLOR);
        assert_eq!(placeholder.rect, rect);
    }
}
