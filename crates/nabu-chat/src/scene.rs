//! The chat mockup, laid out at fixed pixel positions in a 1200x768 window.

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::Color;
use nabu_engine::scene::{DrawList, TextureId};

pub const WIDTH: f32 = 1200.0;
pub const HEIGHT: f32 = 768.0;
pub const SIDEBAR_WIDTH: f32 = WIDTH / 2.5;

pub const CLEAR: Color = Color::rgb(0.05, 0.08, 0.12);

const PANEL: Color = Color::rgb(0.09, 0.13, 0.17);
const FIELD: Color = Color::rgb(0.14, 0.18, 0.24);
const ACCENT: Color = Color::rgb(0.169, 0.322, 0.471);
const MUTED: Color = Color::rgb(0.43, 0.47, 0.51);
const WHITE: Color = Color::white();

/// Avatar files, in the order of [`Faces`].
pub const AVATAR_FILES: [&str; 6] =
    ["face1.png", "face2.png", "face3.png", "face4.png", "face5.png", "face6.png"];

/// Uploaded avatars, `None` where the file failed to load.
pub type Faces = [Option<TextureId>; 6];

/// A conversation in the sidebar.
struct Conversation {
    name: &'static str,
    preview: &'static str,
    time: &'static str,
    face: usize,
    /// 6 is the top slot, 1 the bottom one.
    order: u32,
}

const CONVERSATIONS: [Conversation; 6] = [
    Conversation { name: "Amel", preview: "Bonsoir", time: "19:03", face: 0, order: 6 },
    Conversation { name: "Ahmed", preview: "Comment Vas tu?", time: "17:53", face: 1, order: 5 },
    Conversation { name: "Nour", preview: "Super !", time: "16:22", face: 2, order: 4 },
    Conversation {
        name: "Mourad",
        preview: "Exactement ce mood que je ressens...",
        time: "13:30",
        face: 3,
        order: 3,
    },
    Conversation { name: "Kais", preview: "C'est ou ca?", time: "11:09", face: 4, order: 2 },
    Conversation { name: "Lina", preview: "Bonjour", time: "07:42", face: 5, order: 1 },
];

/// The open conversation, highlighted in the sidebar and shown in the header.
const OPEN_ORDER: u32 = 4;
const OPEN_FACE: usize = 2;

const CARD_STEP: f32 = 115.0;

/// Builds the whole chat screen.
pub fn build(faces: &Faces) -> DrawList {
    let mut list = DrawList::new();

    sidebar(&mut list, faces);
    header(&mut list, faces);
    compose_bar(&mut list);
    bubbles(&mut list);

    list
}

fn sidebar(list: &mut DrawList, faces: &Faces) {
    list.push_rect(Rect::new(0.0, 0.0, SIDEBAR_WIDTH, HEIGHT), PANEL);

    list.push_rounded_rect(Rect::new(10.0, HEIGHT - 70.0, SIDEBAR_WIDTH - 20.0, 50.0), 15.0, FIELD);
    list.push_text("Recherche...", Vec2::new(20.0, HEIGHT - 55.0), 0.45, MUTED);

    for c in &CONVERSATIONS {
        conversation_card(list, c, faces[c.face]);
    }
}

fn conversation_card(list: &mut DrawList, c: &Conversation, face: Option<TextureId>) {
    let k = (6 - c.order) as f32 * CARD_STEP;

    if c.order == OPEN_ORDER {
        list.push_rect(Rect::new(0.0, 585.0 - k, SIDEBAR_WIDTH, 100.0), ACCENT);
    }
    list.push_image_or_placeholder(Rect::new(10.0, 590.0 - k, 90.0, 90.0), face);
    list.push_text(c.time, Vec2::new(435.0, 650.0 - k), 0.25, MUTED);
    list.push_text(c.name, Vec2::new(115.0, 650.0 - k), 0.4, WHITE);
    list.push_text(c.preview, Vec2::new(115.0, 615.0 - k), 0.35, MUTED);
}

fn header(list: &mut DrawList, faces: &Faces) {
    list.push_rect(Rect::new(SIDEBAR_WIDTH, HEIGHT - 90.0, WIDTH - SIDEBAR_WIDTH, 90.0), PANEL);
    let avatar = Rect::new(SIDEBAR_WIDTH + 20.0, HEIGHT - 80.0, 60.0, 60.0);
    list.push_image_or_placeholder(avatar, faces[OPEN_FACE]);
    list.push_text("Nour", Vec2::new(SIDEBAR_WIDTH + 100.0, HEIGHT - 60.0), 0.6, WHITE);
}

fn compose_bar(list: &mut DrawList) {
    list.push_rect(Rect::new(SIDEBAR_WIDTH, 0.0, WIDTH - SIDEBAR_WIDTH, 90.0), PANEL);
    list.push_rounded_rect(
        Rect::new(SIDEBAR_WIDTH + 10.0, 20.0, WIDTH - SIDEBAR_WIDTH - 120.0, 50.0),
        15.0,
        FIELD,
    );
    list.push_rounded_rect(Rect::new(WIDTH - 100.0, 20.0, 90.0, 50.0), 15.0, ACCENT);
    list.push_text("Envoyer", Vec2::new(WIDTH - 95.0, 37.0), 0.4, WHITE);
    list.push_text("Tapez un message...", Vec2::new(SIDEBAR_WIDTH + 20.0, 37.0), 0.4, MUTED);
}

/// Received bubbles sit against the sidebar, sent ones against the right edge.
fn bubbles(list: &mut DrawList) {
    let received = |list: &mut DrawList, top: f32, text: &str| {
        list.push_rounded_rect(Rect::new(SIDEBAR_WIDTH + 20.0, HEIGHT - top, 110.0, 50.0), 15.0, FIELD);
        list.push_text(text, Vec2::new(SIDEBAR_WIDTH + 30.0, HEIGHT - top + 17.0), 0.4, WHITE);
    };
    let sent = |list: &mut DrawList, top: f32, width: f32, text: &str| {
        let x = WIDTH - 10.0 - width;
        list.push_rounded_rect(Rect::new(x, HEIGHT - top, width, 50.0), 15.0, ACCENT);
        list.push_text(text, Vec2::new(x + 10.0, HEIGHT - top + 17.0), 0.4, WHITE);
    };

    received(list, 150.0, "Bonjour");
    sent(list, 220.0, 110.0, "Bonjour");
    received(list, 290.0, "Ca va?");
    sent(list, 360.0, 170.0, "Ca va et toi?");
    received(list, 430.0, "Super !");
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::scene::DrawCmd;

    fn no_faces() -> Faces {
        [None; 6]
    }

    fn texts(list: &DrawList) -> Vec<&nabu_engine::scene::TextCmd> {
        list.iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    // ── contents ──────────────────────────────────────────────────────────

    #[test]
    fn every_character_is_in_the_glyph_range() {
        let list = build(&no_faces());
        for t in texts(&list) {
            assert!(t.text.chars().all(|c| (c as u32) < 128), "{:?}", t.text);
        }
    }

    #[test]
    fn command_counts() {
        let faces: Faces = std::array::from_fn(|i| Some(TextureId::from_index(i as u32)));
        let list = build(&faces);

        let count = |pred: fn(&DrawCmd) -> bool| list.iter().filter(|c| pred(c)).count();
        // sidebar, highlight, header, compose bar
        assert_eq!(count(|c| matches!(c, DrawCmd::Rect(_))), 4);
        // search, input, send button, five bubbles
        assert_eq!(count(|c| matches!(c, DrawCmd::RoundedRect(_))), 8);
        // six avatars plus the header avatar
        assert_eq!(count(|c| matches!(c, DrawCmd::Image(_))), 7);
        // search hint, 3 per card, header name, 2 in compose bar, 5 bubbles
        assert_eq!(count(|c| matches!(c, DrawCmd::Text(_))), 1 + 18 + 1 + 2 + 5);
    }

    #[test]
    fn missing_avatars_become_placeholders() {
        let list = build(&no_faces());
        assert!(!list.iter().any(|c| matches!(c, DrawCmd::Image(_))));
        assert_eq!(list.iter().filter(|c| matches!(c, DrawCmd::RoundedRect(_))).count(), 8);
        assert_eq!(list.iter().filter(|c| matches!(c, DrawCmd::Rect(_))).count(), 4 + 7);
    }

    #[test]
    fn avatars_are_full_square_quads() {
        let faces: Faces = std::array::from_fn(|i| Some(TextureId::from_index(i as u32)));
        let list = build(&faces);
        let avatars: Vec<_> = list
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Image(img) => Some(img.rect),
                _ => None,
            })
            .collect();

        assert_eq!(avatars.len(), 7);
        assert!(avatars.iter().all(|r| r.size.x == r.size.y));
        assert_eq!(avatars[0], Rect::new(10.0, 590.0, 90.0, 90.0));
        assert_eq!(avatars[6], Rect::new(500.0, 688.0, 60.0, 60.0));
    }

    // ── positions ─────────────────────────────────────────────────────────

    #[test]
    fn open_conversation_is_highlighted_under_its_card() {
        let list = build(&no_faces());
        let highlight = list.iter().find_map(|c| match c {
            DrawCmd::Rect(r) if r.color == ACCENT => Some(r.rect),
            _ => None,
        });
        assert_eq!(highlight, Some(Rect::new(0.0, 355.0, 480.0, 100.0)));
    }

    #[test]
    fn top_card_texts() {
        let list = build(&no_faces());
        let amel = texts(&list).into_iter().find(|t| t.text == "Amel").unwrap();
        assert_eq!(amel.origin, Vec2::new(115.0, 650.0));
        assert_eq!(amel.scale, 0.4);

        let lina = texts(&list).into_iter().find(|t| t.text == "07:42").unwrap();
        assert_eq!(lina.origin, Vec2::new(435.0, 75.0));
    }

    #[test]
    fn sent_bubbles_hug_the_right_edge() {
        let list = build(&no_faces());
        let t = texts(&list).into_iter().find(|t| t.text == "Ca va et toi?").unwrap();
        assert_eq!(t.origin, Vec2::new(1030.0, 425.0));
        // Lina's preview and the received bubble come first.
        let b = texts(&list).into_iter().filter(|t| t.text == "Bonjour").nth(2).unwrap();
        assert_eq!(b.origin, Vec2::new(1090.0, 565.0));
    }
}
