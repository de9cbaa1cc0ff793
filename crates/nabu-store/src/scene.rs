//! The marketplace mockup: header, category tabs, a 2x4 product grid and a
//! footer, laid out at fixed pixel positions in a 1200x768 window.

use nabu_engine::coords::{Rect, Vec2};
use nabu_engine::paint::Color;
use nabu_engine::scene::{DrawList, TextureId};

pub const WIDTH: f32 = 1200.0;
pub const HEIGHT: f32 = 768.0;

pub const CLEAR: Color = Color::rgb(0.95, 0.95, 0.96);

const BRAND: Color = Color::rgb(0.2, 0.4, 0.8);
const BAR: Color = Color::rgb(0.9, 0.9, 0.9);
const INK: Color = Color::rgb(0.2, 0.2, 0.2);
const TAB: Color = Color::rgb(0.4, 0.4, 0.4);
const HINT: Color = Color::rgb(0.5, 0.5, 0.5);
const WHITE: Color = Color::white();

pub struct Product {
    pub name: &'static str,
    pub price: &'static str,
    pub seller: &'static str,
    pub image: &'static str,
    /// Bottom-left of the product photo.
    pub x: f32,
    pub y: f32,
}

const FIRST_ROW: f32 = 450.0;
const SECOND_ROW: f32 = 180.0;

pub const PRODUCTS: [Product; 8] = [
    Product { name: "Wireless Headphones", price: "129.99 DT", seller: "AudioTech", image: "wireless headphones.jpg", x: 50.0, y: FIRST_ROW },
    Product { name: "Smart Watch", price: "199.99 DT", seller: "TechGadgets", image: "smartwatch.jpg", x: 350.0, y: FIRST_ROW },
    Product { name: "Bluetooth Speaker", price: "79.99 DT", seller: "SoundMaster", image: "speaker.jpeg", x: 650.0, y: FIRST_ROW },
    Product { name: "Laptop Backpack", price: "49.99 DT", seller: "UrbanGear", image: "backpack.jpg", x: 950.0, y: FIRST_ROW },
    Product { name: "Fitness Tracker", price: "89.99 DT", seller: "FitLife", image: "fitness.jpg", x: 50.0, y: SECOND_ROW },
    Product { name: "Coffee Maker", price: "59.99 DT", seller: "BrewPerfect", image: "coffee.jpg", x: 350.0, y: SECOND_ROW },
    Product { name: "Desk Lamp", price: "34.99 DT", seller: "HomeEssentials", image: "desk.jpg", x: 650.0, y: SECOND_ROW },
    Product { name: "Wireless Mouse", price: "29.99 DT", seller: "TechAccessories", image: "mouse.jpg", x: 950.0, y: SECOND_ROW },
];

/// Uploaded product photos in [`PRODUCTS`] order, `None` where loading failed.
pub type Photos = [Option<TextureId>; 8];

/// Builds the whole marketplace screen.
pub fn build(photos: &Photos) -> DrawList {
    let mut list = DrawList::new();

    header(&mut list);
    tabs(&mut list);
    list.push_text("Popular Products", Vec2::new(50.0, 615.0), 0.65, INK);
    for (product, photo) in PRODUCTS.iter().zip(photos) {
        product_card(&mut list, product, *photo);
    }
    footer(&mut list);

    list
}

fn header(list: &mut DrawList) {
    list.push_rect(Rect::new(0.0, HEIGHT - 80.0, WIDTH, HEIGHT), CLEAR);
    list.push_rect(Rect::new(0.0, HEIGHT - 80.0, WIDTH, 80.0), BRAND);
    list.push_text("Marketplace", Vec2::new(20.0, HEIGHT - 50.0), 0.8, WHITE);

    list.push_rounded_rect(Rect::new(WIDTH / 2.0 - 200.0, HEIGHT - 70.0, 400.0, 40.0), 20.0, WHITE);
    list.push_text("Search products...", Vec2::new(WIDTH / 2.0 - 180.0, HEIGHT - 60.0), 0.4, HINT);
}

fn tabs(list: &mut DrawList) {
    list.push_rect(Rect::new(0.0, HEIGHT - 120.0, WIDTH, 40.0), BAR);

    let y = HEIGHT - 110.0;
    list.push_text("All", Vec2::new(50.0, y), 0.5, BRAND);
    for (label, x) in [("Electronics", 120.0), ("Home", 300.0), ("Fashion", 370.0), ("Sports", 480.0)] {
        list.push_text(label, Vec2::new(x, y), 0.5, TAB);
    }
}

fn product_card(list: &mut DrawList, p: &Product, photo: Option<TextureId>) {
    let (x, y) = (p.x, p.y);

    list.push_image_or_placeholder(Rect::new(x, y, 150.0, 150.0), photo);
    list.push_text(p.name, Vec2::new(x, y - 25.0), 0.4, INK);
    list.push_text(p.price, Vec2::new(x, y - 48.0), 0.4, BRAND);
    list.push_text(format!("Sold by {}", p.seller), Vec2::new(x, y - 63.0), 0.3, HINT);

    list.push_rounded_rect(Rect::new(x + 25.0, y - 105.0, 90.0, 30.0), 15.0, BRAND);
    list.push_text("Add to Cart", Vec2::new(x + 30.0, y - 95.0), 0.25, WHITE);
}

fn footer(list: &mut DrawList) {
    list.push_rect(Rect::new(0.0, 0.0, WIDTH, 60.0), BAR);

    list.push_text("Home", Vec2::new(50.0, 20.0), 0.4, BRAND);
    for (label, x) in [("Search", 150.0), ("Cart", 250.0), ("Profile", 350.0)] {
        list.push_text(label, Vec2::new(x, 20.0), 0.4, TAB);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nabu_engine::scene::{DrawCmd, TextCmd};

    fn texts(list: &DrawList) -> Vec<&TextCmd> {
        list.iter()
            .filter_map(|c| match c {
                DrawCmd::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn find<'a>(list: &'a DrawList, s: &str) -> &'a TextCmd {
        texts(list).into_iter().find(|t| t.text == s).unwrap()
    }

    // ── contents ──────────────────────────────────────────────────────────

    #[test]
    fn every_character_is_in_the_glyph_range() {
        let list = build(&[None; 8]);
        for t in texts(&list) {
            assert!(t.text.is_ascii(), "{:?}", t.text);
        }
    }

    #[test]
    fn command_counts() {
        let photos: Photos = std::array::from_fn(|i| Some(TextureId::from_index(i as u32)));
        let list = build(&photos);

        let count = |pred: fn(&DrawCmd) -> bool| list.iter().filter(|c| pred(c)).count();
        // header backdrop, header bar, tab bar, footer
        assert_eq!(count(|c| matches!(c, DrawCmd::Rect(_))), 4);
        // search field, one button per card
        assert_eq!(count(|c| matches!(c, DrawCmd::RoundedRect(_))), 1 + 8);
        assert_eq!(count(|c| matches!(c, DrawCmd::Image(_))), 8);
        // title, search hint, 5 tabs, page title, 4 per card, 4 footer links
        assert_eq!(count(|c| matches!(c, DrawCmd::Text(_))), 2 + 5 + 1 + 32 + 4);
    }

    #[test]
    fn missing_photos_become_placeholder_rects() {
        let list = build(&[None; 8]);
        assert!(!list.iter().any(|c| matches!(c, DrawCmd::Image(_))));
        assert_eq!(list.iter().filter(|c| matches!(c, DrawCmd::Rect(_))).count(), 4 + 8);
    }

    // ── positions ─────────────────────────────────────────────────────────

    #[test]
    fn card_texts_hang_below_the_photo() {
        let list = build(&[None; 8]);
        assert_eq!(find(&list, "Coffee Maker").origin, Vec2::new(350.0, 155.0));
        assert_eq!(find(&list, "59.99 DT").origin, Vec2::new(350.0, 132.0));
        assert_eq!(find(&list, "Sold by BrewPerfect").origin, Vec2::new(350.0, 117.0));
    }

    #[test]
    fn add_to_cart_is_a_rounded_button() {
        let list = build(&[None; 8]);
        let buttons: Vec<_> = list
            .iter()
            .filter_map(|c| match c {
                DrawCmd::RoundedRect(r) if r.color == BRAND => Some(r.rect),
                _ => None,
            })
            .collect();
        assert_eq!(buttons.len(), 8);
        assert_eq!(buttons[0], Rect::new(75.0, 345.0, 90.0, 30.0));
    }

    #[test]
    fn header_title_and_search() {
        let list = build(&[None; 8]);
        assert_eq!(find(&list, "Marketplace").origin, Vec2::new(20.0, 718.0));
        assert_eq!(find(&list, "Search products...").origin, Vec2::new(420.0, 708.0));
    }
}
