//! Chat messages mockup.

mod scene;

use anyhow::{Context, Result};

use nabu_engine::assets::{decode_image, DecodedImage};
use nabu_engine::core::{App, AppControl, FrameCtx};
use nabu_engine::device::GpuInit;
use nabu_engine::logging::{init_logging, LoggingConfig};
use nabu_engine::render::SceneRenderer;
use nabu_engine::scene::DrawList;
use nabu_engine::text::{FontFace, GlyphCache, GlyphCacheConfig};
use nabu_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

const FONT_CANDIDATES: &[&str] = &[
    concat!(env!("CARGO_MANIFEST_DIR"), "/assets/IBMPlexMono-Regular.ttf"),
    "/usr/share/fonts/truetype/ibm-plex/IBMPlexMono-Regular.ttf",
    "/usr/share/fonts/opentype/ibm-plex/IBMPlexMono-Regular.otf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

const IMAGE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets");

struct ChatApp {
    renderer: SceneRenderer,
    draw_list: DrawList,
    first_frame: bool,
}

impl App for ChatApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self { renderer, draw_list, first_frame } = self;
        ctx.render(scene::CLEAR, |rctx, target| {
            let report = renderer.render(rctx, target, draw_list);
            if std::mem::take(first_frame) {
                log::info!("first frame: {report}");
            }
        })
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(-1);
    }
}

fn run() -> Result<()> {
    let glyph_config = GlyphCacheConfig::default();
    let face = FontFace::load_first(FONT_CANDIDATES, glyph_config.pixel_size)
        .context("failed to load a font")?;
    let glyphs = GlyphCache::build(&face, &glyph_config);
    drop(face);

    let avatars: Vec<Option<DecodedImage>> =
        scene::AVATAR_FILES.iter().map(|name| load_image(name)).collect();

    let config = RuntimeConfig {
        title: "Chat messages".to_string(),
        initial_size: LogicalSize::new(scene::WIDTH as f64, scene::HEIGHT as f64),
        ..Default::default()
    };

    Runtime::run(config, GpuInit::linear_passthrough(), move |ctx| {
        let mut renderer = SceneRenderer::new(ctx, glyphs);
        let faces: scene::Faces = std::array::from_fn(|i| {
            avatars[i].as_ref().map(|img| renderer.upload_image(ctx, img))
        });

        Ok(ChatApp { renderer, first_frame: true, draw_list: scene::build(&faces) })
    })
}

/// Decodes an image from the asset directory; failures are logged and the
/// scene draws a placeholder instead.
fn load_image(name: &str) -> Option<DecodedImage> {
    match decode_image(format!("{IMAGE_DIR}/{name}")) {
        Ok(img) => Some(img),
        Err(err) => {
            log::error!("{err}");
            None
        }
    }
}
