use super::{SpriteId, Surface};
use crate::config::AssetPaths;
use crate::engine::{self, Point, Rect, Renderer};
use anyhow::{Context, Result};
use futures::join;
use web_sys::HtmlImageElement;

/// The four images a round needs. All of them must load, there is no
/// placeholder art to fall back on.
pub struct Assets {
    hero: HtmlImageElement,
    dino: HtmlImageElement,
    background: HtmlImageElement,
    beam: HtmlImageElement,
}

impl Assets {
    pub async fn load(paths: &AssetPaths) -> Result<Assets> {
        // parallel loading : total time is the slowest image, not the sum
        let (hero, dino, background, beam) = join!(
            load(&paths.hero),
            load(&paths.dino),
            load(&paths.background),
            load(&paths.beam),
        );
        Ok(Assets {
            hero: hero?,
            dino: dino?,
            background: background?,
            beam: beam?,
        })
    }

    pub fn image(&self, sprite: SpriteId) -> &HtmlImageElement {
        match sprite {
            SpriteId::Hero => &self.hero,
            SpriteId::Dino => &self.dino,
            SpriteId::Background => &self.background,
            SpriteId::Beam => &self.beam,
        }
    }
}

async fn load(path: &str) -> Result<HtmlImageElement> {
    engine::load_image(path)
        .await
        .with_context(|| format!("Failed to load sprite image resource from : {}", path))
}

/// Surface backed by the 2d canvas
pub struct Canvas<'a> {
    renderer: &'a Renderer,
    assets: &'a Assets,
}

impl<'a> Canvas<'a> {
    pub fn new(renderer: &'a Renderer, assets: &'a Assets) -> Self {
        Canvas { renderer, assets }
    }
}

impl Surface for Canvas<'_> {
    fn clear(&self, area: &Rect) {
        self.renderer.clear(area);
    }

    fn draw_sprite(&self, sprite: SpriteId, destination: &Rect) {
        self.renderer
            .draw_entire_image(self.assets.image(sprite), destination);
    }

    fn draw_sprite_hue_rotated(&self, sprite: SpriteId, destination: &Rect, degrees: f32) {
        self.renderer.draw_filtered_image(
            self.assets.image(sprite),
            destination,
            &format!("hue-rotate({}deg)", degrees),
        );
    }

    fn save(&self) {
        self.renderer.save();
    }

    fn restore(&self) {
        self.renderer.restore();
    }

    fn rotate_about(&self, center: Point, radians: f32) {
        self.renderer.rotate_about(center, radians);
    }

    fn fill_circle(&self, center: Point, radius: f32, color: &str, alpha: f32) {
        self.renderer.fill_circle(center, radius, color, alpha);
    }

    fn outline(&self, area: &Rect, color: &str) {
        self.renderer.stroke_rect(area, color);
    }
}
