// ┌──────────────────────────────────────────────────────────────────────────┐
// │                          Rendering seam                                  │
// ├───────────────────┬──────────────────────────────────────────────────────┤
// │ sprite/           │                                                      │
// │ ├── mod.rs        │ SpriteId + Surface trait (what the world draws with) │
// │ └── assets.rs     │ Assets (loaded images) + Canvas (Surface on Renderer)│
// └───────────────────┴──────────────────────────────────────────────────────┘
// The world only ever names a sprite, it never holds an HtmlImageElement
// - keeps world/ free of web_sys so it runs under plain `cargo test`
// - the Canvas resolves SpriteId -> image at draw time
pub mod assets;

use crate::engine::{Point, Rect};

pub use self::assets::{Assets, Canvas};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Hero,
    Dino,
    Background,
    Beam,
}

/// Everything a frame needs from a 2d drawing surface
pub trait Surface {
    fn clear(&self, area: &Rect);
    fn draw_sprite(&self, sprite: SpriteId, destination: &Rect);
    fn draw_sprite_hue_rotated(&self, sprite: SpriteId, destination: &Rect, degrees: f32);

    /// save()/restore() bracket a transform, like the canvas state stack
    fn save(&self);
    fn restore(&self);
    fn rotate_about(&self, center: Point, radians: f32);
    fn fill_circle(&self, center: Point, radius: f32, color: &str, alpha: f32);
    fn outline(&self, area: &Rect, color: &str);
}

#[cfg(debug_assertions)]
pub trait DebugDraw {
    fn draw_debug(&self, surface: &dyn Surface);
}

#[cfg(debug_assertions)]
impl DebugDraw for Rect {
    fn draw_debug(&self, surface: &dyn Surface) {
        surface.outline(self, "#ff0000");
    }
}
