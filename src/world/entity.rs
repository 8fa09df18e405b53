use crate::engine::{Point, Rect, Size};
#[cfg(debug_assertions)]
use crate::sprite::DebugDraw;
use crate::sprite::{SpriteId, Surface};

/// Fields every body in the arena shares
/// - Player and Enemy embed one instead of inheriting from it
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub position: Point,
    pub size: Size,
    pub velocity: Point,
    pub hp: i32,
    pub max_hp: i32,
    pub grounded: bool,
    pub sprite: SpriteId,
}

impl Entity {
    pub fn new(position: Point, size: Size, max_hp: i32, sprite: SpriteId) -> Self {
        Entity {
            position,
            size,
            velocity: Point::default(),
            hp: max_hp,
            max_hp,
            grounded: false,
            sprite,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.hp -= amount;
    }

    pub fn is_defeated(&self) -> bool {
        self.hp <= 0
    }

    /// Health bar width in percent
    /// - hp may go negative internally, the bar never does
    pub fn health_percent(&self) -> f32 {
        (self.hp as f32 / self.max_hp as f32 * 100.0).clamp(0.0, 100.0)
    }

    pub fn draw(&self, surface: &dyn Surface) {
        surface.draw_sprite(self.sprite, &self.bounding_box());

        #[cfg(debug_assertions)]
        self.bounding_box().draw_debug(surface);
    }
}
