use crate::config::ProjectileTunables;
use crate::engine::{Point, Rect, Size};
use crate::sprite::{SpriteId, Surface};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

/// A beam flying straight along x. No gravity, no vertical motion.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Point,
    pub size: Size,
    pub velocity_x: f32,
    pub owner: Owner,
    pub marked_for_deletion: bool,
}

impl Projectile {
    pub fn new(
        position: Point,
        velocity_x: f32,
        owner: Owner,
        tunables: &ProjectileTunables,
    ) -> Self {
        Projectile {
            position,
            size: Size {
                width: tunables.width,
                height: tunables.height,
            },
            velocity_x,
            owner,
            marked_for_deletion: false,
        }
    }

    pub fn fired_by_player(position: Point, tunables: &ProjectileTunables) -> Self {
        Projectile::new(position, tunables.player_speed, Owner::Player, tunables)
    }

    pub fn fired_by_enemy(position: Point, tunables: &ProjectileTunables) -> Self {
        Projectile::new(position, -tunables.enemy_speed, Owner::Enemy, tunables)
    }

    pub fn update(&mut self, canvas_width: f32, margin: f32) {
        self.position.x += self.velocity_x;
        if self.position.x < -margin || self.position.x > canvas_width + margin {
            self.marked_for_deletion = true;
        }
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn draw(&self, surface: &dyn Surface, enemy_hue_rotation: f32) {
        let destination = self.bounding_box();
        match self.owner {
            Owner::Player => surface.draw_sprite(SpriteId::Beam, &destination),
            Owner::Enemy => {
                surface.draw_sprite_hue_rotated(SpriteId::Beam, &destination, enemy_hue_rotation)
            }
        }
    }
}
