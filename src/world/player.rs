use super::controls::Controls;
use super::entity::Entity;
use super::projectile::Projectile;
use crate::config::GameConfig;
use crate::engine::{Point, Size};
use crate::sprite::{SpriteId, Surface};

// recoil pose while shooting
const RECOIL_TILT: f32 = -0.1;
const MUZZLE_FLASH_COLOR: &str = "#ffff00";
const MUZZLE_FLASH_RADIUS: f32 = 8.0;
const MUZZLE_FLASH_OFFSET_Y: f32 = 20.0;
const MUZZLE_FLASH_ALPHA: f32 = 0.7;

/// ┌────────────────────── Player::update ───────────────────────┐
/// │ 1. input   : left/right -> vx, up + grounded -> jump        │
/// │ 2. physics : gravity -> vy, velocity -> position, floor     │
/// │ 3. bounds  : canvas sides, ceiling above spawn              │
/// │ 4. timers  : cooldown + shooting pose tick toward 0         │
/// │ 5. shoot   : fire held + gate open + cooldown 0             │
/// └─────────────────────────────────────────────────────────────┘
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub entity: Entity,
    jump_power: f32,
    gravity: f32,
    can_shoot: bool,
    shoot_cooldown: u32,
    shooting_animation: u32,
    spawn_y: f32,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        let tunables = &config.player;
        Player {
            entity: Entity::new(
                Point {
                    x: tunables.x,
                    y: tunables.y,
                },
                Size {
                    width: tunables.width,
                    height: tunables.height,
                },
                tunables.max_hp,
                SpriteId::Hero,
            ),
            jump_power: tunables.jump_power,
            gravity: tunables.gravity,
            can_shoot: true,
            shoot_cooldown: 0,
            shooting_animation: 0,
            spawn_y: tunables.y,
        }
    }

    pub fn update(
        &mut self,
        controls: &Controls,
        config: &GameConfig,
        projectiles: &mut Vec<Projectile>,
    ) {
        let tunables = &config.player;

        // left is checked first, holding both walks left
        self.entity.velocity.x = if controls.left {
            -tunables.speed
        } else if controls.right {
            tunables.speed
        } else {
            0.0
        };

        if controls.up && self.entity.grounded {
            self.entity.velocity.y = self.jump_power;
            self.entity.grounded = false;
        }

        self.apply_physics(config.floor_y);
        self.keep_in_bounds(config.canvas_width, tunables.ceiling_offset);

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.shooting_animation = self.shooting_animation.saturating_sub(1);

        if controls.fire && self.can_shoot && self.shoot_cooldown == 0 {
            let bounds = self.entity.bounding_box();
            projectiles.push(Projectile::fired_by_player(
                Point {
                    x: bounds.right(),
                    y: bounds.y() + tunables.muzzle_offset_y,
                },
                &config.projectile,
            ));
            // the gate reopens only on key release, holding fire never repeats
            self.can_shoot = false;
            self.shoot_cooldown = tunables.shoot_cooldown;
            self.shooting_animation = tunables.shooting_pose_frames;
        }
    }

    fn apply_physics(&mut self, floor_y: f32) {
        let entity = &mut self.entity;
        entity.velocity.y += self.gravity;
        entity.position.x += entity.velocity.x;
        entity.position.y += entity.velocity.y;

        if entity.bounding_box().bottom() >= floor_y {
            entity.position.y = floor_y - entity.size.height;
            entity.velocity.y = 0.0;
            entity.grounded = true;
        }
    }

    fn keep_in_bounds(&mut self, canvas_width: f32, ceiling_offset: f32) {
        let entity = &mut self.entity;
        if entity.position.x < 0.0 {
            entity.position.x = 0.0;
        }
        if entity.position.x + entity.size.width > canvas_width {
            entity.position.x = canvas_width - entity.size.width;
        }

        let ceiling = self.spawn_y - ceiling_offset;
        if entity.position.y < ceiling {
            entity.position.y = ceiling;
            entity.velocity.y = 0.0;
        }
    }

    /// Fire key released, the next press may shoot again
    pub fn rearm(&mut self) {
        self.can_shoot = true;
    }

    pub fn can_shoot(&self) -> bool {
        self.can_shoot
    }

    pub fn shoot_cooldown(&self) -> u32 {
        self.shoot_cooldown
    }

    pub fn shooting_animation(&self) -> u32 {
        self.shooting_animation
    }

    pub fn is_grounded(&self) -> bool {
        self.entity.grounded
    }

    pub fn draw(&self, surface: &dyn Surface) {
        surface.save();

        if self.shooting_animation > 0 {
            let bounds = self.entity.bounding_box();
            surface.rotate_about(bounds.center(), RECOIL_TILT);
            surface.fill_circle(
                Point {
                    x: bounds.right(),
                    y: bounds.y() + MUZZLE_FLASH_OFFSET_Y,
                },
                MUZZLE_FLASH_RADIUS,
                MUZZLE_FLASH_COLOR,
                MUZZLE_FLASH_ALPHA,
            );
        }

        self.entity.draw(surface);
        surface.restore();
    }
}
