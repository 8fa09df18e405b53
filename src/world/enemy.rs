use super::entity::Entity;
use super::projectile::Projectile;
use crate::config::GameConfig;
use crate::engine::{Point, Size};
use crate::sprite::{SpriteId, Surface};

/// The dino: patrols up and down between two heights and fires a slow
/// beam on a fixed timer. It ignores where the player is.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub entity: Entity,
    speed: f32,
    shoot_timer: i32,
    /// +1 moving down, -1 moving up
    move_direction: f32,
    min_y: f32,
    max_y: f32,
}

impl Enemy {
    pub fn new(config: &GameConfig) -> Self {
        let tunables = &config.enemy;
        Enemy {
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
                SpriteId::Dino,
            ),
            speed: tunables.speed,
            shoot_timer: 0,
            move_direction: 1.0,
            min_y: tunables.min_y,
            max_y: tunables.max_y,
        }
    }

    /// A fresh dino for a restarted round holds fire a little longer
    pub fn after_reset(config: &GameConfig) -> Self {
        let mut enemy = Enemy::new(config);
        enemy.shoot_timer = -config.enemy.reset_grace;
        enemy
    }

    pub fn update(
        &mut self,
        _target: &Entity,
        config: &GameConfig,
        projectiles: &mut Vec<Projectile>,
    ) {
        self.patrol();

        self.shoot_timer += 1;
        if self.shoot_timer > config.enemy.fire_interval {
            projectiles.push(Projectile::fired_by_enemy(
                Point {
                    x: self.entity.position.x,
                    y: self.entity.position.y + config.enemy.muzzle_offset_y,
                },
                &config.projectile,
            ));
            self.shoot_timer = 0;
        }
    }

    /// ping-pong between min_y and max_y
    fn patrol(&mut self) {
        let position = &mut self.entity.position;
        position.y += self.speed * self.move_direction;

        if position.y <= self.min_y {
            self.move_direction = 1.0;
            position.y = self.min_y;
        } else if position.y >= self.max_y {
            self.move_direction = -1.0;
            position.y = self.max_y;
        }
    }

    pub fn shoot_timer(&self) -> i32 {
        self.shoot_timer
    }

    pub fn move_direction(&self) -> f32 {
        self.move_direction
    }

    pub fn draw(&self, surface: &dyn Surface) {
        self.entity.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::projectile::Owner;
    use approx::assert_relative_eq;

    fn target(config: &GameConfig) -> Entity {
        crate::world::player::Player::new(config).entity
    }

    #[test]
    fn patrol_stays_within_bounds() {
        let config = GameConfig::default();
        let target = target(&config);
        let mut enemy = Enemy::new(&config);
        let mut projectiles = Vec::new();
        let mut turned_up = false;
        let mut turned_down = false;

        for _ in 0..1000 {
            let direction = enemy.move_direction();
            enemy.update(&target, &config, &mut projectiles);
            let y = enemy.entity.position.y;
            assert!((250.0..=320.0).contains(&y), "y out of bounds: {}", y);
            assert_relative_eq!(enemy.entity.position.x, 600.0);
            turned_up |= direction > 0.0 && enemy.move_direction() < 0.0;
            turned_down |= direction < 0.0 && enemy.move_direction() > 0.0;
        }

        assert!(turned_up);
        assert!(turned_down);
    }

    #[test]
    fn clamps_and_turns_at_the_lower_bound() {
        let config = GameConfig::default();
        let mut enemy = Enemy::new(&config);
        enemy.entity.position.y = 319.5;

        enemy.update(&target(&config), &config, &mut Vec::new());

        assert_relative_eq!(enemy.entity.position.y, 320.0);
        assert_relative_eq!(enemy.move_direction(), -1.0);
    }

    #[test]
    fn fires_after_the_interval() {
        let config = GameConfig::default();
        let target = target(&config);
        let mut enemy = Enemy::new(&config);
        let mut projectiles = Vec::new();

        for _ in 0..240 {
            enemy.update(&target, &config, &mut projectiles);
        }
        assert!(projectiles.is_empty());
        assert_eq!(enemy.shoot_timer(), 240);

        enemy.update(&target, &config, &mut projectiles);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(enemy.shoot_timer(), 0);

        let beam = &projectiles[0];
        assert_eq!(beam.owner, Owner::Enemy);
        assert!(beam.velocity_x < 0.0);
        assert_relative_eq!(beam.position.x, enemy.entity.position.x);
        assert_relative_eq!(beam.position.y, enemy.entity.position.y + 24.0);
    }

    #[test]
    fn reset_grace_delays_the_first_shot() {
        let config = GameConfig::default();
        let target = target(&config);
        let mut enemy = Enemy::after_reset(&config);
        let mut projectiles = Vec::new();

        for _ in 0..300 {
            enemy.update(&target, &config, &mut projectiles);
        }
        assert!(projectiles.is_empty());

        enemy.update(&target, &config, &mut projectiles);
        assert_eq!(projectiles.len(), 1);
    }
}
