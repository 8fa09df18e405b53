//! All state of a round, owned in one place.
//!
//! ```text
//! World::tick
//! ├─► Player::update     (input, physics, shooting)
//! ├─► Enemy::update      (patrol, fire timer)
//! ├─► Projectile::update (move, mark off-screen)
//! ├─► prune marked projectiles
//! └─► check_collisions   (damage, end of round)
//! ```
//! Nothing in here touches the DOM: drawing goes through [`Surface`] and
//! the HUD reads [`World::hud`], so a round can be played out in a test.
pub mod controls;
pub mod enemy;
pub mod entity;
pub mod frame_event;
pub mod player;
pub mod projectile;

use crate::config::GameConfig;
use crate::engine::Rect;
use crate::sprite::{SpriteId, Surface};
use crate::ui::HudState;
use std::fmt;

pub use self::controls::{Control, Controls};
pub use self::enemy::Enemy;
pub use self::entity::Entity;
pub use self::frame_event::FrameEvent;
pub use self::player::Player;
pub use self::projectile::{Owner, Projectile};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameResult {
    Defeat,
    Victory,
}

impl GameResult {
    pub fn title(&self) -> &'static str {
        match self {
            GameResult::Defeat => "DEFEAT",
            GameResult::Victory => "VICTORY",
        }
    }

    /// green for a win, red for a loss
    pub fn color(&self) -> &'static str {
        match self {
            GameResult::Defeat => "#e74c3c",
            GameResult::Victory => "#2ecc71",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// ┌──────────── Round Transition Flow ────────────┐
/// │  From State  →  Event        →  To State      │
/// ├───────────────────────────────────────────────┤
/// │  Running     →  End(result)  →  GameOver      │
/// │  GameOver    →  End(result)  →  GameOver      │
/// │  GameOver    →  Reset        →  Running       │
/// │  Running     →  Reset        →  Running       │
/// └───────────────────────────────────────────────┘
/// GameOver -> End overwrites the result, that's how a double knock-out
/// within one tick ends up as the last result written
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundState {
    Running,
    GameOver(GameResult),
}

pub enum RoundEvent {
    End(GameResult),
    Reset,
}

impl RoundState {
    fn transition(self, event: RoundEvent) -> Self {
        match event {
            RoundEvent::End(result) => RoundState::GameOver(result),
            RoundEvent::Reset => RoundState::Running,
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        match self {
            RoundState::Running => None,
            RoundState::GameOver(result) => Some(*result),
        }
    }
}

pub struct World {
    config: GameConfig,
    player: Player,
    enemy: Enemy,
    projectiles: Vec<Projectile>,
    state: RoundState,
    events: Vec<FrameEvent>,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        World {
            player: Player::new(&config),
            enemy: Enemy::new(&config),
            projectiles: Vec::new(),
            state: RoundState::Running,
            events: Vec::new(),
            config,
        }
    }

    /// One update step. A finished round is frozen until reset.
    pub fn tick(&mut self, controls: &Controls) {
        if !self.is_running() {
            return;
        }

        self.player
            .update(controls, &self.config, &mut self.projectiles);
        self.enemy
            .update(&self.player.entity, &self.config, &mut self.projectiles);

        let (canvas_width, margin) = (
            self.config.canvas_width,
            self.config.projectile.offscreen_margin,
        );
        for projectile in self.projectiles.iter_mut() {
            projectile.update(canvas_width, margin);
        }
        self.projectiles
            .retain(|projectile| !projectile.marked_for_deletion);

        self.check_collisions();
    }

    pub fn check_collisions(&mut self) {
        if !self.is_running() {
            return;
        }

        let tunables = self.config.projectile;
        let player_box = self.player.entity.bounding_box();
        let enemy_box = self.enemy.entity.bounding_box();

        for projectile in self
            .projectiles
            .iter_mut()
            .filter(|projectile| !projectile.marked_for_deletion)
        {
            let hit_box = projectile.bounding_box();
            match projectile.owner {
                Owner::Player if hit_box.intersects(&enemy_box) => {
                    self.enemy.entity.take_damage(tunables.player_damage);
                    projectile.marked_for_deletion = true;
                    self.events.push(FrameEvent::EnemyHit {
                        hp: self.enemy.entity.hp,
                    });
                }
                Owner::Enemy if hit_box.intersects(&player_box) => {
                    self.player.entity.take_damage(tunables.enemy_damage);
                    projectile.marked_for_deletion = true;
                    self.events.push(FrameEvent::PlayerHit {
                        hp: self.player.entity.hp,
                        at: projectile.position,
                    });
                }
                _ => {}
            }
        }

        // both checks always run, the later one wins a double knock-out
        if self.player.entity.is_defeated() {
            self.events.push(FrameEvent::PlayerDefeated {
                hp: self.player.entity.hp,
            });
            self.end_round(GameResult::Defeat);
        }
        if self.enemy.entity.is_defeated() {
            self.events.push(FrameEvent::EnemyDefeated);
            self.end_round(GameResult::Victory);
        }
    }

    pub fn end_round(&mut self, result: GameResult) {
        self.state = self.state.transition(RoundEvent::End(result));
        self.events.push(FrameEvent::RoundEnded(result));
    }

    /// Fresh player and enemy, no beams in flight, back to Running.
    /// Safe between any two ticks.
    pub fn reset(&mut self) {
        self.player = Player::new(&self.config);
        self.enemy = Enemy::after_reset(&self.config);
        self.projectiles.clear();
        self.state = self.state.transition(RoundEvent::Reset);
        self.events.push(FrameEvent::RoundReset {
            player_hp: self.player.entity.hp,
        });
    }

    /// Discrete control transitions, applied between ticks
    /// - fire released : reopen the player's shoot gate
    /// - fire pressed on a finished round : start a new one
    pub fn on_control(&mut self, control: Control, pressed: bool) {
        match (control, pressed) {
            (Control::Fire, false) => self.player.rearm(),
            (Control::Fire, true) if !self.is_running() => self.reset(),
            _ => {}
        }
    }

    pub fn hud(&self) -> HudState {
        HudState {
            player_health: self.player.entity.health_percent(),
            enemy_health: self.enemy.entity.health_percent(),
            outcome: self.state.result(),
        }
    }

    /// Draw order : background -> player -> enemy -> projectiles.
    /// Runs every frame, a finished round keeps rendering its last tick.
    pub fn draw(&self, surface: &dyn Surface) {
        let screen = Rect::new_from_x_y(
            0.0,
            0.0,
            self.config.canvas_width,
            self.config.canvas_height,
        );
        surface.clear(&screen);
        surface.draw_sprite(SpriteId::Background, &screen);

        self.player.draw(surface);
        self.enemy.draw(surface);
        for projectile in &self.projectiles {
            projectile.draw(surface, self.config.projectile.enemy_hue_rotation);
        }
    }

    pub fn drain_events(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_running(&self) -> bool {
        self.state == RoundState::Running
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Point;
    use crate::sprite::testing::{DrawCall, RecordingSurface};

    fn world() -> World {
        World::new(GameConfig::default())
    }

    /// a beam already overlapping `target`
    fn beam_on(target: &Entity, owner: Owner, config: &GameConfig) -> Projectile {
        let center = target.bounding_box().center();
        Projectile::new(center, 0.0, owner, &config.projectile)
    }

    #[test]
    fn result_title_and_color() {
        assert_eq!(GameResult::Victory.title(), "VICTORY");
        assert_eq!(GameResult::Victory.color(), "#2ecc71");
        assert_eq!(GameResult::Defeat.title(), "DEFEAT");
        assert_eq!(GameResult::Defeat.color(), "#e74c3c");
        assert_eq!(GameResult::Victory.to_string(), "VICTORY");
    }

    #[test]
    fn player_beam_damages_the_enemy() {
        let mut world = world();
        let beam = beam_on(&world.enemy.entity, Owner::Player, &world.config);
        world.projectiles.push(beam);

        world.check_collisions();

        assert_eq!(world.enemy.entity.hp, 190);
        assert!(world.projectiles[0].marked_for_deletion);
        assert_eq!(world.drain_events(), vec![FrameEvent::EnemyHit { hp: 190 }]);
    }

    #[test]
    fn enemy_beam_damages_the_player() {
        let mut world = world();
        let beam = beam_on(&world.player.entity, Owner::Enemy, &world.config);
        let at = beam.position;
        world.projectiles.push(beam);

        world.check_collisions();

        assert_eq!(world.player.entity.hp, 75);
        assert_eq!(
            world.drain_events(),
            vec![FrameEvent::PlayerHit { hp: 75, at }]
        );
    }

    #[test]
    fn beams_ignore_their_owner() {
        let mut world = world();
        let own_beam = beam_on(&world.player.entity, Owner::Player, &world.config);
        let dino_beam = beam_on(&world.enemy.entity, Owner::Enemy, &world.config);
        world.projectiles.push(own_beam);
        world.projectiles.push(dino_beam);

        world.check_collisions();

        assert_eq!(world.player.entity.hp, 100);
        assert_eq!(world.enemy.entity.hp, 200);
        assert!(world.projectiles.iter().all(|p| !p.marked_for_deletion));
    }

    #[test]
    fn marked_beams_hit_nothing() {
        let mut world = world();
        let mut beam = beam_on(&world.enemy.entity, Owner::Player, &world.config);
        beam.marked_for_deletion = true;
        world.projectiles.push(beam);

        world.check_collisions();

        assert_eq!(world.enemy.entity.hp, 200);
    }

    #[test]
    fn beam_touching_the_enemy_edge_hits() {
        let mut world = world();
        let enemy_box = world.enemy.entity.bounding_box();
        // right edge of the beam exactly on the dino's left edge
        let beam = Projectile::new(
            Point {
                x: enemy_box.x() - 30.0,
                y: enemy_box.y(),
            },
            0.0,
            Owner::Player,
            &world.config.projectile,
        );
        world.projectiles.push(beam);

        world.check_collisions();

        assert_eq!(world.enemy.entity.hp, 190);
    }

    #[test]
    fn enemy_at_exactly_zero_is_victory() {
        let mut world = world();
        world.enemy.entity.hp = 10;
        let beam = beam_on(&world.enemy.entity, Owner::Player, &world.config);
        world.projectiles.push(beam);

        world.check_collisions();

        assert_eq!(world.enemy.entity.hp, 0);
        assert_eq!(world.state(), RoundState::GameOver(GameResult::Victory));
    }

    #[test]
    fn player_knocked_out_is_defeat() {
        let mut world = world();
        world.player.entity.hp = 25;
        let beam = beam_on(&world.player.entity, Owner::Enemy, &world.config);
        world.projectiles.push(beam);

        world.check_collisions();

        assert_eq!(world.state(), RoundState::GameOver(GameResult::Defeat));
        assert_eq!(world.hud().player_health, 0.0);
    }

    #[test]
    fn double_knock_out_ends_in_victory() {
        let mut world = world();
        world.player.entity.hp = 25;
        world.enemy.entity.hp = 10;
        let to_enemy = beam_on(&world.enemy.entity, Owner::Player, &world.config);
        let to_player = beam_on(&world.player.entity, Owner::Enemy, &world.config);
        world.projectiles.push(to_enemy);
        world.projectiles.push(to_player);

        world.check_collisions();

        assert_eq!(world.state(), RoundState::GameOver(GameResult::Victory));
        let events = world.drain_events();
        assert_eq!(
            &events[events.len() - 2..],
            &[
                FrameEvent::EnemyDefeated,
                FrameEvent::RoundEnded(GameResult::Victory)
            ]
        );
        assert!(events.contains(&FrameEvent::RoundEnded(GameResult::Defeat)));
    }

    #[test]
    fn finished_round_is_frozen() {
        let mut world = world();
        world.end_round(GameResult::Defeat);
        let player = world.player.clone();
        let enemy = world.enemy.clone();

        for _ in 0..10 {
            world.tick(&Controls {
                right: true,
                fire: true,
                ..Controls::default()
            });
        }

        assert_eq!(world.player, player);
        assert_eq!(world.enemy, enemy);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn reset_restores_a_fresh_round() {
        let mut world = world();
        world.player.entity.hp = -25;
        world.enemy.entity.hp = 40;
        let beam = beam_on(&world.enemy.entity, Owner::Player, &world.config);
        world.projectiles.push(beam);
        world.end_round(GameResult::Defeat);

        world.reset();

        assert!(world.is_running());
        assert_eq!(world.player.entity.hp, world.player.entity.max_hp);
        assert_eq!(world.enemy.entity.hp, world.enemy.entity.max_hp);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.enemy.shoot_timer(), -60);
        assert_eq!(world.hud().outcome, None);
    }

    #[test]
    fn fire_press_restarts_only_a_finished_round() {
        let mut world = world();
        world.player.entity.hp = 50;
        world.on_control(Control::Fire, true);
        assert_eq!(world.player.entity.hp, 50);

        world.end_round(GameResult::Defeat);
        world.on_control(Control::Fire, true);
        assert!(world.is_running());
        assert_eq!(world.player.entity.hp, 100);
    }

    #[test]
    fn fire_release_reopens_the_gate() {
        let mut world = world();
        let fire = Controls {
            fire: true,
            ..Controls::default()
        };
        world.tick(&fire);
        assert!(!world.player.can_shoot());

        world.on_control(Control::Fire, false);
        assert!(world.player.can_shoot());
    }

    #[test]
    fn tapping_fire_is_limited_by_the_cooldown() {
        let mut world = world();
        let fire = Controls {
            fire: true,
            ..Controls::default()
        };
        let mut shots = 0;
        for _ in 0..120 {
            let before = world.player.shoot_cooldown();
            world.on_control(Control::Fire, false);
            world.tick(&fire);
            if world.player.shoot_cooldown() > before {
                shots += 1;
            }
        }
        // ticks 1, 31, 61, 91
        assert_eq!(shots, 4);
    }

    #[test]
    fn offscreen_beams_are_pruned() {
        let mut world = world();
        let beam = Projectile::new(
            Point { x: 845.0, y: 10.0 },
            10.0,
            Owner::Player,
            &world.config.projectile,
        );
        world.projectiles.push(beam);

        world.tick(&Controls::default());

        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn hud_stays_in_range_through_a_long_round() {
        let mut world = world();
        for _ in 0..5000 {
            world.tick(&Controls::default());
            let hud = world.hud();
            assert!((0.0..=100.0).contains(&hud.player_health));
            assert!((0.0..=100.0).contains(&hud.enemy_health));
        }
        // standing still in the dino's line of fire loses eventually
        assert_eq!(world.state(), RoundState::GameOver(GameResult::Defeat));
    }

    #[test]
    fn draws_background_first_then_bodies() {
        let world = world();
        let surface = RecordingSurface::default();

        world.draw(&surface);

        let screen = Rect::new_from_x_y(0.0, 0.0, 800.0, 400.0);
        let calls = surface.drawn();
        assert_eq!(calls[0], DrawCall::Clear(screen));
        assert_eq!(calls[1], DrawCall::Sprite(SpriteId::Background, screen));
        assert!(calls.contains(&DrawCall::Sprite(
            SpriteId::Dino,
            world.enemy.entity.bounding_box()
        )));
    }

    #[test]
    fn finished_round_still_draws() {
        let mut world = world();
        world.end_round(GameResult::Victory);
        let surface = RecordingSurface::default();

        world.draw(&surface);

        assert!(surface
            .drawn()
            .contains(&DrawCall::Sprite(SpriteId::Hero, world.player.entity.bounding_box())));
    }
}
