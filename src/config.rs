//! Tunables for a round, optionally overridden by `config.json`.
//!
//! Every field has a default, so a partial file only needs the values it
//! changes. The defaults are tuned for ~60 updates per second.
use crate::browser;
use crate::engine::FramePacing;
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// play area, always taken from the canvas element at start-up
    #[serde(skip)]
    pub canvas_width: f32,
    #[serde(skip)]
    pub canvas_height: f32,
    /// y of the floor line every grounded body rests on
    pub floor_y: f32,
    /// true -> fixed 60Hz updates, false -> one update per animation frame
    pub fixed_timestep: bool,
    pub player: PlayerTunables,
    pub enemy: EnemyTunables,
    pub projectile: ProjectileTunables,
    pub bindings: Bindings,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            canvas_width: 800.0,
            canvas_height: 400.0,
            floor_y: 360.0,
            fixed_timestep: false,
            player: PlayerTunables::default(),
            enemy: EnemyTunables::default(),
            projectile: ProjectileTunables::default(),
            bindings: Bindings::default(),
            assets: AssetPaths::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PlayerTunables {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub max_hp: i32,
    /// negative, canvas y grows downward
    pub jump_power: f32,
    pub gravity: f32,
    /// how far above the spawn height the player may rise
    pub ceiling_offset: f32,
    pub shoot_cooldown: u32,
    pub shooting_pose_frames: u32,
    pub muzzle_offset_y: f32,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        PlayerTunables {
            x: 100.0,
            y: 312.0,
            width: 48.0,
            height: 48.0,
            speed: 3.0,
            max_hp: 100,
            jump_power: -8.0,
            gravity: 0.2,
            ceiling_offset: 150.0,
            shoot_cooldown: 30,
            shooting_pose_frames: 5,
            muzzle_offset_y: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnemyTunables {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// vertical patrol speed
    pub speed: f32,
    pub max_hp: i32,
    pub min_y: f32,
    pub max_y: f32,
    /// shoots once the timer goes past this many ticks
    pub fire_interval: i32,
    /// extra ticks of silence after a reset
    pub reset_grace: i32,
    pub muzzle_offset_y: f32,
}

impl Default for EnemyTunables {
    fn default() -> Self {
        EnemyTunables {
            x: 600.0,
            y: 296.0,
            width: 64.0,
            height: 64.0,
            speed: 0.8,
            max_hp: 200,
            min_y: 250.0,
            max_y: 320.0,
            fire_interval: 240,
            reset_grace: 60,
            muzzle_offset_y: 24.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectileTunables {
    pub width: f32,
    pub height: f32,
    pub player_speed: f32,
    pub enemy_speed: f32,
    /// damage a player beam deals to the enemy
    pub player_damage: i32,
    /// damage an enemy beam deals to the player
    pub enemy_damage: i32,
    /// distance past a screen edge before a beam is discarded
    pub offscreen_margin: f32,
    pub enemy_hue_rotation: f32,
}

impl Default for ProjectileTunables {
    fn default() -> Self {
        ProjectileTunables {
            width: 30.0,
            height: 10.0,
            player_speed: 10.0,
            enemy_speed: 8.0,
            player_damage: 10,
            enemy_damage: 25,
            offscreen_margin: 50.0,
            enemy_hue_rotation: 180.0,
        }
    }
}

/// `KeyboardEvent.code` bound to each logical control
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Bindings {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub fire: String,
}

impl Default for Bindings {
    fn default() -> Self {
        Bindings {
            up: "ArrowUp".into(),
            down: "ArrowDown".into(),
            left: "ArrowLeft".into(),
            right: "ArrowRight".into(),
            fire: "Space".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetPaths {
    pub hero: String,
    pub dino: String,
    pub background: String,
    pub beam: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        AssetPaths {
            hero: "hero.png".into(),
            dino: "dino.png".into(),
            background: "bg.png".into(),
            beam: "beam.png".into(),
        }
    }
}

impl GameConfig {
    /// The canvas element is the source of truth for the play area
    pub fn with_canvas_size(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn frame_pacing(&self) -> FramePacing {
        if self.fixed_timestep {
            FramePacing::Fixed
        } else {
            FramePacing::PerFrame
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.canvas_width > 0.0 && self.canvas_height > 0.0,
            "canvas must have a positive size, got {}x{}",
            self.canvas_width,
            self.canvas_height
        );
        ensure!(
            self.player.width > 0.0 && self.player.height > 0.0,
            "player must have a positive size"
        );
        ensure!(
            self.enemy.width > 0.0 && self.enemy.height > 0.0,
            "enemy must have a positive size"
        );
        ensure!(
            self.projectile.width > 0.0 && self.projectile.height > 0.0,
            "projectiles must have a positive size"
        );
        ensure!(
            self.player.max_hp > 0 && self.enemy.max_hp > 0,
            "max hp must be positive"
        );
        ensure!(
            self.enemy.min_y <= self.enemy.max_y,
            "enemy patrol bounds are inverted ({} > {})",
            self.enemy.min_y,
            self.enemy.max_y
        );
        Ok(())
    }

    /// Fetches overrides, falling back to the defaults on any failure.
    /// A missing config file is normal, it is logged and play goes on.
    pub async fn load(path: &str) -> GameConfig {
        let loaded = browser::fetch_json::<GameConfig>(path)
            .await
            .and_then(|config| config.validate().map(|_| config));
        match loaded {
            Ok(config) => {
                log!("Loaded config from {}", path);
                config
            }
            Err(err) => {
                log!("Using default config ({}): {:#}", path, err);
                GameConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_patrol_bounds_are_rejected() {
        let mut config = GameConfig::default();
        config.enemy.min_y = 330.0;
        config.enemy.max_y = 250.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let config = GameConfig::default().with_canvas_size(0.0, 400.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn canvas_size_override_keeps_other_tunables() {
        let config = GameConfig::default().with_canvas_size(1024.0, 480.0);
        assert_eq!(config.canvas_width, 1024.0);
        assert_eq!(config.canvas_height, 480.0);
        assert_eq!(config.player, PlayerTunables::default());
    }

    #[test]
    fn timestep_flag_selects_pacing() {
        let mut config = GameConfig::default();
        assert_eq!(config.frame_pacing(), FramePacing::PerFrame);
        config.fixed_timestep = true;
        assert_eq!(config.frame_pacing(), FramePacing::Fixed);
    }
}
