use crate::browser;
use crate::config::{GameConfig, CONFIG_PATH};
use crate::engine::input::{KeyPress, KeyState};
use crate::engine::{FramePacing, Game, Renderer};
use crate::sprite::{Assets, Canvas};
use crate::ui::{DomHud, Hud, HudSync};
use crate::world::{Controls, World};
use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// ┌──────────────────────── Game Architecture ──────────────────────────┐
/// │                                                                     │
/// │   engine::GameLoop ──► HeroVsDino ──► World (pure round state)      │
/// │        │                   │             │                          │
/// │        │ KeyPress          │ Controls    ├─► FrameEvent -> log!     │
/// │        │ KeyState          │             ├─► HudState -> DomHud     │
/// │        │                   │             └─► draw -> Canvas         │
/// │                                                                     │
/// ├──────────────────────── Call Sequence ──────────────────────────────┤
/// │  1. on_key : fire released -> rearm, fire on a lost/won round       │
/// │              -> reset, then sync HUD                                │
/// │  2. update : KeyState -> Controls -> World::tick, log, sync HUD     │
/// │  3. draw   : World::draw onto the canvas, every frame               │
/// └─────────────────────────────────────────────────────────────────────┘
pub enum HeroVsDino {
    /// Initialize state while config and images are being loaded
    /// Transition to `Loaded` once initialization is complete
    Loading,

    /// Round in progress (or finished, waiting for a restart)
    Loaded(Arena),
}

pub struct Arena {
    round: Round,
    assets: Assets,
    hud: DomHud,
}

/// The world plus what the page was last told about it
struct Round {
    world: World,
    hud_sync: HudSync,
}

impl HeroVsDino {
    pub fn new() -> Self {
        HeroVsDino::Loading
    }
}

impl Default for HeroVsDino {
    fn default() -> Self {
        HeroVsDino::new()
    }
}

impl Round {
    fn new(world: World) -> Self {
        Round {
            world,
            hud_sync: HudSync::new(),
        }
    }

    fn on_key(&mut self, press: &KeyPress, hud: &dyn Hud) {
        let (code, pressed) = match press {
            KeyPress::KeyDown(code) => (code, true),
            KeyPress::KeyUp(code) => (code, false),
        };
        if let Some(control) = self.world.config().bindings.control_for(code) {
            self.world.on_control(control, pressed);
            self.log_events();
            // a restart has to drop the overlay even on frames with no update step
            self.sync_hud(hud);
        }
    }

    fn update(&mut self, keystate: &KeyState, hud: &dyn Hud) {
        let controls = Controls::from_keys(keystate, &self.world.config().bindings);
        self.world.tick(&controls);
        self.log_events();
        self.sync_hud(hud);
    }

    fn log_events(&mut self) {
        for event in self.world.drain_events() {
            log!("{}", event);
        }
    }

    fn sync_hud(&mut self, hud: &dyn Hud) {
        if let Err(err) = self.hud_sync.sync(hud, self.world.hud()) {
            error!("HUD update failed: {:#}", err);
        }
    }
}

#[async_trait(?Send)]
impl Game for HeroVsDino {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            HeroVsDino::Loading => {
                let canvas = browser::canvas()?;
                let config = GameConfig::load(CONFIG_PATH)
                    .await
                    .with_canvas_size(canvas.width() as f32, canvas.height() as f32);
                config.validate()?;

                let assets = Assets::load(&config.assets).await?;
                let hud = DomHud::new()?;
                let mut round = Round::new(World::new(config));
                round.sync_hud(&hud);
                log!("Game ready. Player HP: {}", round.world.player().entity.hp);
                let arena = Arena { round, assets, hud };
                Ok(Box::new(HeroVsDino::Loaded(arena)))
            }
            HeroVsDino::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn on_key(&mut self, press: &KeyPress) {
        if let HeroVsDino::Loaded(arena) = self {
            arena.round.on_key(press, &arena.hud);
        }
    }

    fn update(&mut self, keystate: &KeyState) {
        if let HeroVsDino::Loaded(arena) = self {
            arena.round.update(keystate, &arena.hud);
        }
    }

    fn draw(&self, renderer: &Renderer) {
        if let HeroVsDino::Loaded(arena) = self {
            arena.round.world.draw(&Canvas::new(renderer, &arena.assets));
        }
    }

    fn frame_pacing(&self) -> FramePacing {
        match self {
            HeroVsDino::Loaded(arena) => arena.round.world.config().frame_pacing(),
            HeroVsDino::Loading => FramePacing::PerFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{HudCall, RecordingHud};
    use crate::world::GameResult;

    fn lost_round(hud: &RecordingHud) -> Round {
        let mut round = Round::new(World::new(GameConfig::default()));
        let idle = KeyState::new();
        for _ in 0..3000 {
            round.update(&idle, hud);
            if !round.world.is_running() {
                break;
            }
        }
        assert!(!round.world.is_running());
        round
    }

    #[test]
    fn losing_shows_the_overlay() {
        let hud = RecordingHud::default();
        lost_round(&hud);

        assert_eq!(
            hud.calls.borrow().last(),
            Some(&HudCall::Show(GameResult::Defeat))
        );
    }

    #[test]
    fn restart_key_hides_the_overlay_right_away() {
        let hud = RecordingHud::default();
        let mut round = lost_round(&hud);
        hud.calls.borrow_mut().clear();

        round.on_key(&KeyPress::KeyDown("Space".to_string()), &hud);

        assert!(round.world.is_running());
        assert_eq!(
            *hud.calls.borrow(),
            vec![HudCall::Bars(100.0, 100.0), HudCall::Hide]
        );
    }

    #[test]
    fn unbound_keys_leave_the_page_alone() {
        let hud = RecordingHud::default();
        let mut round = lost_round(&hud);
        hud.calls.borrow_mut().clear();

        round.on_key(&KeyPress::KeyDown("KeyQ".to_string()), &hud);

        assert!(!round.world.is_running());
        assert!(hud.calls.borrow().is_empty());
    }
}
