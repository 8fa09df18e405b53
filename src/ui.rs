use crate::browser;
use crate::world::GameResult;
use anyhow::{anyhow, Result};
use web_sys::Element;

// ids of the page elements around the canvas
mod html {
    pub const PLAYER_HP_BAR: &str = "player-hp-bar";
    pub const BOSS_HP_BAR: &str = "boss-hp-bar";
    pub const GAME_OVER_SCREEN: &str = "game-over-screen";
    pub const GAME_RESULT_TITLE: &str = "game-result-title";
    pub const HIDDEN_CLASS: &str = "hidden";
}

/// What the page should show, derived from the world every update
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HudState {
    /// 0..=100
    pub player_health: f32,
    /// 0..=100
    pub enemy_health: f32,
    pub outcome: Option<GameResult>,
}

pub trait Hud {
    fn set_health_bars(&self, player_percent: f32, enemy_percent: f32) -> Result<()>;
    fn show_game_over(&self, result: GameResult) -> Result<()>;
    fn hide_game_over(&self) -> Result<()>;
}

/// Pushes HudState changes into a Hud
/// - bars are rewritten whenever a percentage moves
/// - the overlay only toggles when the outcome changes
#[derive(Debug, Default)]
pub struct HudSync {
    shown: Option<HudState>,
}

impl HudSync {
    pub fn new() -> Self {
        HudSync::default()
    }

    pub fn sync(&mut self, hud: &dyn Hud, next: HudState) -> Result<()> {
        let previous = self.shown;
        if previous.map_or(true, |shown| {
            shown.player_health != next.player_health || shown.enemy_health != next.enemy_health
        }) {
            hud.set_health_bars(next.player_health, next.enemy_health)?;
        }

        let previous_outcome = previous.and_then(|shown| shown.outcome);
        if previous.is_none() || previous_outcome != next.outcome {
            match next.outcome {
                Some(result) => hud.show_game_over(result)?,
                None => hud.hide_game_over()?,
            }
        }

        self.shown = Some(next);
        Ok(())
    }
}

/// The page's health bars and game-over overlay
pub struct DomHud {
    player_bar: Element,
    boss_bar: Element,
    game_over_screen: Element,
    result_title: Element,
}

impl DomHud {
    pub fn new() -> Result<Self> {
        Ok(DomHud {
            player_bar: browser::element_by_id(html::PLAYER_HP_BAR)?,
            boss_bar: browser::element_by_id(html::BOSS_HP_BAR)?,
            game_over_screen: browser::element_by_id(html::GAME_OVER_SCREEN)?,
            result_title: browser::element_by_id(html::GAME_RESULT_TITLE)?,
        })
    }
}

fn set_width(element: &Element, percent: f32) -> Result<()> {
    element
        .set_attribute("style", &format!("width: {}%", percent))
        .map_err(|err| anyhow!("Could not set bar width : {:#?}", err))
}

impl Hud for DomHud {
    fn set_health_bars(&self, player_percent: f32, enemy_percent: f32) -> Result<()> {
        set_width(&self.player_bar, player_percent)?;
        set_width(&self.boss_bar, enemy_percent)
    }

    fn show_game_over(&self, result: GameResult) -> Result<()> {
        self.result_title.set_text_content(Some(result.title()));
        self.result_title
            .set_attribute("style", &format!("color: {}", result.color()))
            .map_err(|err| anyhow!("Could not color result title : {:#?}", err))?;
        self.game_over_screen
            .class_list()
            .remove_1(html::HIDDEN_CLASS)
            .map_err(|err| anyhow!("Could not reveal game over screen : {:#?}", err))
    }

    fn hide_game_over(&self) -> Result<()> {
        self.game_over_screen
            .class_list()
            .add_1(html::HIDDEN_CLASS)
            .map_err(|err| anyhow!("Could not hide game over screen : {:#?}", err))
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, PartialEq)]
    pub enum HudCall {
        Bars(f32, f32),
        Show(GameResult),
        Hide,
    }

    #[derive(Default)]
    pub struct RecordingHud {
        pub calls: RefCell<Vec<HudCall>>,
    }

    impl Hud for RecordingHud {
        fn set_health_bars(&self, player_percent: f32, enemy_percent: f32) -> Result<()> {
            self.calls
                .borrow_mut()
                .push(HudCall::Bars(player_percent, enemy_percent));
            Ok(())
        }

        fn show_game_over(&self, result: GameResult) -> Result<()> {
            self.calls.borrow_mut().push(HudCall::Show(result));
            Ok(())
        }

        fn hide_game_over(&self) -> Result<()> {
            self.calls.borrow_mut().push(HudCall::Hide);
            Ok(())
        }
    }
}
