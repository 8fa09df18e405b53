use super::GameResult;
use crate::engine::Point;
use std::fmt;

/// Something worth logging that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    EnemyHit { hp: i32 },
    PlayerHit { hp: i32, at: Point },
    PlayerDefeated { hp: i32 },
    EnemyDefeated,
    RoundEnded(GameResult),
    RoundReset { player_hp: i32 },
}

impl fmt::Display for FrameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameEvent::EnemyHit { hp } => write!(f, "Hit Dino! HP: {}", hp),
            FrameEvent::PlayerHit { hp, at } => write!(
                f,
                "Hit Player! HP: {} by projectile at {},{}",
                hp, at.x, at.y
            ),
            FrameEvent::PlayerDefeated { hp } => write!(f, "Player Died. Final HP: {}", hp),
            FrameEvent::EnemyDefeated => write!(f, "Dino Defeated"),
            FrameEvent::RoundEnded(result) => write!(f, "Round over: {}", result),
            FrameEvent::RoundReset { player_hp } => {
                write!(f, "Game Reset. Player HP: {}", player_hp)
            }
        }
    }
}
