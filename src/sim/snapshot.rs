//! Read-only view of a match for the presentation layer
//!
//! Built after each tick. Owns its data so a renderer (or the JSON log of the
//! headless runner) never holds a borrow on the live state.

use std::time::Duration;

use serde::Serialize;

use super::state::{MatchState, Player, PowerUpKind};
use crate::Vector2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaddleView {
    pub position: Vector2,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub position: Vector2,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUpView {
    /// Stable across frames, for matching draw effects to a pickup
    pub id: u32,
    pub position: Vector2,
    pub size: f64,
    pub kind: PowerUpKind,
    pub age_secs: f64,
    /// Draw scale for the pulsing effect
    pub pulse: f64,
}

/// Everything a frame needs to draw the field and HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub paddles: [PaddleView; 2],
    pub balls: Vec<BallView>,
    pub power_ups: Vec<PowerUpView>,
    pub player1_score: u32,
    pub player2_score: u32,
    pub game_over: bool,
    pub winner: Option<Player>,
    /// Indexed by `Player::index`
    pub controls_inverted: [bool; 2],
}

impl MatchState {
    pub fn snapshot(&self, now: Duration) -> Snapshot {
        let paddle_view = |player| {
            let p = self.paddle(player);
            PaddleView {
                position: p.position,
                width: p.width,
                height: p.height,
            }
        };

        Snapshot {
            paddles: [paddle_view(Player::One), paddle_view(Player::Two)],
            balls: self
                .balls
                .iter()
                .map(|b| BallView {
                    position: b.position,
                    size: b.size,
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter()
                .filter(|p| p.active)
                .map(|p| PowerUpView {
                    id: p.id,
                    position: p.position,
                    size: p.size,
                    kind: p.kind,
                    age_secs: p.age(now).as_secs_f64(),
                    pulse: p.pulse(now),
                })
                .collect(),
            player1_score: self.score.player1,
            player2_score: self.score.player2,
            game_over: self.game_over,
            winner: self.winner,
            controls_inverted: [
                self.controls_inverted(Player::One),
                self.controls_inverted(Player::Two),
            ],
        }
    }
}
