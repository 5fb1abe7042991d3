//! Collision detection and response
//!
//! Everything here is axis-aligned: balls, paddles and power-ups are boxes.
//! Detection is a plain rectangle overlap test; the interesting part is the
//! paddle response, which puts "english" on the ball depending on where it
//! struck the paddle.

use super::state::{Ball, Paddle, Player};
use crate::consts::*;

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// True when the rectangles share some area.
    ///
    /// Edges that only touch do not count, and an empty rectangle never
    /// intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Bounce a ball off the top/bottom walls.
///
/// Returns true if the ball was touching or past a wall.
pub fn bounce_off_walls(ball: &mut Ball, field_height: f64) -> bool {
    let max_y = field_height - ball.size;
    if ball.position.y <= 0.0 || ball.position.y >= max_y {
        ball.reverse_y();
        ball.position.y = ball.position.y.clamp(0.0, max_y);
        true
    } else {
        false
    }
}

/// True if `ball` overlaps `paddle` while travelling toward it.
///
/// A ball already heading away from the paddle is ignored so it cannot be
/// deflected twice while still overlapping.
pub fn is_paddle_hit(ball: &Ball, paddle: &Paddle, side: Player) -> bool {
    let approaching = match side {
        Player::One => ball.velocity.x < 0.0,
        Player::Two => ball.velocity.x > 0.0,
    };
    approaching && ball.intersects(paddle)
}

/// Paddle collision response for a ball struck by `side`'s paddle
pub fn deflect_off_paddle(ball: &mut Ball, paddle: &Paddle, side: Player) {
    ball.reverse_x();

    // Flush against the facing edge
    ball.position.x = match side {
        Player::One => paddle.position.x + paddle.width,
        Player::Two => paddle.position.x - ball.size,
    };

    // -1 at the top edge, +1 at the bottom edge
    let impact_point = (ball.center_y() - paddle.center_y()) / (paddle.height / 2.0);
    let vy = ball.velocity.y + impact_point * PADDLE_ENGLISH;
    ball.velocity.y = vy.clamp(-MAX_BALL_VERTICAL_SPEED, MAX_BALL_VERTICAL_SPEED);
}
