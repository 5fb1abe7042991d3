//! Gravity Pong - two-player Pong around a central gravity well
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (paddles, balls, power-ups, scoring)
//! - `platform`: Frame pacing and key-state plumbing for a presentation layer
//! - `settings`: Headless runner settings

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// 2D vector used throughout the simulation (top-left origin, y grows down)
pub type Vector2 = glam::DVec2;

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Field dimensions
    pub const FIELD_WIDTH: f64 = 800.0;
    pub const FIELD_HEIGHT: f64 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f64 = 15.0;
    pub const PADDLE_HEIGHT: f64 = 80.0;
    pub const PADDLE_SPEED: f64 = 5.0;
    pub const LEFT_PADDLE_START_X: f64 = 20.0;
    pub const RIGHT_PADDLE_START_X: f64 = FIELD_WIDTH - 20.0 - PADDLE_WIDTH;
    pub const PADDLE_START_Y: f64 = FIELD_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0;

    /// Ball defaults
    pub const BALL_SIZE: f64 = 15.0;
    pub const BALL_SPEED: f64 = 4.0;
    /// Serve boost so a fresh ball can climb out of the gravity well
    pub const SERVE_SPEED_MULTIPLIER: f64 = 2.0;
    /// Cap on |vy| after a paddle hit
    pub const MAX_BALL_VERTICAL_SPEED: f64 = BALL_SPEED * 1.5;
    /// Vertical velocity added per unit of paddle impact offset
    pub const PADDLE_ENGLISH: f64 = 2.0;
    /// Distance past a side wall before a ball is discarded
    pub const OFFSCREEN_MARGIN: f64 = 50.0;

    /// Gravity well (centered on the field)
    pub const GRAVITY_CENTER_X: f64 = FIELD_WIDTH / 2.0;
    pub const GRAVITY_CENTER_Y: f64 = FIELD_HEIGHT / 2.0;
    pub const GRAVITY_RADIUS: f64 = 200.0;
    pub const GRAVITY_STRENGTH: f64 = 0.15;
    /// Per-tick force cap as a fraction of BALL_SPEED
    pub const GRAVITY_MAX_FORCE_RATIO: f64 = 0.1;

    /// Match rules
    pub const WIN_SCORE: u32 = 10;
    pub const TICK_RATE: u64 = 60;
    /// Integer-millisecond frame delay (1000 / 60 = 16ms)
    pub const FRAME_DELAY: Duration = Duration::from_millis(1000 / TICK_RATE);

    /// Power-ups
    pub const POWER_UP_SIZE: f64 = 30.0;
    pub const POWER_UP_LIFETIME: Duration = Duration::from_secs(10);
    pub const POWER_UP_SPAWN_COOLDOWN: Duration = Duration::from_secs(15);
    pub const POWER_UP_SPAWN_CHANCE: f64 = 0.1;
    /// Vertical keep-out at the top and bottom of the spawn band
    pub const POWER_UP_SPAWN_MARGIN: f64 = 50.0;
    pub const CONTROL_INVERSION_DURATION: Duration = Duration::from_secs(10);

    /// Multiball split
    pub const MULTIBALL_COUNT: usize = 5;
    pub const MULTIBALL_SPREAD: f64 = 0.3; // radians between neighbours
}

/// Unit vector in the direction of `v`, or zero when `|v| <= 0.1`.
///
/// The threshold keeps the division stable for vectors sitting on (or very
/// near) the origin.
#[inline]
pub fn normalized(v: Vector2) -> Vector2 {
    let mag = v.length();
    if mag > 0.1 { v / mag } else { Vector2::ZERO }
}

/// Velocity with the given speed and heading (radians, screen space)
#[inline]
pub fn velocity_from_angle(speed: f64, angle: f64) -> Vector2 {
    Vector2::new(speed * angle.cos(), speed * angle.sin())
}
