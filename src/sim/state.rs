//! Match state and core simulation types
//!
//! `MatchState` owns every entity in play: both paddles, the live balls and
//! the power-ups on the field. It is mutated only by `tick`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::gravity::GravityField;
use super::rng::GameRng;
use crate::Vector2;
use crate::consts::*;

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Left paddle
    One,
    /// Right paddle
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Slot in per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

/// A player's paddle. Only ever moves vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Top-left corner
    pub position: Vector2,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Paddle {
    pub fn new(position: Vector2) -> Self {
        Self {
            position,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }

    pub fn move_up(&mut self) {
        self.position.y = (self.position.y - self.speed).max(0.0);
    }

    pub fn move_down(&mut self) {
        self.position.y = (self.position.y + self.speed).min(FIELD_HEIGHT - self.height);
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.rect().intersects(other)
    }

    pub fn center_y(&self) -> f64 {
        self.position.y + self.height / 2.0
    }
}

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Top-left corner of the ball's bounding box
    pub position: Vector2,
    pub velocity: Vector2,
    pub size: f64,
}

impl Ball {
    pub fn new(position: Vector2) -> Self {
        Self {
            position,
            velocity: Vector2::ZERO,
            size: BALL_SIZE,
        }
    }

    /// Ball with the given velocity, used for multiball splits
    pub fn with_velocity(position: Vector2, velocity: Vector2) -> Self {
        Self {
            velocity,
            ..Self::new(position)
        }
    }

    /// Pull toward the gravity well, then take one Euler step
    pub fn advance(&mut self, field: &GravityField) {
        self.velocity += field.force(self.center());
        self.position += self.velocity;
    }

    /// Recenter on the field and launch toward a random side.
    ///
    /// Horizontal speed is always `BALL_SPEED * SERVE_SPEED_MULTIPLIER`; the
    /// vertical component is uniform in +/- half of that.
    pub fn serve(&mut self, rng: &mut GameRng) {
        self.position = Vector2::new(
            FIELD_WIDTH / 2.0 - self.size / 2.0,
            FIELD_HEIGHT / 2.0 - self.size / 2.0,
        );

        let launch = BALL_SPEED * SERVE_SPEED_MULTIPLIER;
        let dir = if rng.unit() < 0.5 { 1.0 } else { -1.0 };
        self.velocity = Vector2::new(dir * launch, (rng.unit() - 0.5) * launch);
    }

    pub fn reverse_x(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    pub fn reverse_y(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size, self.size)
    }

    pub fn intersects(&self, paddle: &Paddle) -> bool {
        paddle.intersects(&self.rect())
    }

    pub fn center(&self) -> Vector2 {
        self.position + Vector2::splat(self.size / 2.0)
    }

    pub fn center_y(&self) -> f64 {
        self.position.y + self.size / 2.0
    }

    /// Past a side wall by more than the off-screen margin
    pub fn is_out_of_play(&self) -> bool {
        self.position.x < -self.size - OFFSCREEN_MARGIN
            || self.position.x > FIELD_WIDTH + OFFSCREEN_MARGIN
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Split the ball into a fan of five
    Multiball,
    /// Swap up/down for the opponent of the last hitter
    InvertControls,
}

/// A collectible power-up
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    /// Top-left corner
    pub position: Vector2,
    pub size: f64,
    pub spawned_at: Duration,
    pub active: bool,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, position: Vector2, spawned_at: Duration) -> Self {
        Self {
            id,
            kind,
            position,
            size: POWER_UP_SIZE,
            spawned_at,
            active: true,
        }
    }

    pub fn age(&self, now: Duration) -> Duration {
        now.saturating_sub(self.spawned_at)
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        self.age(now) >= POWER_UP_LIFETIME
    }

    /// Scale factor for the pulsing draw, in `[0.6, 1.0]`
    pub fn pulse(&self, now: Duration) -> f64 {
        let phase = self.age(now).as_millis() as f64 / 100.0;
        0.8 + 0.2 * phase.sin()
    }

    pub fn collect(&mut self) {
        self.active = false;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size, self.size)
    }
}

/// Points per player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    pub fn increment(&mut self, player: Player) {
        match player {
            Player::One => self.player1 += 1,
            Player::Two => self.player2 += 1,
        }
    }

    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1,
            Player::Two => self.player2,
        }
    }

    /// First player at or past `win_score`
    pub fn winner(&self, win_score: u32) -> Option<Player> {
        if self.player1 >= win_score {
            Some(Player::One)
        } else if self.player2 >= win_score {
            Some(Player::Two)
        } else {
            None
        }
    }
}

/// Things that happened during the last tick (sound/FX hooks, logging)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    WallBounce,
    PaddleHit { player: Player },
    BallLost,
    Scored { player: Player },
    GameWon { player: Player },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    MultiballSplit { balls: usize },
    ControlsInverted { player: Player },
    InversionEnded,
    Served,
    Reset,
    Quit,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    /// Live balls, in spawn order
    pub balls: Vec<Ball>,
    pub power_ups: Vec<PowerUp>,
    pub score: Score,
    pub winner: Option<Player>,
    pub game_over: bool,
    /// False once quit was requested; ticks become no-ops
    pub running: bool,
    pub round_in_progress: bool,
    /// One-shot latch so a round can only be scored once
    pub scored_this_round: bool,
    pub last_player_to_hit: Option<Player>,
    /// Player whose controls are currently swapped (at most one)
    pub inverted: Option<Player>,
    pub inversion_started_at: Duration,
    pub last_spawn_at: Duration,
    pub gravity: GravityField,
    pub rng: GameRng,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Ticks simulated since construction
    pub time_ticks: u64,
    next_id: u32,
}

impl MatchState {
    /// New match with one ball already served. `now` seeds the spawn
    /// cooldown, so the first power-up cannot appear before
    /// `now + POWER_UP_SPAWN_COOLDOWN`.
    pub fn new(rng: GameRng, now: Duration) -> Self {
        let mut state = Self {
            left_paddle: Paddle::new(Vector2::new(LEFT_PADDLE_START_X, PADDLE_START_Y)),
            right_paddle: Paddle::new(Vector2::new(RIGHT_PADDLE_START_X, PADDLE_START_Y)),
            balls: Vec::new(),
            power_ups: Vec::new(),
            score: Score::default(),
            winner: None,
            game_over: false,
            running: true,
            round_in_progress: false,
            scored_this_round: false,
            last_player_to_hit: None,
            inverted: None,
            inversion_started_at: now,
            last_spawn_at: now,
            gravity: GravityField::default(),
            rng,
            events: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        };

        state.serve_ball();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn paddle(&self, player: Player) -> &Paddle {
        match player {
            Player::One => &self.left_paddle,
            Player::Two => &self.right_paddle,
        }
    }

    pub fn controls_inverted(&self, player: Player) -> bool {
        self.inverted == Some(player)
    }

    /// Drop every ball and power-up; the round is over
    pub fn clear_round(&mut self) {
        self.balls.clear();
        self.power_ups.clear();
        self.round_in_progress = false;
    }

    /// Put a single fresh ball in play, unless the game is over
    pub fn serve_ball(&mut self) {
        if self.game_over {
            return;
        }
        self.clear_round();

        let mut ball = Ball::new(Vector2::ZERO);
        ball.serve(&mut self.rng);
        log::debug!("Serve: velocity ({:.2}, {:.2})", ball.velocity.x, ball.velocity.y);
        self.balls.push(ball);

        self.round_in_progress = true;
        self.scored_this_round = false;
        self.events.push(GameEvent::Served);
    }

    /// Award a point, end the round, and either declare a winner or serve
    pub fn award_point(&mut self, player: Player) {
        self.score.increment(player);
        self.scored_this_round = true;
        self.events.push(GameEvent::Scored { player });
        log::info!(
            "Player {} scores ({} : {})",
            player.index() + 1,
            self.score.player1,
            self.score.player2
        );

        self.clear_round();
        self.check_win();
        self.serve_ball();
    }

    fn check_win(&mut self) {
        if let Some(player) = self.score.winner(WIN_SCORE) {
            self.winner = Some(player);
            self.game_over = true;
            self.events.push(GameEvent::GameWon { player });
            log::info!("Player {} wins!", player.index() + 1);
        }
    }

    /// Swap `player`'s controls, clearing any inversion on the other side
    pub fn invert_controls(&mut self, player: Player, now: Duration) {
        self.inverted = Some(player);
        self.inversion_started_at = now;
        self.events.push(GameEvent::ControlsInverted { player });
        log::info!("Player {} controls inverted", player.index() + 1);
    }

    /// Clear inversion once it has run its full duration. Idempotent.
    pub fn expire_control_inversion(&mut self, now: Duration) {
        if self.inverted.is_some()
            && now.saturating_sub(self.inversion_started_at) >= CONTROL_INVERSION_DURATION
        {
            self.inverted = None;
            self.events.push(GameEvent::InversionEnded);
            log::info!("Control inversion ended");
        }
    }

    /// New game: scores, winner and inversion cleared, fresh serve
    pub fn reset(&mut self, now: Duration) {
        self.score = Score::default();
        self.winner = None;
        self.game_over = false;
        self.inverted = None;
        self.inversion_started_at = now;
        self.events.push(GameEvent::Reset);
        log::info!("Game reset");

        self.serve_ball();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> MatchState {
        MatchState::new(GameRng::seeded(12345), Duration::ZERO)
    }

    #[test]
    fn test_new_match_has_one_served_ball() {
        let state = new_state();
        assert_eq!(state.balls.len(), 1);
        assert!(state.round_in_progress);
        assert!(!state.scored_this_round);
        assert_eq!(state.score, Score::default());
        assert_eq!(state.winner, None);
        assert!(!state.game_over);
        assert_eq!(state.left_paddle.position, Vector2::new(20.0, 260.0));
        assert_eq!(state.right_paddle.position, Vector2::new(765.0, 260.0));
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }

    #[test]
    fn test_paddle_clamped_at_top() {
        let mut paddle = Paddle::new(Vector2::new(20.0, 3.0));
        paddle.move_up();
        assert_eq!(paddle.position.y, 0.0);
        paddle.move_up();
        assert_eq!(paddle.position.y, 0.0);
    }

    #[test]
    fn test_paddle_clamped_at_bottom() {
        let mut paddle = Paddle::new(Vector2::new(20.0, FIELD_HEIGHT - PADDLE_HEIGHT - 2.0));
        paddle.move_down();
        assert_eq!(paddle.position.y, FIELD_HEIGHT - PADDLE_HEIGHT);
        paddle.move_down();
        assert_eq!(paddle.position.y, FIELD_HEIGHT - PADDLE_HEIGHT);
    }

    #[test]
    fn test_paddle_moves_by_speed_only_vertically() {
        let mut paddle = Paddle::new(Vector2::new(20.0, 260.0));
        paddle.move_down();
        assert_eq!(paddle.position, Vector2::new(20.0, 265.0));
        paddle.move_up();
        paddle.move_up();
        assert_eq!(paddle.position, Vector2::new(20.0, 255.0));
        assert_eq!(paddle.center_y(), 295.0);
    }

    #[test]
    fn test_serve_centers_ball() {
        let mut rng = GameRng::seeded(1);
        for _ in 0..50 {
            let mut ball = Ball::new(Vector2::new(3.0, 4.0));
            ball.serve(&mut rng);
            assert_eq!(ball.center(), Vector2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0));
            let launch = BALL_SPEED * SERVE_SPEED_MULTIPLIER;
            assert_eq!(ball.velocity.x.abs(), launch);
            assert!(ball.velocity.y.abs() <= launch * 0.5);
        }
    }

    #[test]
    fn test_serve_picks_both_sides() {
        let mut rng = GameRng::seeded(99);
        let mut left = 0;
        let mut right = 0;
        for _ in 0..200 {
            let mut ball = Ball::new(Vector2::ZERO);
            ball.serve(&mut rng);
            if ball.velocity.x > 0.0 {
                right += 1;
            } else {
                left += 1;
            }
        }
        assert!(left > 0 && right > 0);
    }

    #[test]
    fn test_ball_advance_outside_well_is_linear() {
        let field = GravityField::default();
        let mut ball = Ball::with_velocity(Vector2::new(50.0, 50.0), Vector2::new(3.0, -1.0));
        ball.advance(&field);
        assert_eq!(ball.velocity, Vector2::new(3.0, -1.0));
        assert_eq!(ball.position, Vector2::new(53.0, 49.0));
    }

    #[test]
    fn test_ball_advance_inside_well_gains_pull() {
        let field = GravityField::default();
        // Center 100 units left of the well
        let start = field.center - Vector2::new(100.0, 0.0) - Vector2::splat(BALL_SIZE / 2.0);
        let mut ball = Ball::with_velocity(start, Vector2::ZERO);
        ball.advance(&field);
        assert!((ball.velocity.x - 0.075).abs() < 1e-12);
        assert!(ball.velocity.y.abs() < 1e-12);
        assert!((ball.position.x - (start.x + 0.075)).abs() < 1e-12);
    }

    #[test]
    fn test_ball_reverse() {
        let mut ball = Ball::with_velocity(Vector2::ZERO, Vector2::new(2.0, -3.0));
        ball.reverse_x();
        assert_eq!(ball.velocity, Vector2::new(-2.0, -3.0));
        ball.reverse_y();
        assert_eq!(ball.velocity, Vector2::new(-2.0, 3.0));
    }

    #[test]
    fn test_out_of_play_boundaries() {
        let at_edge = Ball::new(Vector2::new(FIELD_WIDTH, 300.0));
        assert!(!at_edge.is_out_of_play());
        let at_margin = Ball::new(Vector2::new(FIELD_WIDTH + OFFSCREEN_MARGIN, 300.0));
        assert!(!at_margin.is_out_of_play());
        let past = Ball::new(Vector2::new(FIELD_WIDTH + OFFSCREEN_MARGIN + 0.5, 300.0));
        assert!(past.is_out_of_play());
        let left = Ball::new(Vector2::new(-BALL_SIZE - OFFSCREEN_MARGIN - 0.5, 300.0));
        assert!(left.is_out_of_play());
        let left_edge = Ball::new(Vector2::new(-BALL_SIZE - OFFSCREEN_MARGIN, 300.0));
        assert!(!left_edge.is_out_of_play());
    }

    #[test]
    fn test_power_up_expiry() {
        let p = PowerUp::new(1, PowerUpKind::Multiball, Vector2::new(300.0, 200.0), Duration::from_secs(5));
        assert!(p.active);
        assert!(!p.is_expired(Duration::from_secs(5)));
        assert!(!p.is_expired(Duration::from_millis(14_999)));
        assert!(p.is_expired(Duration::from_secs(15)));
        assert_eq!(p.age(Duration::from_secs(7)), Duration::from_secs(2));
        // Clock reading before spawn saturates to zero age
        assert_eq!(p.age(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn test_power_up_pulse_range() {
        let p = PowerUp::new(1, PowerUpKind::InvertControls, Vector2::ZERO, Duration::ZERO);
        assert!((p.pulse(Duration::ZERO) - 0.8).abs() < 1e-12);
        for ms in (0..5000).step_by(37) {
            let pulse = p.pulse(Duration::from_millis(ms));
            assert!((0.6..=1.0).contains(&pulse));
        }
    }

    #[test]
    fn test_power_up_collect() {
        let mut p = PowerUp::new(1, PowerUpKind::Multiball, Vector2::ZERO, Duration::ZERO);
        p.collect();
        assert!(!p.active);
        assert_eq!(p.rect(), Rect::new(0.0, 0.0, 30.0, 30.0));
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::default();
        for _ in 0..9 {
            score.increment(Player::One);
        }
        assert_eq!(score.winner(WIN_SCORE), None);
        score.increment(Player::One);
        assert_eq!(score.winner(WIN_SCORE), Some(Player::One));
        assert_eq!(score.get(Player::One), 10);
        assert_eq!(score.get(Player::Two), 0);
    }

    #[test]
    fn test_inversion_is_exclusive() {
        let mut state = new_state();
        state.invert_controls(Player::One, Duration::from_secs(1));
        assert!(state.controls_inverted(Player::One));
        assert!(!state.controls_inverted(Player::Two));
        state.invert_controls(Player::Two, Duration::from_secs(2));
        assert!(!state.controls_inverted(Player::One));
        assert!(state.controls_inverted(Player::Two));
        assert_eq!(state.inversion_started_at, Duration::from_secs(2));
    }

    #[test]
    fn test_inversion_expiry_is_idempotent() {
        let mut state = new_state();
        state.invert_controls(Player::Two, Duration::from_secs(1));
        state.expire_control_inversion(Duration::from_secs(10));
        assert!(state.controls_inverted(Player::Two), "not yet expired");
        state.expire_control_inversion(Duration::from_secs(11));
        assert_eq!(state.inverted, None);
        state.expire_control_inversion(Duration::from_secs(12));
        assert_eq!(state.inverted, None);
    }

    #[test]
    fn test_award_point_reserves() {
        let mut state = new_state();
        state.power_ups.push(PowerUp::new(9, PowerUpKind::Multiball, Vector2::ZERO, Duration::ZERO));
        state.award_point(Player::Two);
        assert_eq!(state.score.player2, 1);
        assert_eq!(state.balls.len(), 1);
        assert!(state.power_ups.is_empty());
        assert!(state.round_in_progress);
        assert!(!state.scored_this_round);
    }

    #[test]
    fn test_award_winning_point_freezes() {
        let mut state = new_state();
        state.score.player1 = WIN_SCORE - 1;
        state.award_point(Player::One);
        assert!(state.game_over);
        assert_eq!(state.winner, Some(Player::One));
        assert!(state.balls.is_empty());
        assert!(!state.round_in_progress);
        assert!(state.events.contains(&GameEvent::GameWon { player: Player::One }));
    }

    #[test]
    fn test_reset_restarts_match() {
        let mut state = new_state();
        state.score.player2 = WIN_SCORE - 1;
        state.award_point(Player::Two);
        state.invert_controls(Player::One, Duration::from_secs(3));
        state.reset(Duration::from_secs(4));
        assert_eq!(state.score, Score::default());
        assert_eq!(state.winner, None);
        assert!(!state.game_over);
        assert_eq!(state.inverted, None);
        assert_eq!(state.balls.len(), 1);
        assert!(state.round_in_progress);
    }
}
