//! Per-frame simulation tick
//!
//! Advances the match by one step in a fixed order: paddles, balls, power-up
//! lifetimes, control inversion, power-up spawning, collisions, scoring. Each
//! stage sees the results of the previous one.

use std::time::Duration;

use super::collision::{bounce_off_walls, deflect_off_paddle, is_paddle_hit};
use super::state::{Ball, GameEvent, MatchState, Player, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::{Vector2, velocity_from_angle};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub p1_up: bool,
    pub p1_down: bool,
    pub p2_up: bool,
    pub p2_down: bool,
    /// Start a new game (only honored once the game is over)
    pub reset: bool,
    /// End the session
    pub quit: bool,
}

/// Advance the match by one tick. `now` is the current monotonic time.
pub fn tick(state: &mut MatchState, input: &TickInput, now: Duration) {
    state.events.clear();

    if !state.running {
        return;
    }
    if input.quit {
        state.running = false;
        state.events.push(GameEvent::Quit);
        log::info!("Quit requested");
        return;
    }
    if input.reset && state.game_over {
        state.reset(now);
    }

    // Frozen until reset
    if state.game_over {
        return;
    }

    state.time_ticks += 1;

    update_paddles(state, input);
    advance_balls(state);
    prune_power_ups(state, now);
    state.expire_control_inversion(now);
    maybe_spawn_power_up(state, now);
    resolve_collisions(state);
    collect_power_ups(state, now);
    check_score(state);

    // Every ball left the field without a point being awarded
    if !state.round_in_progress && !state.game_over {
        state.serve_ball();
    }
}

fn update_paddles(state: &mut MatchState, input: &TickInput) {
    // An inverted side has its up and down keys swapped
    let (up1, down1) = if state.controls_inverted(Player::One) {
        (input.p1_down, input.p1_up)
    } else {
        (input.p1_up, input.p1_down)
    };
    let (up2, down2) = if state.controls_inverted(Player::Two) {
        (input.p2_down, input.p2_up)
    } else {
        (input.p2_up, input.p2_down)
    };

    if up1 {
        state.left_paddle.move_up();
    }
    if down1 {
        state.left_paddle.move_down();
    }
    if up2 {
        state.right_paddle.move_up();
    }
    if down2 {
        state.right_paddle.move_down();
    }
}

fn advance_balls(state: &mut MatchState) {
    let gravity = state.gravity;
    for ball in &mut state.balls {
        ball.advance(&gravity);
    }

    let before = state.balls.len();
    state.balls.retain(|b| !b.is_out_of_play());
    for _ in state.balls.len()..before {
        state.events.push(GameEvent::BallLost);
    }
    if before != state.balls.len() {
        log::debug!("{} ball(s) left the field", before - state.balls.len());
    }

    if state.balls.is_empty() {
        state.round_in_progress = false;
        state.scored_this_round = false;
    }
}

fn prune_power_ups(state: &mut MatchState, now: Duration) {
    let events = &mut state.events;
    state.power_ups.retain(|p| {
        if !p.active {
            false
        } else if p.is_expired(now) {
            events.push(GameEvent::PowerUpExpired { kind: p.kind });
            log::debug!("Power-up {:?} expired", p.kind);
            false
        } else {
            true
        }
    });
}

/// Spawn a power-up if the field is empty, the cooldown has passed, and the
/// per-tick roll succeeds.
fn maybe_spawn_power_up(state: &mut MatchState, now: Duration) {
    if !state.power_ups.is_empty()
        || now.saturating_sub(state.last_spawn_at) < POWER_UP_SPAWN_COOLDOWN
        || !state.rng.chance(POWER_UP_SPAWN_CHANCE)
    {
        return;
    }

    // Middle 40% of the width, away from both paddles
    let x = FIELD_WIDTH * 0.3 + state.rng.unit() * FIELD_WIDTH * 0.4;
    let y = POWER_UP_SPAWN_MARGIN
        + state.rng.unit() * (FIELD_HEIGHT - 2.0 * POWER_UP_SPAWN_MARGIN);
    let kind = if state.rng.unit() < 0.5 {
        PowerUpKind::Multiball
    } else {
        PowerUpKind::InvertControls
    };

    let id = state.next_entity_id();
    state
        .power_ups
        .push(PowerUp::new(id, kind, Vector2::new(x, y), now));
    state.last_spawn_at = now;
    state.events.push(GameEvent::PowerUpSpawned { kind });
    log::info!("Power-up {:?} spawned at ({:.0}, {:.0})", kind, x, y);
}

fn resolve_collisions(state: &mut MatchState) {
    for ball in &mut state.balls {
        if bounce_off_walls(ball, FIELD_HEIGHT) {
            state.events.push(GameEvent::WallBounce);
        }

        let hit = if is_paddle_hit(ball, &state.left_paddle, Player::One) {
            deflect_off_paddle(ball, &state.left_paddle, Player::One);
            Some(Player::One)
        } else if is_paddle_hit(ball, &state.right_paddle, Player::Two) {
            deflect_off_paddle(ball, &state.right_paddle, Player::Two);
            Some(Player::Two)
        } else {
            None
        };

        if let Some(player) = hit {
            state.last_player_to_hit = Some(player);
            state.events.push(GameEvent::PaddleHit { player });
            log::debug!("Player {} hit the ball", player.index() + 1);
        }
    }
}

/// Collect every active power-up touched by a ball and apply its effect.
fn collect_power_ups(state: &mut MatchState, now: Duration) {
    let mut collected = Vec::new();
    for power_up in state.power_ups.iter_mut().filter(|p| p.active) {
        let rect = power_up.rect();
        // One ball is enough; the rest can't collect it again
        if state.balls.iter().any(|b| b.rect().intersects(&rect)) {
            power_up.collect();
            collected.push(power_up.kind);
        }
    }

    for kind in collected {
        state.events.push(GameEvent::PowerUpCollected { kind });
        log::info!("Power-up {:?} collected", kind);
        match kind {
            PowerUpKind::Multiball => activate_multiball(state),
            PowerUpKind::InvertControls => activate_invert_controls(state, now),
        }
    }
}

/// Replace the balls with a symmetric fan of `MULTIBALL_COUNT` copies of the
/// first ball, keeping its position and speed.
pub fn activate_multiball(state: &mut MatchState) {
    let Some(template) = state.balls.first().cloned() else {
        return;
    };

    let base_angle = template.velocity.y.atan2(template.velocity.x);
    let speed = template.velocity.length();
    let middle = (MULTIBALL_COUNT / 2) as f64;

    state.balls = (0..MULTIBALL_COUNT)
        .map(|i| {
            let angle = base_angle + (i as f64 - middle) * MULTIBALL_SPREAD;
            Ball::with_velocity(template.position, velocity_from_angle(speed, angle))
        })
        .collect();

    state.events.push(GameEvent::MultiballSplit {
        balls: state.balls.len(),
    });
}

/// Invert the controls of the opponent of whoever hit the ball last.
///
/// Nobody has touched the ball yet when `last_player_to_hit` is `None`, so
/// there is no opponent to punish and the pickup is wasted.
pub fn activate_invert_controls(state: &mut MatchState, now: Duration) {
    match state.last_player_to_hit {
        Some(hitter) => state.invert_controls(hitter.opponent(), now),
        None => log::debug!("Invert controls collected before any paddle hit; ignored"),
    }
}

/// Award a point for the first ball found past a side wall
fn check_score(state: &mut MatchState) {
    if !state.round_in_progress || state.scored_this_round {
        return;
    }

    let scorer = state.balls.iter().find_map(|ball| {
        if ball.position.x < 0.0 {
            Some(Player::Two)
        } else if ball.position.x > FIELD_WIDTH {
            Some(Player::One)
        } else {
            None
        }
    });

    if let Some(player) = scorer {
        state.award_point(player);
    }
}
