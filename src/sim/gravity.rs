//! Central gravity well
//!
//! Every ball inside the well's radius is pulled toward its center with a
//! force that falls off linearly to zero at the rim. The force is applied
//! straight to velocity once per tick.

use crate::consts::*;
use crate::{Vector2, normalized};

/// Attractive force field shared by all balls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityField {
    pub center: Vector2,
    pub radius: f64,
    pub strength: f64,
    /// Per-tick cap on the returned force magnitude
    pub max_force: f64,
}

impl Default for GravityField {
    fn default() -> Self {
        Self {
            center: Vector2::new(GRAVITY_CENTER_X, GRAVITY_CENTER_Y),
            radius: GRAVITY_RADIUS,
            strength: GRAVITY_STRENGTH,
            max_force: BALL_SPEED * GRAVITY_MAX_FORCE_RATIO,
        }
    }
}

impl GravityField {
    /// Force on a body whose center is at `point`.
    ///
    /// Zero outside the radius and within 0.1 of the center.
    pub fn force(&self, point: Vector2) -> Vector2 {
        let delta = self.center - point;
        let distance = delta.length();
        if distance >= self.radius {
            return Vector2::ZERO;
        }

        // normalized() is zero for distance <= 0.1, which covers the singularity
        let direction = normalized(delta);
        let force = direction * (self.strength * (1.0 - distance / self.radius));

        let magnitude = force.length();
        if magnitude > self.max_force {
            force * (self.max_force / magnitude)
        } else {
            force
        }
    }
}
