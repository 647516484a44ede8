//! Shared motion primitive for agents and the ball.

use serde::{Deserialize, Serialize};

use crate::types::{Position, Velocity};

/// Position plus velocity, with the velocity bounded by the owner's speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub position: Position,
    pub velocity: Velocity,
    /// Upper bound on the velocity magnitude.
    pub max_speed: f64,
}

impl Mover {
    pub fn new(position: Position, max_speed: f64) -> Self {
        Self {
            position,
            velocity: Velocity::ZERO,
            max_speed,
        }
    }

    /// Set the velocity, rescaled to `max_speed` if it exceeds it.
    /// Non-finite input stops the mover.
    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.velocity = Velocity::new(vx, vy).clamped(self.max_speed);
    }

    pub fn stop(&mut self) {
        self.velocity = Velocity::ZERO;
    }

    /// `position += velocity * dt`.
    pub fn integrate(&mut self, dt: f64) {
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;
    }
}
