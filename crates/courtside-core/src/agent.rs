//! Agent (player) state: possession flag, shoot cooldown and skill.
//!
//! Motion lives in the agent's `Mover`; the agent never knows whether a
//! human or the autonomous controller is steering it.

use serde::{Deserialize, Serialize};

use crate::constants::SHOOT_COOLDOWN_SECS;
use crate::enums::Team;

/// A mobile participant capable of holding and shooting the ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Stable identifier, unique within a match.
    pub id: u32,
    pub team: Team,
    pub base_speed: f64,
    /// Static skill stat in [0, 1].
    pub shoot_accuracy: f64,
    /// Human-facing agent (as opposed to its teammate).
    pub is_primary_controlled: bool,
    has_ball: bool,
    shoot_cooldown_remaining: f64,
    wants_to_shoot: bool,
}

impl Agent {
    pub fn new(id: u32, team: Team, base_speed: f64, shoot_accuracy: f64) -> Self {
        Self {
            id,
            team,
            base_speed,
            shoot_accuracy,
            is_primary_controlled: false,
            has_ball: false,
            shoot_cooldown_remaining: 0.0,
            wants_to_shoot: false,
        }
    }

    pub fn has_ball(&self) -> bool {
        self.has_ball
    }

    pub fn shoot_cooldown_remaining(&self) -> f64 {
        self.shoot_cooldown_remaining
    }

    pub fn wants_to_shoot(&self) -> bool {
        self.wants_to_shoot
    }

    /// Decay the shoot cooldown toward zero.
    pub fn update(&mut self, dt: f64) {
        if self.shoot_cooldown_remaining > 0.0 {
            self.shoot_cooldown_remaining = (self.shoot_cooldown_remaining - dt).max(0.0);
        }
    }

    pub fn can_shoot(&self) -> bool {
        self.has_ball && self.shoot_cooldown_remaining <= 0.0
    }

    /// Request a shot. Returns false, changing nothing, when the agent lacks
    /// the ball or is cooling down.
    pub fn shoot(&mut self) -> bool {
        if !self.can_shoot() {
            return false;
        }
        self.shoot_cooldown_remaining = SHOOT_COOLDOWN_SECS;
        self.wants_to_shoot = true;
        true
    }

    /// Read and clear the one-tick shot intent.
    pub fn take_shot_intent(&mut self) -> bool {
        std::mem::take(&mut self.wants_to_shoot)
    }

    /// Called by the ball when it attaches to this agent.
    pub fn pick_up_ball(&mut self) {
        self.has_ball = true;
    }

    /// Called by the ball when it leaves this agent.
    pub fn drop_ball(&mut self) {
        self.has_ball = false;
        self.wants_to_shoot = false;
    }
}
