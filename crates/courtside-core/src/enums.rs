//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// One of the two sides contesting the ball.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    /// Attacks the right-hand goal.
    #[default]
    Home,
    /// Attacks the left-hand goal.
    Away,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    /// Stable index for per-team arrays.
    pub fn index(self) -> usize {
        match self {
            Team::Home => 0,
            Team::Away => 1,
        }
    }
}

/// Ball possession/flight mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallMode {
    /// Carried by an agent.
    Held,
    /// Free on the court.
    #[default]
    Loose,
    /// Travelling along an arc toward a target point.
    InFlight,
}

/// Direction a goal opens toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1 for Left, +1 for Right.
    pub fn sign(self) -> f64 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Committed state of an autonomous controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    ChaseBall,
    Attack,
    Defend,
}

/// Why the ball left a holder's hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseKind {
    Shot,
    Pass,
}

/// Resolution of a completed shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotOutcome {
    Make,
    Miss,
}
