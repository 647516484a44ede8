//! Commands from the input-translation layer to the simulation.
//!
//! Commands are queued and applied at the next tick boundary. They act on the
//! human team's primary agent.

use serde::{Deserialize, Serialize};

/// All possible human actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Move along an already-resolved directional intent. The intent is
    /// normalised and scaled by the agent's base speed.
    Move { dx: f64, dy: f64 },
    /// Stop moving.
    Stop,
    /// Shoot at the team's target goal. `accuracy` comes from the caller's
    /// timing meter, if it has one.
    Shoot { accuracy: Option<f64> },
    /// Pass to the teammate.
    Pass,
    /// Hand control to the other agent on the team.
    SwitchPlayer,
    /// Reset the ball and agents between plays or quarters.
    ResetPlay,
}
