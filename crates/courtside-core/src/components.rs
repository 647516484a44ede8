//! Extra ECS components attached alongside `Mover`, `Agent` and `Ball`.
//!
//! Components here are plain data with no methods.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Where an agent lines up when a play is reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartPosition(pub Position);

/// Release accuracy supplied with a human shot (e.g. from a timing meter).
/// Consumed together with the agent's shot intent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReleaseHint {
    pub accuracy: f64,
}
