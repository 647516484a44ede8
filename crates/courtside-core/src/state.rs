//! Match snapshot: the visible state handed to presentation each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::MatchEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete match state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub agents: Vec<AgentView>,
    pub ball: BallView,
    pub score: ScoreView,
    pub controllers: Vec<ControllerView>,
    pub events: Vec<MatchEvent>,
}

/// One agent as seen by rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: u32,
    pub team: Team,
    pub position: Position,
    pub velocity: Velocity,
    pub has_ball: bool,
    pub is_primary_controlled: bool,
    pub shoot_cooldown_remaining: f64,
}

/// The ball as seen by rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallView {
    pub position: Position,
    pub mode: BallMode,
    /// Id of the holding agent, if any.
    pub possessor: Option<u32>,
    /// Flight progress in [0, 1] while in flight.
    pub flight_progress: Option<f64>,
    /// Arc height above the baseline while in flight (for visual scaling).
    pub arc_height: Option<f64>,
}

/// Running score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub home: u32,
    pub away: u32,
}

/// Decision state of one autonomous side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerView {
    pub team: Team,
    pub state: AiState,
    pub pending_state: Option<AiState>,
    pub active_agent_id: u32,
}
