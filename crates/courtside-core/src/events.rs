//! Events emitted by the simulation for presentation and scorekeeping.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Fire-and-forget notifications drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    /// An agent gained the ball.
    PossessionChanged { agent_id: u32, team: Team },
    /// The ball left an agent's hands.
    Released {
        agent_id: u32,
        kind: ReleaseKind,
        target: Position,
    },
    /// A flight landed. Carries what the resolver needs to judge it.
    FlightComplete {
        agent_id: u32,
        kind: ReleaseKind,
        release_accuracy: f64,
        shoot_accuracy: f64,
    },
    /// A pass reached its receiver.
    PassCaught { from_agent_id: u32, to_agent_id: u32 },
    /// A shot went in.
    GoalScored {
        team: Team,
        agent_id: u32,
        points: u32,
    },
    /// A shot missed and the ball rebounded loose.
    ShotMissed { team: Team, agent_id: u32 },
    /// A defender knocked the ball away from its carrier.
    BallStolen {
        from_agent_id: u32,
        by_agent_id: u32,
    },
    /// The play was reset. `possession` is the team inbounding the ball,
    /// or none when the ball was left loose at the centre.
    PlayReset { possession: Option<Team> },
}
