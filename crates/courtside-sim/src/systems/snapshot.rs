//! Snapshot system: queries the world and builds a complete MatchSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use courtside_core::agent::Agent;
use courtside_core::ball::Ball;
use courtside_core::events::MatchEvent;
use courtside_core::mover::Mover;
use courtside_core::state::*;
use courtside_core::types::SimTime;

use crate::score::ScoreState;
use crate::world_setup::MatchEntities;

use super::controllers::AiSeat;

/// Build a complete MatchSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    entities: &MatchEntities,
    time: &SimTime,
    seats: &[&AiSeat],
    score: &ScoreState,
    events: Vec<MatchEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        agents: build_agents(world),
        ball: build_ball(world, entities.ball),
        score: score.view(),
        controllers: seats.iter().map(|seat| seat.view(world, entities)).collect(),
        events,
    }
}

/// Agent views sorted by id.
fn build_agents(world: &World) -> Vec<AgentView> {
    let mut agents: Vec<AgentView> = world
        .query::<(&Agent, &Mover)>()
        .iter()
        .map(|(_, (agent, mover))| AgentView {
            id: agent.id,
            team: agent.team,
            position: mover.position,
            velocity: mover.velocity,
            has_ball: agent.has_ball(),
            is_primary_controlled: agent.is_primary_controlled,
            shoot_cooldown_remaining: agent.shoot_cooldown_remaining(),
        })
        .collect();
    agents.sort_by_key(|a| a.id);
    agents
}

fn build_ball(world: &World, ball: Entity) -> BallView {
    let (Ok(mover), Ok(state)) = (world.get::<&Mover>(ball), world.get::<&Ball>(ball)) else {
        return BallView::default();
    };
    let possessor = state
        .possessor()
        .and_then(|holder| world.get::<&Agent>(holder).ok().map(|a| a.id));

    BallView {
        position: mover.position,
        mode: state.mode(),
        possessor,
        flight_progress: state.flight().map(|f| f.progress()),
        arc_height: state.flight().map(|f| f.arc_offset()),
    }
}
