//! Autonomous controller system.
//!
//! Reads each seat's agents out of the world into a `CourtContext`, runs the
//! controller, and applies the returned velocities and actions.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use courtside_ai::controller::{AgentAction, AgentView, AutonomousController, CourtContext};
use courtside_core::agent::Agent;
use courtside_core::enums::Team;
use courtside_core::events::MatchEvent;
use courtside_core::mover::Mover;
use courtside_core::state::ControllerView;

use crate::world_setup::MatchEntities;

use super::possession;

/// How much of a team the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatMode {
    /// Both agents, including shots and passes.
    Autonomous,
    /// Only the agent the human is not steering. Actions are dropped.
    Assist,
}

/// A controller bound to one team.
#[derive(Debug, Clone)]
pub struct AiSeat {
    pub team: Team,
    pub mode: SeatMode,
    pub controller: AutonomousController,
}

impl AiSeat {
    pub fn view(&self, world: &World, entities: &MatchEntities) -> ControllerView {
        let active = entities.team(self.team)[self.controller.active_index()];
        ControllerView {
            team: self.team,
            state: self.controller.state(),
            pending_state: self.controller.pending_state(),
            active_agent_id: world.get::<&Agent>(active).map(|a| a.id).unwrap_or_default(),
        }
    }
}

/// Run one decision cycle for `seat` and apply it.
pub fn run(
    world: &World,
    entities: &MatchEntities,
    seat: &mut AiSeat,
    rng: &mut ChaCha8Rng,
    dt: f64,
    events: &mut Vec<MatchEvent>,
) {
    let controlled = entities.team(seat.team);
    let Some(ctx) = build_context(world, entities, seat.team) else {
        return;
    };
    let output = seat.controller.update(&ctx, dt, rng);

    for (index, command) in output.commands.iter().enumerate() {
        let agent = controlled[index];
        if seat.mode == SeatMode::Assist && is_primary(world, agent) {
            continue;
        }
        if let Ok(mut mover) = world.get::<&mut Mover>(agent) {
            mover.set_velocity(command.velocity.x, command.velocity.y);
        }
        if seat.mode == SeatMode::Autonomous {
            if let Some(action) = command.action {
                apply_action(world, entities.ball, &controlled, agent, action, events);
            }
        }
    }
}

fn apply_action(
    world: &World,
    ball: Entity,
    controlled: &[Entity; 2],
    agent: Entity,
    action: AgentAction,
    events: &mut Vec<MatchEvent>,
) {
    match action {
        AgentAction::Shoot => {
            if let Ok(mut state) = world.get::<&mut Agent>(agent) {
                state.shoot();
            }
        }
        AgentAction::Pass { to } => {
            if let Some(receiver) = controlled.get(to) {
                possession::release_pass(world, ball, agent, *receiver, events);
            }
        }
    }
}

/// Plain-data view of the court from `team`'s side.
pub fn build_context(world: &World, entities: &MatchEntities, team: Team) -> Option<CourtContext> {
    let [first, second] = entities.team(team);
    let controlled = [agent_view(world, first)?, agent_view(world, second)?];
    let opponents = entities
        .team(team.opponent())
        .iter()
        .filter_map(|agent| agent_view(world, *agent))
        .collect();
    let ball_position = world.get::<&Mover>(entities.ball).ok()?.position;

    Some(CourtContext {
        controlled,
        opponents,
        ball_position,
    })
}

fn agent_view(world: &World, agent: Entity) -> Option<AgentView> {
    let mover = world.get::<&Mover>(agent).ok()?;
    let state = world.get::<&Agent>(agent).ok()?;
    Some(AgentView {
        position: mover.position,
        base_speed: state.base_speed,
        has_ball: state.has_ball(),
    })
}

fn is_primary(world: &World, agent: Entity) -> bool {
    world
        .get::<&Agent>(agent)
        .map(|a| a.is_primary_controlled)
        .unwrap_or(false)
}
