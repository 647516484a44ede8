//! Entity spawn factories for setting up the match world.
//!
//! Creates the ball and the roster with their component bundles.

use hecs::{Entity, World};

use courtside_core::agent::Agent;
use courtside_core::ball::Ball;
use courtside_core::components::StartPosition;
use courtside_core::constants::BALL_MAX_SPEED;
use courtside_core::enums::Team;
use courtside_core::mover::Mover;
use courtside_core::types::Position;

use crate::config::{AgentSpec, MatchConfig};

/// Handles of everything spawned for a match.
#[derive(Debug, Clone, Copy)]
pub struct MatchEntities {
    pub ball: Entity,
    /// Agents per team, indexed by `Team::index`.
    pub teams: [[Entity; 2]; 2],
}

impl MatchEntities {
    pub fn team(&self, team: Team) -> [Entity; 2] {
        self.teams[team.index()]
    }

    /// Team that owns `agent`, if it is one of ours.
    pub fn team_of(&self, agent: Entity) -> Option<Team> {
        [Team::Home, Team::Away]
            .into_iter()
            .find(|team| self.team(*team).contains(&agent))
    }

    pub fn all_agents(&self) -> impl Iterator<Item = Entity> + '_ {
        self.teams.iter().flatten().copied()
    }
}

/// Spawn the ball at the court centre and every rostered agent.
/// Expects a validated config (two agents per team).
pub fn setup_match(world: &mut World, config: &MatchConfig) -> MatchEntities {
    let ball = spawn_ball(world, config.court.centre());

    let mut home = Vec::with_capacity(2);
    let mut away = Vec::with_capacity(2);
    for (id, spec) in config.roster.iter().enumerate() {
        let entity = spawn_agent(world, id as u32, spec);
        match spec.team {
            Team::Home => home.push(entity),
            Team::Away => away.push(entity),
        }
    }

    MatchEntities {
        ball,
        teams: [pair(&home), pair(&away)],
    }
}

/// Spawn the loose ball at rest.
pub fn spawn_ball(world: &mut World, position: Position) -> Entity {
    world.spawn((Mover::new(position, BALL_MAX_SPEED), Ball::new()))
}

/// Spawn one agent from its roster entry.
pub fn spawn_agent(world: &mut World, id: u32, spec: &AgentSpec) -> Entity {
    world.spawn((
        Mover::new(spec.start, spec.base_speed),
        Agent::new(id, spec.team, spec.base_speed, spec.shoot_accuracy),
        StartPosition(spec.start),
    ))
}

fn pair(agents: &[Entity]) -> [Entity; 2] {
    [agents[0], agents[1]]
}
