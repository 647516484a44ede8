//! Match engine: the session that owns everything in play.
//!
//! `MatchEngine` owns the hecs ECS world, the goals, the seeded RNG and the
//! controllers. It applies queued player commands, runs all systems in a
//! fixed order and produces `MatchSnapshot`s. Fully headless, so equal
//! configs and command streams replay identically.

use std::collections::VecDeque;

use glam::DVec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use courtside_ai::controller::AutonomousController;
use courtside_ai::profiles::AiProfile;
use courtside_core::agent::Agent;
use courtside_core::ball::Ball;
use courtside_core::commands::PlayerCommand;
use courtside_core::components::{ReleaseHint, StartPosition};
use courtside_core::constants::DT;
use courtside_core::enums::Team;
use courtside_core::events::MatchEvent;
use courtside_core::mover::Mover;
use courtside_core::state::MatchSnapshot;
use courtside_core::types::SimTime;

use crate::config::{CourtSpec, Goals, MatchConfig};
use crate::error::ConfigError;
use crate::score::ScoreState;
use crate::systems;
use crate::systems::controllers::{AiSeat, SeatMode};
use crate::world_setup::{self, MatchEntities};

/// The match engine. Owns the ECS world and all session state.
pub struct MatchEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    court: CourtSpec,
    goals: Goals,
    entities: MatchEntities,
    human_team: Option<Team>,
    /// Steers the human team's non-primary agent.
    assist: Option<AiSeat>,
    seats: Vec<AiSeat>,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<MatchEvent>,
    score: ScoreState,
}

impl MatchEngine {
    /// Validate `config` and set up a match with the ball loose at centre.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let entities = world_setup::setup_match(&mut world, &config);
        let goals = config.build_goals();
        let profile = config.ai.profile();

        let (assist, seats) = match config.human_team {
            Some(human) => (
                Some(seat(&goals, profile, human, SeatMode::Assist)),
                vec![seat(&goals, profile, human.opponent(), SeatMode::Autonomous)],
            ),
            None => (
                None,
                vec![
                    seat(&goals, profile, Team::Home, SeatMode::Autonomous),
                    seat(&goals, profile, Team::Away, SeatMode::Autonomous),
                ],
            ),
        };

        let mut engine = Self {
            world,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            court: config.court,
            goals,
            entities,
            human_team: config.human_team,
            assist,
            seats,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            score: ScoreState::default(),
        };
        if let Some(human) = config.human_team {
            engine.set_primary(human, entities.team(human)[0]);
        }

        info!(seed = config.seed, human_team = ?config.human_team, "match created");
        Ok(engine)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the match by one fixed tick.
    pub fn tick(&mut self) -> MatchSnapshot {
        self.step(DT)
    }

    /// Advance the match by `dt` seconds and return the resulting snapshot.
    /// A non-finite or negative `dt` applies commands without advancing time.
    pub fn step(&mut self, dt: f64) -> MatchSnapshot {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.process_commands();
        self.run_systems(dt);
        self.time.advance(dt);

        let events = std::mem::take(&mut self.events);
        let seats: Vec<&AiSeat> = self.seats.iter().collect();
        systems::snapshot::build_snapshot(
            &self.world,
            &self.entities,
            &self.time,
            &seats,
            &self.score,
            events,
        )
    }

    /// Reset the ball to the centre and every agent to its start position.
    /// With `possession`, that team's first agent is handed the ball.
    pub fn reset_play(&mut self, possession: Option<Team>) {
        let ball = self.entities.ball;
        let holder = systems::possession::holder(&self.world, ball);
        let centre = self.court.centre();
        if let (Ok(mut mover), Ok(mut state)) = (
            self.world.get::<&mut Mover>(ball),
            self.world.get::<&mut Ball>(ball),
        ) {
            match holder.map(|h| self.world.get::<&mut Agent>(h)) {
                Some(Ok(mut agent)) => state.reset(&mut mover, Some(&mut agent), centre),
                _ => state.reset(&mut mover, None, centre),
            }
        }

        for (_entity, (mover, start)) in self.world.query_mut::<(&mut Mover, &StartPosition)>() {
            mover.position = start.0;
            mover.stop();
        }
        for seat in self.seats.iter_mut().chain(self.assist.iter_mut()) {
            seat.controller.reset();
        }

        if let Some(team) = possession {
            let inbounder = self.entities.team(team)[0];
            systems::possession::attach(&self.world, ball, inbounder, &mut self.events);
            if self.human_team == Some(team) {
                self.set_primary(team, inbounder);
            }
        }

        debug!(?possession, "play reset");
        self.events.push(MatchEvent::PlayReset { possession });
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn entities(&self) -> &MatchEntities {
        &self.entities
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    pub fn human_team(&self) -> Option<Team> {
        self.human_team
    }

    /// The human team's currently steered agent.
    pub fn primary_agent(&self) -> Option<Entity> {
        let team = self.human_team?;
        self.entities.team(team).into_iter().find(|agent| {
            self.world
                .get::<&Agent>(*agent)
                .map(|a| a.is_primary_controlled)
                .unwrap_or(false)
        })
    }

    /// Controllers driving whole teams.
    pub fn seats(&self) -> &[AiSeat] {
        &self.seats
    }

    /// Move an agent without going through the systems (for tests).
    #[cfg(test)]
    pub fn place_agent(&mut self, agent: Entity, position: courtside_core::types::Position) {
        if let Ok(mut mover) = self.world.get::<&mut Mover>(agent) {
            mover.position = position;
            mover.stop();
        }
    }

    /// Hand the ball to `agent` directly (for tests).
    #[cfg(test)]
    pub fn give_ball(&mut self, agent: Entity) -> bool {
        let ball = self.entities.ball;
        if let Some(holder) = systems::possession::holder(&self.world, ball) {
            if holder == agent {
                return true;
            }
            systems::possession::knock_loose(&self.world, ball, 0.0, 0.0);
        }
        let given = systems::possession::attach(&self.world, ball, agent, &mut self.events);
        self.auto_switch();
        given
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Commands other than `ResetPlay`
    /// need a human team and act on its primary agent.
    fn handle_command(&mut self, command: PlayerCommand) {
        if command == PlayerCommand::ResetPlay {
            self.reset_play(None);
            return;
        }
        let (Some(team), Some(primary)) = (self.human_team, self.primary_agent()) else {
            return;
        };

        match command {
            PlayerCommand::Move { dx, dy } => {
                let direction = DVec2::new(dx, dy);
                let direction = if direction.is_finite() {
                    direction.normalize_or_zero()
                } else {
                    DVec2::ZERO
                };
                let speed = self
                    .world
                    .get::<&Agent>(primary)
                    .map(|a| a.base_speed)
                    .unwrap_or(0.0);
                if let Ok(mut mover) = self.world.get::<&mut Mover>(primary) {
                    mover.set_velocity(direction.x * speed, direction.y * speed);
                }
            }
            PlayerCommand::Stop => {
                if let Ok(mut mover) = self.world.get::<&mut Mover>(primary) {
                    mover.stop();
                }
            }
            PlayerCommand::Shoot { accuracy } => {
                let accepted = self
                    .world
                    .get::<&mut Agent>(primary)
                    .map(|mut a| a.shoot())
                    .unwrap_or(false);
                if let Some(accuracy) = accuracy.filter(|a| accepted && a.is_finite()) {
                    let hint = ReleaseHint {
                        accuracy: accuracy.clamp(0.0, 1.0),
                    };
                    if self.world.insert_one(primary, hint).is_err() {
                        warn!("release hint dropped, primary agent is gone");
                    }
                }
            }
            PlayerCommand::Pass => {
                let teammate = self.teammate_of(team, primary);
                systems::possession::release_pass(
                    &self.world,
                    self.entities.ball,
                    primary,
                    teammate,
                    &mut self.events,
                );
            }
            PlayerCommand::SwitchPlayer => {
                let has_ball = self
                    .world
                    .get::<&Agent>(primary)
                    .map(|a| a.has_ball())
                    .unwrap_or(false);
                // The carrier stays under the human's control.
                if !has_ball {
                    let teammate = self.teammate_of(team, primary);
                    self.set_primary(team, teammate);
                }
            }
            PlayerCommand::ResetPlay => {}
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Movement integration
        systems::movement::run(&mut self.world, &self.court, dt);
        // 2. Ball carry / flight advancement
        let landed = systems::ball::run(&self.world, self.entities.ball, dt);
        // 3. Cooldown decay
        systems::cooldown::run(&mut self.world, dt);
        // 4. Controllers: the assist seat first, then the autonomous teams
        for seat in self.assist.iter_mut().chain(self.seats.iter_mut()) {
            systems::controllers::run(
                &self.world,
                &self.entities,
                seat,
                &mut self.rng,
                dt,
                &mut self.events,
            );
        }
        // 5. Flight resolution, then fresh shot releases
        let scored = landed.and_then(|done| {
            systems::resolver::resolve_flight(
                &self.world,
                &self.entities,
                &self.goals,
                done,
                &mut self.rng,
                &mut self.score,
                &mut self.events,
            )
        });
        systems::resolver::release_shots(
            &mut self.world,
            &self.entities,
            &self.goals,
            &mut self.events,
        );
        // 6. Play reset after a make: the conceding team inbounds
        if let Some(team) = scored {
            self.reset_play(Some(team.opponent()));
        }
        // 7. Steals, then loose-ball pickup
        systems::possession::steals(
            &self.world,
            &self.entities,
            &mut self.rng,
            dt,
            &mut self.events,
        );
        systems::possession::pickup(&self.world, &self.entities, &mut self.events);
        // 8. Human control follows the ball
        self.auto_switch();
    }

    /// Hand human control to whichever teammate holds the ball.
    fn auto_switch(&mut self) {
        let Some(team) = self.human_team else {
            return;
        };
        let Some(holder) = systems::possession::holder(&self.world, self.entities.ball) else {
            return;
        };
        if self.entities.team_of(holder) == Some(team) && self.primary_agent() != Some(holder) {
            self.set_primary(team, holder);
        }
    }

    fn set_primary(&mut self, team: Team, primary: Entity) {
        for agent in self.entities.team(team) {
            if let Ok(mut state) = self.world.get::<&mut Agent>(agent) {
                state.is_primary_controlled = agent == primary;
            }
        }
        if let Ok(mut mover) = self.world.get::<&mut Mover>(primary) {
            mover.stop();
        }
        debug!(?team, "primary agent switched");
    }

    fn teammate_of(&self, team: Team, agent: Entity) -> Entity {
        let [first, second] = self.entities.team(team);
        if agent == first {
            second
        } else {
            first
        }
    }
}

fn seat(goals: &Goals, profile: AiProfile, team: Team, mode: SeatMode) -> AiSeat {
    let controller = AutonomousController::new(*goals.target_of(team), profile)
        .with_defended_goal(*goals.defended_by(team));
    AiSeat {
        team,
        mode,
        controller,
    }
}
