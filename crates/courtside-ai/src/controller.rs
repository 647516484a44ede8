//! Autonomous team controller.
//!
//! A finite state machine over `ChaseBall`, `Attack` and `Defend`. Each
//! update it reads a plain-data view of the court, debounces state changes
//! by a reaction delay, and returns a velocity plus an optional discrete
//! action for each of its two agents. No ECS dependency; the caller maps
//! indices back to entities and applies the output.
//!
//! All timers run on the simulated `dt` passed to `update`.

use glam::DVec2;
use rand::Rng;
use tracing::debug;

use courtside_core::constants::*;
use courtside_core::enums::AiState;
use courtside_core::goal::Goal;
use courtside_core::types::{Position, Velocity};

use crate::profiles::AiProfile;
use crate::steering::compute_steering_velocity;

/// One agent as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub position: Position,
    pub base_speed: f64,
    pub has_ball: bool,
}

/// Input to the controller for a single update.
#[derive(Debug, Clone, PartialEq)]
pub struct CourtContext {
    /// The two agents this controller drives.
    pub controlled: [AgentView; 2],
    /// The opposing agents. Usually two, but any may be missing.
    pub opponents: Vec<AgentView>,
    pub ball_position: Position,
}

/// Discrete action requested for an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentAction {
    Shoot,
    /// Pass to the controlled agent at this index.
    Pass { to: usize },
}

/// Output for one agent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AgentCommand {
    pub velocity: Velocity,
    pub action: Option<AgentAction>,
}

/// Output from the controller for one update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControllerOutput {
    pub commands: [AgentCommand; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingState {
    state: AiState,
    since_secs: f64,
}

/// Decision engine for one autonomous team.
#[derive(Debug, Clone)]
pub struct AutonomousController {
    target_goal: Goal,
    defended_goal: Option<Goal>,
    profile: AiProfile,
    state: AiState,
    pending: Option<PendingState>,
    active_index: usize,
    clock_secs: f64,
    last_decision_secs: f64,
    pass_intent: bool,
    open_spot_jitter: DVec2,
    defensive_jitter: [DVec2; 2],
}

impl AutonomousController {
    /// Create a controller attacking `target_goal`.
    pub fn new(target_goal: Goal, profile: AiProfile) -> Self {
        Self {
            target_goal,
            defended_goal: None,
            profile,
            state: AiState::default(),
            pending: None,
            active_index: 0,
            clock_secs: 0.0,
            last_decision_secs: 0.0,
            pass_intent: false,
            open_spot_jitter: DVec2::ZERO,
            defensive_jitter: [DVec2::ZERO; 2],
        }
    }

    /// Anchor defensive positioning on the goal this team protects. Without
    /// it, the primary defender's lane and the secondary's mark are measured
    /// toward the target goal.
    pub fn with_defended_goal(mut self, goal: Goal) -> Self {
        self.defended_goal = Some(goal);
        self
    }

    pub fn state(&self) -> AiState {
        self.state
    }

    pub fn pending_state(&self) -> Option<AiState> {
        self.pending.map(|p| p.state)
    }

    /// Index of the agent currently featured by the controller.
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn pass_intent(&self) -> bool {
        self.pass_intent
    }

    pub fn target_goal(&self) -> &Goal {
        &self.target_goal
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    /// Run one decision cycle.
    pub fn update<R: Rng>(
        &mut self,
        ctx: &CourtContext,
        dt: f64,
        rng: &mut R,
    ) -> ControllerOutput {
        self.clock_secs += dt;
        self.update_state(ctx);

        if self.clock_secs - self.last_decision_secs >= self.profile.decision_interval_secs {
            self.last_decision_secs = self.clock_secs;
            self.redraw(rng);
        }

        match self.state {
            AiState::ChaseBall => self.chase_ball(ctx),
            AiState::Attack => self.attack(ctx, rng),
            AiState::Defend => self.defend(ctx),
        }
    }

    /// Forget any in-progress reaction and return to chasing.
    pub fn reset(&mut self) {
        self.state = AiState::ChaseBall;
        self.pending = None;
        self.pass_intent = false;
    }

    /// Debounce: a differing desired state is latched and only committed
    /// once it has persisted for the reaction delay.
    fn update_state(&mut self, ctx: &CourtContext) {
        let desired = desired_state(ctx);
        if desired == self.state {
            self.pending = None;
            return;
        }

        let since = match self.pending {
            Some(pending) if pending.state == desired => pending.since_secs,
            _ => {
                self.pending = Some(PendingState {
                    state: desired,
                    since_secs: self.clock_secs,
                });
                self.clock_secs
            }
        };

        if self.clock_secs - since >= self.profile.reaction_delay_secs {
            debug!(from = ?self.state, to = ?desired, "controller state committed");
            self.state = desired;
            self.pending = None;
        }
    }

    /// Fresh pass intent plus new positioning slop.
    fn redraw<R: Rng>(&mut self, rng: &mut R) {
        self.pass_intent = rng.gen_bool(self.profile.pass_chance.clamp(0.0, 1.0));
        self.open_spot_jitter = DVec2::new(
            rng.gen_range(-AI_OPEN_SPOT_JITTER_X..=AI_OPEN_SPOT_JITTER_X),
            rng.gen_range(-AI_OPEN_SPOT_JITTER_UP..=AI_OPEN_SPOT_JITTER_DOWN),
        );
        let half = (self.profile.defensive_slop / 2.0).max(0.0);
        for jitter in &mut self.defensive_jitter {
            *jitter = DVec2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half));
        }
    }

    /// Closer agent goes straight at the ball; the other flanks it.
    pub(crate) fn chase_ball(&mut self, ctx: &CourtContext) -> ControllerOutput {
        let ball = ctx.ball_position;
        let chaser = nearer_of(&ctx.controlled, &ball);
        let support = 1 - chaser;
        self.active_index = chaser;

        let flank = &ctx.controlled[support];
        let side = if flank.position.y < ball.y { -1.0 } else { 1.0 };
        let flank_target = ball.offset(0.0, side * AI_PINCER_OFFSET);

        let mut output = ControllerOutput::default();
        output.commands[chaser].velocity = steer(&ctx.controlled[chaser], ball, AI_CHASE_SPEED);
        output.commands[support].velocity = steer(flank, flank_target, AI_SUPPORT_SPEED);
        output
    }

    /// Carrier shoots, passes or drives; the teammate finds an open spot.
    pub(crate) fn attack<R: Rng>(&mut self, ctx: &CourtContext, rng: &mut R) -> ControllerOutput {
        let Some(carrier) = ctx.controlled.iter().position(|a| a.has_ball) else {
            return self.chase_ball(ctx);
        };
        let teammate = 1 - carrier;
        self.active_index = carrier;

        let carrier_view = &ctx.controlled[carrier];
        let aim = self.target_goal.aim_point();
        let distance = carrier_view.position.distance_to(&aim);
        let drive = steer(carrier_view, aim, AI_DRIVE_SPEED);

        let carrier_command = if distance < self.profile.close_shot_range {
            AgentCommand {
                velocity: Velocity::ZERO,
                action: Some(AgentAction::Shoot),
            }
        } else if distance < self.profile.long_shot_range
            && rng.gen_bool(self.profile.long_shot_chance.clamp(0.0, 1.0))
        {
            AgentCommand {
                velocity: drive,
                action: Some(AgentAction::Shoot),
            }
        } else if self.pass_intent && distance > self.profile.close_shot_range {
            self.pass_intent = false;
            AgentCommand {
                velocity: drive,
                action: Some(AgentAction::Pass { to: teammate }),
            }
        } else {
            AgentCommand {
                velocity: drive,
                action: None,
            }
        };

        let open_spot = self.open_spot(carrier_view.position);
        let mut output = ControllerOutput::default();
        output.commands[carrier] = carrier_command;
        output.commands[teammate].velocity =
            steer(&ctx.controlled[teammate], open_spot, AI_SUPPORT_SPEED);
        output
    }

    /// Primary defender cuts the driving lane; the secondary marks the other
    /// opponent or guards the paint.
    pub(crate) fn defend(&mut self, ctx: &CourtContext) -> ControllerOutput {
        let Some(carrier_index) = ctx.opponents.iter().position(|a| a.has_ball) else {
            return self.chase_ball(ctx);
        };
        let carrier = ctx.opponents[carrier_index].position;
        let anchor = self.defended_goal.unwrap_or(self.target_goal);
        let anchor_point = anchor.aim_point();

        let primary = nearer_of(&ctx.controlled, &carrier);
        let secondary = 1 - primary;
        self.active_index = primary;

        let lane = jittered(
            carrier.lerp(&anchor_point, AI_DEFENSE_LANE_FRACTION),
            self.defensive_jitter[primary],
        );

        let mut output = ControllerOutput::default();
        output.commands[primary].velocity =
            steer(&ctx.controlled[primary], lane, AI_PRIMARY_DEFENSE_SPEED);

        let off_ball = ctx
            .opponents
            .iter()
            .enumerate()
            .find(|(i, _)| *i != carrier_index)
            .map(|(_, view)| view.position);

        output.commands[secondary].velocity = match off_ball {
            Some(mark) => {
                let midpoint = mark.lerp(&anchor_point, 0.5);
                let target = jittered(midpoint, self.defensive_jitter[secondary]);
                steer(&ctx.controlled[secondary], target, AI_SECONDARY_DEFENSE_SPEED)
            }
            None => steer(&ctx.controlled[secondary], anchor.paint_point(), AI_PAINT_SPEED),
        };
        output
    }

    /// Off-ball spot near the target goal, pushed away from the carrier's side.
    pub(crate) fn open_spot(&self, carrier: Position) -> Position {
        let aim = self.target_goal.aim_point();
        let spread = if carrier.y < aim.y {
            AI_OPEN_SPOT_SPREAD
        } else {
            -AI_OPEN_SPOT_SPREAD
        };
        jittered(aim, self.open_spot_jitter + DVec2::new(0.0, spread))
    }
}

/// State the world currently calls for, before debouncing.
pub fn desired_state(ctx: &CourtContext) -> AiState {
    if ctx.controlled.iter().any(|a| a.has_ball) {
        AiState::Attack
    } else if ctx.opponents.iter().any(|a| a.has_ball) {
        AiState::Defend
    } else {
        AiState::ChaseBall
    }
}

/// Index (0 or 1) of the controlled agent nearer `point`. Ties go to 0.
fn nearer_of(agents: &[AgentView; 2], point: &Position) -> usize {
    if agents[1].position.distance_to(point) < agents[0].position.distance_to(point) {
        1
    } else {
        0
    }
}

fn steer(agent: &AgentView, target: Position, fraction: f64) -> Velocity {
    compute_steering_velocity(agent.position, target, agent.base_speed, fraction)
}

fn jittered(point: Position, jitter: DVec2) -> Position {
    (point.as_dvec2() + jitter).into()
}
