//! Ball possession and flight state machine.
//!
//! The ball's motion is a `Mover`; its mode decides who writes that mover:
//! - `Held`: pinned to the holder plus a carry offset, velocity zero.
//! - `InFlight`: placed along an arc from origin to target each update.
//! - `Loose`: free motion, integrated by the environment like any mover.
//!
//! Possession is only ever changed here. The agent's `has_ball` flag is set
//! and cleared by these transitions so it always mirrors the ball.

use std::f64::consts::PI;

use hecs::Entity;
use tracing::{debug, warn};

use crate::agent::Agent;
use crate::constants::*;
use crate::enums::{BallMode, ReleaseKind, Team};
use crate::goal::Goal;
use crate::mover::Mover;
use crate::types::Position;

/// Parameters of a ball in flight. Only exists while the mode is `InFlight`.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub kind: ReleaseKind,
    pub origin: Position,
    pub target: Position,
    pub elapsed: f64,
    pub duration: f64,
    pub peak_arc_height: f64,
    /// Carried through untouched for the shot resolver.
    pub release_accuracy: f64,
    pub releaser: Entity,
    pub releaser_team: Team,
    /// The releasing agent's `shoot_accuracy` stat.
    pub releaser_accuracy: f64,
    /// Intended receiver of a pass.
    pub receiver: Option<Entity>,
}

impl Flight {
    /// Fraction of the flight completed, in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }

    /// Height of the arc above the straight-line baseline.
    pub fn arc_offset(&self) -> f64 {
        (self.progress() * PI).sin() * self.peak_arc_height
    }

    /// Ball position at the current progress. The arc is drawn upward on
    /// screen, so the offset is subtracted from the baseline y.
    pub fn position(&self) -> Position {
        let p = self.progress();
        let base = self.origin.lerp(&self.target, p);
        Position::new(base.x, base.y - self.arc_offset())
    }
}

/// Emitted exactly once when a flight reaches its target.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightComplete {
    pub kind: ReleaseKind,
    pub origin: Position,
    pub landing: Position,
    pub release_accuracy: f64,
    pub releaser: Entity,
    pub releaser_team: Team,
    pub releaser_accuracy: f64,
    pub receiver: Option<Entity>,
}

/// The single ball of a match.
#[derive(Debug, Clone, Default)]
pub struct Ball {
    possessor: Option<Entity>,
    mode: BallMode,
    flight: Option<Flight>,
    last_possessor: Option<Entity>,
    regrab_lockout: f64,
}

impl Ball {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> BallMode {
        self.mode
    }

    pub fn possessor(&self) -> Option<Entity> {
        self.possessor
    }

    pub fn flight(&self) -> Option<&Flight> {
        self.flight.as_ref()
    }

    pub fn is_held(&self) -> bool {
        self.mode == BallMode::Held
    }

    /// Whether `agent` may take a loose ball right now.
    pub fn can_be_picked_up_by(&self, agent: Entity) -> bool {
        self.mode == BallMode::Loose
            && !(self.regrab_lockout > 0.0 && self.last_possessor == Some(agent))
    }

    /// Give the ball to `agent`. A no-op returning false when the ball is
    /// already held (the current possessor keeps it), in flight, or the agent
    /// already has a ball.
    pub fn attach_to(
        &mut self,
        mover: &mut Mover,
        entity: Entity,
        agent: &mut Agent,
        holder_position: Position,
    ) -> bool {
        if self.mode != BallMode::Loose || agent.has_ball() {
            return false;
        }
        self.possessor = Some(entity);
        self.mode = BallMode::Held;
        self.flight = None;
        self.regrab_lockout = 0.0;
        agent.pick_up_ball();
        mover.position = carry_position(holder_position);
        mover.stop();
        debug!(agent = agent.id, "ball attached");
        true
    }

    /// Shoot toward `goal`'s aim point. No-op returning false unless held.
    pub fn release_toward_target(
        &mut self,
        mover: &mut Mover,
        holder: &mut Agent,
        goal: &Goal,
        accuracy: f64,
    ) -> bool {
        let distance = mover.position.distance_to(&goal.aim_point());
        self.launch(
            mover,
            holder,
            goal.aim_point(),
            ReleaseKind::Shot,
            accuracy,
            FLIGHT_BASE_SECS + FLIGHT_SECS_PER_UNIT * distance,
            ARC_BASE_HEIGHT + ARC_HEIGHT_PER_UNIT * distance,
            None,
        )
    }

    /// Throw a low arc toward `target`, intended for `receiver`.
    pub fn pass_to(
        &mut self,
        mover: &mut Mover,
        holder: &mut Agent,
        receiver: Entity,
        target: Position,
    ) -> bool {
        let distance = mover.position.distance_to(&target);
        self.launch(
            mover,
            holder,
            target,
            ReleaseKind::Pass,
            1.0,
            PASS_BASE_SECS + PASS_SECS_PER_UNIT * distance,
            PASS_ARC_BASE_HEIGHT + PASS_ARC_HEIGHT_PER_UNIT * distance,
            Some(receiver),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn launch(
        &mut self,
        mover: &mut Mover,
        holder: &mut Agent,
        target: Position,
        kind: ReleaseKind,
        accuracy: f64,
        duration: f64,
        peak_arc_height: f64,
        receiver: Option<Entity>,
    ) -> bool {
        let releaser = match (self.mode, self.possessor) {
            (BallMode::Held, Some(entity)) => entity,
            _ => return false,
        };
        holder.drop_ball();
        self.flight = Some(Flight {
            kind,
            origin: mover.position,
            target,
            elapsed: 0.0,
            duration,
            peak_arc_height,
            release_accuracy: accuracy.clamp(0.0, 1.0),
            releaser,
            releaser_team: holder.team,
            releaser_accuracy: holder.shoot_accuracy,
            receiver,
        });
        self.possessor = None;
        self.last_possessor = Some(releaser);
        self.mode = BallMode::InFlight;
        mover.stop();
        debug!(agent = holder.id, ?kind, duration, "ball released");
        true
    }

    /// Knock the ball free with the given velocity.
    pub fn make_loose(&mut self, mover: &mut Mover, holder: Option<&mut Agent>, vx: f64, vy: f64) {
        if let Some(agent) = holder {
            agent.drop_ball();
        }
        if self.possessor.is_some() {
            self.last_possessor = self.possessor;
            self.regrab_lockout = REGRAB_LOCKOUT_SECS;
        }
        self.possessor = None;
        self.flight = None;
        self.mode = BallMode::Loose;
        mover.set_velocity(vx, vy);
    }

    /// Put the ball back on the court, loose and at rest, at `position`.
    pub fn reset(&mut self, mover: &mut Mover, holder: Option<&mut Agent>, position: Position) {
        if let Some(agent) = holder {
            agent.drop_ball();
        }
        *self = Ball::default();
        mover.position = position;
        mover.stop();
    }

    /// Advance the ball by `dt`. `holder_position` is the possessor's
    /// position when held. Returns the completion record on the update a
    /// flight lands, and never again for that flight.
    pub fn update(
        &mut self,
        mover: &mut Mover,
        holder_position: Option<Position>,
        dt: f64,
    ) -> Option<FlightComplete> {
        if self.regrab_lockout > 0.0 {
            self.regrab_lockout = (self.regrab_lockout - dt).max(0.0);
        }

        match self.mode {
            BallMode::Held => {
                match holder_position {
                    Some(pos) => {
                        mover.position = carry_position(pos);
                        mover.stop();
                    }
                    None => {
                        warn!("held ball lost its holder, dropping it");
                        self.possessor = None;
                        self.mode = BallMode::Loose;
                    }
                }
                None
            }
            BallMode::InFlight => self.advance_flight(mover, dt),
            BallMode::Loose => None,
        }
    }

    fn advance_flight(&mut self, mover: &mut Mover, dt: f64) -> Option<FlightComplete> {
        let flight = self.flight.as_mut()?;
        flight.elapsed += dt;
        mover.position = flight.position();
        mover.stop();

        if flight.progress() < 1.0 {
            return None;
        }

        let done = self.flight.take()?;
        self.mode = BallMode::Loose;
        // Land exactly on the target rather than a sin(pi) rounding error away.
        mover.position = done.target;
        Some(FlightComplete {
            kind: done.kind,
            origin: done.origin,
            landing: done.target,
            release_accuracy: done.release_accuracy,
            releaser: done.releaser,
            releaser_team: done.releaser_team,
            releaser_accuracy: done.releaser_accuracy,
            receiver: done.receiver,
        })
    }
}

fn carry_position(holder: Position) -> Position {
    holder.offset(CARRY_OFFSET_X, CARRY_OFFSET_Y)
}
