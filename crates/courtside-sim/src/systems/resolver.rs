//! Shot and pass resolution.
//!
//! Releases shots whose agents raised the one-tick intent, and judges
//! flights when they land: makes score, misses rebound, passes are caught
//! or left loose.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use courtside_core::agent::Agent;
use courtside_core::ball::{Ball, FlightComplete};
use courtside_core::components::ReleaseHint;
use courtside_core::constants::*;
use courtside_core::enums::{ReleaseKind, ShotOutcome, Team};
use courtside_core::events::MatchEvent;
use courtside_core::goal::Goal;
use courtside_core::mover::Mover;
use courtside_core::types::Position;

use crate::config::Goals;
use crate::score::ScoreState;
use crate::world_setup::MatchEntities;

use super::possession;

/// Consume every agent's shot intent, releasing the ball for the holder.
pub fn release_shots(
    world: &mut World,
    entities: &MatchEntities,
    goals: &Goals,
    events: &mut Vec<MatchEvent>,
) {
    let shooters: Vec<Entity> = entities
        .all_agents()
        .filter(|agent| {
            world
                .get::<&mut Agent>(*agent)
                .map(|mut a| a.take_shot_intent())
                .unwrap_or(false)
        })
        .collect();

    for shooter in shooters {
        let hint = world.remove_one::<ReleaseHint>(shooter).ok();
        release_shot(world, entities.ball, shooter, goals, hint, events);
    }
}

fn release_shot(
    world: &World,
    ball: Entity,
    shooter: Entity,
    goals: &Goals,
    hint: Option<ReleaseHint>,
    events: &mut Vec<MatchEvent>,
) -> bool {
    if possession::holder(world, ball) != Some(shooter) {
        return false;
    }
    let (Ok(mut ball_mover), Ok(mut ball_state), Ok(mut agent)) = (
        world.get::<&mut Mover>(ball),
        world.get::<&mut Ball>(ball),
        world.get::<&mut Agent>(shooter),
    ) else {
        return false;
    };

    let goal = goals.target_of(agent.team);
    let accuracy = match hint {
        Some(hint) => hint.accuracy,
        None => derived_release_accuracy(ball_mover.position.distance_to(&goal.aim_point())),
    };

    let released = ball_state.release_toward_target(&mut ball_mover, &mut agent, goal, accuracy);
    if released {
        events.push(MatchEvent::Released {
            agent_id: agent.id,
            kind: ReleaseKind::Shot,
            target: goal.aim_point(),
        });
    }
    released
}

/// Judge a landed flight. Returns the scoring team on a make.
pub fn resolve_flight(
    world: &World,
    entities: &MatchEntities,
    goals: &Goals,
    done: FlightComplete,
    rng: &mut ChaCha8Rng,
    score: &mut ScoreState,
    events: &mut Vec<MatchEvent>,
) -> Option<Team> {
    let releaser_id = agent_id(world, done.releaser)?;
    events.push(MatchEvent::FlightComplete {
        agent_id: releaser_id,
        kind: done.kind,
        release_accuracy: done.release_accuracy,
        shoot_accuracy: done.releaser_accuracy,
    });

    match done.kind {
        ReleaseKind::Shot => {
            let goal = goals.target_of(done.releaser_team);
            match judge_shot(goal, &done, rng) {
                ShotOutcome::Make => {
                    let points = shot_points(&done.origin, goal);
                    score.award(done.releaser_team, points);
                    info!(team = ?done.releaser_team, agent = releaser_id, points, "goal scored");
                    events.push(MatchEvent::GoalScored {
                        team: done.releaser_team,
                        agent_id: releaser_id,
                        points,
                    });
                    Some(done.releaser_team)
                }
                ShotOutcome::Miss => {
                    debug!(agent = releaser_id, "shot missed");
                    events.push(MatchEvent::ShotMissed {
                        team: done.releaser_team,
                        agent_id: releaser_id,
                    });
                    let (vx, vy) = rebound_velocity(goal, rng);
                    possession::knock_loose(world, entities.ball, vx, vy);
                    None
                }
            }
        }
        ReleaseKind::Pass => {
            catch_pass(world, entities, &done, releaser_id, events);
            None
        }
    }
}

fn catch_pass(
    world: &World,
    entities: &MatchEntities,
    done: &FlightComplete,
    releaser_id: u32,
    events: &mut Vec<MatchEvent>,
) {
    let Some(receiver) = done.receiver else {
        return;
    };
    let in_reach = world
        .get::<&Mover>(receiver)
        .map(|m| m.position.distance_to(&done.landing) <= CATCH_RADIUS)
        .unwrap_or(false);
    if !in_reach || !possession::attach(world, entities.ball, receiver, events) {
        debug!(from = releaser_id, "pass not caught, ball left loose");
        return;
    }
    if let Some(to_agent_id) = agent_id(world, receiver) {
        events.push(MatchEvent::PassCaught {
            from_agent_id: releaser_id,
            to_agent_id,
        });
    }
}

/// A shot scores only if it lands in the zone and wins the roll.
fn judge_shot(goal: &Goal, done: &FlightComplete, rng: &mut ChaCha8Rng) -> ShotOutcome {
    if !goal.scoring_zone().contains(&done.landing) {
        return ShotOutcome::Miss;
    }
    let chance = make_probability(done.release_accuracy, done.releaser_accuracy);
    if rng.gen_bool(chance) {
        ShotOutcome::Make
    } else {
        ShotOutcome::Miss
    }
}

/// Release accuracy for a shot without a caller-supplied value.
/// Full marks inside the close range, falling off linearly to a floor.
pub fn derived_release_accuracy(distance: f64) -> f64 {
    if distance < AI_CLOSE_SHOT_RANGE {
        return 1.0;
    }
    (1.0 - distance / MAX_SHOT_RANGE).clamp(MIN_RELEASE_ACCURACY, 1.0)
}

pub fn make_probability(release_accuracy: f64, shoot_accuracy: f64) -> f64 {
    let skill = shoot_accuracy.clamp(0.0, 1.0);
    let chance = release_accuracy * (MAKE_CHANCE_BASE + MAKE_CHANCE_SKILL_WEIGHT * skill);
    if chance.is_finite() {
        chance.clamp(0.0, MAKE_CHANCE_CAP)
    } else {
        0.0
    }
}

/// Points for a make released from `origin`.
pub fn shot_points(origin: &Position, goal: &Goal) -> u32 {
    if origin.distance_to(&goal.aim_point()) > LONG_RANGE_DISTANCE {
        POINTS_LONG_RANGE
    } else {
        POINTS_REGULAR
    }
}

/// Knock off the rim, back out toward the court.
fn rebound_velocity(goal: &Goal, rng: &mut ChaCha8Rng) -> (f64, f64) {
    let angle = rng.gen_range(-REBOUND_SPREAD_RADIANS..=REBOUND_SPREAD_RADIANS);
    let speed = rng.gen_range(REBOUND_SPEED_MIN..=REBOUND_SPEED_MAX);
    (goal.facing().sign() * angle.cos() * speed, angle.sin() * speed)
}

fn agent_id(world: &World, agent: Entity) -> Option<u32> {
    world.get::<&Agent>(agent).ok().map(|a| a.id)
}
