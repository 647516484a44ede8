//! Possession system: loose-ball pickup, steals, and the world-level
//! wrappers around the ball's attach / pass / knock-loose transitions.
//!
//! The ball and the agents live in different archetypes, so the ball's
//! components and one agent's components can be borrowed together.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use courtside_core::agent::Agent;
use courtside_core::ball::Ball;
use courtside_core::constants::*;
use courtside_core::events::MatchEvent;
use courtside_core::mover::Mover;

use crate::world_setup::MatchEntities;

/// Current holder of the ball, if any.
pub fn holder(world: &World, ball: Entity) -> Option<Entity> {
    world.get::<&Ball>(ball).ok()?.possessor()
}

/// Attach the ball to `agent`. Returns false when the ball refuses
/// (already held, in flight) or either entity is missing.
pub fn attach(world: &World, ball: Entity, agent: Entity, events: &mut Vec<MatchEvent>) -> bool {
    let (Ok(mut ball_mover), Ok(mut ball_state)) =
        (world.get::<&mut Mover>(ball), world.get::<&mut Ball>(ball))
    else {
        return false;
    };
    let (Ok(agent_mover), Ok(mut agent_state)) =
        (world.get::<&Mover>(agent), world.get::<&mut Agent>(agent))
    else {
        return false;
    };

    let attached = ball_state.attach_to(
        &mut ball_mover,
        agent,
        &mut agent_state,
        agent_mover.position,
    );
    if attached {
        events.push(MatchEvent::PossessionChanged {
            agent_id: agent_state.id,
            team: agent_state.team,
        });
    }
    attached
}

/// Throw a pass from the current holder `from` to `to`.
pub fn release_pass(
    world: &World,
    ball: Entity,
    from: Entity,
    to: Entity,
    events: &mut Vec<MatchEvent>,
) -> bool {
    if from == to || holder(world, ball) != Some(from) {
        return false;
    }
    let Ok(target) = world.get::<&Mover>(to).map(|m| m.position) else {
        return false;
    };
    let (Ok(mut ball_mover), Ok(mut ball_state), Ok(mut passer)) = (
        world.get::<&mut Mover>(ball),
        world.get::<&mut Ball>(ball),
        world.get::<&mut Agent>(from),
    ) else {
        return false;
    };

    let released = ball_state.pass_to(&mut ball_mover, &mut passer, to, target);
    if released {
        events.push(MatchEvent::Released {
            agent_id: passer.id,
            kind: courtside_core::enums::ReleaseKind::Pass,
            target,
        });
    }
    released
}

/// Knock the ball free from whoever holds it.
pub fn knock_loose(world: &World, ball: Entity, vx: f64, vy: f64) {
    let current = holder(world, ball);
    let (Ok(mut ball_mover), Ok(mut ball_state)) =
        (world.get::<&mut Mover>(ball), world.get::<&mut Ball>(ball))
    else {
        return;
    };
    match current.map(|h| world.get::<&mut Agent>(h)) {
        Some(Ok(mut agent)) => ball_state.make_loose(&mut ball_mover, Some(&mut agent), vx, vy),
        _ => ball_state.make_loose(&mut ball_mover, None, vx, vy),
    }
}

/// Give a loose ball to the nearest eligible agent within pickup range.
/// Returns the new holder.
pub fn pickup(
    world: &World,
    entities: &MatchEntities,
    events: &mut Vec<MatchEvent>,
) -> Option<Entity> {
    let (ball_position, candidates) = {
        let ball_state = world.get::<&Ball>(entities.ball).ok()?;
        let ball_position = world.get::<&Mover>(entities.ball).ok()?.position;
        let candidates: Vec<(Entity, f64)> = entities
            .all_agents()
            .filter(|agent| ball_state.can_be_picked_up_by(*agent))
            .filter_map(|agent| {
                let mover = world.get::<&Mover>(agent).ok()?;
                Some((agent, mover.position.distance_to(&ball_position)))
            })
            .filter(|(_, distance)| *distance <= PICKUP_RADIUS)
            .collect();
        (ball_position, candidates)
    };

    let (nearest, _) = candidates.into_iter().min_by(|a, b| a.1.total_cmp(&b.1))?;

    if attach(world, entities.ball, nearest, events) {
        debug!(x = ball_position.x, y = ball_position.y, "loose ball picked up");
        Some(nearest)
    } else {
        None
    }
}

/// Defenders in contact with the carrier may knock the ball loose.
/// The roll is scaled by `dt` so the rate is per second, not per tick.
pub fn steals(
    world: &World,
    entities: &MatchEntities,
    rng: &mut ChaCha8Rng,
    dt: f64,
    events: &mut Vec<MatchEvent>,
) {
    let Some(carrier) = holder(world, entities.ball) else {
        return;
    };
    let Some(carrier_team) = entities.team_of(carrier) else {
        return;
    };
    let (carrier_id, carrier_pos) =
        match (world.get::<&Agent>(carrier), world.get::<&Mover>(carrier)) {
            (Ok(agent), Ok(mover)) => (agent.id, mover.position),
            _ => return,
        };

    let chance = (STEAL_CHANCE_PER_SEC * dt).clamp(0.0, 1.0);
    for defender in entities.team(carrier_team.opponent()) {
        let (defender_id, defender_pos) =
            match (world.get::<&Agent>(defender), world.get::<&Mover>(defender)) {
                (Ok(agent), Ok(mover)) => (agent.id, mover.position),
                _ => continue,
            };
        if carrier_pos.distance_to(&defender_pos) > STEAL_RADIUS || !rng.gen_bool(chance) {
            continue;
        }

        // Knock the ball toward the defender.
        let dir = (defender_pos.as_dvec2() - carrier_pos.as_dvec2()).normalize_or_zero();
        let knock = dir * STEAL_KNOCK_SPEED;
        knock_loose(world, entities.ball, knock.x, knock.y);
        debug!(from = carrier_id, by = defender_id, "ball stolen");
        events.push(MatchEvent::BallStolen {
            from_agent_id: carrier_id,
            by_agent_id: defender_id,
        });
        return;
    }
}
