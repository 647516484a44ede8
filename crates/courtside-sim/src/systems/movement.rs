//! Kinematic integration system.
//!
//! Agents move freely and are clamped to the court. A loose ball rolls,
//! bounces off the court edges and slows down under friction. Held and
//! in-flight balls are positioned by the ball state machine instead.

use hecs::World;

use courtside_core::agent::Agent;
use courtside_core::ball::Ball;
use courtside_core::constants::*;
use courtside_core::enums::BallMode;
use courtside_core::mover::Mover;

use crate::config::CourtSpec;

pub fn run(world: &mut World, court: &CourtSpec, dt: f64) {
    for (_entity, (mover, _agent)) in world.query_mut::<(&mut Mover, &Agent)>() {
        mover.integrate(dt);
        court.clamp(&mut mover.position);
    }

    for (_entity, (mover, ball)) in world.query_mut::<(&mut Mover, &Ball)>() {
        if ball.mode() == BallMode::Loose {
            roll(mover, court, dt);
        }
    }
}

/// Free motion of a loose ball for one step.
pub fn roll(mover: &mut Mover, court: &CourtSpec, dt: f64) {
    if mover.velocity.is_zero() {
        return;
    }
    mover.integrate(dt);

    let mut vx = mover.velocity.x;
    let mut vy = mover.velocity.y;
    let p = &mut mover.position;
    if p.x < 0.0 || p.x > court.width {
        p.x = p.x.clamp(0.0, court.width);
        vx = -vx * BALL_RESTITUTION;
    }
    if p.y < 0.0 || p.y > court.height {
        p.y = p.y.clamp(0.0, court.height);
        vy = -vy * BALL_RESTITUTION;
    }

    let decay = BALL_FRICTION_PER_SEC.powf(dt);
    vx *= decay;
    vy *= decay;
    if vx.hypot(vy) < BALL_REST_SPEED {
        mover.stop();
    } else {
        mover.set_velocity(vx, vy);
    }
}
