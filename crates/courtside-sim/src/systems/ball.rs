//! Ball update system: carries a held ball and advances flights.

use hecs::{Entity, World};

use courtside_core::ball::{Ball, FlightComplete};
use courtside_core::mover::Mover;

use super::possession;

/// Advance the ball by `dt`. Returns the completion record on the tick a
/// flight lands.
pub fn run(world: &World, ball: Entity, dt: f64) -> Option<FlightComplete> {
    let holder_position = possession::holder(world, ball)
        .and_then(|holder| world.get::<&Mover>(holder).ok().map(|m| m.position));

    let mut mover = world.get::<&mut Mover>(ball).ok()?;
    let mut state = world.get::<&mut Ball>(ball).ok()?;
    state.update(&mut mover, holder_position, dt)
}
