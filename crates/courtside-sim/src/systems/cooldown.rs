//! Agent timer decay.

use hecs::World;

use courtside_core::agent::Agent;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, agent) in world.query_mut::<&mut Agent>() {
        agent.update(dt);
    }
}
