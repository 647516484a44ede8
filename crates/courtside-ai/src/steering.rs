//! Steering: converts a desired target point into a velocity command.

use courtside_core::constants::ARRIVE_RADIUS;
use courtside_core::types::{Position, Velocity};

/// Velocity that moves `self_pos` toward `target` at `speed * speed_fraction`.
///
/// Returns zero once within `ARRIVE_RADIUS` of the target, which also covers
/// the zero-distance case that would otherwise divide by zero.
pub fn compute_steering_velocity(
    self_pos: Position,
    target: Position,
    speed: f64,
    speed_fraction: f64,
) -> Velocity {
    let delta = target.as_dvec2() - self_pos.as_dvec2();
    let distance = delta.length();
    if distance.is_nan() || distance < ARRIVE_RADIUS {
        return Velocity::ZERO;
    }
    (delta / distance * speed * speed_fraction).into()
}
