//! ECS systems that operate on the match world each tick.
//!
//! Systems are free functions over the `World` plus whatever session state
//! they need passed in explicitly. The engine calls them in a fixed order.

pub mod ball;
pub mod controllers;
pub mod cooldown;
pub mod movement;
pub mod possession;
pub mod resolver;
pub mod snapshot;
