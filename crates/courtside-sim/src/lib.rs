//! Match session for COURTSIDE.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate, resolves
//! shots and passes, keeps score and produces MatchSnapshots for the
//! presentation layer.

pub mod config;
pub mod engine;
pub mod error;
pub mod score;
pub mod systems;
pub mod world_setup;

pub use courtside_core as core;
pub use engine::MatchEngine;
