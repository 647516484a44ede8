//! Autonomous opponent for COURTSIDE.
//!
//! Implements the steering primitive, difficulty profiles and the
//! chase/attack/defend controller that drives a two-agent team.

pub mod controller;
pub mod profiles;
pub mod steering;

pub use courtside_core as core;

#[cfg(test)]
mod tests;
