//! Core types and entity models for the COURTSIDE 2-vs-2 simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! movers, the ball state machine, agents, goals, commands, events,
//! snapshots and constants. It has no rendering or input dependency.

pub mod agent;
pub mod ball;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod goal;
pub mod mover;
pub mod state;
pub mod types;
