//! Difficulty-specific tuning for the autonomous controller.
//!
//! Consolidates the timing and randomness parameters that make the
//! controller look human: reaction delay, decision cadence and slop.

use serde::{Deserialize, Serialize};

use courtside_core::constants::*;

/// Named difficulty presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Rookie,
    #[default]
    Pro,
    AllStar,
}

/// Tuning profile for one autonomous controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiProfile {
    /// Time a newly desired state must persist before it is committed (s).
    pub reaction_delay_secs: f64,
    /// Interval between pass-intent draws (s).
    pub decision_interval_secs: f64,
    /// Probability that a decision draw yields a pass intent.
    pub pass_chance: f64,
    /// Per-tick probability of a long shot inside `long_shot_range`.
    pub long_shot_chance: f64,
    /// Carrier stops and shoots inside this distance.
    pub close_shot_range: f64,
    /// Carrier may take a long shot inside this distance.
    pub long_shot_range: f64,
    /// Full width of the defensive positioning jitter.
    pub defensive_slop: f64,
}

impl Default for AiProfile {
    fn default() -> Self {
        get_profile(Difficulty::default())
    }
}

/// Get the tuning profile for a difficulty.
pub fn get_profile(difficulty: Difficulty) -> AiProfile {
    match difficulty {
        Difficulty::Rookie => AiProfile {
            reaction_delay_secs: AI_REACTION_DELAY_SECS * 1.75,
            decision_interval_secs: AI_DECISION_INTERVAL_SECS,
            pass_chance: AI_PASS_CHANCE * 0.5,
            long_shot_chance: AI_LONG_SHOT_CHANCE * 1.5,
            close_shot_range: AI_CLOSE_SHOT_RANGE,
            long_shot_range: AI_LONG_SHOT_RANGE,
            defensive_slop: AI_DEFENSIVE_SLOP * 2.0,
        },
        Difficulty::Pro => AiProfile {
            reaction_delay_secs: AI_REACTION_DELAY_SECS,
            decision_interval_secs: AI_DECISION_INTERVAL_SECS,
            pass_chance: AI_PASS_CHANCE,
            long_shot_chance: AI_LONG_SHOT_CHANCE,
            close_shot_range: AI_CLOSE_SHOT_RANGE,
            long_shot_range: AI_LONG_SHOT_RANGE,
            defensive_slop: AI_DEFENSIVE_SLOP,
        },
        Difficulty::AllStar => AiProfile {
            reaction_delay_secs: AI_REACTION_DELAY_SECS * 0.6,
            decision_interval_secs: AI_DECISION_INTERVAL_SECS * 0.8,
            pass_chance: AI_PASS_CHANCE * 1.25,
            long_shot_chance: AI_LONG_SHOT_CHANCE * 0.5,
            close_shot_range: AI_CLOSE_SHOT_RANGE,
            long_shot_range: AI_LONG_SHOT_RANGE,
            defensive_slop: AI_DEFENSIVE_SLOP * 0.5,
        },
    }
}
