//! Configuration errors.

use thiserror::Error;

use courtside_core::enums::Team;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("team {team:?} needs exactly 2 agents, found {found}")]
    RosterSize { team: Team, found: usize },

    #[error("agent {index}: base speed must be finite and positive, got {value}")]
    InvalidSpeed { index: usize, value: f64 },

    #[error("agent {index}: shoot accuracy must be within [0, 1], got {value}")]
    InvalidAccuracy { index: usize, value: f64 },

    #[error("agent {index}: start position ({x}, {y}) is outside the court")]
    StartOutOfBounds { index: usize, x: f64, y: f64 },

    #[error("court dimensions must be finite and positive, got {width} x {height}")]
    InvalidCourt { width: f64, height: f64 },

    #[error("{side} goal must sit inside the court and face its centre")]
    InvalidGoal { side: &'static str },

    #[error("AI profile field `{field}` is out of range, got {value}")]
    InvalidAiProfile { field: &'static str, value: f64 },

    #[error("invalid config JSON: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
