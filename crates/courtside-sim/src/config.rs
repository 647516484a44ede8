//! Match configuration: seed, court, roster, goals and AI tuning.
//!
//! Loaded from JSON or built in code; `validate` is run by the engine
//! before anything is spawned.

use serde::{Deserialize, Serialize};

use courtside_ai::profiles::{get_profile, AiProfile, Difficulty};
use courtside_core::constants::*;
use courtside_core::enums::{Facing, Team};
use courtside_core::goal::Goal;
use courtside_core::types::Position;

use crate::error::ConfigError;

/// Rectangular playing area with its origin in the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourtSpec {
    pub width: f64,
    pub height: f64,
}

impl Default for CourtSpec {
    fn default() -> Self {
        Self {
            width: COURT_WIDTH,
            height: COURT_HEIGHT,
        }
    }
}

impl CourtSpec {
    pub fn centre(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, p: &Position) -> bool {
        p.is_finite() && (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp a position onto the court.
    pub fn clamp(&self, p: &mut Position) {
        p.x = p.x.clamp(0.0, self.width);
        p.y = p.y.clamp(0.0, self.height);
    }
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub team: Team,
    pub base_speed: f64,
    pub shoot_accuracy: f64,
    pub start: Position,
}

/// Placement of one goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalSpec {
    pub position: Position,
    pub facing: Facing,
}

/// The two goals. Home attacks `right`, Away attacks `left`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalLayout {
    pub left: GoalSpec,
    pub right: GoalSpec,
}

/// Tuning for the autonomous side: a named preset or explicit numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AiTuning {
    Preset(Difficulty),
    Custom(AiProfile),
}

impl AiTuning {
    pub fn profile(&self) -> AiProfile {
        match *self {
            AiTuning::Preset(difficulty) => get_profile(difficulty),
            AiTuning::Custom(profile) => profile,
        }
    }
}

/// Configuration for starting a new match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// RNG seed for determinism. Same seed and commands = same match.
    pub seed: u64,
    /// Team driven by `PlayerCommand`s. `None` runs both sides autonomously.
    pub human_team: Option<Team>,
    pub court: CourtSpec,
    pub roster: Vec<AgentSpec>,
    pub goals: GoalLayout,
    pub ai: AiTuning,
}

impl Default for MatchConfig {
    fn default() -> Self {
        let court = CourtSpec::default();
        let mid_y = court.height / 2.0;
        let agent = |team, x: f64, y: f64| AgentSpec {
            team,
            base_speed: AGENT_BASE_SPEED,
            shoot_accuracy: AGENT_SHOOT_ACCURACY,
            start: Position::new(x, y),
        };

        Self {
            seed: 42,
            human_team: Some(Team::Home),
            court,
            roster: vec![
                agent(Team::Home, court.width * 0.35, mid_y - 120.0),
                agent(Team::Home, court.width * 0.35, mid_y + 120.0),
                agent(Team::Away, court.width * 0.65, mid_y - 120.0),
                agent(Team::Away, court.width * 0.65, mid_y + 120.0),
            ],
            goals: GoalLayout {
                left: GoalSpec {
                    position: Position::new(GOAL_INSET, mid_y),
                    facing: Facing::Right,
                },
                right: GoalSpec {
                    position: Position::new(court.width - GOAL_INSET, mid_y),
                    facing: Facing::Left,
                },
            },
            ai: AiTuning::Preset(Difficulty::default()),
        }
    }
}

impl MatchConfig {
    /// Parse and validate a config from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let court = &self.court;
        if !(court.width.is_finite() && court.height.is_finite())
            || court.width <= 0.0
            || court.height <= 0.0
        {
            return Err(ConfigError::InvalidCourt {
                width: court.width,
                height: court.height,
            });
        }

        for team in [Team::Home, Team::Away] {
            let found = self.roster.iter().filter(|a| a.team == team).count();
            if found != 2 {
                return Err(ConfigError::RosterSize { team, found });
            }
        }

        for (index, agent) in self.roster.iter().enumerate() {
            if !agent.base_speed.is_finite() || agent.base_speed <= 0.0 {
                return Err(ConfigError::InvalidSpeed {
                    index,
                    value: agent.base_speed,
                });
            }
            if !(0.0..=1.0).contains(&agent.shoot_accuracy) {
                return Err(ConfigError::InvalidAccuracy {
                    index,
                    value: agent.shoot_accuracy,
                });
            }
            if !court.contains(&agent.start) {
                return Err(ConfigError::StartOutOfBounds {
                    index,
                    x: agent.start.x,
                    y: agent.start.y,
                });
            }
        }

        let left = &self.goals.left;
        if left.facing != Facing::Right || !court.contains(&left.position) {
            return Err(ConfigError::InvalidGoal { side: "left" });
        }
        let right = &self.goals.right;
        if right.facing != Facing::Left
            || !court.contains(&right.position)
            || right.position.x <= left.position.x
        {
            return Err(ConfigError::InvalidGoal { side: "right" });
        }

        validate_profile(&self.ai.profile())
    }

    /// Build the immutable goals.
    pub fn build_goals(&self) -> Goals {
        Goals {
            left: Goal::new(self.goals.left.position, self.goals.left.facing),
            right: Goal::new(self.goals.right.position, self.goals.right.facing),
        }
    }
}

/// Probabilities must lie in [0, 1]; timings, ranges and slop must be
/// finite and non-negative.
fn validate_profile(profile: &AiProfile) -> Result<(), ConfigError> {
    let probabilities = [
        ("pass_chance", profile.pass_chance),
        ("long_shot_chance", profile.long_shot_chance),
    ];
    for (field, value) in probabilities {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidAiProfile { field, value });
        }
    }

    let non_negative = [
        ("reaction_delay_secs", profile.reaction_delay_secs),
        ("decision_interval_secs", profile.decision_interval_secs),
        ("close_shot_range", profile.close_shot_range),
        ("long_shot_range", profile.long_shot_range),
        ("defensive_slop", profile.defensive_slop),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidAiProfile { field, value });
        }
    }
    Ok(())
}

/// The match's goals, addressed by the team that attacks or defends them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Goals {
    pub left: Goal,
    pub right: Goal,
}

impl Goals {
    /// Goal `team` shoots at.
    pub fn target_of(&self, team: Team) -> &Goal {
        match team {
            Team::Home => &self.right,
            Team::Away => &self.left,
        }
    }

    /// Goal `team` protects.
    pub fn defended_by(&self, team: Team) -> &Goal {
        self.target_of(team.opponent())
    }
}
