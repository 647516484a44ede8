//! Goal geometry: aim point and circular scoring zone. No behaviour.

use serde::{Deserialize, Serialize};

use crate::constants::{GOAL_AIM_OFFSET, PAINT_DEPTH, SCORING_ZONE_RADIUS};
use crate::enums::Facing;
use crate::types::Position;

/// Static circle the ball's position is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringZone {
    pub center: Position,
    pub radius: f64,
}

impl ScoringZone {
    pub fn contains(&self, point: &Position) -> bool {
        self.center.distance_to(point) <= self.radius
    }
}

/// A goal (hoop). Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    position: Position,
    facing: Facing,
    aim_point: Position,
    scoring_zone: ScoringZone,
}

impl Goal {
    pub fn new(position: Position, facing: Facing) -> Self {
        let aim_point = position.offset(facing.sign() * GOAL_AIM_OFFSET, 0.0);
        Self {
            position,
            facing,
            aim_point,
            scoring_zone: ScoringZone {
                center: aim_point,
                radius: SCORING_ZONE_RADIUS,
            },
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Point shots and AI drives aim at.
    pub fn aim_point(&self) -> Position {
        self.aim_point
    }

    pub fn scoring_zone(&self) -> ScoringZone {
        self.scoring_zone
    }

    /// Guard spot in front of the goal, on the court side.
    pub fn paint_point(&self) -> Position {
        self.aim_point.offset(self.facing.sign() * PAINT_DEPTH, 0.0)
    }
}
