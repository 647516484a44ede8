//! Running score for a match.

use courtside_core::enums::Team;
use courtside_core::state::ScoreView;

/// Points per team, indexed by `Team::index`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreState {
    points: [u32; 2],
}

impl ScoreState {
    pub fn award(&mut self, team: Team, points: u32) {
        self.points[team.index()] += points;
    }

    pub fn points(&self, team: Team) -> u32 {
        self.points[team.index()]
    }

    pub fn view(&self) -> ScoreView {
        ScoreView {
            home: self.points(Team::Home),
            away: self.points(Team::Away),
        }
    }
}
