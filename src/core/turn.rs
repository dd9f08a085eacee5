use serde::{Deserialize, Serialize};

use crate::core::definitions::Team;

/** Whose move it is. White starts. */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnController {
    current: Team,
}

impl TurnController {
    pub fn get(&self) -> Team {
        self.current
    }

    /** Override for setup and tests, rule-checked play only uses `advance`. */
    pub fn set(&mut self, team: Team) {
        self.current = team;
    }

    pub fn advance(&mut self) -> Team {
        self.current = !self.current;
        self.current
    }
}
