use serde::{Deserialize, Serialize};

use crate::core::definitions::Move;
use crate::core::error::{ChessError, Result};

/** Remembers only the latest accepted move. */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveHistory {
    latest: Option<Move>,
}

impl MoveHistory {
    pub fn record(&mut self, _move: Move) {
        self.latest = Some(_move);
    }

    pub fn latest(&self) -> Result<Move> {
        self.latest.ok_or(ChessError::NoMoveRecorded)
    }
}
