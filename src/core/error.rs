use thiserror::Error;

use crate::core::definitions::Team;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChessError {
    #[error("Square ({row}, {col}) is outside of the board")]
    OutOfBounds { row: u8, col: u8 },

    /// Raw relocation from an empty square
    #[error("Nothing to relocate from ({row}, {col})")]
    EmptySource { row: u8, col: u8 },

    #[error("No figure at ({row}, {col})")]
    NoFigureAtSource { row: u8, col: u8 },

    #[error("It is {current}'s turn, not {mover}'s")]
    WrongTurn { mover: Team, current: Team },

    #[error("Illegal move: from ({from_row}, {from_col}) to ({to_row}, {to_col})")]
    IllegalMove {
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
    },

    #[error("No move has been applied yet")]
    NoMoveRecorded,

    #[error("Unknown figure type code {0}")]
    InvalidFigure(u8),

    #[error("Unknown team code {0}")]
    InvalidTeam(u8),

    #[error("Unknown team `{0}`")]
    UnknownTeam(String),

    #[error("Can't parse square `{0}`")]
    InvalidSquare(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] postcard::Error),
}

pub type Result<T> = std::result::Result<T, ChessError>;
