use std::fmt::Display;
use std::ops::Not;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{ChessError, Result};
use crate::core::utils::{compact_pos, is_valid_coord, unpack_pos};

pub const BOARD_SIZE: u8 = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub enum Team {
    #[default]
    White = 0,
    Black = 1,
}

impl Team {
    /** Row delta a pawn of this team moves by. */
    pub fn forward(self) -> i8 {
        match self {
            Team::White => 1,
            Team::Black => -1,
        }
    }

    pub fn pawn_row(self) -> u8 {
        match self {
            Team::White => 1,
            Team::Black => BOARD_SIZE - 2,
        }
    }
}

impl Not for Team {
    type Output = Team;

    fn not(self) -> Self::Output {
        match self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }
}

impl TryFrom<u8> for Team {
    type Error = ChessError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Team::White),
            1 => Ok(Team::Black),
            other => Err(ChessError::InvalidTeam(other)),
        }
    }
}

impl FromStr for Team {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Team::White),
            "black" | "b" => Ok(Team::Black),
            _ => Err(ChessError::UnknownTeam(s.to_string())),
        }
    }
}

impl Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Team::White => "White",
            Team::Black => "Black",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub enum FigureType {
    Pawn = 0,
    King = 1,
    Queen = 2,
    Knight = 3,
    Rook = 4,
    Bishop = 5,
}

impl FigureType {
    pub const ALL: [FigureType; 6] = [
        FigureType::Pawn,
        FigureType::King,
        FigureType::Queen,
        FigureType::Knight,
        FigureType::Rook,
        FigureType::Bishop,
    ];

    pub fn letter(self) -> char {
        match self {
            FigureType::Pawn => 'p',
            FigureType::King => 'k',
            FigureType::Queen => 'q',
            FigureType::Knight => 'n',
            FigureType::Rook => 'r',
            FigureType::Bishop => 'b',
        }
    }
}

impl TryFrom<u8> for FigureType {
    type Error = ChessError;

    fn try_from(value: u8) -> Result<Self> {
        FigureType::ALL
            .get(value as usize)
            .copied()
            .ok_or(ChessError::InvalidFigure(value))
    }
}

/** A figure is its kind and its side, nothing more. Two pawns of the same
 * team are indistinguishable. */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Figure {
    pub kind: FigureType,
    pub team: Team,
}

impl Figure {
    pub fn new(kind: FigureType, team: Team) -> Figure {
        Figure { kind, team }
    }

    /** FEN style letter, uppercase for White. */
    pub fn letter(&self) -> char {
        match self.team {
            Team::White => self.kind.letter().to_ascii_uppercase(),
            Team::Black => self.kind.letter(),
        }
    }

    pub fn from_letter(letter: char) -> Option<Figure> {
        let team = if letter.is_ascii_uppercase() {
            Team::White
        } else {
            Team::Black
        };
        let lower = letter.to_ascii_lowercase();
        FigureType::ALL
            .into_iter()
            .find(|kind| kind.letter() == lower)
            .map(|kind| Figure::new(kind, team))
    }
}

impl Display for Figure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/** Board coordinate, always inside the 8x8 grid. */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Result<Square> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Square { row, col })
        } else {
            Err(ChessError::OutOfBounds { row, col })
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /** Position in 0x88 layout. */
    pub(crate) fn index(&self) -> u8 {
        compact_pos(self.row, self.col)
    }

    pub(crate) fn from_index(pos: u8) -> Option<Square> {
        if is_valid_coord(pos) {
            let (row, col) = unpack_pos(pos);
            Some(Square { row, col })
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = ChessError;

    fn try_from((row, col): (u8, u8)) -> Result<Self> {
        Square::new(row, col)
    }
}

impl From<Square> for (u8, u8) {
    fn from(value: Square) -> Self {
        (value.row, value.col)
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ChessError::InvalidSquare(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        Square::new(rank as u8 - b'1', file as u8 - b'a')
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
