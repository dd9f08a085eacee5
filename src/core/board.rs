use std::fmt::Display;

use log::trace;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

use crate::core::definitions::{Figure, FigureType, Square, Team, BOARD_SIZE};
use crate::core::error::{ChessError, Result};
use crate::core::utils::{compact_pos, is_valid_coord};

/** Bits structure of a cell code
 * Bit 7 -- Team of the figure
 * - 1 -- Black
 * - 0 -- White
 * Bits 2-0 -- Figure type + 1, 0 for an empty cell */
const EMPTY: u8 = 0x00;
const PADDING: u8 = 0xFF;
const BLACK_FLAG: u8 = 0x80;
const KIND_MASK: u8 = 0x07;

fn encode(figure: Figure) -> u8 {
    let team = match figure.team {
        Team::White => 0x00,
        Team::Black => BLACK_FLAG,
    };
    (figure.kind as u8 + 1) | team
}

fn decode(code: u8) -> Option<Figure> {
    let kind = FigureType::try_from((code & KIND_MASK).checked_sub(1)?).ok()?;
    let team = if code & BLACK_FLAG != 0 {
        Team::Black
    } else {
        Team::White
    };
    Some(Figure::new(kind, team))
}

/** Variation of 0x88 board. Knows nothing about rules: every write here is
 * unconditional. */
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde_as(as = "Bytes")]
    arr: [u8; 128],
}

impl Board {
    /** Board without any figure. */
    pub fn new() -> Board {
        let mut arr = [PADDING; 128];
        for (pos, cell) in arr.iter_mut().enumerate() {
            if is_valid_coord(pos as u8) {
                *cell = EMPTY;
            }
        }
        Board { arr }
    }

    /** Conventional start layout, White on rows 0 and 1. */
    pub fn standard() -> Board {
        const BACK_RANK: [FigureType; 8] = [
            FigureType::Rook,
            FigureType::Knight,
            FigureType::Bishop,
            FigureType::Queen,
            FigureType::King,
            FigureType::Bishop,
            FigureType::Knight,
            FigureType::Rook,
        ];
        let mut board = Board::new();
        for (team, back_row) in [(Team::White, 0), (Team::Black, BOARD_SIZE - 1)] {
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                let col = col as u8;
                board.arr[compact_pos(back_row, col) as usize] = encode(Figure::new(kind, team));
                board.arr[compact_pos(team.pawn_row(), col) as usize] =
                    encode(Figure::new(FigureType::Pawn, team));
            }
        }
        board
    }

    pub fn get(&self, square: Square) -> Option<Figure> {
        decode(self.arr[square.index() as usize])
    }

    /** Places `figure`, replacing whatever stood there. */
    pub fn set(&mut self, square: Square, figure: Figure) -> Option<Figure> {
        let previous = self.get(square);
        self.arr[square.index() as usize] = encode(figure);
        previous
    }

    /** Clears the square, returns what stood there. */
    pub fn remove(&mut self, square: Square) -> Option<Figure> {
        let previous = self.get(square);
        self.arr[square.index() as usize] = EMPTY;
        previous
    }

    /** Relocates the figure on `from` to `to`, returns the captured one. */
    pub fn move_raw(&mut self, from: Square, to: Square) -> Result<Option<Figure>> {
        let Some(figure) = self.get(from) else {
            return Err(ChessError::EmptySource {
                row: from.row(),
                col: from.col(),
            });
        };
        if from == to {
            return Ok(None);
        }
        let captured = self.set(to, figure);
        self.remove(from);
        trace!("Relocated {figure} {from} -> {to}, captured {captured:?}");
        Ok(captured)
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.arr[square.index() as usize] == EMPTY
    }

    /** Raw lookup by 0x88 position, `None` for empty or off-board cells. */
    pub(crate) fn at(&self, pos: u8) -> Option<Figure> {
        if is_valid_coord(pos) {
            decode(self.arr[pos as usize])
        } else {
            None
        }
    }

    pub fn iter_figures(&self) -> impl Iterator<Item = (Square, Figure)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|figure| (square, figure)))
    }

    /** Every playable cell holds a decodable code and the padding is intact.
     * Only boards that came from outside (snapshots) can fail this. */
    pub fn is_well_formed(&self) -> bool {
        self.arr.iter().enumerate().all(|(pos, &code)| {
            if is_valid_coord(pos as u8) {
                code == EMPTY || decode(code).map(encode) == Some(code)
            } else {
                code == PADDING
            }
        })
    }

    pub fn count(&self) -> usize {
        self.iter_figures().count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    /** Row 7 on top, files labelled below. */
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..BOARD_SIZE).rev() {
            write!(f, "{} ", row + 1)?;
            for col in 0..BOARD_SIZE {
                let cell = Square::new(row, col)
                    .ok()
                    .and_then(|square| self.get(square))
                    .map(|figure| figure.letter())
                    .unwrap_or('.');
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  abcdefgh")
    }
}
