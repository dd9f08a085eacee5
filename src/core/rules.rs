//! Movement geometry of the six figure kinds. Turn order, check and the
//! special moves (castling, en passant, promotion) are not decided here.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::definitions::{Figure, FigureType, Square};
use crate::core::utils::{
    between, delta, in_direction, is_in_diagonal_line, is_in_straight_line, is_valid_coord, step,
};

/** Tables directions for figures, as (rows, cols) */
const BISHOP_DIR: &[(i8, i8)] = &[(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ROOK_DIR: &[(i8, i8)] = &[(1, 0), (0, -1), (-1, 0), (0, 1)];
const QUEEN_DIR: &[(i8, i8)] = &[
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
];

const KING_STEPS: &[(i8, i8)] = QUEEN_DIR;
const KNIGHT_JUMPS: &[(i8, i8)] = &[
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/** Optional movement extensions. Everything is off by default. */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /** Two-square pawn advance from the team's pawn row. */
    pub pawn_double_step: bool,
}

impl RuleSet {
    /** Whether `figure`, standing on `from`, may go to `to` on this board. */
    pub fn is_legal(&self, board: &Board, figure: Figure, from: Square, to: Square) -> bool {
        if from == to || board.get(from) != Some(figure) {
            return false;
        }
        let target = board.get(to);
        if target.is_some_and(|target| target.team == figure.team) {
            return false;
        }
        let (a, b) = (from.index(), to.index());
        let (rows, cols) = delta(a, b);
        match figure.kind {
            FigureType::Pawn => {
                let forward = figure.team.forward();
                if rows == forward {
                    match cols.abs() {
                        0 => target.is_none(),
                        1 => target.is_some(),
                        _ => false,
                    }
                } else {
                    self.pawn_double_step
                        && rows == 2 * forward
                        && cols == 0
                        && from.row() == figure.team.pawn_row()
                        && target.is_none()
                        && path_clear(board, a, b)
                }
            }
            FigureType::King => rows.abs() <= 1 && cols.abs() <= 1,
            FigureType::Knight => matches!((rows.abs(), cols.abs()), (1, 2) | (2, 1)),
            FigureType::Rook => is_in_straight_line(a, b) && path_clear(board, a, b),
            FigureType::Bishop => is_in_diagonal_line(a, b) && path_clear(board, a, b),
            FigureType::Queen => {
                (is_in_straight_line(a, b) || is_in_diagonal_line(a, b)) && path_clear(board, a, b)
            }
        }
    }

    /** Every square the figure on `from` can legally reach. Empty when `from`
     * holds nothing. */
    pub fn destinations(&self, board: &Board, from: Square) -> Vec<Square> {
        let Some(figure) = board.get(from) else {
            return Vec::new();
        };
        let origin = from.index();
        let jump = |offsets: &[(i8, i8)]| -> Vec<Square> {
            offsets
                .iter()
                .map(|&(rows, cols)| origin.wrapping_add(step(rows, cols)))
                .filter_map(Square::from_index)
                .filter(|&to| self.is_legal(board, figure, from, to))
                .collect()
        };
        match figure.kind {
            FigureType::Pawn => {
                let forward = figure.team.forward();
                jump(&[(forward, 0), (forward, -1), (forward, 1), (2 * forward, 0)])
            }
            FigureType::King => jump(KING_STEPS),
            FigureType::Knight => jump(KNIGHT_JUMPS),
            // Sliding figures
            sliding => {
                let directions = match sliding {
                    FigureType::Bishop => BISHOP_DIR,
                    FigureType::Rook => ROOK_DIR,
                    _ => QUEEN_DIR,
                };
                let mut targets = Vec::with_capacity(27);
                for &(rows, cols) in directions {
                    for pos in in_direction(origin, step(rows, cols)) {
                        let Some(to) = Square::from_index(pos) else {
                            break;
                        };
                        match board.at(pos) {
                            None => targets.push(to),
                            Some(other) => {
                                if other.team != figure.team {
                                    targets.push(to);
                                }
                                break;
                            }
                        }
                    }
                }
                targets
            }
        }
    }
}

/** `is_legal` with every extension off. */
pub fn is_legal(board: &Board, figure: Figure, from: Square, to: Square) -> bool {
    RuleSet::default().is_legal(board, figure, from, to)
}

fn path_clear(board: &Board, from: u8, to: u8) -> bool {
    debug_assert!(is_valid_coord(from) && is_valid_coord(to));
    between(from, to).all(|pos| board.at(pos).is_none())
}
