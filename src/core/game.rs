use log::{debug, trace};
use postcard::{from_bytes, to_allocvec};
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::definitions::{Figure, Move, Square, Team};
use crate::core::error::{ChessError, Result};
use crate::core::history::MoveHistory;
use crate::core::rules::RuleSet;
use crate::core::turn::TurnController;

/** One game: the board, whose turn it is and the last accepted move.
 *
 * There are two ways to change it. `apply_move` is rule-checked play and
 * the only thing that flips the turn. The `*_figure_at` and
 * `set_current_team` calls are setup: they edit the board or the turn
 * directly and never touch each other. */
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    board: Board,
    turn: TurnController,
    history: MoveHistory,
    rules: RuleSet,
}

impl Engine {
    /** Empty board, White to move, no history. */
    pub fn create() -> Engine {
        Engine::with_rules(RuleSet::default())
    }

    pub fn with_rules(rules: RuleSet) -> Engine {
        Engine {
            rules,
            ..Default::default()
        }
    }

    pub fn with_board(board: Board, rules: RuleSet) -> Engine {
        Engine {
            board,
            rules,
            ..Default::default()
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /** The single rule-checked transition. On error nothing has changed. */
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<()> {
        let figure = self.board.get(from).ok_or(ChessError::NoFigureAtSource {
            row: from.row(),
            col: from.col(),
        })?;
        let current = self.turn.get();
        if figure.team != current {
            debug!("Rejected {from}{to}: {} moves, {current} expected", figure.team);
            return Err(ChessError::WrongTurn {
                mover: figure.team,
                current,
            });
        }
        if !self.rules.is_legal(&self.board, figure, from, to) {
            debug!("Rejected {from}{to}: illegal for {figure}");
            return Err(ChessError::IllegalMove {
                from_row: from.row(),
                from_col: from.col(),
                to_row: to.row(),
                to_col: to.col(),
            });
        }
        let captured = self.board.move_raw(from, to)?;
        self.history.record(Move::new(from, to));
        let next = self.turn.advance();
        trace!("{figure} {from}{to} captured {captured:?}, {next} to move");
        Ok(())
    }

    pub fn set_figure_at(&mut self, square: Square, figure: Figure) {
        debug!("Setup: {figure} on {square}");
        self.board.set(square, figure);
    }

    pub fn get_figure_at(&self, square: Square) -> Option<Figure> {
        self.board.get(square)
    }

    pub fn remove_figure_at(&mut self, square: Square) -> Option<Figure> {
        debug!("Setup: clear {square}");
        self.board.remove(square)
    }

    /** Replaces the board with the standard layout. Turn and history stay. */
    pub fn setup_standard(&mut self) {
        debug!("Setup: standard layout");
        self.board = Board::standard();
    }

    pub fn get_current_team(&self) -> Team {
        self.turn.get()
    }

    pub fn set_current_team(&mut self, team: Team) {
        debug!("Setup: {team} to move");
        self.turn.set(team);
    }

    pub fn get_latest_move(&self) -> Result<Move> {
        self.history.latest()
    }

    /** Moves of the figure on `from`, empty unless it belongs to the side
     * to move. */
    pub fn possible_moves(&self, from: Square) -> Vec<Move> {
        match self.board.get(from) {
            Some(figure) if figure.team == self.turn.get() => self
                .rules
                .destinations(&self.board, from)
                .into_iter()
                .map(|to| Move::new(from, to))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let current = self.turn.get();
        self.board
            .iter_figures()
            .filter(|(_, figure)| figure.team == current)
            .flat_map(|(from, _)| self.possible_moves(from))
            .collect()
    }

    /** Plays a uniformly chosen legal move, `None` when there is none. */
    pub fn make_random_move(&mut self) -> Option<Move> {
        let chosen = self
            .legal_moves()
            .into_iter()
            .choose(&mut rand::thread_rng())?;
        self.apply_move(chosen.from, chosen.to).ok()?;
        Some(chosen)
    }

    /** Leaf count of the move tree `depth` plies deep. */
    pub fn perft(&self, depth: usize) -> usize {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len();
        }
        moves
            .into_iter()
            .map(|_move| {
                let mut next = self.clone();
                match next.apply_move(_move.from, _move.to) {
                    Ok(()) => next.perft(depth - 1),
                    Err(_) => 0,
                }
            })
            .sum()
    }

    pub fn snapshot(&self) -> Result<Vec<u8>> {
        Ok(to_allocvec(self)?)
    }

    pub fn restore(bytes: &[u8]) -> Result<Engine> {
        let engine: Engine = from_bytes(bytes)?;
        if !engine.board.is_well_formed() {
            return Err(postcard::Error::DeserializeBadEncoding.into());
        }
        Ok(engine)
    }
}
