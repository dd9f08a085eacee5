//! C boundary. The host owns the handle returned by `chess_create` until it
//! passes it to `chess_free`; every other call borrows it.

use std::io;

use log::warn;

use crate::core::definitions::{Figure, FigureType, Move, Square, Team};
use crate::core::error::ChessError;
use crate::core::game::Engine;
use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub enum ChessStatus {
    Ok = 0,
    OutOfBounds = 1,
    NoFigureAtSource = 2,
    WrongTurn = 3,
    IllegalMove = 4,
    NoMoveRecorded = 5,
    InvalidArgument = 6,
    NullPointer = 7,
    IoError = 8,
}

impl From<ChessError> for ChessStatus {
    fn from(value: ChessError) -> Self {
        match value {
            ChessError::OutOfBounds { .. } => ChessStatus::OutOfBounds,
            ChessError::EmptySource { .. } | ChessError::NoFigureAtSource { .. } => {
                ChessStatus::NoFigureAtSource
            }
            ChessError::WrongTurn { .. } => ChessStatus::WrongTurn,
            ChessError::IllegalMove { .. } => ChessStatus::IllegalMove,
            ChessError::NoMoveRecorded => ChessStatus::NoMoveRecorded,
            ChessError::InvalidFigure(_)
            | ChessError::InvalidTeam(_)
            | ChessError::UnknownTeam(_)
            | ChessError::InvalidSquare(_)
            | ChessError::Snapshot(_) => ChessStatus::InvalidArgument,
        }
    }
}

/** Cell content as seen from C. `occupied == false` is the empty sentinel,
 * `kind` and `team` are meaningless then. */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct CFigure {
    pub occupied: bool,
    pub kind: FigureType,
    pub team: Team,
}

impl From<Option<Figure>> for CFigure {
    fn from(value: Option<Figure>) -> Self {
        match value {
            Some(figure) => CFigure {
                occupied: true,
                kind: figure.kind,
                team: figure.team,
            },
            None => CFigure {
                occupied: false,
                kind: FigureType::Pawn,
                team: Team::White,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct CMove {
    pub start_row: u8,
    pub start_col: u8,
    pub end_row: u8,
    pub end_col: u8,
}

impl From<Move> for CMove {
    fn from(value: Move) -> Self {
        CMove {
            start_row: value.from.row(),
            start_col: value.from.col(),
            end_row: value.to.row(),
            end_col: value.to.col(),
        }
    }
}

fn status<T>(result: Result<T, ChessError>) -> ChessStatus {
    match result {
        Ok(_) => ChessStatus::Ok,
        Err(err) => {
            warn!("Boundary call failed: {err}");
            err.into()
        }
    }
}

macro_rules! engine_mut {
    ($ptr:expr) => {
        match $ptr.as_mut() {
            Some(engine) => engine,
            None => {
                warn!("Null engine handle");
                return ChessStatus::NullPointer;
            }
        }
    };
}

macro_rules! engine_ref {
    ($ptr:expr) => {
        match $ptr.as_ref() {
            Some(engine) => engine,
            None => {
                warn!("Null engine handle");
                return ChessStatus::NullPointer;
            }
        }
    };
}

/** Installs `env_logger`, configured by `RUST_LOG`. Safe to call twice. */
#[no_mangle]
pub extern "C" fn chess_init_logging() {
    let _ = env_logger::try_init();
}

/** Writes a new engine handle to `*engine`: empty board, White to move.
 *
 * # Safety
 * `engine` must be null or point to writable storage for one pointer. */
#[no_mangle]
pub unsafe extern "C" fn chess_create(engine: *mut *mut Engine) -> ChessStatus {
    if engine.is_null() {
        warn!("chess_create without output pointer");
        return ChessStatus::NullPointer;
    }
    *engine = Box::into_raw(Box::new(Engine::create()));
    ChessStatus::Ok
}

/** # Safety
 * `engine` must be null or a handle from `chess_create` not freed yet. The
 * handle is invalid afterwards. */
#[no_mangle]
pub unsafe extern "C" fn chess_free(engine: *mut Engine) {
    if !engine.is_null() {
        drop(Box::from_raw(engine));
    }
}

/** Interactive text loop over stdin/stdout, returns on `quit` or end of input.
 *
 * # Safety
 * `engine` must be null or a live handle. */
#[no_mangle]
pub unsafe extern "C" fn chess_run(engine: *mut Engine) -> ChessStatus {
    let engine = engine_mut!(engine);
    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout());
    match session.run(engine) {
        Ok(()) => ChessStatus::Ok,
        Err(err) => {
            warn!("Session aborted: {err}");
            ChessStatus::IoError
        }
    }
}

/** Rule-checked move. On failure the engine is left untouched.
 *
 * # Safety
 * `engine` must be null or a live handle. */
#[no_mangle]
pub unsafe extern "C" fn chess_move(
    engine: *mut Engine,
    start_row: u8,
    start_col: u8,
    end_row: u8,
    end_col: u8,
) -> ChessStatus {
    let engine = engine_mut!(engine);
    let squares = Square::new(start_row, start_col)
        .and_then(|from| Ok((from, Square::new(end_row, end_col)?)));
    status(squares.and_then(|(from, to)| engine.apply_move(from, to)))
}

/** Setup write, no rule check and no turn change.
 *
 * # Safety
 * `engine` must be null or a live handle. */
#[no_mangle]
pub unsafe extern "C" fn chess_set_figure_at(
    engine: *mut Engine,
    row: u8,
    col: u8,
    kind: u8,
    team: u8,
) -> ChessStatus {
    let engine = engine_mut!(engine);
    let figure =
        FigureType::try_from(kind).and_then(|kind| Ok(Figure::new(kind, Team::try_from(team)?)));
    status(
        Square::new(row, col)
            .and_then(|square| figure.map(|figure| engine.set_figure_at(square, figure))),
    )
}

/** # Safety
 * `engine` must be null or a live handle, `out` null or writable. */
#[no_mangle]
pub unsafe extern "C" fn chess_get_figure_at(
    engine: *const Engine,
    row: u8,
    col: u8,
    out: *mut CFigure,
) -> ChessStatus {
    let engine = engine_ref!(engine);
    let Some(out) = out.as_mut() else {
        warn!("Null output pointer");
        return ChessStatus::NullPointer;
    };
    status(Square::new(row, col).map(|square| *out = engine.get_figure_at(square).into()))
}

/** Setup clear, a no-op on an empty square.
 *
 * # Safety
 * `engine` must be null or a live handle. */
#[no_mangle]
pub unsafe extern "C" fn chess_remove_figure_at(
    engine: *mut Engine,
    row: u8,
    col: u8,
) -> ChessStatus {
    let engine = engine_mut!(engine);
    status(Square::new(row, col).map(|square| engine.remove_figure_at(square)))
}

/** Writes the side to move to `out`.
 *
 * # Safety
 * `engine` must be null or a live handle, `out` null or writable. */
#[no_mangle]
pub unsafe extern "C" fn chess_get_current_team(
    engine: *const Engine,
    out: *mut Team,
) -> ChessStatus {
    let engine = engine_ref!(engine);
    let Some(out) = out.as_mut() else {
        warn!("Null output pointer");
        return ChessStatus::NullPointer;
    };
    *out = engine.get_current_team();
    ChessStatus::Ok
}

/** # Safety
 * `engine` must be null or a live handle. */
#[no_mangle]
pub unsafe extern "C" fn chess_set_current_team(engine: *mut Engine, team: u8) -> ChessStatus {
    let engine = engine_mut!(engine);
    status(Team::try_from(team).map(|team| engine.set_current_team(team)))
}

/** Writes the latest move to `out`, `NoMoveRecorded` before the first one.
 *
 * # Safety
 * `engine` must be null or a live handle, `out` null or writable. */
#[no_mangle]
pub unsafe extern "C" fn chess_get_latest_move(
    engine: *const Engine,
    out: *mut CMove,
) -> ChessStatus {
    let engine = engine_ref!(engine);
    let Some(out) = out.as_mut() else {
        warn!("Null output pointer");
        return ChessStatus::NullPointer;
    };
    match engine.get_latest_move() {
        Ok(_move) => {
            *out = _move.into();
            ChessStatus::Ok
        }
        // Asking early is expected, not worth a warning.
        Err(err) => err.into(),
    }
}

/** Replaces the board with the standard layout.
 *
 * # Safety
 * `engine` must be null or a live handle. */
#[no_mangle]
pub unsafe extern "C" fn chess_setup_standard(engine: *mut Engine) -> ChessStatus {
    let engine = engine_mut!(engine);
    engine.setup_standard();
    ChessStatus::Ok
}
