use std::collections::HashSet;

use crate::core::utils::{between, compact_pos, delta, is_in_diagonal_line, is_in_straight_line};

use super::*;

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

fn white(kind: FigureType) -> Figure {
    Figure::new(kind, Team::White)
}

fn black(kind: FigureType) -> Figure {
    Figure::new(kind, Team::Black)
}

fn engine_with(figures: &[(u8, u8, Figure)]) -> Engine {
    let mut engine = Engine::create();
    for &(row, col, figure) in figures {
        engine.set_figure_at(sq(row, col), figure);
    }
    engine
}

fn legal(board: &Board, from: Square, to: Square) -> bool {
    board
        .get(from)
        .map(|figure| is_legal(board, figure, from, to))
        .unwrap_or(false)
}

#[test]
fn square_bounds() {
    assert!(Square::new(7, 7).is_ok());
    assert_eq!(
        Square::new(8, 0),
        Err(ChessError::OutOfBounds { row: 8, col: 0 })
    );
    assert_eq!(
        Square::new(0, 200),
        Err(ChessError::OutOfBounds { row: 0, col: 200 })
    );
    assert_eq!(Square::all().count(), 64);
    assert_eq!(Square::all().collect::<HashSet<_>>().len(), 64);
}

#[test]
fn square_notation() {
    assert_eq!("a1".parse::<Square>().unwrap(), sq(0, 0));
    assert_eq!("E2".parse::<Square>().unwrap(), sq(1, 4));
    assert_eq!(sq(7, 7).to_string(), "h8");
    for bad in ["", "a", "a9", "i1", "a10", "11"] {
        assert!(bad.parse::<Square>().is_err(), "{bad} parsed");
    }
}

#[test]
fn team_flips() {
    assert_eq!(!Team::White, Team::Black);
    assert_eq!(!Team::Black, Team::White);
    assert_eq!(Team::try_from(1).unwrap(), Team::Black);
    assert_eq!(Team::try_from(2), Err(ChessError::InvalidTeam(2)));
    assert_eq!(FigureType::try_from(5).unwrap(), FigureType::Bishop);
    assert_eq!(FigureType::try_from(6), Err(ChessError::InvalidFigure(6)));
}

#[test]
fn figure_letters() {
    for kind in FigureType::ALL {
        for figure in [white(kind), black(kind)] {
            assert_eq!(Figure::from_letter(figure.letter()), Some(figure));
        }
    }
    assert_eq!(Figure::from_letter('x'), None);
}

#[test]
fn geometry() {
    let center = compact_pos(3, 3);
    assert_eq!(delta(center, compact_pos(5, 1)), (2, -2));
    assert!(is_in_diagonal_line(center, compact_pos(0, 6)));
    assert!(is_in_straight_line(center, compact_pos(3, 7)));
    assert!(!is_in_straight_line(center, compact_pos(4, 5)));
    let cells: Vec<_> = between(compact_pos(7, 0), compact_pos(3, 4)).collect();
    assert_eq!(
        cells,
        vec![compact_pos(6, 1), compact_pos(5, 2), compact_pos(4, 3)]
    );
    let cells: Vec<_> = between(compact_pos(2, 6), compact_pos(2, 3)).collect();
    assert_eq!(cells, vec![compact_pos(2, 5), compact_pos(2, 4)]);
    assert_eq!(between(compact_pos(0, 0), compact_pos(1, 1)).count(), 0);
}

#[test]
fn setup_round_trips_everywhere() {
    let mut engine = Engine::create();
    for (idx, square) in Square::all().enumerate() {
        let kind = FigureType::ALL[idx % FigureType::ALL.len()];
        let team = if idx % 2 == 0 { Team::White } else { Team::Black };
        engine.set_figure_at(square, Figure::new(kind, team));
        assert_eq!(engine.get_figure_at(square), Some(Figure::new(kind, team)));
    }
    assert_eq!(engine.board().count(), 64);
    assert_eq!(engine.get_current_team(), Team::White);
    assert_eq!(engine.get_latest_move(), Err(ChessError::NoMoveRecorded));
}

#[test]
fn setup_overwrites_and_clears() {
    let mut engine = Engine::create();
    engine.set_figure_at(sq(4, 4), white(FigureType::Queen));
    engine.set_figure_at(sq(4, 4), black(FigureType::Knight));
    assert_eq!(engine.get_figure_at(sq(4, 4)), Some(black(FigureType::Knight)));
    assert_eq!(
        engine.remove_figure_at(sq(4, 4)),
        Some(black(FigureType::Knight))
    );
    assert_eq!(engine.get_figure_at(sq(4, 4)), None);
    assert_eq!(engine.remove_figure_at(sq(4, 4)), None);
    assert_eq!(engine.board().count(), 0);
}

#[test]
fn raw_relocation() {
    let mut board = Board::new();
    assert_eq!(
        board.move_raw(sq(0, 0), sq(1, 0)),
        Err(ChessError::EmptySource { row: 0, col: 0 })
    );
    board.set(sq(0, 0), white(FigureType::Rook));
    board.set(sq(5, 0), white(FigureType::Pawn));
    // No rules here: a friendly figure gets overwritten.
    assert_eq!(
        board.move_raw(sq(0, 0), sq(5, 0)),
        Ok(Some(white(FigureType::Pawn)))
    );
    assert_eq!(board.get(sq(5, 0)), Some(white(FigureType::Rook)));
    assert!(board.is_empty(sq(0, 0)));
    assert_eq!(board.move_raw(sq(5, 0), sq(5, 0)), Ok(None));
    assert_eq!(board.get(sq(5, 0)), Some(white(FigureType::Rook)));
}

#[test]
fn standard_layout() {
    let board = Board::standard();
    assert_eq!(board.count(), 32);
    assert_eq!(board.get(sq(0, 4)), Some(white(FigureType::King)));
    assert_eq!(board.get(sq(7, 3)), Some(black(FigureType::Queen)));
    assert_eq!(board.get(sq(6, 0)), Some(black(FigureType::Pawn)));
    assert!(board.is_well_formed());
    assert_eq!(board.to_string().lines().next(), Some("8 rnbqkbnr"));
    assert_eq!(Engine::create().board().count(), 0);
}

#[test]
fn knight_jumps() {
    let engine = engine_with(&[
        (1, 0, white(FigureType::Knight)),
        (2, 0, white(FigureType::Pawn)),
        (1, 1, black(FigureType::Pawn)),
    ]);
    let board = engine.board();
    assert!(legal(board, sq(1, 0), sq(3, 1)));
    assert!(legal(board, sq(1, 0), sq(2, 2)));
    assert!(legal(board, sq(1, 0), sq(0, 2)));
    assert!(!legal(board, sq(1, 0), sq(2, 1)));
    assert!(!legal(board, sq(1, 0), sq(1, 1)));
    assert!(!legal(board, sq(1, 0), sq(1, 0)));
}

#[test]
fn knight_on_empty_board() {
    let engine = engine_with(&[(1, 0, white(FigureType::Knight))]);
    let board = engine.board();
    assert!(legal(board, sq(1, 0), sq(3, 1)));
    assert!(legal(board, sq(1, 0), sq(2, 2)));
    assert!(!legal(board, sq(1, 0), sq(2, 1)));
    assert!(!legal(board, sq(1, 0), sq(1, 1)));
}

#[test]
fn rook_blocked_by_friend() {
    let engine = engine_with(&[
        (0, 0, white(FigureType::Rook)),
        (0, 3, white(FigureType::Bishop)),
    ]);
    let board = engine.board();
    assert!(legal(board, sq(0, 0), sq(0, 1)));
    assert!(legal(board, sq(0, 0), sq(0, 2)));
    assert!(!legal(board, sq(0, 0), sq(0, 3)));
    assert!(!legal(board, sq(0, 0), sq(0, 4)));
    assert!(legal(board, sq(0, 0), sq(7, 0)));
    assert!(!legal(board, sq(0, 0), sq(1, 1)));
}

#[test]
fn sliders_capture_first_enemy_only() {
    let engine = engine_with(&[
        (3, 3, white(FigureType::Queen)),
        (5, 5, black(FigureType::Pawn)),
        (3, 6, black(FigureType::Rook)),
        (0, 0, white(FigureType::Bishop)),
    ]);
    let board = engine.board();
    assert!(legal(board, sq(3, 3), sq(5, 5)));
    assert!(!legal(board, sq(3, 3), sq(6, 6)));
    assert!(legal(board, sq(3, 3), sq(3, 6)));
    assert!(!legal(board, sq(3, 3), sq(3, 7)));
    assert!(!legal(board, sq(3, 3), sq(5, 4)));
    // Bishop stops behind its own queen.
    assert!(legal(board, sq(0, 0), sq(2, 2)));
    assert!(!legal(board, sq(0, 0), sq(3, 3)));
    assert!(!legal(board, sq(0, 0), sq(4, 4)));
    assert!(!legal(board, sq(0, 0), sq(0, 1)));
}

#[test]
fn king_steps() {
    let engine = engine_with(&[
        (0, 4, white(FigureType::King)),
        (1, 4, white(FigureType::Pawn)),
        (1, 5, black(FigureType::Pawn)),
    ]);
    let board = engine.board();
    assert!(legal(board, sq(0, 4), sq(0, 3)));
    assert!(legal(board, sq(0, 4), sq(1, 5)));
    assert!(!legal(board, sq(0, 4), sq(1, 4)));
    assert!(!legal(board, sq(0, 4), sq(0, 6)));
    assert!(!legal(board, sq(0, 4), sq(2, 4)));
}

#[test]
fn pawn_moves() {
    let mut engine = engine_with(&[(1, 4, white(FigureType::Pawn))]);
    assert!(legal(engine.board(), sq(1, 4), sq(2, 4)));
    assert!(!legal(engine.board(), sq(1, 4), sq(2, 3)));
    assert!(!legal(engine.board(), sq(1, 4), sq(2, 5)));
    assert!(!legal(engine.board(), sq(1, 4), sq(0, 4)));
    assert!(!legal(engine.board(), sq(1, 4), sq(3, 4)));

    engine.set_figure_at(sq(2, 3), black(FigureType::Knight));
    engine.set_figure_at(sq(2, 5), white(FigureType::Knight));
    assert!(legal(engine.board(), sq(1, 4), sq(2, 3)));
    assert!(!legal(engine.board(), sq(1, 4), sq(2, 5)));

    engine.set_figure_at(sq(2, 4), black(FigureType::Rook));
    assert!(!legal(engine.board(), sq(1, 4), sq(2, 4)));
    engine.set_figure_at(sq(2, 4), white(FigureType::Rook));
    assert!(!legal(engine.board(), sq(1, 4), sq(2, 4)));
}

#[test]
fn black_pawn_goes_down() {
    let engine = engine_with(&[
        (6, 2, black(FigureType::Pawn)),
        (5, 1, white(FigureType::Pawn)),
    ]);
    let board = engine.board();
    assert!(legal(board, sq(6, 2), sq(5, 2)));
    assert!(legal(board, sq(6, 2), sq(5, 1)));
    assert!(!legal(board, sq(6, 2), sq(7, 2)));
    assert!(!legal(board, sq(6, 2), sq(4, 2)));
}

#[test]
fn pawn_double_step_extension() {
    let rules = RuleSet {
        pawn_double_step: true,
    };
    let mut board = Board::new();
    board.set(sq(1, 0), white(FigureType::Pawn));
    board.set(sq(2, 1), white(FigureType::Pawn));
    board.set(sq(6, 7), black(FigureType::Pawn));
    let pawn = white(FigureType::Pawn);
    assert!(rules.is_legal(&board, pawn, sq(1, 0), sq(3, 0)));
    assert!(!is_legal(&board, pawn, sq(1, 0), sq(3, 0)));
    // Only from the pawn row.
    assert!(!rules.is_legal(&board, pawn, sq(2, 1), sq(4, 1)));
    assert!(rules.is_legal(&board, black(FigureType::Pawn), sq(6, 7), sq(4, 7)));

    board.set(sq(2, 0), black(FigureType::Rook));
    assert!(!rules.is_legal(&board, pawn, sq(1, 0), sq(3, 0)));
    board.remove(sq(2, 0));
    board.set(sq(3, 0), black(FigureType::Rook));
    assert!(!rules.is_legal(&board, pawn, sq(1, 0), sq(3, 0)));
}

#[test]
fn figure_must_match_source() {
    let mut board = Board::new();
    board.set(sq(0, 0), white(FigureType::Rook));
    assert!(!is_legal(&board, white(FigureType::Queen), sq(0, 0), sq(3, 3)));
    assert!(!is_legal(&board, white(FigureType::Rook), sq(4, 4), sq(4, 5)));
}

#[test]
fn legal_move_updates_everything() {
    let mut engine = engine_with(&[
        (1, 4, white(FigureType::Pawn)),
        (2, 3, black(FigureType::Pawn)),
    ]);
    engine.apply_move(sq(1, 4), sq(2, 3)).unwrap();
    assert_eq!(engine.get_latest_move(), Ok(Move::new(sq(1, 4), sq(2, 3))));
    assert_eq!(engine.get_current_team(), Team::Black);
    assert_eq!(engine.get_figure_at(sq(2, 3)), Some(white(FigureType::Pawn)));
    assert_eq!(engine.get_figure_at(sq(1, 4)), None);
    assert_eq!(engine.board().count(), 1);
}

#[test]
fn rejected_moves_change_nothing() {
    let mut engine = engine_with(&[
        (0, 0, white(FigureType::Rook)),
        (0, 3, white(FigureType::Bishop)),
        (7, 7, black(FigureType::King)),
    ]);
    engine.apply_move(sq(0, 3), sq(1, 4)).unwrap();
    engine.set_current_team(Team::White);
    let before = engine.clone();

    let attempts = [
        (
            sq(4, 4),
            sq(5, 5),
            ChessError::NoFigureAtSource { row: 4, col: 4 },
        ),
        (
            sq(7, 7),
            sq(7, 6),
            ChessError::WrongTurn {
                mover: Team::Black,
                current: Team::White,
            },
        ),
        (
            sq(0, 0),
            sq(1, 1),
            ChessError::IllegalMove {
                from_row: 0,
                from_col: 0,
                to_row: 1,
                to_col: 1,
            },
        ),
        (
            sq(0, 0),
            sq(0, 0),
            ChessError::IllegalMove {
                from_row: 0,
                from_col: 0,
                to_row: 0,
                to_col: 0,
            },
        ),
    ];
    for (from, to, expected) in attempts {
        assert_eq!(engine.apply_move(from, to), Err(expected));
        assert_eq!(engine, before);
    }
    assert_eq!(engine.get_latest_move(), Ok(Move::new(sq(0, 3), sq(1, 4))));
}

#[test]
fn wrong_turn_leaves_state() {
    let mut engine = engine_with(&[(6, 0, black(FigureType::Pawn))]);
    assert_eq!(
        engine.apply_move(sq(6, 0), sq(5, 0)),
        Err(ChessError::WrongTurn {
            mover: Team::Black,
            current: Team::White
        })
    );
    assert_eq!(engine.get_current_team(), Team::White);
    assert_eq!(engine.get_figure_at(sq(6, 0)), Some(black(FigureType::Pawn)));
    assert_eq!(engine.get_latest_move(), Err(ChessError::NoMoveRecorded));
}

#[test]
fn setup_never_flips_turn() {
    let mut engine = Engine::create();
    engine.set_figure_at(sq(0, 0), white(FigureType::King));
    engine.remove_figure_at(sq(0, 0));
    engine.setup_standard();
    assert_eq!(engine.get_current_team(), Team::White);
    assert_eq!(engine.get_latest_move(), Err(ChessError::NoMoveRecorded));

    engine.apply_move(sq(1, 0), sq(2, 0)).unwrap();
    engine.set_current_team(Team::White);
    assert_eq!(engine.get_figure_at(sq(2, 0)), Some(white(FigureType::Pawn)));
    assert_eq!(engine.get_latest_move(), Ok(Move::new(sq(1, 0), sq(2, 0))));
    engine.apply_move(sq(2, 0), sq(3, 0)).unwrap();
    assert_eq!(engine.get_current_team(), Team::Black);
}

#[test]
fn turns_alternate() {
    let mut engine = Engine::with_board(Board::standard(), RuleSet::default());
    let script = [((1, 6), (2, 6)), ((6, 1), (5, 1)), ((0, 5), (2, 7)), ((7, 2), (5, 0))];
    let mut expected = Team::White;
    for ((fr, fc), (tr, tc)) in script {
        assert_eq!(engine.get_current_team(), expected);
        engine.apply_move(sq(fr, fc), sq(tr, tc)).unwrap();
        expected = !expected;
        assert_eq!(engine.get_latest_move(), Ok(Move::new(sq(fr, fc), sq(tr, tc))));
    }
    assert_eq!(engine.get_current_team(), Team::White);
}

#[test]
fn generation_agrees_with_predicate() {
    for rules in [
        RuleSet::default(),
        RuleSet {
            pawn_double_step: true,
        },
    ] {
        let mut board = Board::standard();
        board.remove(sq(1, 3));
        board.remove(sq(6, 4));
        board.set(sq(3, 3), white(FigureType::Queen));
        board.set(sq(4, 4), black(FigureType::Knight));
        board.set(sq(2, 6), black(FigureType::Pawn));
        board.set(sq(5, 1), white(FigureType::Bishop));
        for from in Square::all() {
            let Some(figure) = board.get(from) else {
                assert!(rules.destinations(&board, from).is_empty());
                continue;
            };
            let generated: HashSet<Square> =
                rules.destinations(&board, from).into_iter().collect();
            let filtered: HashSet<Square> = Square::all()
                .filter(|&to| rules.is_legal(&board, figure, from, to))
                .collect();
            assert_eq!(generated, filtered, "{figure} on {from}");
        }
    }
}

#[test]
fn possible_moves_only_for_side_to_move() {
    let engine = Engine::with_board(Board::standard(), RuleSet::default());
    assert_eq!(engine.possible_moves(sq(1, 0)), vec![Move::new(sq(1, 0), sq(2, 0))]);
    assert!(engine.possible_moves(sq(6, 0)).is_empty());
    assert!(engine.possible_moves(sq(4, 4)).is_empty());
    let knight: HashSet<_> = engine.possible_moves(sq(0, 1)).into_iter().map(|m| m.to).collect();
    assert_eq!(knight, HashSet::from([sq(2, 0), sq(2, 2)]));
}

#[test]
fn perft_plain() {
    let engine = Engine::with_board(Board::standard(), RuleSet::default());
    assert_eq!(engine.perft(0), 1);
    assert_eq!(engine.perft(1), 12);
    assert_eq!(engine.perft(2), 144);
}

#[test]
fn perft_with_double_step() {
    let engine = Engine::with_board(
        Board::standard(),
        RuleSet {
            pawn_double_step: true,
        },
    );
    assert_eq!(engine.perft(1), 20);
    assert_eq!(engine.perft(2), 400);
    assert_eq!(engine.perft(3), 8902);
}

#[test]
fn random_move_is_legal() {
    let mut engine = Engine::with_board(Board::standard(), RuleSet::default());
    for _ in 0..20 {
        let before = engine.clone();
        let Some(played) = engine.make_random_move() else {
            break;
        };
        assert!(before.legal_moves().contains(&played));
        assert_eq!(engine.get_latest_move(), Ok(played));
        assert_eq!(engine.get_current_team(), !before.get_current_team());
    }
    assert_eq!(Engine::create().make_random_move(), None);
}

#[test]
fn snapshot_round_trip() {
    let mut engine = Engine::with_board(
        Board::standard(),
        RuleSet {
            pawn_double_step: true,
        },
    );
    engine.apply_move(sq(1, 4), sq(3, 4)).unwrap();
    let bytes = engine.snapshot().unwrap();
    let restored = Engine::restore(&bytes).unwrap();
    assert_eq!(restored, engine);
    assert_eq!(restored.get_latest_move(), Ok(Move::new(sq(1, 4), sq(3, 4))));
    assert_eq!(restored.get_current_team(), Team::Black);
    assert!(restored.rules().pawn_double_step);
}

#[test]
fn snapshot_rejects_garbage() {
    assert!(matches!(
        Engine::restore(&[1, 2, 3]),
        Err(ChessError::Snapshot(_))
    ));
    let mut bytes = Engine::create().snapshot().unwrap();
    // The board is the first field: a length prefix, then 128 cells.
    bytes[2] = 0x07;
    assert!(matches!(
        Engine::restore(&bytes),
        Err(ChessError::Snapshot(_))
    ));
}
