//! Line based front end. Reads commands, prints the board and answers; a
//! bad command only produces an `error:` line.

use std::io::{self, BufRead, Write};

use log::{debug, info};
use thiserror::Error;

use crate::core::definitions::{Figure, Move, Square, Team};
use crate::core::error::ChessError;
use crate::core::game::Engine;

const HELP: &str = "\
commands:
  <from> <to> | move <from> <to>   play a move, squares as a1..h8 or `row col row col`
  moves <square>                   legal destinations of a figure
  board                            print the board
  turn [white|black]               show or override the side to move
  last                             latest accepted move
  put <square> <letter>            place a figure (PNBRQK white, pnbrqk black)
  clear <square>                   remove a figure
  standard                         standard start layout
  random                           play a random legal move
  quit";

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Chess(#[from] ChessError),
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Io(#[from] io::Error),
}

enum Flow {
    Continue,
    Quit,
}

pub struct Session<R, W> {
    input: R,
    output: W,
    auto: Option<Team>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Session {
            input,
            output,
            auto: None,
        }
    }

    /** Let the engine pick random moves for `team`. */
    pub fn with_auto(mut self, team: Option<Team>) -> Self {
        self.auto = team;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /** Runs until `quit` or end of input. */
    pub fn run(&mut self, engine: &mut Engine) -> io::Result<()> {
        info!("Session started, {} to move", engine.get_current_team());
        writeln!(self.output, "{}", engine.board())?;
        let mut line = String::new();
        loop {
            if let Some(team) = self.auto.filter(|team| *team == engine.get_current_team()) {
                match engine.make_random_move() {
                    Some(_move) => writeln!(self.output, "{team} plays {_move}")?,
                    None => {
                        writeln!(self.output, "{team} has no moves")?;
                        self.auto = None;
                    }
                }
                continue;
            }
            write!(self.output, "{}> ", engine.get_current_team())?;
            self.output.flush()?;
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            match self.execute(engine, line.trim()) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(CommandError::Io(err)) => return Err(err),
                Err(err) => {
                    debug!("Command `{}` failed: {err}", line.trim());
                    writeln!(self.output, "error: {err}")?;
                }
            }
        }
        info!("Session finished");
        Ok(())
    }

    fn execute(&mut self, engine: &mut Engine, line: &str) -> Result<Flow, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => {}
            ["quit" | "exit"] => return Ok(Flow::Quit),
            ["help"] => writeln!(self.output, "{HELP}")?,
            ["board"] => writeln!(self.output, "{}", engine.board())?,
            ["turn"] => writeln!(self.output, "{}", engine.get_current_team())?,
            ["turn", team] => engine.set_current_team(team.parse()?),
            ["last"] => writeln!(self.output, "{}", engine.get_latest_move()?)?,
            ["moves", square] => {
                let moves: Vec<String> = engine
                    .possible_moves(square.parse()?)
                    .iter()
                    .map(|_move| _move.to.to_string())
                    .collect();
                writeln!(self.output, "{}", moves.join(" "))?;
            }
            ["put", square, letter] => {
                let mut chars = letter.chars();
                let figure = match (chars.next(), chars.next()) {
                    (Some(letter), None) => Figure::from_letter(letter),
                    _ => None,
                }
                .ok_or(CommandError::Usage("put <square> <PNBRQKpnbrqk>"))?;
                engine.set_figure_at(square.parse()?, figure);
            }
            ["clear", square] => {
                engine.remove_figure_at(square.parse()?);
            }
            ["standard"] => {
                engine.setup_standard();
                writeln!(self.output, "{}", engine.board())?;
            }
            ["random"] => match engine.make_random_move() {
                Some(_move) => writeln!(self.output, "{_move}\n{}", engine.board())?,
                None => writeln!(self.output, "no legal moves")?,
            },
            ["move", rest @ ..] => self.play(engine, parse_move(rest)?)?,
            squares => self.play(engine, parse_move(squares)?)?,
        }
        Ok(Flow::Continue)
    }

    fn play(&mut self, engine: &mut Engine, _move: Move) -> Result<(), CommandError> {
        engine.apply_move(_move.from, _move.to)?;
        writeln!(self.output, "{}", engine.board())?;
        Ok(())
    }
}

fn parse_move(words: &[&str]) -> Result<Move, CommandError> {
    match words {
        [joined] if joined.len() == 4 && joined.is_ascii() => {
            Ok(Move::new(joined[..2].parse()?, joined[2..].parse()?))
        }
        [from, to] => Ok(Move::new(from.parse()?, to.parse()?)),
        [a, b, c, d] => {
            let mut coords = [0u8; 4];
            for (coord, word) in coords.iter_mut().zip([a, b, c, d]) {
                *coord = word
                    .parse()
                    .map_err(|_| CommandError::Usage("move <row> <col> <row> <col>"))?;
            }
            Ok(Move::new(
                Square::new(coords[0], coords[1])?,
                Square::new(coords[2], coords[3])?,
            ))
        }
        [word, ..] => Err(CommandError::Unknown(word.to_string())),
        [] => Err(CommandError::Usage("move <from> <to>")),
    }
}
