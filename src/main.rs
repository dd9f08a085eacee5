use std::env;
use std::io;

use anyhow::{bail, Context};
use chessrs::session::Session;
use chessrs::{Board, Engine, RuleSet, Team};
use log::info;

struct Options {
    rules: RuleSet,
    standard: bool,
    auto: Option<Team>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Options> {
    let mut options = Options {
        rules: RuleSet::default(),
        standard: false,
        auto: None,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--double-step" => options.rules.pawn_double_step = true,
            "--standard" => options.standard = true,
            "--auto" => {
                let team = args.next().context("--auto needs `white` or `black`")?;
                options.auto = Some(team.parse()?);
            }
            other => bail!(
                "unknown argument `{other}`, expected --double-step, --standard or --auto <team>"
            ),
        }
    }
    Ok(options)
}

fn main() -> anyhow::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let options = parse_args(env::args().skip(1))?;
    let mut engine = if options.standard {
        Engine::with_board(Board::standard(), options.rules)
    } else {
        Engine::with_rules(options.rules)
    };
    info!("Rules: {:?}", engine.rules());
    let stdin = io::stdin();
    Session::new(stdin.lock(), io::stdout())
        .with_auto(options.auto)
        .run(&mut engine)
        .context("session failed")?;
    Ok(())
}
