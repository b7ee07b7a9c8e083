//! Daily puzzles runner (default binary).
//!
//! `play` reads one command per line from stdin and redraws the board after
//! each one. `rank`, `info` and `solve` are one-shot queries.

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use time::{format_description::FormatItem, macros::format_description, Date};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use daily_puzzles::core::seed::{epoch_for, puzzle_number};
use daily_puzzles::core::{
    daily_seed, next_tier, rank, Clock, PackingPuzzle, PinnedDateClock, SystemClock,
};
use daily_puzzles::input::{parse_command, Command};
use daily_puzzles::store::{FsStore, SessionStore};
use daily_puzzles::term::{Header, LineRenderer, PuzzleView};
use daily_puzzles::types::GameMode;
use daily_puzzles::{AppConfig, Session};

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

const HELP: &str = "\
sliding: <tile label> or <row> <col> slides a tile into the gap
packing: select <piece|n> (again to rotate), rotate, place <row> <col>,
         place on a piece to remove it, reset, hint
         the built-in tray covers one cell fewer than the open board,
         so a cell is always left over and hint finds no full tiling
common:  show, help, quit";

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily sliding and packing puzzles in the terminal")]
struct Args {
    /// Log filter (overrides RUST_LOG), e.g. `debug` or `daily_puzzles=trace`
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Play a puzzle: daily, blitz or block
    Play(PlayArgs),
    /// Show the tier for a move count
    Rank {
        moves: u32,
    },
    /// Print seeds and puzzle numbers for a day
    Info {
        /// Calendar day (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Search for a tiling of a day's packing board
    Solve {
        /// Calendar day (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    mode: GameMode,
    /// Play another day's puzzle (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: Option<Date>,
    /// Generate from this seed instead of the date or clock
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,
    /// Directory for saved progress (overrides DAILY_PUZZLES_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Do not save progress
    #[arg(long)]
    no_persist: bool,
    /// Plain output without colour escapes
    #[arg(long)]
    no_color: bool,
}

fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s.trim(), DATE_FORMAT)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = AppConfig::from_env();
    match args.cmd {
        Cmd::Play(play_args) => play(play_args, config),
        Cmd::Rank { moves } => {
            print_rank(moves);
            Ok(())
        }
        Cmd::Info { date } => {
            print_info(date.unwrap_or_else(|| SystemClock.today()));
            Ok(())
        }
        Cmd::Solve { date } => solve(date.unwrap_or_else(|| SystemClock.today()), config.color),
    }
}

fn play(args: PlayArgs, mut config: AppConfig) -> Result<()> {
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }
    config.persist &= !args.no_persist;
    config.color &= !args.no_color;

    let clock = PinnedDateClock::new(args.date.unwrap_or_else(|| SystemClock.today()));
    let store = (config.persist && args.mode.persists())
        .then(|| SessionStore::new(FsStore::new(&config.data_dir)));

    let mut session = match args.seed {
        Some(seed) => Session::start_with_seed(args.mode, seed, clock, store),
        None => Session::start(args.mode, clock, store),
    };

    let view = PuzzleView::default();
    let mut out = LineRenderer::new(io::stdout(), config.color);
    let title = args.mode.title();
    let draw = |session: &Session<PinnedDateClock, FsStore>, out: &mut LineRenderer<io::Stdout>| {
        let header = Header {
            title,
            puzzle_number: session.puzzle_number(),
        };
        out.draw(&view.render(session.state(), header))
    };

    if session.restored() {
        out.line("Resuming saved progress.")?;
    }
    draw(&session, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("read command from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line, session.state()) {
            Ok(Command::Quit) => break,
            Ok(Command::Show) => draw(&session, &mut out)?,
            Ok(Command::Help) => out.line(HELP)?,
            Ok(Command::Play(action)) => {
                match session.apply(action) {
                    Ok(true) => {}
                    Ok(false) => {
                        out.line("Nothing happens.")?;
                        continue;
                    }
                    Err(err) => warn!(error = %err, "could not save progress"),
                }
                draw(&session, &mut out)?;
            }
            Ok(Command::Reset) => {
                if let Err(err) = session.reset() {
                    warn!(error = %err, "could not save progress");
                }
                draw(&session, &mut out)?;
            }
            Ok(Command::Hint) => {
                let text = match (session.hint(), session.state().as_packing()) {
                    (Some(step), Some(puzzle)) => {
                        let name = puzzle.piece(step.piece).map_or("?", |p| p.name.as_str());
                        match step.target() {
                            Some(at) => format!(
                                "Try {name} turned {} time(s), placed at {} {}.",
                                step.turns,
                                at.row + 1,
                                at.col + 1
                            ),
                            None => format!("Try {name}."),
                        }
                    }
                    (None, Some(puzzle)) => no_tiling_reason(puzzle),
                    (_, None) => "Hints are only available for packing puzzles.".to_string(),
                };
                out.line(&text)?;
            }
            Err(err) => out.line(&err.to_string())?,
        }
    }

    Ok(())
}

fn no_tiling_reason(puzzle: &PackingPuzzle) -> String {
    match puzzle.shortfall() {
        0 => "The pieces left cannot fill the open cells.".to_string(),
        short => format!(
            "No full tiling: the tray covers {} cells but {} are open, {short} short.",
            puzzle.tray_cells_left(),
            puzzle.board().empty_count()
        ),
    }
}

fn print_rank(moves: u32) {
    let tier = rank(moves);
    println!("{moves} moves: {} - {}", tier.title, tier.description);
    if let Some(better) = next_tier(tier) {
        println!("Next rank: {} (≤{} moves)", better.title, better.max_moves);
    }
}

fn print_info(date: Date) {
    let seed = daily_seed(date);
    println!("{date}");
    for mode in GameMode::ALL {
        let number = epoch_for(mode)
            .map(|epoch| puzzle_number(date.midnight(), epoch))
            .map_or_else(|| "-".to_string(), |n| format!("#{n}"));
        let seed = if mode.is_daily() {
            seed.to_string()
        } else {
            "clock".to_string()
        };
        println!("  {:<12} {:<6} seed {seed}", mode.title(), number);
    }
}

fn solve(date: Date, color: bool) -> Result<()> {
    let puzzle = PackingPuzzle::new(daily_seed(date));
    let mut out = LineRenderer::new(io::stdout(), color);
    let epoch = epoch_for(GameMode::BlockLogic);
    let header = Header {
        title: GameMode::BlockLogic.title(),
        puzzle_number: epoch.map(|epoch| puzzle_number(date.midnight(), epoch)),
    };
    out.draw(&PuzzleView::default().render(&daily_puzzles::core::GameState::Packing(puzzle.clone()), header))?;

    out.line(&format!(
        "Open cells {}, tray cells {}",
        puzzle.open_cells(),
        puzzle.catalog_cells()
    ))?;
    match puzzle.solve() {
        Some(steps) => {
            for step in steps {
                let name = puzzle.piece(step.piece).map_or("?", |p| p.name.as_str());
                let cells: Vec<String> = step
                    .cells
                    .iter()
                    .map(|at| format!("{},{}", at.row + 1, at.col + 1))
                    .collect();
                out.line(&format!("  {name:<4} turns {}  {}", step.turns, cells.join(" ")))?;
            }
        }
        None => out.line(&no_tiling_reason(&puzzle))?,
    }
    Ok(())
}
