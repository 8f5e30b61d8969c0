use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use recolor_core::*;
use serde::Serialize;
use web_time::Instant;

mod levels;
mod render;

/// Finds the shortest click sequences for recolor puzzles
#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    /// XML file with a <levels> list
    levels: PathBuf,

    /// Only solve the level with this number
    #[arg(short, long)]
    level: Option<u32>,

    #[arg(short, long, value_enum, default_value_t = Strategy::BranchBound)]
    strategy: Strategy,

    /// TOML file with search settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Longest solution to look for, overrides the config file
    #[arg(long)]
    max_depth: Option<usize>,

    /// Turn off pruning of boards already reached in fewer moves
    #[arg(long)]
    no_cache: bool,

    /// Print one JSON object per level instead of boards
    #[arg(long)]
    json: bool,

    /// Replay the solutions stored in the level file
    #[arg(long)]
    check: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Iterative-deepening branch and bound
    #[value(name = "bb")]
    BranchBound,
    /// Exhaustive breadth-first search
    Bfs,
}

#[derive(Debug, Serialize)]
struct LevelReport {
    number: u32,
    solved: bool,
    moves: Option<String>,
    length: Option<usize>,
    stats: SearchStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    stored: Option<StoredCheck>,
}

#[derive(Debug, Serialize)]
struct StoredCheck {
    moves: String,
    length: usize,
    solves: bool,
}

fn load_config(args: &Args) -> Result<SearchConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => SearchConfig::default(),
    };
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if args.no_cache {
        config.dominance_pruning = false;
    }
    config.validate().context("Invalid search settings")?;
    Ok(config)
}

fn read_config(path: &Path) -> Result<SearchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Could not parse {}", path.display()))
}

fn solve_board(board: &Board, strategy: Strategy, config: &SearchConfig) -> Result<SolveOutcome> {
    Ok(match strategy {
        Strategy::BranchBound => {
            let mut solver = BranchBoundSolver::with_observer(*config, LogObserver)?;
            solver.solve(board)
        }
        Strategy::Bfs => BfsSolver::from(config).solve(board),
    })
}

fn check_stored(level: &LevelData, board: &Board) -> Result<Option<StoredCheck>> {
    let Some(text) = level.solution.as_deref() else {
        return Ok(None);
    };
    let moves: MoveSequence = text
        .parse()
        .with_context(|| format!("Level {} has a malformed stored solution", level.number))?;

    let mut replayed = board.clone();
    let solves = replayed.replay(&moves).is_ok() && replayed.is_solved();
    Ok(Some(StoredCheck {
        moves: moves.to_string(),
        length: moves.len(),
        solves,
    }))
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    let config = load_config(&args)?;
    log::debug!("Search settings: {config:?}");

    let xml = fs::read_to_string(&args.levels)
        .with_context(|| format!("Could not read {}", args.levels.display()))?;
    let levels = levels::parse_levels(&xml)?;
    let selected: Vec<&LevelData> = levels
        .iter()
        .filter(|level| args.level.is_none_or(|number| level.number == number))
        .collect();
    if selected.is_empty() {
        log::warn!("No levels to solve in {}", args.levels.display());
    }

    let started = Instant::now();
    let mut solved = 0;
    let mut failed_checks = 0;

    for (index, level) in selected.iter().enumerate() {
        let board = Board::from_level(level)
            .with_context(|| format!("Could not lay out level {}", level.number))?;
        let outcome = solve_board(&board, args.strategy, &config)?;
        let stored = if args.check {
            check_stored(level, &board)?
        } else {
            None
        };

        if outcome.is_solved() {
            solved += 1;
        }
        if stored.as_ref().is_some_and(|check| !check.solves) {
            failed_checks += 1;
        }

        if args.json {
            let report = LevelReport {
                number: level.number,
                solved: outcome.is_solved(),
                moves: outcome.solution().map(|s| s.moves().to_string()),
                length: outcome.solution().map(Solution::len),
                stats: *outcome.stats(),
                stored,
            };
            println!("{}", serde_json::to_string(&report)?);
            continue;
        }

        println!("Level {} (id {})", index + 1, level.number);
        match outcome.solution() {
            Some(found) => println!("Solved with {} moves: {}", found.len(), found.moves()),
            None => println!("Unable to solve level {}", level.number),
        }
        print!("{}", render::render(&board));

        if let Some(check) = &stored {
            let verdict = if check.solves {
                "solves"
            } else {
                "does NOT solve"
            };
            println!(
                "Stored solution ({} moves) {verdict} the level",
                check.length
            );
            if let Some(solution) = outcome.solution()
                && check.solves
                && solution.len() < check.length
            {
                let saved = check.length - solution.len();
                println!("Found a solution {saved} moves shorter");
            }
        }

        let stats = outcome.stats();
        log::info!(
            "{} nodes, {} cache hits, {} heuristic prunes, {} rounds in {} ms",
            stats.nodes,
            stats.cache_hits,
            stats.heuristic_prunes,
            stats.rounds,
            stats.elapsed_ms
        );
        println!();
    }

    let summary = format!(
        "Solved {solved}/{} levels in {:.2?}",
        selected.len(),
        started.elapsed()
    );
    if args.json {
        log::info!("{summary}");
    } else {
        println!("{summary}");
    }
    if failed_checks > 0 {
        println!("{failed_checks} stored solutions failed to replay");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
