use serde::{Deserialize, Serialize};

use crate::*;
pub use bfs::*;
pub use branch_bound::*;

mod bfs;
mod branch_bound;

pub trait Solver {
    fn solve(&mut self, board: &Board) -> SolveOutcome;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// The solved board; its history holds the moves.
    pub board: Board,
}

impl Solution {
    pub fn moves(&self) -> &MoveSequence {
        self.board.history()
    }

    pub fn len(&self) -> usize {
        self.board.moves_made()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub nodes: u64,
    pub cache_hits: u64,
    pub heuristic_prunes: u64,
    pub noop_children: u64,
    pub rounds: u32,
    pub elapsed_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SolveOutcome {
    Solved {
        solution: Solution,
        stats: SearchStats,
    },
    Unsolved { stats: SearchStats },
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved { solution, .. } => Some(solution),
            Self::Unsolved { .. } => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            Self::Solved { solution, .. } => Some(solution),
            Self::Unsolved { .. } => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            Self::Solved { stats, .. } | Self::Unsolved { stats } => stats,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }
}

/// Receives advisory progress while a search runs. Nothing it does can affect the search.
pub trait SearchObserver {
    fn on_start(&mut self, _triggers: usize) {}

    fn on_round(&mut self, _limit: usize) {}

    fn on_improved(&mut self, _bound: usize, _moves: &MoveSequence) {}

    fn on_progress(&mut self, _stats: &SearchStats, _bound: usize) {}
}

impl SearchObserver for () {}

/// Forwards progress to the `log` facade.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_start(&mut self, triggers: usize) {
        log::debug!("Searching over {triggers} triggers");
    }

    fn on_round(&mut self, limit: usize) {
        log::debug!("Starting round with limit {limit}");
    }

    fn on_improved(&mut self, bound: usize, moves: &MoveSequence) {
        log::debug!("New bound: {bound} using {moves}");
    }

    fn on_progress(&mut self, stats: &SearchStats, bound: usize) {
        log::trace!(
            "{} nodes, {} cache hits, current bound {bound}",
            stats.nodes,
            stats.cache_hits
        );
    }
}

/// Solves `level` with the branch-and-bound solver.
pub fn solve(level: &LevelData, config: &SearchConfig) -> Result<SolveOutcome> {
    let board = Board::from_level(level)?;
    let mut solver = BranchBoundSolver::new(*config)?;
    Ok(solver.solve(&board))
}
