use alloc::vec::Vec;

use web_time::Instant;

use crate::*;

/// Iterative-deepening branch and bound, pruned by the admissible [`lower_bound`] and by an
/// [`ApproximateMap`] of the fewest moves each board was reached in.
///
/// Each round accepts solutions up to a length limit and keeps tightening its bound whenever it
/// finds a shorter one, so a round that finds anything returns the shortest solution within its
/// limit.
#[derive(Debug)]
pub struct BranchBoundSolver<O: SearchObserver = ()> {
    config: SearchConfig,
    cache: ApproximateMap<u8>,
    observer: O,
}

impl BranchBoundSolver {
    pub fn new(config: SearchConfig) -> Result<Self> {
        Self::with_observer(config, ())
    }
}

impl<O: SearchObserver> BranchBoundSolver<O> {
    pub fn with_observer(config: SearchConfig, observer: O) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            cache: ApproximateMap::new(config.cache_capacity),
            config,
            observer,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// A single round: the best solution of at most `limit` moves in total, counting moves already
    /// on `board`.
    pub fn search_round(
        &mut self,
        board: &Board,
        limit: usize,
        stats: &mut SearchStats,
    ) -> Option<Solution> {
        assert!(
            limit <= MAX_DEPTH,
            "round limit {limit} exceeds the move history capacity"
        );

        self.cache.clear();
        self.observer.on_round(limit);

        let triggers: Vec<Pos> = board.triggers().collect();
        let mut search = Search {
            triggers: &triggers,
            cache: self.config.dominance_pruning.then_some(&mut self.cache),
            observer: &mut self.observer,
            progress_interval: self.config.progress_interval,
            bound: limit + 1,
            best: None,
            stats,
        };
        search.branch(board);

        search.best.map(|board| Solution { board })
    }
}

impl<O: SearchObserver> Solver for BranchBoundSolver<O> {
    fn solve(&mut self, board: &Board) -> SolveOutcome {
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let trigger_count = board.triggers().count();
        if board.is_solved() {
            log::warn!("Board is already solved");
        } else if trigger_count == 0 {
            log::warn!("Board is unsolved and has nothing to click");
        }
        self.observer.on_start(trigger_count);

        for limit in self.config.round_limits() {
            if limit < board.moves_made() {
                continue;
            }
            stats.rounds += 1;
            let found = self.search_round(board, limit, &mut stats);
            stats.elapsed_ms = started.elapsed().as_millis() as u64;

            if let Some(solution) = found {
                log::debug!(
                    "Solved in {} moves after {} nodes and {} rounds",
                    solution.len(),
                    stats.nodes,
                    stats.rounds
                );
                return SolveOutcome::Solved { solution, stats };
            }
        }

        stats.elapsed_ms = started.elapsed().as_millis() as u64;
        SolveOutcome::Unsolved { stats }
    }
}

struct Search<'a, O> {
    triggers: &'a [Pos],
    cache: Option<&'a mut ApproximateMap<u8>>,
    observer: &'a mut O,
    progress_interval: u64,
    /// Exclusive: only solutions shorter than this are still interesting.
    bound: usize,
    best: Option<Board>,
    stats: &'a mut SearchStats,
}

impl<O: SearchObserver> Search<'_, O> {
    fn branch(&mut self, board: &Board) {
        let depth = board.moves_made();
        if depth >= self.bound {
            return;
        }

        self.stats.nodes += 1;
        if self.stats.nodes % self.progress_interval == 0 {
            self.observer.on_progress(&*self.stats, self.bound);
        }

        let hash = board.structural_hash();
        if let Some(cache) = self.cache.as_deref_mut() {
            match cache.get(hash) {
                Some(seen) if usize::from(seen) <= depth => {
                    self.stats.cache_hits += 1;
                    return;
                }
                _ => cache.insert(hash, depth as u8),
            }
        }

        if depth + lower_bound(board) as usize >= self.bound {
            self.stats.heuristic_prunes += 1;
            return;
        }

        if board.is_solved() {
            self.bound = depth;
            self.observer.on_improved(depth, board.history());
            self.best = Some(board.clone());
            return;
        }

        let count = self.triggers.len();
        if count == 0 {
            return;
        }

        let offset = (hash % count as u64) as usize;
        for i in 0..count {
            // children sit one move deeper and could no longer beat the bound
            if depth + 1 >= self.bound {
                return;
            }

            let pos = self.triggers[(offset + i) % count];
            if !board[pos].is_clickable() {
                continue;
            }

            let mut child = board.clone();
            let outcome = child
                .click(pos)
                .expect("search never clicks beyond the move history capacity");
            if !outcome.has_update() {
                self.stats.noop_children += 1;
                continue;
            }

            self.branch(&child);
        }
    }
}
