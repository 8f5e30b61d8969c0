use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashSet;
use web_time::Instant;

use crate::*;

/// Layer-by-layer breadth-first search. Exhaustive and memory hungry, but the first solution it
/// finds is a shortest one, which makes it the reference the other solvers are checked against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BfsSolver {
    max_depth: usize,
}

impl BfsSolver {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.min(MAX_DEPTH),
        }
    }
}

impl Default for BfsSolver {
    fn default() -> Self {
        Self::new(MAX_DEPTH)
    }
}

impl From<&SearchConfig> for BfsSolver {
    fn from(config: &SearchConfig) -> Self {
        Self::new(config.max_depth)
    }
}

impl Solver for BfsSolver {
    fn solve(&mut self, board: &Board) -> SolveOutcome {
        let started = Instant::now();
        let mut stats = SearchStats::default();

        if board.is_solved() {
            return SolveOutcome::Solved {
                solution: Solution {
                    board: board.clone(),
                },
                stats,
            };
        }

        let triggers: Vec<Pos> = board.triggers().collect();
        let mut seen = HashSet::new();
        seen.insert(board.structural_hash());
        let mut layer = vec![board.clone()];

        for depth in board.moves_made()..self.max_depth {
            stats.rounds += 1;
            let mut next_layer = Vec::new();

            for current in &layer {
                for &pos in &triggers {
                    if !current[pos].is_clickable() {
                        continue;
                    }

                    let mut child = current.clone();
                    let outcome = child
                        .click(pos)
                        .expect("search never clicks beyond the move history capacity");
                    if !outcome.has_update() {
                        stats.noop_children += 1;
                        continue;
                    }
                    stats.nodes += 1;

                    if child.is_solved() {
                        stats.elapsed_ms = started.elapsed().as_millis() as u64;
                        return SolveOutcome::Solved {
                            solution: Solution { board: child },
                            stats,
                        };
                    }

                    if seen.insert(child.structural_hash()) {
                        next_layer.push(child);
                    } else {
                        stats.cache_hits += 1;
                    }
                }
            }

            if next_layer.is_empty() {
                break;
            }
            if depth >= 5 {
                log::debug!(
                    "Breadth-first search at {} moves, {} boards queued",
                    depth + 1,
                    next_layer.len()
                );
            }
            layer = next_layer;
        }

        stats.elapsed_ms = started.elapsed().as_millis() as u64;
        SolveOutcome::Unsolved { stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn board(size: Coord2, color: &str, mechanism: &str) -> Board {
        let level = LevelData::new(1, size, color, mechanism).unwrap();
        Board::from_level_in(&level, size).unwrap()
    }

    #[test]
    fn finds_shortest_sequence() {
        let board = board((1, 4), "brrr", "Rb0L");
        let outcome = BfsSolver::default().solve(&board);
        assert_eq!(outcome.solution().unwrap().moves().to_string(), "A1,D1");
    }

    #[test]
    fn solved_root_needs_no_moves() {
        let board = board((1, 2), "0r", "Xr");
        let solution = BfsSolver::default().solve(&board).into_solution().unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn stops_at_max_depth() {
        let board = board((2, 1), "rr", "0x");
        assert!(!BfsSolver::new(3).solve(&board).is_solved());
        let outcome = BfsSolver::new(4).solve(&board);
        assert_eq!(outcome.solution().unwrap().len(), 4);
    }

    #[test]
    fn exhausted_state_space_is_unsolved() {
        let board = board((1, 2), "rr", "L0");
        let outcome = BfsSolver::default().solve(&board);
        assert!(!outcome.is_solved());
        assert_eq!(outcome.stats().rounds, 1);
    }
}
