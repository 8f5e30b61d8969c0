use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recolor_core::*;

const MECHANISMS: &[char] = &[
    '0', '0', '0', '0', '0', '0', 'X', 'r', 'b', 'U', 'R', 'D', 'L', 'w', 'x', 's', 'a', 'F', 'B',
];
const SIZES: &[Coord2] = &[(2, 2), (2, 3), (3, 3), (1, 4)];

fn board(size: Coord2, color: &str, mechanism: &str) -> Board {
    let level = LevelData::new(1, size, color, mechanism).unwrap();
    Board::from_level_in(&level, size).unwrap()
}

fn random_board(rng: &mut StdRng) -> Board {
    let size = SIZES[rng.random_range(0..SIZES.len())];
    let cells = usize::from(size.0) * usize::from(size.1);
    let mut color = String::with_capacity(cells);
    let mut mechanism = String::with_capacity(cells);

    for _ in 0..cells {
        let code = MECHANISMS[rng.random_range(0..MECHANISMS.len())];
        let paint = if rng.random_bool(0.5) { 'r' } else { 'b' };
        let color_code = match code {
            'X' => '0',
            'U' | 'R' | 'D' | 'L' | 'w' | 'x' | 's' | 'a' | 'F' | 'B' => paint,
            _ if rng.random_bool(0.2) => '0',
            _ => paint,
        };
        color.push(color_code);
        mechanism.push(code);
    }

    board(size, &color, &mechanism)
}

fn config() -> SearchConfig {
    SearchConfig {
        max_depth: 10,
        initial_depth: 2,
        depth_step: 2,
        cache_capacity: 1 << 14,
        ..Default::default()
    }
}

fn branch_bound(board: &Board, config: SearchConfig) -> SolveOutcome {
    BranchBoundSolver::new(config).unwrap().solve(board)
}

fn shortest(board: &Board) -> Option<usize> {
    let outcome = BfsSolver::new(10).solve(board);
    outcome.solution().map(Solution::len)
}

#[test]
fn lower_bound_never_overestimates() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut checked = 0;

    for _ in 0..400 {
        let root = random_board(&mut rng);

        // walk a few random clicks in so that intermediate boards are covered too
        let mut board = root.clone();
        for _ in 0..rng.random_range(0..3) {
            let triggers: Vec<Pos> = board.triggers().collect();
            if triggers.is_empty() {
                break;
            }
            let pick = rng.random_range(0..triggers.len());
            board.click(triggers[pick]).unwrap();
        }

        if let Some(total) = shortest(&board) {
            let moves = total - board.moves_made();
            let bound = lower_bound(&board) as usize;
            assert!(
                bound <= moves,
                "bound {bound} exceeds the {moves} moves needed for\n{}",
                board.describe()
            );
            checked += 1;
        }
    }

    assert!(checked > 50, "only {checked} solvable boards generated");
}

#[test]
fn branch_bound_matches_breadth_first_length() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let board = random_board(&mut rng);
        let expected = shortest(&board);
        let outcome = branch_bound(&board, config());
        assert_eq!(
            outcome.solution().map(Solution::len),
            expected,
            "length mismatch on\n{}",
            board.describe()
        );
        if let Some(solution) = outcome.solution() {
            assert!(solution.board.is_solved());
        }
    }
}

#[test]
fn dominance_pruning_does_not_change_the_length() {
    let mut rng = StdRng::seed_from_u64(7);
    // without the table the tree grows exponentially, so keep it shallow
    let cached = SearchConfig {
        max_depth: 6,
        ..config()
    };
    let uncached = SearchConfig {
        dominance_pruning: false,
        ..cached
    };

    for _ in 0..100 {
        let board = random_board(&mut rng);
        let with_cache = branch_bound(&board, cached);
        let without_cache = branch_bound(&board, uncached);
        assert_eq!(
            with_cache.solution().map(Solution::len),
            without_cache.solution().map(Solution::len)
        );
    }
}

#[test]
fn tiny_cache_still_finds_optimal_solutions() {
    let mut rng = StdRng::seed_from_u64(99);
    let tiny = SearchConfig {
        cache_capacity: 3,
        ..config()
    };

    for _ in 0..100 {
        let board = random_board(&mut rng);
        assert_eq!(
            branch_bound(&board, tiny).solution().map(Solution::len),
            shortest(&board)
        );
    }
}

#[test]
fn solving_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..50 {
        let board = random_board(&mut rng);
        let first = branch_bound(&board, config());
        let second = branch_bound(&board, config());
        assert_eq!(first.solution(), second.solution());
        assert_eq!(first.stats().nodes, second.stats().nodes);
        assert_eq!(first.stats().rounds, second.stats().rounds);
    }
}

#[test]
fn rendered_solution_replays_to_a_solved_board() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut replayed = 0;

    for _ in 0..100 {
        let board = random_board(&mut rng);
        let Some(solution) = branch_bound(&board, config()).into_solution() else {
            continue;
        };

        let moves: MoveSequence = solution.moves().to_string().parse().unwrap();
        let mut copy = board.clone();
        copy.replay(&moves).unwrap();
        assert!(copy.is_solved());
        assert_eq!(copy.cells(), solution.board.cells());
        replayed += 1;
    }

    assert!(replayed > 10);
}

#[test]
fn rotating_filler_returns_to_its_facing_after_four_clicks() {
    let mut board = board((3, 3), "rrrrrrrrr", "000 0w0 000");
    let center: Pos = "B2".parse().unwrap();
    let before = board[center];

    for _ in 0..4 {
        assert!(board.click(center).unwrap().has_update());
    }

    assert_eq!(board[center], before);
    assert_eq!(board.moves_made(), 4);
}

#[test]
fn second_filler_click_undoes_the_first() {
    let original = board((1, 4), "rrrr", "R000");
    let mut board = original.clone();
    let filler: Pos = "A1".parse().unwrap();

    board.click(filler).unwrap();
    assert!(board.is_solved());
    board.click(filler).unwrap();
    assert_eq!(board.cells(), original.cells());
    assert_eq!(board.structural_hash(), original.structural_hash());
}

#[test]
fn default_grid_level_solves() {
    // an 8×6 level where one filler per row paints its row
    let color = "rrrrrr".repeat(4) + &"bbbbbb".repeat(4);
    let mechanism = "R00000".repeat(4) + &"00000L".repeat(4);
    let level = LevelData::with_inferred_size(3, &color, &mechanism).unwrap();
    assert_eq!(level.size(), (8, 6));

    let outcome = solve(&level, &SearchConfig::default()).unwrap();
    let solution = outcome.solution().unwrap();
    assert_eq!(solution.len(), 8);
    assert!(solution.board.is_solved());
}

#[test]
fn small_level_is_padded_with_walls() {
    let color = "r".repeat(30);
    let level = LevelData::with_inferred_size(1, &color, &"R0000".repeat(6)).unwrap();
    assert_eq!(level.size(), (6, 5));

    let board = Board::from_level(&level).unwrap();
    assert_eq!(board.size(), DEFAULT_GRID);
    let corner: Pos = "F8".parse().unwrap();
    assert_eq!(board[corner], Cell::WALL);

    let outcome = solve(&level, &SearchConfig::default()).unwrap();
    let solution = outcome.into_solution().unwrap();
    assert_eq!(solution.len(), 6);
}

#[test]
fn unsolvable_level_reports_unsolved() {
    let level = LevelData::new(9, (1, 3), "rrb", "R00").unwrap();
    let outcome = solve(&level, &config()).unwrap();
    assert!(!outcome.is_solved());
    assert!(outcome.stats().rounds >= 1);
}

#[test]
fn malformed_levels_are_rejected() {
    assert!(matches!(
        LevelData::new(1, (1, 3), "rr", "R00"),
        Err(PuzzleError::LengthMismatch { .. })
    ));
    assert!(matches!(
        LevelData::new(1, (1, 2), "rq", "R0"),
        Err(PuzzleError::UnknownColor {
            code: 'q',
            index: 1,
        })
    ));
    assert!(matches!(
        LevelData::new(1, (1, 2), "rr", "R?"),
        Err(PuzzleError::UnknownMechanism {
            code: '?',
            index: 1,
        })
    ));
    assert!(matches!(
        LevelData::new(1, (1, 2), "0r", "R0"),
        Err(PuzzleError::UncoloredTrigger { .. })
    ));
}
