//! End-to-end engine tests through the facade crate

use daily_puzzles::core::pieces::{catalog, rotate_cw, Mask};
use daily_puzzles::core::rng::SeededRandom;
use daily_puzzles::core::seed::daily_seed;
use daily_puzzles::core::{
    rank, GameState, PackingAction, PackingCell, PackingPuzzle, PieceId, SlidingAction, SlidingPuzzle,
};
use daily_puzzles::types::{Coordinate, GameMode};
use time::macros::date;

// ============== RNG & Seeds ==============

#[test]
fn test_same_seed_same_sequence() {
    let mut a = SeededRandom::new(20251016);
    let mut b = SeededRandom::new(20251016);
    for _ in 0..1000 {
        assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
    }
}

#[test]
fn test_daily_seed_drives_generation() {
    let seed = daily_seed(date!(2025 - 10 - 16));
    assert_eq!(seed, 20251016);
    assert_eq!(GameState::new(GameMode::Daily15, seed), GameState::new(GameMode::Daily15, seed));
    assert_ne!(
        GameState::new(GameMode::Daily15, seed),
        GameState::new(GameMode::Daily15, daily_seed(date!(2025 - 10 - 17)))
    );
}

// ============== Sliding ==============

#[test]
fn test_generated_grids_are_solvable() {
    for seed in 20250919..20251019 {
        let daily = SlidingPuzzle::new(4, seed);
        assert!(daily.is_solvable(), "daily seed {seed}");
        assert!(daily.is_well_formed(4));

        let blitz = SlidingPuzzle::new(3, seed * 1000);
        assert!(blitz.is_solvable(), "blitz seed {seed}");
    }
}

#[test]
fn test_non_adjacent_tap_leaves_state() {
    let mut puzzle = SlidingPuzzle::new(4, 20251016);
    for index in 0..16 {
        if puzzle.is_adjacent(index) {
            continue;
        }
        let before = puzzle.clone();
        assert!(!puzzle.apply_action(SlidingAction::Tap(index), 1));
        assert_eq!(puzzle.grid(), before.grid());
        assert_eq!(puzzle.empty_index(), before.empty_index());
        assert_eq!(puzzle.moves(), before.moves());
    }
}

#[test]
fn test_sliding_back_and_forth_counts_moves() {
    let mut puzzle = SlidingPuzzle::new(3, 42);
    let start = puzzle.empty_index();
    let tile = puzzle.movable_tiles()[0];

    assert!(puzzle.apply_action(SlidingAction::Tap(tile), 100));
    assert!(puzzle.apply_action(SlidingAction::Tap(start), 200));
    assert_eq!(puzzle.empty_index(), start);
    assert_eq!(puzzle.moves(), 2);
    assert_eq!(puzzle.start_time(), Some(100));
}

// ============== Packing ==============

#[test]
fn test_t_piece_rotation() {
    let t: Mask = vec![vec![1, 1, 1], vec![0, 1, 0]];
    assert_eq!(rotate_cw(&t), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
}

#[test]
fn test_daily_tray_is_one_cell_short() {
    for day in [date!(2025 - 11 - 28), date!(2025 - 12 - 25), date!(2026 - 03 - 01)] {
        let puzzle = PackingPuzzle::new(daily_seed(day));
        assert_eq!(puzzle.open_cells(), 30);
        assert_eq!(puzzle.catalog_cells(), 29);
        assert!(puzzle.solve().is_none());
    }
}

#[test]
fn test_blocked_and_out_of_bounds_placement_leave_grid() {
    let mut puzzle = PackingPuzzle::new(20251128);
    let o4 = puzzle.piece_by_name("O4").unwrap().id;
    puzzle.apply_action(PackingAction::SelectPiece(o4), 0);
    let board = puzzle.board().clone();

    for row in 0..6 {
        for col in 0..6 {
            let at = Coordinate::new(row, col);
            let fits = row < 5
                && col < 5
                && [(0, 0), (0, 1), (1, 0), (1, 1)]
                    .iter()
                    .all(|&(dr, dc)| board.is_free(Coordinate::new(row + dr, col + dc)));
            let mut attempt = puzzle.clone();
            let changed = attempt.apply_action(PackingAction::TapCell(at), 0);
            assert_eq!(changed, fits, "O4 at {row},{col}");
            if !fits {
                assert_eq!(attempt.board(), &board);
            }
        }
    }
}

#[test]
fn test_solver_steps_replay_to_completion() {
    let pieces = catalog();
    let mut tray = vec![pieces[1].clone(); 5];
    tray.extend(vec![pieces[0].clone(); 20]);
    let mut puzzle = PackingPuzzle::with_catalog(20251128, tray);
    assert_eq!(puzzle.catalog_cells(), puzzle.open_cells());

    let steps = puzzle.solve().expect("dominoes and unit cells always fit");
    let mut now = 1_000;
    for step in steps {
        assert!(puzzle.apply_action(PackingAction::SelectPiece(step.piece), now));
        for _ in 0..step.turns {
            assert!(puzzle.apply_action(PackingAction::SelectPiece(step.piece), now));
        }
        assert!(puzzle.apply_action(PackingAction::TapCell(step.target().unwrap()), now));
        for at in &step.cells {
            assert_eq!(puzzle.board().get(*at), Some(PackingCell::Piece(step.piece)));
        }
        now += 250;
    }

    assert!(puzzle.is_complete());
    assert!(puzzle.board().is_full());
    assert_eq!(puzzle.moves(), 25);
}

#[test]
fn test_completed_packing_is_frozen() {
    let unit = catalog().remove(0);
    let mut puzzle = PackingPuzzle::with_catalog(7, vec![unit; 30]);
    for id in 0..30u8 {
        let at = puzzle.board().first_empty().unwrap();
        puzzle.apply_action(PackingAction::SelectPiece(PieceId(id)), 0);
        puzzle.apply_action(PackingAction::TapCell(at), 0);
    }
    assert!(puzzle.is_complete());

    // Tapping a piece would normally remove it; a finished board ignores it
    let first = puzzle.board().cells().iter().position(|cell| cell.piece().is_some()).unwrap();
    let at = Coordinate::from_index(first, puzzle.board().size());
    assert!(!puzzle.apply_action(PackingAction::TapCell(at), 1));
    assert!(puzzle.is_complete());
}

// ============== Ranking ==============

#[test]
fn test_ranking_examples() {
    assert_eq!(rank(45).title, "Grandmaster");
    assert_eq!(rank(85).title, "Strategist");
    assert_eq!(rank(10_000).title, "Novice");
}
