//! Solver module - exact-cover search for packing boards
//!
//! Depth-first: always fill the first empty cell in row-major order, trying
//! every unused piece in every distinct orientation with its anchor on that
//! cell. Any tiling must cover that cell with some piece's anchor, so the
//! search is complete. Branches are cut as soon as the unused pieces hold
//! fewer cells than the board has left open, and duplicate pieces are only
//! tried once per cell.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{PackingBoard, PackingCell};
use crate::pieces::{anchor, orientations, Mask, Piece, PieceId};
use crate::types::Coordinate;

/// One step of a solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub piece: PieceId,
    /// Clockwise quarter turns from the piece's current orientation
    pub turns: u8,
    /// Covered cells, row-major; the first one is where the anchor lands
    pub cells: Vec<Coordinate>,
}

impl Placement {
    /// The cell to tap once the piece is selected and rotated
    pub fn target(&self) -> Option<Coordinate> {
        self.cells.first().copied()
    }
}

struct Candidate {
    id: PieceId,
    size: usize,
    orientations: Vec<(u8, Mask)>,
}

/// Find placements of the unplaced `pieces` that leave `board` full
///
/// Pieces already marked placed are skipped. Returns `Some(vec![])` for a
/// board with no empty cells and None when no tiling exists.
pub fn solve(board: &PackingBoard, pieces: &[Piece]) -> Option<Vec<Placement>> {
    let candidates: Vec<Candidate> = pieces
        .iter()
        .filter(|piece| !piece.placed && piece.size() > 0)
        .map(|piece| Candidate {
            id: piece.id,
            size: piece.size(),
            orientations: orientations(&piece.shape),
        })
        .collect();

    let mut work = board.clone();
    let mut used = vec![false; candidates.len()];
    let mut path = Vec::new();
    let remaining: usize = candidates.iter().map(|c| c.size).sum();

    let found = search(&mut work, &candidates, &mut used, remaining, &mut path);
    debug!(found, empty = board.empty_count(), pieces = candidates.len(), "packing search finished");
    found.then_some(path)
}

fn search(
    board: &mut PackingBoard,
    candidates: &[Candidate],
    used: &mut [bool],
    remaining: usize,
    path: &mut Vec<Placement>,
) -> bool {
    let Some(target) = board.first_empty() else {
        return true;
    };
    if remaining < board.empty_count() {
        return false;
    }

    for (slot, candidate) in candidates.iter().enumerate() {
        if used[slot] || shadowed(candidates, used, slot) {
            continue;
        }
        for (turns, mask) in &candidate.orientations {
            let Some(anchor) = anchor(mask) else { continue };
            let Some(cells) = PackingBoard::footprint(mask, anchor, target) else {
                continue;
            };
            if !board.fill(&cells, candidate.id) {
                continue;
            }

            used[slot] = true;
            path.push(Placement {
                piece: candidate.id,
                turns: *turns,
                cells,
            });
            if search(board, candidates, used, remaining - candidate.size, path) {
                return true;
            }
            if let Some(undo) = path.pop() {
                for at in undo.cells {
                    board.set(at, PackingCell::Empty);
                }
            }
            used[slot] = false;
        }
    }
    false
}

/// An earlier unused candidate has the same shape, so trying this one
/// would only revisit the same boards
fn shadowed(candidates: &[Candidate], used: &[bool], slot: usize) -> bool {
    let shape = &candidates[slot].orientations;
    candidates[..slot]
        .iter()
        .zip(used)
        .any(|(earlier, &taken)| !taken && earlier.orientations == *shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::catalog;
    use crate::types::{PACKING_CELLS, PACKING_GRID_SIZE};

    /// Board with only `open` cells empty
    fn board_with_open(open: &[(usize, usize)]) -> PackingBoard {
        let mut board = PackingBoard::new();
        for idx in 0..PACKING_CELLS {
            let at = Coordinate::from_index(idx, PACKING_GRID_SIZE);
            if !open.contains(&(at.row, at.col)) {
                board.set(at, PackingCell::Blocker);
            }
        }
        board
    }

    fn named(names: &[&str]) -> Vec<Piece> {
        catalog()
            .into_iter()
            .filter(|piece| names.contains(&piece.name.as_str()))
            .collect()
    }

    #[test]
    fn test_square_hole_takes_o4() {
        let board = board_with_open(&[(2, 2), (2, 3), (3, 2), (3, 3)]);
        let solution = solve(&board, &named(&["T4", "O4"])).unwrap();
        assert_eq!(solution.len(), 1);
        assert_eq!(solution[0].piece, PieceId(4));
        assert_eq!(solution[0].target(), Some(Coordinate::new(2, 2)));
    }

    #[test]
    fn test_needs_rotation() {
        // Vertical bar of three
        let board = board_with_open(&[(0, 5), (1, 5), (2, 5)]);
        let solution = solve(&board, &named(&["I3"])).unwrap();
        assert_eq!(solution[0].turns, 1);
        assert_eq!(
            solution[0].cells,
            vec![Coordinate::new(0, 5), Coordinate::new(1, 5), Coordinate::new(2, 5)]
        );
    }

    #[test]
    fn test_anchor_not_at_mask_origin() {
        // T4 pointing left: its anchor is the top cell, right of the nub
        let board = board_with_open(&[(0, 3), (1, 2), (1, 3), (2, 3)]);
        let solution = solve(&board, &named(&["T4"])).unwrap();
        assert_eq!(solution[0].turns, 1);
        assert_eq!(solution[0].target(), Some(Coordinate::new(0, 3)));
    }

    #[test]
    fn test_no_tiling() {
        let board = board_with_open(&[(0, 0), (0, 1), (0, 2), (1, 0)]);
        assert!(solve(&board, &named(&["T4"])).is_none());
        assert!(solve(&board, &named(&["I1", "I2"])).is_none());
    }

    #[test]
    fn test_combination_of_pieces() {
        let board = board_with_open(&[(5, 0), (5, 1), (5, 2), (5, 3), (5, 4), (5, 5)]);
        let solution = solve(&board, &named(&["I1", "I2", "I3", "O4"])).unwrap();
        let covered: usize = solution.iter().map(|p| p.cells.len()).sum();
        assert_eq!(covered, 6);
        assert!(solution.iter().all(|p| p.piece != PieceId(4)));
    }

    #[test]
    fn test_full_board_is_trivially_solved() {
        let board = board_with_open(&[]);
        assert_eq!(solve(&board, &catalog()), Some(vec![]));
    }

    #[test]
    fn test_duplicate_pieces_fail_fast() {
        // Odd hole, only dominoes: every ordering fails the same way
        let open: Vec<(usize, usize)> = (0..5).flat_map(|r| (0..5).map(move |c| (r, c))).collect();
        let board = board_with_open(&open);
        let domino = catalog().remove(1);
        assert!(solve(&board, &vec![domino; 13]).is_none());
    }

    #[test]
    fn test_search_does_not_touch_input() {
        let board = board_with_open(&[(0, 0), (0, 1)]);
        let before = board.clone();
        solve(&board, &named(&["I2"]));
        assert_eq!(board, before);
    }
}
