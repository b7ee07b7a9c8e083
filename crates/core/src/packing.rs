//! Packing module - the grid-packing puzzle engine
//!
//! A daily 6x6 board gets six blockers from the seeded generator; the player
//! fills the remaining cells with the tray of pieces. Pieces are dropped by
//! their anchor (first occupied mask cell) onto the tapped cell.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::board::{PackingBoard, PackingCell};
use crate::pieces::{self, Piece, PieceId};
use crate::rng::SeededRandom;
use crate::solver::{self, Placement};
use crate::types::{Coordinate, BLOCKER_COUNT, PACKING_CELLS, PACKING_GRID_SIZE};

/// Upper bound on rejection-sampling draws while placing blockers
const MAX_BLOCKER_DRAWS: u32 = 10_000;

/// Player input on the packing board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackingAction {
    /// Select a tray piece, or rotate it if it is already selected
    SelectPiece(PieceId),
    /// Tap a board cell: remove the piece there, or drop the selection
    TapCell(Coordinate),
}

/// Complete packing puzzle state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingPuzzle {
    seed: i64,
    board: PackingBoard,
    pieces: Vec<Piece>,
    selected: Option<PieceId>,
    moves: u32,
    is_complete: bool,
    start_time: Option<u64>,
    end_time: Option<u64>,
}

impl PackingPuzzle {
    /// Generate the daily layout for `seed` with the built-in tray
    pub fn new(seed: i64) -> Self {
        Self::with_catalog(seed, pieces::catalog())
    }

    /// Generate the layout for `seed` with a custom tray
    ///
    /// Ids are reassigned by tray position so they stay unique, ragged masks
    /// are padded to rectangles, and every piece starts unplaced at rotation 0.
    pub fn with_catalog(seed: i64, catalog: Vec<Piece>) -> Self {
        let pieces: Vec<Piece> = catalog
            .into_iter()
            .take(u8::MAX as usize + 1)
            .enumerate()
            .map(|(idx, piece)| Piece {
                id: PieceId(idx as u8),
                shape: pieces::rectangular(piece.shape),
                rotation: 0,
                placed: false,
                ..piece
            })
            .collect();

        let board = seeded_board(seed);
        debug!(seed, pieces = pieces.len(), blockers = ?board.blockers(), "generated packing puzzle");

        Self {
            seed,
            board,
            pieces,
            selected: None,
            moves: 0,
            is_complete: false,
            start_time: None,
            end_time: None,
        }
    }

    /// Regenerate the same layout: blockers kept, every piece back in the tray
    pub fn reset(&mut self) {
        for piece in self.pieces.iter_mut() {
            while piece.rotation != 0 {
                piece.rotate();
            }
            piece.placed = false;
        }
        self.board = seeded_board(self.seed);
        self.selected = None;
        self.moves = 0;
        self.is_complete = false;
        self.start_time = None;
        self.end_time = None;
        debug!(seed = self.seed, "packing puzzle reset");
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn board(&self) -> &PackingBoard {
        &self.board
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.id == id)
    }

    /// Look a tray piece up by its display name (case-insensitive)
    pub fn piece_by_name(&self, name: &str) -> Option<&Piece> {
        self.pieces.iter().find(|piece| piece.name.eq_ignore_ascii_case(name))
    }

    pub fn selected(&self) -> Option<PieceId> {
        self.selected
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn start_time(&self) -> Option<u64> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<u64> {
        self.end_time
    }

    /// Milliseconds from first placement to completion (0 until both are known)
    pub fn elapsed_ms(&self) -> u64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }

    /// Cells not taken by blockers
    pub fn open_cells(&self) -> usize {
        PACKING_CELLS - self.board.blockers().len()
    }

    /// Total cells covered by the whole tray
    pub fn catalog_cells(&self) -> usize {
        self.pieces.iter().map(Piece::size).sum()
    }

    /// Cells the pieces still in the tray would cover
    pub fn tray_cells_left(&self) -> usize {
        self.pieces
            .iter()
            .filter(|piece| !piece.placed)
            .map(Piece::size)
            .sum()
    }

    /// Empty cells the tray cannot reach even in the best case
    ///
    /// Non-zero means no tiling exists. The built-in tray starts one short.
    pub fn shortfall(&self) -> usize {
        self.board.empty_count().saturating_sub(self.tray_cells_left())
    }

    /// Search for a tiling of the empty cells with the unplaced pieces
    pub fn solve(&self) -> Option<Vec<Placement>> {
        solver::solve(&self.board, &self.pieces)
    }

    /// Apply an action in place
    ///
    /// Returns true if the state changed. Once complete, nothing changes.
    pub fn apply_action(&mut self, action: PackingAction, now_ms: u64) -> bool {
        if self.is_complete {
            return false;
        }

        match action {
            PackingAction::SelectPiece(id) => self.select_piece(id),
            PackingAction::TapCell(at) => match self.board.get(at) {
                Some(PackingCell::Piece(id)) => self.remove_piece(id),
                Some(PackingCell::Empty) => self.place_selected(at, now_ms),
                Some(PackingCell::Blocker) | None => false,
            },
        }
    }

    /// Pure transition: the next state after `action`
    pub fn apply(mut self, action: PackingAction, now_ms: u64) -> Self {
        self.apply_action(action, now_ms);
        self
    }

    fn select_piece(&mut self, id: PieceId) -> bool {
        let already_selected = self.selected == Some(id);
        let Some(piece) = self.pieces.iter_mut().find(|piece| piece.id == id) else {
            return false;
        };
        if piece.placed {
            return false;
        }

        if already_selected {
            piece.rotate();
        } else {
            self.selected = Some(id);
        }
        true
    }

    fn remove_piece(&mut self, id: PieceId) -> bool {
        self.board.clear_piece(id);
        if let Some(piece) = self.pieces.iter_mut().find(|piece| piece.id == id) {
            piece.placed = false;
        }
        self.selected = None;
        self.moves += 1;
        true
    }

    fn place_selected(&mut self, at: Coordinate, now_ms: u64) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(piece) = self.pieces.iter_mut().find(|piece| piece.id == id) else {
            return false;
        };
        if piece.placed {
            return false;
        }

        let Some(anchor) = pieces::anchor(&piece.shape) else {
            return false;
        };
        let Some(footprint) = PackingBoard::footprint(&piece.shape, anchor, at) else {
            return false;
        };
        if !self.board.fill(&footprint, id) {
            return false;
        }

        piece.placed = true;
        self.selected = None;
        self.moves += 1;
        if self.start_time.is_none() {
            self.start_time = Some(now_ms);
        }

        if self.board.is_full() {
            self.is_complete = true;
            self.end_time = Some(now_ms);
            debug!(moves = self.moves, elapsed_ms = self.elapsed_ms(), "packing puzzle solved");
        }
        true
    }

    /// Shape check for state restored from storage
    ///
    /// Exactly `BLOCKER_COUNT` blockers, every piece cell on the board
    /// matches a placed piece of the right size, and the completion flag
    /// agrees with the board.
    pub fn is_well_formed(&self) -> bool {
        if self.board.cells().len() != PACKING_CELLS || self.board.blockers().len() != BLOCKER_COUNT {
            return false;
        }
        for piece in &self.pieces {
            let on_board = self
                .board
                .cells()
                .iter()
                .filter(|cell| cell.piece() == Some(piece.id))
                .count();
            let expected = if piece.placed { piece.size() } else { 0 };
            if on_board != expected || piece.rotation > 3 {
                return false;
            }
        }
        let stray = self
            .board
            .cells()
            .iter()
            .filter_map(PackingCell::piece)
            .any(|id| self.piece(id).is_none());
        !stray && self.is_complete == self.board.is_full()
    }
}

/// Empty board with blockers drawn from a generator seeded with `seed`
fn seeded_board(seed: i64) -> PackingBoard {
    let mut rng = SeededRandom::new(seed);
    place_blockers(|| {
        let row = rng.next_index(PACKING_GRID_SIZE);
        let col = rng.next_index(PACKING_GRID_SIZE);
        Coordinate::new(row, col)
    })
}

/// Empty board with `BLOCKER_COUNT` blockers at positions from `draw`
///
/// Occupied cells are redrawn. If `MAX_BLOCKER_DRAWS` is exhausted, the
/// remaining blockers go to the first free cells in row-major order.
fn place_blockers(mut draw: impl FnMut() -> Coordinate) -> PackingBoard {
    let mut board = PackingBoard::new();
    let mut placed = 0;
    let mut draws = 0;

    while placed < BLOCKER_COUNT {
        if draws >= MAX_BLOCKER_DRAWS {
            warn!(placed, draws, "blocker sampling exhausted, filling row-major");
            while placed < BLOCKER_COUNT {
                let Some(at) = board.first_empty() else { break };
                board.set(at, PackingCell::Blocker);
                placed += 1;
            }
            break;
        }

        let at = draw();
        draws += 1;
        if board.is_free(at) {
            board.set(at, PackingCell::Blocker);
            placed += 1;
        }
    }

    board
}
