//! Board module - the 6x6 packing grid
//!
//! Each cell is empty, a fixed blocker, or holds the id of a placed piece.
//! Cells live in one flat vector in row-major order (`row * WIDTH + col`).

use serde::{Deserialize, Serialize};

use crate::pieces::{occupied_cells, Mask, PieceId};
use crate::types::{Coordinate, PACKING_CELLS, PACKING_GRID_SIZE};

/// A single packing-board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PackingCell {
    #[default]
    Empty,
    Blocker,
    Piece(PieceId),
}

impl PackingCell {
    pub fn is_empty(&self) -> bool {
        matches!(self, PackingCell::Empty)
    }

    /// Piece id held by this cell, if any
    pub fn piece(&self) -> Option<PieceId> {
        match self {
            PackingCell::Piece(id) => Some(*id),
            _ => None,
        }
    }
}

/// The packing board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingBoard {
    /// Flat row-major cells, always `PACKING_CELLS` long
    cells: Vec<PackingCell>,
}

impl PackingBoard {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: vec![PackingCell::Empty; PACKING_CELLS],
        }
    }

    #[inline(always)]
    fn index(row: isize, col: isize) -> Option<usize> {
        let size = PACKING_GRID_SIZE as isize;
        if row < 0 || row >= size || col < 0 || col >= size {
            return None;
        }
        Some((row * size + col) as usize)
    }

    pub fn size(&self) -> usize {
        PACKING_GRID_SIZE
    }

    /// Get the cell at `at`, or None when out of bounds
    pub fn get(&self, at: Coordinate) -> Option<PackingCell> {
        Self::index(at.row as isize, at.col as isize).and_then(|idx| self.cells.get(idx).copied())
    }

    /// Set the cell at `at`; returns false if out of bounds
    pub fn set(&mut self, at: Coordinate, cell: PackingCell) -> bool {
        match Self::index(at.row as isize, at.col as isize) {
            Some(idx) => match self.cells.get_mut(idx) {
                Some(slot) => {
                    *slot = cell;
                    true
                }
                None => false,
            },
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_free(&self, at: Coordinate) -> bool {
        matches!(self.get(at), Some(PackingCell::Empty))
    }

    /// Board cells a mask would cover with its anchor cell at `target`
    ///
    /// Returns None if any covered cell falls outside the board or the mask
    /// is empty. Occupancy is not checked here.
    pub fn footprint(mask: &Mask, anchor: (usize, usize), target: Coordinate) -> Option<Vec<Coordinate>> {
        let start_row = target.row as isize - anchor.0 as isize;
        let start_col = target.col as isize - anchor.1 as isize;
        let cells: Option<Vec<Coordinate>> = occupied_cells(mask)
            .map(|(r, c)| {
                let row = start_row + r as isize;
                let col = start_col + c as isize;
                Self::index(row, col).map(|_| Coordinate::new(row as usize, col as usize))
            })
            .collect();
        cells.filter(|cells| !cells.is_empty())
    }

    /// Write `id` into every cell of `footprint` if all of them are free
    ///
    /// Returns false without touching the board otherwise.
    pub fn fill(&mut self, footprint: &[Coordinate], id: PieceId) -> bool {
        if !footprint.iter().all(|&at| self.is_free(at)) {
            return false;
        }
        for &at in footprint {
            self.set(at, PackingCell::Piece(id));
        }
        true
    }

    /// Clear every cell holding `id`; returns how many were cleared
    pub fn clear_piece(&mut self, id: PieceId) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut() {
            if *cell == PackingCell::Piece(id) {
                *cell = PackingCell::Empty;
                cleared += 1;
            }
        }
        cleared
    }

    /// Every cell is a blocker or a piece
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Blocker positions, row-major
    pub fn blockers(&self) -> Vec<Coordinate> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == PackingCell::Blocker)
            .map(|(idx, _)| Coordinate::from_index(idx, PACKING_GRID_SIZE))
            .collect()
    }

    /// First empty cell in row-major order
    pub fn first_empty(&self) -> Option<Coordinate> {
        self.cells
            .iter()
            .position(PackingCell::is_empty)
            .map(|idx| Coordinate::from_index(idx, PACKING_GRID_SIZE))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[PackingCell] {
        &self.cells
    }
}

impl Default for PackingBoard {
    fn default() -> Self {
        Self::new()
    }
}
