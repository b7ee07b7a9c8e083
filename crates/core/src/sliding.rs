//! Sliding module - the sliding-tile puzzle engine
//!
//! The scrambled grid is produced by replaying random legal moves of the
//! empty cell from the solved grid, so every generated grid is reachable
//! from (and can therefore be returned to) the solved state.
//!
//! Tiles are labelled `1..size²-1`; `None` marks the single empty cell.
//! A tap on a tile orthogonally adjacent to the empty cell slides it in.
//! Everything else is ignored and leaves the state untouched.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ranking::rank;
use crate::rng::SeededRandom;
use crate::types::{
    Coordinate, GameMode, Ranking, BLITZ_SHUFFLE_MOVES, DAILY_GRID_SIZE, DAILY_SHUFFLE_MOVES,
};

/// One cell of the sliding grid (`None` = empty)
pub type Tile = Option<u8>;

/// Player input on the sliding grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlidingAction {
    /// Tap the cell at this flat index
    Tap(usize),
}

/// Number of shuffle moves replayed for a grid of this size
pub fn shuffle_moves(size: usize) -> u32 {
    if size >= DAILY_GRID_SIZE {
        DAILY_SHUFFLE_MOVES
    } else {
        BLITZ_SHUFFLE_MOVES
    }
}

/// Complete sliding puzzle state
///
/// Serialises with the field names a browser client would persist
/// (`grid`, `emptyIndex`, `moves`, `isComplete`, `startTime`, `endTime`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidingPuzzle {
    grid: Vec<Tile>,
    empty_index: usize,
    moves: u32,
    is_complete: bool,
    start_time: Option<u64>,
    end_time: Option<u64>,
}

impl SlidingPuzzle {
    /// The solved grid: `1..N-1` followed by the empty cell
    pub fn solved(size: usize) -> Self {
        let cells = size * size;
        let mut grid: Vec<Tile> = (1..cells).map(|label| Some(label as u8)).collect();
        grid.push(None);

        Self {
            grid,
            empty_index: cells - 1,
            moves: 0,
            is_complete: false,
            start_time: None,
            end_time: None,
        }
    }

    /// Generate a scrambled puzzle from `seed`
    pub fn new(size: usize, seed: i64) -> Self {
        let mut puzzle = Self::solved(size);
        let mut rng = SeededRandom::new(seed);
        puzzle.shuffle(&mut rng, shuffle_moves(size));
        debug!(size, seed, empty_index = puzzle.empty_index, "generated sliding puzzle");
        puzzle
    }

    /// Generate the puzzle for a sliding mode
    pub fn for_mode(mode: GameMode, seed: i64) -> Self {
        Self::new(mode.grid_size(), seed)
    }

    /// Replay `moves` random legal moves of the empty cell
    ///
    /// Returns the positions the empty cell visited, starting point first.
    fn shuffle(&mut self, rng: &mut SeededRandom, moves: u32) -> Vec<usize> {
        let mut path = Vec::with_capacity(moves as usize + 1);
        path.push(self.empty_index);
        let mut previous: Option<usize> = None;

        for _ in 0..moves {
            let legal = self.neighbors(self.empty_index);
            let fresh: ArrayVec<usize, 4> =
                legal.iter().copied().filter(|&idx| Some(idx) != previous).collect();

            let target = if fresh.is_empty() {
                legal[0]
            } else {
                fresh[rng.next_index(fresh.len())]
            };

            self.grid.swap(self.empty_index, target);
            previous = Some(self.empty_index);
            self.empty_index = target;
            path.push(target);
        }

        path
    }

    /// Grid edge length
    pub fn size(&self) -> usize {
        (self.grid.len() as f64).sqrt().round() as usize
    }

    pub fn grid(&self) -> &[Tile] {
        &self.grid
    }

    pub fn empty_index(&self) -> usize {
        self.empty_index
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

    /// Milliseconds from first move to completion (0 until both are known)
    pub fn elapsed_ms(&self) -> u64 {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.saturating_sub(start),
            _ => 0,
        }
    }

    /// Performance tier for the current move count
    pub fn ranking(&self) -> &'static Ranking {
        rank(self.moves)
    }

    /// In-bounds orthogonal neighbours of `index` (up, down, left, right)
    pub fn neighbors(&self, index: usize) -> ArrayVec<usize, 4> {
        let size = self.size();
        let at = Coordinate::from_index(index, size);
        let mut out = ArrayVec::new();
        if at.row > 0 {
            out.push(index - size);
        }
        if at.row + 1 < size {
            out.push(index + size);
        }
        if at.col > 0 {
            out.push(index - 1);
        }
        if at.col + 1 < size {
            out.push(index + 1);
        }
        out
    }

    /// Whether the tile at `index` is orthogonally adjacent to the empty cell
    pub fn is_adjacent(&self, index: usize) -> bool {
        if index >= self.grid.len() {
            return false;
        }
        let size = self.size();
        Coordinate::from_index(index, size).manhattan(Coordinate::from_index(self.empty_index, size)) == 1
    }

    /// Indices a tap would move right now
    pub fn movable_tiles(&self) -> ArrayVec<usize, 4> {
        if self.is_complete {
            return ArrayVec::new();
        }
        self.neighbors(self.empty_index)
    }

    /// Apply an action in place
    ///
    /// Returns true if the state changed. Taps on non-adjacent cells, the
    /// empty cell, out-of-range indices, or a completed puzzle are ignored.
    pub fn apply_action(&mut self, action: SlidingAction, now_ms: u64) -> bool {
        match action {
            SlidingAction::Tap(index) => self.try_slide(index, now_ms),
        }
    }

    /// Pure transition: the next state after `action`
    pub fn apply(mut self, action: SlidingAction, now_ms: u64) -> Self {
        self.apply_action(action, now_ms);
        self
    }

    fn try_slide(&mut self, index: usize, now_ms: u64) -> bool {
        if self.is_complete || !self.is_adjacent(index) {
            return false;
        }

        self.grid.swap(self.empty_index, index);
        self.empty_index = index;
        self.moves += 1;
        if self.start_time.is_none() {
            self.start_time = Some(now_ms);
        }

        if self.is_solved_grid() {
            self.is_complete = true;
            self.end_time = Some(now_ms);
            debug!(moves = self.moves, elapsed_ms = self.elapsed_ms(), "sliding puzzle solved");
        }
        true
    }

    /// Positions `0..N-2` hold `1..N-1` in order
    pub fn is_solved_grid(&self) -> bool {
        let last = self.grid.len().saturating_sub(1);
        self.grid[..last]
            .iter()
            .enumerate()
            .all(|(idx, tile)| *tile == Some(idx as u8 + 1))
    }

    /// Permutation-parity check, independent of how the grid was produced
    pub fn is_solvable(&self) -> bool {
        let size = self.size();
        let tiles: Vec<u8> = self.grid.iter().flatten().copied().collect();
        let mut inversions = 0usize;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    inversions += 1;
                }
            }
        }

        if size % 2 == 1 {
            inversions % 2 == 0
        } else {
            let empty_row = self.empty_index / size;
            (inversions + empty_row) % 2 == (size - 1) % 2
        }
    }

    /// Shape check for state restored from storage
    ///
    /// Exactly one empty cell at `emptyIndex`, every label `1..N-1` present
    /// once, and the completion flag agrees with the grid.
    pub fn is_well_formed(&self, size: usize) -> bool {
        let cells = size * size;
        if size < 2 || self.grid.len() != cells || self.empty_index >= cells {
            return false;
        }
        if self.grid[self.empty_index].is_some() || self.grid.iter().filter(|t| t.is_none()).count() != 1 {
            return false;
        }
        let mut seen = vec![false; cells];
        for label in self.grid.iter().flatten() {
            let label = *label as usize;
            if label == 0 || label >= cells || seen[label] {
                return false;
            }
            seen[label] = true;
        }
        !self.is_complete || self.is_solved_grid()
    }
}
