//! Pieces module - packing piece catalog and mask rotation
//!
//! A piece shape is a rectangular 0/1 mask. Rotation rebuilds the mask
//! rather than looking it up, so any custom catalog rotates the same way as
//! the built-in one.

use serde::{Deserialize, Serialize};

/// Row-major occupancy mask (non-zero = occupied)
pub type Mask = Vec<Vec<u8>>;

/// Identifier stored in board cells for a placed piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u8);

/// A packing piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    /// Short display name, e.g. `"T4"`
    pub name: String,
    /// Current orientation of the mask (rotated in place)
    pub shape: Mask,
    /// `#RRGGBB` display colour
    pub color: String,
    /// Quarter turns applied so far, 0..=3
    pub rotation: u8,
    pub placed: bool,
}

impl Piece {
    pub fn new(id: PieceId, name: impl Into<String>, shape: Mask, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            shape,
            color: color.into(),
            rotation: 0,
            placed: false,
        }
    }

    /// Rotate 90° clockwise in place
    pub fn rotate(&mut self) {
        self.shape = rotate_cw(&self.shape);
        self.rotation = (self.rotation + 1) % 4;
    }

    /// Number of occupied cells
    pub fn size(&self) -> usize {
        cell_count(&self.shape)
    }
}

/// Built-in shapes, in tray order
const CATALOG_SHAPES: [(&str, &[&[u8]]); 9] = [
    ("I1", &[&[1]]),
    ("I2", &[&[1, 1]]),
    ("I3", &[&[1, 1, 1]]),
    ("L3", &[&[1, 0], &[1, 1]]),
    ("O4", &[&[1, 1], &[1, 1]]),
    ("T4", &[&[1, 1, 1], &[0, 1, 0]]),
    ("Z4", &[&[1, 1, 0], &[0, 1, 1]]),
    ("L4", &[&[1, 0, 0], &[1, 1, 1]]),
    ("I4", &[&[1, 1, 1, 1]]),
];

/// Tray colours, matched to `CATALOG_SHAPES` by position
const CATALOG_COLORS: [&str; 9] = [
    "#5D6D7E", "#A569BD", "#E74C3C", "#3498DB", "#1ABC9C", "#F39C12", "#D35400", "#2E86C1",
    "#27AE60",
];

/// The nine built-in pieces at rotation 0, unplaced
pub fn catalog() -> Vec<Piece> {
    CATALOG_SHAPES
        .iter()
        .zip(CATALOG_COLORS)
        .enumerate()
        .map(|(idx, ((name, rows), color))| {
            let shape = rows.iter().map(|row| row.to_vec()).collect();
            Piece::new(PieceId(idx as u8), *name, shape, color)
        })
        .collect()
}

/// Rotate a mask 90° clockwise: an R×C mask becomes C×R with
/// `new[c][R-1-r] = old[r][c]`
///
/// C is the longest row; shorter rows read as empty past their end.
pub fn rotate_cw(shape: &Mask) -> Mask {
    let rows = shape.len();
    let cols = shape.iter().map(Vec::len).max().unwrap_or(0);
    let mut rotated = vec![vec![0u8; rows]; cols];
    for (r, row) in shape.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            rotated[c][rows - 1 - r] = cell;
        }
    }
    rotated
}

/// Pad every row with empty cells to the longest row's width
pub fn rectangular(mut shape: Mask) -> Mask {
    let cols = shape.iter().map(Vec::len).max().unwrap_or(0);
    for row in shape.iter_mut() {
        row.resize(cols, 0);
    }
    shape
}

/// Occupied cells as `(row, col)` offsets, row-major
pub fn occupied_cells(shape: &Mask) -> impl Iterator<Item = (usize, usize)> + '_ {
    shape.iter().enumerate().flat_map(|(r, row)| {
        row.iter()
            .enumerate()
            .filter(|(_, &cell)| cell != 0)
            .map(move |(c, _)| (r, c))
    })
}

/// First occupied cell in row-major order
pub fn anchor(shape: &Mask) -> Option<(usize, usize)> {
    occupied_cells(shape).next()
}

/// Number of occupied cells
pub fn cell_count(shape: &Mask) -> usize {
    occupied_cells(shape).count()
}

/// The distinct orientations of a mask as `(quarter_turns, mask)` pairs
///
/// Quarter turns are counted clockwise from the given mask, so the first
/// entry is always `(0, shape)`.
pub fn orientations(shape: &Mask) -> Vec<(u8, Mask)> {
    let mut out: Vec<(u8, Mask)> = Vec::with_capacity(4);
    let mut current = shape.clone();
    for turns in 0..4u8 {
        if !out.iter().any(|(_, seen)| *seen == current) {
            out.push((turns, current.clone()));
        }
        current = rotate_cw(&current);
    }
    out
}
