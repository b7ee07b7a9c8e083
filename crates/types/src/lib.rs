//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data: the engines in `daily-puzzles-core`, the
//! renderers and the host binary all speak in these terms.
//!
//! # Game Modes
//!
//! | Mode | Board | Seed | Persisted | Epoch |
//! |------|-------|------|-----------|-------|
//! | `Daily15` | 4x4 sliding | calendar date | yes | 2025-09-19 |
//! | `QuickBlitz` | 3x3 sliding | timestamp | no | - |
//! | `BlockLogic` | 6x6 packing | calendar date | no | 2025-11-28 |
//!
//! # Examples
//!
//! ```
//! use daily_puzzles_types::{GameMode, DAILY_15_RANKINGS};
//!
//! let mode: GameMode = "daily".parse().unwrap();
//! assert_eq!(mode, GameMode::Daily15);
//! assert_eq!(mode.grid_size(), 4);
//! assert_eq!(mode.title(), "The Fifteen");
//!
//! assert_eq!(DAILY_15_RANKINGS[0].title, "Grandmaster");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edge length of the daily sliding puzzle (4x4, "The Fifteen")
pub const DAILY_GRID_SIZE: usize = 4;

/// Edge length of the blitz sliding puzzle (3x3)
pub const BLITZ_GRID_SIZE: usize = 3;

/// Shuffle moves replayed from the solved 4x4 grid
pub const DAILY_SHUFFLE_MOVES: u32 = 250;

/// Shuffle moves replayed from the solved 3x3 grid
pub const BLITZ_SHUFFLE_MOVES: u32 = 50;

/// Edge length of the packing board (6x6)
pub const PACKING_GRID_SIZE: usize = 6;

/// Total cells on the packing board
pub const PACKING_CELLS: usize = PACKING_GRID_SIZE * PACKING_GRID_SIZE;

/// Number of fixed blockers dropped on the packing board each day
pub const BLOCKER_COUNT: usize = 6;

/// First day of the sliding puzzle series (year, month, day)
pub const DAILY_15_EPOCH: (i32, u8, u8) = (2025, 9, 19);

/// First day of the packing puzzle series (year, month, day)
pub const BLOCK_LOGIC_EPOCH: (i32, u8, u8) = (2025, 11, 28);

/// The playable game variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// 4x4 sliding puzzle, one per calendar day
    Daily15,
    /// 3x3 sliding puzzle, fresh every session
    QuickBlitz,
    /// 6x6 packing puzzle, one per calendar day
    BlockLogic,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Daily15, GameMode::QuickBlitz, GameMode::BlockLogic];

    /// Short CLI name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Daily15 => "daily",
            GameMode::QuickBlitz => "blitz",
            GameMode::BlockLogic => "block",
        }
    }

    /// Display title
    pub fn title(&self) -> &'static str {
        match self {
            GameMode::Daily15 => "The Fifteen",
            GameMode::QuickBlitz => "Quick Blitz",
            GameMode::BlockLogic => "Block Logic",
        }
    }

    /// Prefix of the persistence key (`<prefix>_<seed>`)
    pub fn storage_prefix(&self) -> &'static str {
        match self {
            GameMode::Daily15 => "daily15",
            GameMode::QuickBlitz => "blitz",
            GameMode::BlockLogic => "blocklogic",
        }
    }

    /// Whether the seed comes from the calendar date
    pub fn is_daily(&self) -> bool {
        !matches!(self, GameMode::QuickBlitz)
    }

    /// Whether the host saves state after every transition
    pub fn persists(&self) -> bool {
        matches!(self, GameMode::Daily15)
    }

    /// Whether this mode is played on the sliding-tile engine
    pub fn is_sliding(&self) -> bool {
        matches!(self, GameMode::Daily15 | GameMode::QuickBlitz)
    }

    /// Board edge length
    pub fn grid_size(&self) -> usize {
        match self {
            GameMode::Daily15 => DAILY_GRID_SIZE,
            GameMode::QuickBlitz => BLITZ_GRID_SIZE,
            GameMode::BlockLogic => PACKING_GRID_SIZE,
        }
    }

    /// Series epoch used for puzzle numbering, if the mode is numbered
    pub fn epoch(&self) -> Option<(i32, u8, u8)> {
        match self {
            GameMode::Daily15 => Some(DAILY_15_EPOCH),
            GameMode::QuickBlitz => None,
            GameMode::BlockLogic => Some(BLOCK_LOGIC_EPOCH),
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a mode name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game mode `{0}` (expected daily, blitz or block)")]
pub struct ParseModeError(pub String);

impl FromStr for GameMode {
    type Err = ParseModeError;

    /// Parse a mode name (case-insensitive)
    ///
    /// Accepts the short CLI names as well as a few aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "daily15" | "fifteen" => Ok(GameMode::Daily15),
            "blitz" | "quick" | "quickblitz" => Ok(GameMode::QuickBlitz),
            "block" | "blocks" | "blocklogic" => Ok(GameMode::BlockLogic),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// A (row, col) position on a square board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major flat index on a board of the given width
    pub fn to_index(self, width: usize) -> usize {
        self.row * width + self.col
    }

    /// Inverse of [`Coordinate::to_index`]
    pub fn from_index(index: usize, width: usize) -> Self {
        Self {
            row: index / width,
            col: index % width,
        }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(self, other: Coordinate) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

/// A performance bracket keyed by a maximum move count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ranking {
    pub title: &'static str,
    /// Inclusive upper bound; `u32::MAX` marks the open-ended fallback tier
    pub max_moves: u32,
    pub description: &'static str,
}

impl Ranking {
    /// Whether this is the open-ended fallback tier
    pub fn is_unbounded(&self) -> bool {
        self.max_moves == u32::MAX
    }
}

/// Sliding puzzle tiers, best first
pub const DAILY_15_RANKINGS: [Ranking; 5] = [
    Ranking {
        title: "Grandmaster",
        max_moves: 60,
        description: "A flawless display of logic.",
    },
    Ranking {
        title: "Strategist",
        max_moves: 90,
        description: "Highly efficient problem solving.",
    },
    Ranking {
        title: "Tactician",
        max_moves: 130,
        description: "A strong, calculated approach.",
    },
    Ranking {
        title: "Apprentice",
        max_moves: 180,
        description: "A solid effort with room to optimize.",
    },
    Ranking {
        title: "Novice",
        max_moves: u32::MAX,
        description: "Persistence is the path to mastery.",
    },
];
