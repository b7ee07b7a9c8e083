//! Core puzzle logic module - pure, deterministic, and testable
//!
//! The engines are a function of a seed and a sequence of actions: every
//! transition takes its timestamp as an argument and nothing here touches
//! UI or storage. The [`seed::Clock`] implementations are the only code that
//! reads the OS clock, and hosts choose which one to pass in.
//!
//! # Module Structure
//!
//! - [`rng`]: Park-Miller generator shared by every puzzle
//! - [`seed`]: calendar date to seed and puzzle number, behind a [`seed::Clock`] port
//! - [`sliding`]: sliding-tile engine (shuffle by simulation, taps, completion)
//! - [`board`], [`pieces`], [`packing`]: 6x6 grid-packing engine
//! - [`solver`]: tiling search for a packing board
//! - [`ranking`]: move-count tiers and time formatting
//! - [`game_state`]: one session of either engine behind a single action type
//!
//! # Example
//!
//! ```
//! use daily_puzzles_core::{GameState, SlidingAction};
//! use daily_puzzles_core::types::GameMode;
//!
//! let mut game = GameState::new(GameMode::QuickBlitz, 12345);
//! let tile = game.as_sliding().unwrap().movable_tiles()[0];
//!
//! assert!(game.apply_action(SlidingAction::Tap(tile).into(), 1_000));
//! assert_eq!(game.moves(), 1);
//! ```

pub mod board;
pub mod game_state;
pub mod packing;
pub mod pieces;
pub mod ranking;
pub mod rng;
pub mod seed;
pub mod sliding;
pub mod solver;

pub use daily_puzzles_types as types;

// Re-export commonly used types for convenience
pub use board::{PackingBoard, PackingCell};
pub use game_state::{GameAction, GameState};
pub use packing::{PackingAction, PackingPuzzle};
pub use pieces::{Piece, PieceId};
pub use ranking::{format_time, next_tier, rank};
pub use rng::SeededRandom;
pub use seed::{daily_seed, puzzle_number, Clock, FixedClock, PinnedDateClock, SystemClock};
pub use sliding::{SlidingAction, SlidingPuzzle};
pub use solver::Placement;
