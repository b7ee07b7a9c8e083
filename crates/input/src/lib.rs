//! Text input module (host-facing).
//!
//! Maps one typed line into a [`Command`] for the current game. Board
//! positions are typed 1-based (`row col`), matching the rendered labels.

pub mod command;

pub use daily_puzzles_core as core;

pub use command::{parse_command, Command, CommandError};
