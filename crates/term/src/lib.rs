//! Terminal "puzzle renderer" module.
//!
//! Puzzles are drawn into a small framebuffer of styled cells and then
//! written out line by line, with or without 24-bit colour.
//!
//! - [`fb`]: framebuffer and style types
//! - [`puzzle_view`]: pure layout of a game state into a framebuffer
//! - [`renderer`]: encoding a framebuffer to a `Write` sink

pub mod fb;
pub mod puzzle_view;
pub mod renderer;

pub use daily_puzzles_core as core;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use puzzle_view::{Header, PuzzleView};
pub use renderer::{encode_lines_into, LineRenderer};
