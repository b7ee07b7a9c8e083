//! Daily Puzzles (workspace facade crate).
//!
//! Re-exports the member crates under one roof and adds the host layer:
//! [`config`] for environment settings and [`session`] for running one
//! puzzle with persistence.

pub mod config;
pub mod session;

pub use daily_puzzles_core as core;
pub use daily_puzzles_input as input;
pub use daily_puzzles_store as store;
pub use daily_puzzles_term as term;
pub use daily_puzzles_types as types;

pub use config::AppConfig;
pub use session::Session;
