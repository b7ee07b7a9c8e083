//! Game state module - one puzzle session, whichever engine it runs
//!
//! Hosts hold a [`GameState`] and feed it [`GameAction`]s; an action meant
//! for the other engine is ignored like any other invalid input.

use serde::{Deserialize, Serialize};

use crate::packing::{PackingAction, PackingPuzzle};
use crate::ranking::rank;
use crate::sliding::{SlidingAction, SlidingPuzzle};
use crate::types::{GameMode, Ranking};

/// Player input for either engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    Sliding(SlidingAction),
    Packing(PackingAction),
}

impl From<SlidingAction> for GameAction {
    fn from(action: SlidingAction) -> Self {
        GameAction::Sliding(action)
    }
}

impl From<PackingAction> for GameAction {
    fn from(action: PackingAction) -> Self {
        GameAction::Packing(action)
    }
}

/// State of one puzzle session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "state", rename_all = "lowercase")]
pub enum GameState {
    Sliding(SlidingPuzzle),
    Packing(PackingPuzzle),
}

impl GameState {
    /// Fresh puzzle for `mode` generated from `seed`
    pub fn new(mode: GameMode, seed: i64) -> Self {
        if mode.is_sliding() {
            GameState::Sliding(SlidingPuzzle::for_mode(mode, seed))
        } else {
            GameState::Packing(PackingPuzzle::new(seed))
        }
    }

    /// Apply an action in place; returns true if the state changed
    pub fn apply_action(&mut self, action: GameAction, now_ms: u64) -> bool {
        match (self, action) {
            (GameState::Sliding(puzzle), GameAction::Sliding(action)) => {
                puzzle.apply_action(action, now_ms)
            }
            (GameState::Packing(puzzle), GameAction::Packing(action)) => {
                puzzle.apply_action(action, now_ms)
            }
            _ => false,
        }
    }

    /// Pure transition: the next state after `action`
    pub fn apply(mut self, action: GameAction, now_ms: u64) -> Self {
        self.apply_action(action, now_ms);
        self
    }

    /// Whether a restored state fits `mode`
    pub fn fits(&self, mode: GameMode) -> bool {
        match self {
            GameState::Sliding(puzzle) => mode.is_sliding() && puzzle.is_well_formed(mode.grid_size()),
            GameState::Packing(puzzle) => !mode.is_sliding() && puzzle.is_well_formed(),
        }
    }

    pub fn as_sliding(&self) -> Option<&SlidingPuzzle> {
        match self {
            GameState::Sliding(puzzle) => Some(puzzle),
            GameState::Packing(_) => None,
        }
    }

    pub fn as_packing(&self) -> Option<&PackingPuzzle> {
        match self {
            GameState::Packing(puzzle) => Some(puzzle),
            GameState::Sliding(_) => None,
        }
    }

    pub fn as_packing_mut(&mut self) -> Option<&mut PackingPuzzle> {
        match self {
            GameState::Packing(puzzle) => Some(puzzle),
            GameState::Sliding(_) => None,
        }
    }

    pub fn moves(&self) -> u32 {
        match self {
            GameState::Sliding(puzzle) => puzzle.moves(),
            GameState::Packing(puzzle) => puzzle.moves(),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            GameState::Sliding(puzzle) => puzzle.is_complete(),
            GameState::Packing(puzzle) => puzzle.is_complete(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self {
            GameState::Sliding(puzzle) => puzzle.elapsed_ms(),
            GameState::Packing(puzzle) => puzzle.elapsed_ms(),
        }
    }

    /// Move-count tier; only sliding sessions are ranked
    pub fn ranking(&self) -> Option<&'static Ranking> {
        match self {
            GameState::Sliding(puzzle) => Some(rank(puzzle.moves())),
            GameState::Packing(_) => None,
        }
    }
}
