//! Session module - one puzzle run with its clock and optional persistence
//!
//! The engines never see storage or time directly. A [`Session`] reads the
//! clock at each transition boundary and, for modes that persist, saves the
//! state after every change.

use tracing::{debug, info, warn};

use crate::core::seed::{puzzle_number_for, session_seed};
use crate::core::{Clock, GameAction, GameState, Placement};
use crate::store::{storage_key, SessionStore, StateStore, StoreError};
use crate::types::GameMode;

pub struct Session<C, S> {
    mode: GameMode,
    seed: i64,
    state: GameState,
    clock: C,
    store: Option<SessionStore<S>>,
    restored: bool,
}

impl<C, S> Session<C, S>
where
    C: Clock,
    S: StateStore,
{
    /// Start today's puzzle for `mode` (or a fresh blitz)
    pub fn start(mode: GameMode, clock: C, store: Option<SessionStore<S>>) -> Self {
        let seed = session_seed(mode, &clock);
        Self::start_with_seed(mode, seed, clock, store)
    }

    /// Start `mode` from an explicit seed, restoring saved progress if any
    pub fn start_with_seed(mode: GameMode, seed: i64, clock: C, store: Option<SessionStore<S>>) -> Self {
        let key = storage_key(mode, seed);
        let saved = if mode.persists() {
            store.as_ref().and_then(|store| restore(store, &key, mode))
        } else {
            None
        };

        let restored = saved.is_some();
        let state = saved.unwrap_or_else(|| GameState::new(mode, seed));
        info!(%mode, seed, restored, "session started");

        Self {
            mode,
            seed,
            state,
            clock,
            store,
            restored,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Whether the state came from storage rather than the generator
    pub fn restored(&self) -> bool {
        self.restored
    }

    pub fn storage_key(&self) -> String {
        storage_key(self.mode, self.seed)
    }

    pub fn puzzle_number(&self) -> Option<u32> {
        puzzle_number_for(self.mode, &self.clock)
    }

    /// Apply an action stamped with the clock's current time
    ///
    /// Returns whether the state changed. The state is updated even when the
    /// follow-up save fails; the error is returned so the host can report it.
    pub fn apply(&mut self, action: GameAction) -> Result<bool, StoreError> {
        let now = self.clock.timestamp_millis();
        if !self.state.apply_action(action, now) {
            debug!(?action, "action ignored");
            return Ok(false);
        }
        if self.state.is_complete() {
            info!(mode = %self.mode, moves = self.state.moves(), elapsed_ms = self.state.elapsed_ms(), "puzzle complete");
        }
        self.persist()?;
        Ok(true)
    }

    /// Put every packing piece back in the tray; false for sliding modes
    pub fn reset(&mut self) -> Result<bool, StoreError> {
        let Some(puzzle) = self.state.as_packing_mut() else {
            return Ok(false);
        };
        puzzle.reset();
        self.persist()?;
        Ok(true)
    }

    /// First step of a tiling that finishes the current packing board
    pub fn hint(&self) -> Option<Placement> {
        self.state
            .as_packing()
            .and_then(|puzzle| puzzle.solve())
            .and_then(|placements| placements.into_iter().next())
    }

    fn persist(&self) -> Result<(), StoreError> {
        if !self.mode.persists() {
            return Ok(());
        }
        let Some(store) = &self.store else {
            return Ok(());
        };
        store.save(&self.storage_key(), &self.state)
    }
}

fn restore<S: StateStore>(store: &SessionStore<S>, key: &str, mode: GameMode) -> Option<GameState> {
    match store.load::<GameState>(key) {
        Ok(Some(state)) if state.fits(mode) => Some(state),
        Ok(Some(_)) => {
            warn!(key, "saved state does not fit this mode, starting fresh");
            None
        }
        Ok(None) => None,
        Err(err) => {
            warn!(key, error = %err, "could not read saved state, starting fresh");
            None
        }
    }
}
