//! Session persistence module - storage port plus a typed JSON service
//!
//! Backends only move raw bytes under a string key ([`StateStore`]). The
//! [`SessionStore`] service owns the JSON encoding and the key layout
//! (`<mode prefix>_<seed>`, e.g. `daily15_20251016`).
//!
//! Anything unreadable in storage (missing, empty, or not valid JSON for the
//! requested type) loads as `None`, so a corrupt save never blocks play.

pub mod fs;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub use daily_puzzles_types as types;

pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::types::GameMode;

/// Storage port for raw state blobs (keyed by logical name).
pub trait StateStore {
    /// Load a raw blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError>;
    /// Persist a raw blob, replacing any previous value.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError>;
}

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Persistence key for a session: `<prefix>_<seed>`
pub fn storage_key(mode: GameMode, seed: i64) -> String {
    format!("{}_{}", mode.storage_prefix(), seed)
}

/// Serializes session state and delegates storage to a `StateStore`.
pub struct SessionStore<S> {
    store: S,
}

impl<S> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> SessionStore<S>
where
    S: StateStore,
{
    /// Load the value saved under `key`
    ///
    /// Returns `Ok(None)` when it is missing, empty, or does not decode as
    /// `T`. Only backend failures surface as errors.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let bytes = match self.store.load_raw(key) {
            Ok(bytes) => bytes,
            Err(StoreError::NotFound) => {
                debug!(key, "no saved state");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if bytes.is_empty() {
            warn!(key, "saved state is empty, ignoring");
            return Ok(None);
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                debug!(key, bytes = bytes.len(), "loaded saved state");
                Ok(Some(value))
            }
            Err(err) => {
                warn!(key, error = %err, "saved state is malformed, ignoring");
                Ok(None)
            }
        }
    }

    /// Serialize and persist `value` under `key` (last write wins)
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec(value)?;
        self.store.save_raw(key, &data)?;
        debug!(key, bytes = data.len(), "saved state");
        Ok(())
    }
}
