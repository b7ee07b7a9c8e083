//! In-memory `StateStore` for tests and for sessions that never touch disk.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{StateStore, StoreError};

/// Shared in-memory store; clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryStoreInner>>,
}

#[derive(Default)]
struct MemoryStoreInner {
    data: HashMap<String, Vec<u8>>,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `load_raw` fail with `StoreError::Other`.
    pub fn set_fail_on_load(&self, fail: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.fail_on_load = fail;
    }

    /// Make every `save_raw` fail with `StoreError::Other`.
    pub fn set_fail_on_save(&self, fail: bool) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.fail_on_save = fail;
    }

    /// Number of `save_raw` attempts, failed ones included.
    pub fn save_count(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).save_count
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .data
            .contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .data
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl StateStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.fail_on_load {
            return Err(StoreError::Other("simulated load failure".into()));
        }
        inner.data.get(key).cloned().ok_or(StoreError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.save_count += 1;
        if inner.fail_on_save {
            return Err(StoreError::Other("simulated save failure".into()));
        }
        inner.data.insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_data() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.save_raw("a", b"1").unwrap();
        assert_eq!(other.load_raw("a").unwrap(), b"1".to_vec());
        assert_eq!(other.save_count(), 1);
        assert_eq!(other.keys(), vec!["a".to_string()]);
    }
}
