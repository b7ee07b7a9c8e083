//! Filesystem-backed `StateStore` (one JSON file per key).

use std::fs;
use std::path::PathBuf;

use crate::{StateStore, StoreError};

/// Application directory name under the platform data dir
const APP_DIR: &str = "daily-puzzles";

/// Store state blobs as `<key>.json` files under a base directory.
#[derive(Debug, Clone)]
pub struct FsStore {
    base: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `base` (created on first save).
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(StoreError::Other(format!("invalid key `{key}`")));
        }
        Ok(self.base.join(format!("{key}.json")))
    }
}

/// Platform data directory for this application, if one can be resolved
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR))
}

impl StateStore for FsStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.base)?;
        // Write beside the target, then rename over it
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path().join("nested"));

        assert!(matches!(store.load_raw("daily15_1"), Err(StoreError::NotFound)));
        store.save_raw("daily15_1", b"{}").unwrap();
        assert_eq!(store.load_raw("daily15_1").unwrap(), b"{}".to_vec());
        assert!(dir.path().join("nested").join("daily15_1.json").is_file());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        assert!(matches!(store.save_raw("../escape", b"x"), Err(StoreError::Other(_))));
        assert!(matches!(store.load_raw(""), Err(StoreError::Other(_))));
    }
}
