use std::path::{Path, PathBuf};

use corex::prefs::{FileStorage, PreferenceStore};
use tempfile::TempDir;

/// Helper to create a preference store over a scratch file
pub fn temp_store() -> (TempDir, PathBuf, PreferenceStore) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("preferences.toml");
    let store = store_at(&path);
    (temp_dir, path, store)
}

/// Helper to open a (second) store over an existing preference file
pub fn store_at(path: &Path) -> PreferenceStore {
    PreferenceStore::new(Box::new(FileStorage::new(path)))
}
