use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write preference file: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize preferences: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Preference directory not found")]
    DirectoryNotFound,
}

/// Durable key-value substrate for user preferences.
///
/// Reads are infallible: a missing or unreadable entry is simply absent.
/// Implementations are injected into `PreferenceStore` so callers never
/// reach into ambient storage directly.
pub trait KeyValueStorage: Send {
    /// Read all persisted entries. Absent or corrupt state yields an empty map.
    fn read_all(&self) -> HashMap<String, String>;

    /// Persist a single entry, overwriting any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: a flat TOML table of string keys.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the preference directory path
    pub fn preference_dir() -> Result<PathBuf, StorageError> {
        let home = std::env::var("HOME").map_err(|_| StorageError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("corex"))
    }

    /// Get the default preference file path
    pub fn default_path() -> Result<PathBuf, StorageError> {
        Ok(Self::preference_dir()?.join("preferences.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStorage for FileStorage {
    fn read_all(&self) -> HashMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return HashMap::new();
        };

        // A corrupt file is treated the same as an absent one.
        toml::from_str(&contents).unwrap_or_default()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(&entries)?;
        fs::write(&self.path, contents)?;

        Ok(())
    }
}

/// In-process storage for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the storage with pre-existing entries.
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read_all(&self) -> HashMap<String, String> {
        self.entries.clone()
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
