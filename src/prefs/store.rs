use std::time::Duration;

use crate::prefs::storage::{KeyValueStorage, StorageError};

/// Persisted key for the display theme.
pub const THEME_KEY: &str = "theme";
/// Persisted key for the API base URL.
pub const API_URL_KEY: &str = "core_x_api_url";

/// Simulated latency for the UI-facing settings save.
pub const SAVE_DELAY: Duration = Duration::from_millis(800);

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a persisted theme value. Unknown values are treated as absent.
    pub fn parse(value: &str) -> Option<Theme> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The small persisted user-setting bundle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreferenceRecord {
    pub theme: Theme,
    pub api_base_url: String,
}

/// Preference service backed by an injected key-value substrate.
///
/// Holds an in-memory cache of the record. Setters called before `load`
/// only touch the cache and are flushed by `load` after the persisted
/// values have been read, so an early write can never be clobbered by a
/// stale default and a default can never clobber a persisted value. After
/// load, every mutation persists synchronously and the cache and the
/// substrate never diverge.
pub struct PreferenceStore {
    storage: Box<dyn KeyValueStorage>,
    record: PreferenceRecord,
    loaded: bool,
    theme_dirty: bool,
    url_dirty: bool,
}

impl PreferenceStore {
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        Self {
            storage,
            record: PreferenceRecord::default(),
            loaded: false,
            theme_dirty: false,
            url_dirty: false,
        }
    }

    pub fn record(&self) -> &PreferenceRecord {
        &self.record
    }

    pub fn theme(&self) -> Theme {
        self.record.theme
    }

    pub fn api_base_url(&self) -> &str {
        &self.record.api_base_url
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load the persisted record. Missing or unreadable entries yield the
    /// field defaults; reading itself never fails. Fields written before
    /// load keep their in-memory value and are flushed to the substrate
    /// here. Idempotent: a repeat load with no intervening writes returns
    /// an identical record.
    pub fn load(&mut self) -> Result<&PreferenceRecord, StorageError> {
        let entries = self.storage.read_all();

        if !self.theme_dirty {
            self.record.theme = entries
                .get(THEME_KEY)
                .and_then(|v| Theme::parse(v))
                .unwrap_or_default();
        }
        if !self.url_dirty {
            self.record.api_base_url = entries.get(API_URL_KEY).cloned().unwrap_or_default();
        }

        self.loaded = true;

        // Flush writes that arrived before the load completed.
        if self.theme_dirty {
            self.storage.write(THEME_KEY, self.record.theme.as_str())?;
            self.theme_dirty = false;
        }
        if self.url_dirty {
            let url = self.record.api_base_url.clone();
            self.storage.write(API_URL_KEY, &url)?;
            self.url_dirty = false;
        }

        Ok(&self.record)
    }

    /// Update the theme. Persists immediately once loaded; before load the
    /// write is held in the cache and flushed by `load`.
    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.record.theme = theme;

        if self.loaded {
            self.storage.write(THEME_KEY, theme.as_str())?;
        } else {
            self.theme_dirty = true;
        }

        Ok(())
    }

    /// Flip between light and dark, returning the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        let next = self.record.theme.toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Update the API base URL. Any string is accepted and persisted
    /// verbatim; URL validation is out of scope.
    pub fn set_api_base_url(&mut self, url: &str) -> Result<(), StorageError> {
        self.record.api_base_url = url.to_string();

        if self.loaded {
            self.storage.write(API_URL_KEY, url)?;
        } else {
            self.url_dirty = true;
        }

        Ok(())
    }

    /// UI-facing save: simulates network latency before persisting, to
    /// drive a saving affordance. No retry, no failure path beyond file I/O.
    pub async fn save_api_base_url_delayed(&mut self, url: &str) -> Result<(), StorageError> {
        tokio::time::sleep(SAVE_DELAY).await;
        self.set_api_base_url(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::storage::MemoryStorage;

    fn store_with(entries: Vec<(&str, &str)>) -> PreferenceStore {
        let storage = MemoryStorage::with_entries(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        PreferenceStore::new(Box::new(storage))
    }

    #[test]
    fn test_load_empty_storage_yields_defaults() {
        let mut store = store_with(vec![]);
        let record = store.load().unwrap();

        assert_eq!(record.theme, Theme::Light);
        assert_eq!(record.api_base_url, "");
    }

    #[test]
    fn test_load_reads_persisted_values() {
        let mut store = store_with(vec![("theme", "dark"), ("core_x_api_url", "https://x")]);
        let record = store.load().unwrap().clone();

        assert_eq!(record.theme, Theme::Dark);
        assert_eq!(record.api_base_url, "https://x");

        // Repeat load with no intervening writes is identical.
        assert_eq!(store.load().unwrap(), &record);
    }

    #[test]
    fn test_unknown_theme_value_treated_as_absent() {
        let mut store = store_with(vec![("theme", "solarized")]);
        assert_eq!(store.load().unwrap().theme, Theme::Light);
    }

    #[test]
    fn test_write_before_load_wins_over_persisted_value() {
        use crate::prefs::storage::FileStorage;
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.toml");
        std::fs::write(&path, "theme = \"light\"\n").unwrap();

        // The load is still in flight; the user toggles anyway.
        let mut store = PreferenceStore::new(Box::new(FileStorage::new(&path)));
        store.set_theme(Theme::Dark).unwrap();
        assert!(!store.is_loaded());

        assert_eq!(store.load().unwrap().theme, Theme::Dark);

        // The late write, not the stale persisted value, survives.
        let mut reload = PreferenceStore::new(Box::new(FileStorage::new(&path)));
        assert_eq!(reload.load().unwrap().theme, Theme::Dark);
    }

    #[test]
    fn test_write_before_load_does_not_disturb_other_field() {
        let mut store = store_with(vec![("core_x_api_url", "https://persisted")]);

        store.set_theme(Theme::Dark).unwrap();
        let record = store.load().unwrap();

        assert_eq!(record.theme, Theme::Dark);
        assert_eq!(record.api_base_url, "https://persisted");
    }

    #[test]
    fn test_set_after_load_persists_synchronously() {
        let mut store = store_with(vec![]);
        store.load().unwrap();

        store.set_api_base_url("https://api.example.com/v1").unwrap();
        store.set_theme(Theme::Dark).unwrap();

        // A fresh load sees exactly the in-memory record.
        let record = store.record().clone();
        assert_eq!(store.load().unwrap(), &record);
    }

    #[test]
    fn test_toggle_theme_round_trip() {
        let mut store = store_with(vec![]);
        store.load().unwrap();

        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(store.toggle_theme().unwrap(), Theme::Light);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_save_persists_after_delay() {
        let mut store = store_with(vec![]);
        store.load().unwrap();

        store
            .save_api_base_url_delayed("https://api.example.com/v1")
            .await
            .unwrap();

        assert_eq!(store.api_base_url(), "https://api.example.com/v1");
        assert_eq!(store.load().unwrap().api_base_url, "https://api.example.com/v1");
    }
}
