pub mod storage;
pub mod store;

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{PreferenceRecord, PreferenceStore, Theme, API_URL_KEY, THEME_KEY};
