pub mod audit;
pub mod error;
pub mod generator;
pub mod newsletter;
pub mod prefs;
pub mod ui;
pub mod wizard;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult};
pub use prefs::{PreferenceRecord, PreferenceStore, Theme};
pub use wizard::{WizardSession, WizardStep};
