pub mod options;
pub mod session;

pub use options::{Database, Feature, Language, FEATURES};
pub use session::{ProjectFields, SubmissionState, WizardSession, WizardStep};
