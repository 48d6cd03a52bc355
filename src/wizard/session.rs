use std::collections::BTreeSet;

use crate::generator::client::{GenerationReport, ProjectSpec};
use crate::wizard::options::{self, Database, Language};

/// Which step of the fixed 2-step flow is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Overview,
    StackConfig,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Overview => 1,
            WizardStep::StackConfig => 2,
        }
    }
}

/// Accumulated form fields for the flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectFields {
    pub description: String,
    /// Display name of an attached schema artifact. Content is never read.
    pub schema_file: Option<String>,
    pub language: Language,
    pub database: Database,
    pub selected_features: BTreeSet<&'static str>,
}

/// Lifecycle of the simulated generation request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Complete(GenerationReport),
}

/// State machine for the project wizard.
///
/// Created fresh per session and fully reset by the "new project" action;
/// never persisted across runs. All operations are infallible: a transition
/// whose guard fails leaves the session unchanged.
#[derive(Debug, Default)]
pub struct WizardSession {
    step: WizardStep,
    fields: ProjectFields,
    submission: SubmissionState,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn fields(&self) -> &ProjectFields {
        &self.fields
    }

    /// Step 1 may only be left once a description or a schema artifact exists.
    pub fn can_advance(&self) -> bool {
        !self.fields.description.trim().is_empty() || self.fields.schema_file.is_some()
    }

    /// Advance to the stack configuration step. Returns false (and changes
    /// nothing) when the guard fails or step 2 is already active.
    pub fn advance(&mut self) -> bool {
        if self.step == WizardStep::Overview && self.can_advance() {
            self.step = WizardStep::StackConfig;
            true
        } else {
            false
        }
    }

    /// Return to the overview step. Always permitted.
    pub fn back(&mut self) {
        self.step = WizardStep::Overview;
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.fields.description = description.into();
    }

    /// Record the display name of an attached schema artifact.
    pub fn attach_schema(&mut self, name: impl Into<String>) {
        self.fields.schema_file = Some(name.into());
    }

    pub fn clear_schema(&mut self) {
        self.fields.schema_file = None;
    }

    /// Toggle a feature by symmetric difference: present becomes absent and
    /// vice versa. Unknown or unavailable features are ignored entirely.
    /// Returns whether the set changed.
    pub fn toggle_feature(&mut self, id: &str) -> bool {
        let Some(feature) = options::feature(id) else {
            return false;
        };
        if !feature.available {
            return false;
        }

        if !self.fields.selected_features.remove(feature.id) {
            self.fields.selected_features.insert(feature.id);
        }
        true
    }

    /// Replace the language. Ignored for options marked coming soon.
    pub fn set_language(&mut self, language: Language) -> bool {
        if language.is_available() {
            self.fields.language = language;
            true
        } else {
            false
        }
    }

    /// Replace the database. Ignored for options marked coming soon.
    pub fn set_database(&mut self, database: Database) -> bool {
        if database.is_available() {
            self.fields.database = database;
            true
        } else {
            false
        }
    }

    /// Return to step 1 with every field at its default, from any state.
    /// Also discards any pending or completed submission.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn is_generating(&self) -> bool {
        self.submission == SubmissionState::Pending
    }

    pub fn last_report(&self) -> Option<&GenerationReport> {
        match &self.submission {
            SubmissionState::Complete(report) => Some(report),
            _ => None,
        }
    }

    /// Submit is only reachable from the stack configuration step, and at
    /// most one submission may be in flight.
    pub fn can_submit(&self) -> bool {
        self.step == WizardStep::StackConfig && !self.is_generating()
    }

    /// Begin a generation request, returning the spec snapshot to generate
    /// from. A no-op (None) while a prior submission is still pending or
    /// when step 2 is not active.
    pub fn begin_submission(&mut self) -> Option<ProjectSpec> {
        if !self.can_submit() {
            return None;
        }

        self.submission = SubmissionState::Pending;
        Some(self.project_spec())
    }

    /// Record the acknowledgment of a finished generation. Does not change
    /// step. Ignored unless a submission is pending, so a completion that
    /// races a reset cannot resurrect discarded state.
    pub fn complete_submission(&mut self, report: GenerationReport) {
        if self.submission == SubmissionState::Pending {
            self.submission = SubmissionState::Complete(report);
        }
    }

    /// Abandon a pending submission without an acknowledgment.
    pub fn abort_submission(&mut self) {
        if self.submission == SubmissionState::Pending {
            self.submission = SubmissionState::Idle;
        }
    }

    /// Snapshot the current fields for the generation backend.
    pub fn project_spec(&self) -> ProjectSpec {
        ProjectSpec {
            description: self.fields.description.clone(),
            schema_file: self.fields.schema_file.clone(),
            language: self.fields.language.label().to_string(),
            database: self.fields.database.label().to_string(),
            features: self
                .fields
                .selected_features
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn report() -> GenerationReport {
        GenerationReport {
            summary: "done".to_string(),
            files: vec!["src/server.ts".to_string()],
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_new_session_defaults() {
        let session = WizardSession::new();

        assert_eq!(session.step(), WizardStep::Overview);
        assert_eq!(session.fields().language, Language::TypeScript);
        assert_eq!(session.fields().database, Database::Supabase);
        assert!(session.fields().description.is_empty());
        assert!(session.fields().schema_file.is_none());
        assert!(session.fields().selected_features.is_empty());
        assert_eq!(session.submission(), &SubmissionState::Idle);
    }

    #[test]
    fn test_advance_blocked_without_description_or_schema() {
        let mut session = WizardSession::new();

        assert!(!session.advance());
        assert_eq!(session.step(), WizardStep::Overview);

        // Whitespace alone does not satisfy the guard.
        session.set_description("   ");
        assert!(!session.advance());
        assert_eq!(session.step(), WizardStep::Overview);
    }

    #[test]
    fn test_advance_with_description() {
        let mut session = WizardSession::new();
        session.set_description("An invoicing API");

        assert!(session.advance());
        assert_eq!(session.step(), WizardStep::StackConfig);

        // Already on step 2: advance is a no-op.
        assert!(!session.advance());
    }

    #[test]
    fn test_advance_with_schema_only() {
        let mut session = WizardSession::new();
        session.attach_schema("schema.sql");

        assert!(session.advance());
        assert_eq!(session.step(), WizardStep::StackConfig);
    }

    #[test]
    fn test_back_is_unconditional() {
        let mut session = WizardSession::new();
        session.back();
        assert_eq!(session.step(), WizardStep::Overview);

        session.set_description("x");
        session.advance();
        session.back();
        assert_eq!(session.step(), WizardStep::Overview);
    }

    #[test]
    fn test_toggle_feature_parity() {
        let mut session = WizardSession::new();

        for n in 1..=5 {
            assert!(session.toggle_feature("docker"));
            let expected = n % 2 == 1;
            assert_eq!(session.fields().selected_features.contains("docker"), expected);
        }
    }

    #[test]
    fn test_toggle_unavailable_or_unknown_feature_ignored() {
        let mut session = WizardSession::new();

        assert!(!session.toggle_feature("cicd"));
        assert!(!session.toggle_feature("does-not-exist"));
        assert!(session.fields().selected_features.is_empty());
    }

    #[test]
    fn test_set_language_ignores_coming_soon() {
        let mut session = WizardSession::new();

        assert!(!session.set_language(Language::Python));
        assert_eq!(session.fields().language, Language::TypeScript);

        assert!(session.set_language(Language::TypeScript));
        assert_eq!(session.fields().language, Language::TypeScript);
    }

    #[test]
    fn test_set_database_ignores_coming_soon() {
        let mut session = WizardSession::new();

        assert!(!session.set_database(Database::MongoDb));
        assert_eq!(session.fields().database, Database::Supabase);
    }

    #[test]
    fn test_reset_yields_canonical_defaults() {
        let mut session = WizardSession::new();
        session.set_description("A chat backend");
        session.attach_schema("schema.sql");
        session.toggle_feature("auth");
        session.advance();
        session.begin_submission();

        session.reset();

        let fresh = WizardSession::new();
        assert_eq!(session.step(), fresh.step());
        assert_eq!(session.fields(), fresh.fields());
        assert_eq!(session.submission(), &SubmissionState::Idle);
    }

    #[test]
    fn test_submit_only_from_stack_config() {
        let mut session = WizardSession::new();
        session.set_description("x");

        assert!(session.begin_submission().is_none());

        session.advance();
        assert!(session.begin_submission().is_some());
    }

    #[test]
    fn test_submit_reentrancy_guard() {
        let mut session = WizardSession::new();
        session.set_description("x");
        session.advance();

        assert!(session.begin_submission().is_some());
        assert!(session.is_generating());

        // Second submit while pending is a no-op.
        assert!(session.begin_submission().is_none());

        session.complete_submission(report());
        assert!(session.last_report().is_some());
        assert_eq!(session.step(), WizardStep::StackConfig);

        // Completed: a new submission may begin.
        assert!(session.begin_submission().is_some());
    }

    #[test]
    fn test_late_completion_after_reset_is_ignored() {
        let mut session = WizardSession::new();
        session.set_description("x");
        session.advance();
        session.begin_submission();

        session.reset();
        session.complete_submission(report());

        assert_eq!(session.submission(), &SubmissionState::Idle);
    }

    #[test]
    fn test_abort_submission() {
        let mut session = WizardSession::new();
        session.set_description("x");
        session.advance();
        session.begin_submission();

        session.abort_submission();
        assert_eq!(session.submission(), &SubmissionState::Idle);
        assert!(session.can_submit());
    }

    #[test]
    fn test_project_spec_snapshot() {
        let mut session = WizardSession::new();
        session.set_description("An invoicing API");
        session.attach_schema("schema.sql");
        session.toggle_feature("crud");
        session.toggle_feature("auth");

        let spec = session.project_spec();
        assert_eq!(spec.description, "An invoicing API");
        assert_eq!(spec.schema_file.as_deref(), Some("schema.sql"));
        assert_eq!(spec.language, "TypeScript");
        assert_eq!(spec.database, "Supabase");
        assert_eq!(spec.features, vec!["auth".to_string(), "crud".to_string()]);
    }
}
