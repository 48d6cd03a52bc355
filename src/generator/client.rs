use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Errors a generation backend may surface.
///
/// The bundled simulation never fails; these variants exist so a real
/// backend can slot in behind `GeneratorClient` without touching call sites.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Generation backend unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid project spec: {0}")]
    InvalidSpec(String),
}

/// Snapshot of the wizard fields handed to the generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSpec {
    pub description: String,
    pub schema_file: Option<String>,
    pub language: String,
    pub database: String,
    pub features: Vec<String>,
}

/// Acknowledgment surfaced when a generation request finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub summary: String,
    /// Scaffold files the backend claims to have produced.
    pub files: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

/// A backend that turns a project spec into generated code, after
/// unspecified latency.
#[async_trait]
pub trait GeneratorClient: Send + Sync {
    async fn generate(&self, spec: &ProjectSpec) -> Result<GenerationReport, GeneratorError>;
}
