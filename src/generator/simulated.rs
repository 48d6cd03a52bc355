use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::generator::client::{GenerationReport, GeneratorClient, GeneratorError, ProjectSpec};

/// Fixed latency of the simulated generation request.
pub const GENERATION_DELAY: Duration = Duration::from_secs(3);

/// Timer-backed stand-in for a real generation backend. Always succeeds.
pub struct SimulatedGenerator {
    delay: Duration,
}

impl SimulatedGenerator {
    pub fn new() -> Self {
        Self {
            delay: GENERATION_DELAY,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    fn scaffold_files(spec: &ProjectSpec) -> Vec<String> {
        let mut files = vec![
            "src/server.ts".to_string(),
            "src/routes/index.ts".to_string(),
            "src/db/supabase.ts".to_string(),
        ];

        for feature in &spec.features {
            match feature.as_str() {
                "auth" => files.push("src/services/auth.ts".to_string()),
                "crud" => files.push("src/routes/resources.ts".to_string()),
                "swagger" => files.push("docs/openapi.yaml".to_string()),
                "docker" => files.push("Dockerfile".to_string()),
                _ => {}
            }
        }

        if spec.schema_file.is_some() {
            files.push("src/db/schema.ts".to_string());
        }

        files
    }
}

impl Default for SimulatedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeneratorClient for SimulatedGenerator {
    async fn generate(&self, spec: &ProjectSpec) -> Result<GenerationReport, GeneratorError> {
        tokio::time::sleep(self.delay).await;

        let spec_json = serde_json::to_string_pretty(spec)
            .map_err(|e| GeneratorError::InvalidSpec(e.to_string()))?;

        let summary = format!(
            "Generated a {} backend on {} ({} feature(s)).\n\nProject spec:\n{}",
            spec.language,
            spec.database,
            spec.features.len(),
            spec_json
        );

        Ok(GenerationReport {
            summary,
            files: Self::scaffold_files(spec),
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ProjectSpec {
        ProjectSpec {
            description: "An invoicing API".to_string(),
            schema_file: Some("schema.sql".to_string()),
            language: "TypeScript".to_string(),
            database: "Supabase".to_string(),
            features: vec!["auth".to_string(), "docker".to_string()],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_always_succeeds() {
        let generator = SimulatedGenerator::new();
        let report = generator.generate(&spec()).await.unwrap();

        assert!(report.summary.contains("TypeScript"));
        assert!(report.summary.contains("An invoicing API"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scaffold_reflects_selections() {
        let generator = SimulatedGenerator::new();
        let report = generator.generate(&spec()).await.unwrap();

        assert!(report.files.contains(&"src/services/auth.ts".to_string()));
        assert!(report.files.contains(&"Dockerfile".to_string()));
        assert!(report.files.contains(&"src/db/schema.ts".to_string()));
        // Unselected features contribute nothing.
        assert!(!report.files.contains(&"docs/openapi.yaml".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_waits_for_fixed_delay() {
        let generator = SimulatedGenerator::new();
        let started = tokio::time::Instant::now();

        generator.generate(&spec()).await.unwrap();

        assert!(started.elapsed() >= GENERATION_DELAY);
    }
}
