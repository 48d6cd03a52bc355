use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::generator::client::ProjectSpec;

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Append-only activity log for generation requests and settings saves.
/// Logging failures are never surfaced to the user.
pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    /// Create a new ActivityLogger with the default log path
    pub fn new() -> std::io::Result<Self> {
        let log_path = Self::default_log_path()?;
        Self::with_path(log_path)
    }

    /// Create an ActivityLogger with a custom log path
    pub fn with_path<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let log_path = path.as_ref().to_path_buf();

        // Ensure directory exists
        if let Some(parent) = log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(Self { log_path })
    }

    /// Get the default log path: ~/.config/corex/activity.log
    fn default_log_path() -> std::io::Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "HOME environment variable not set",
            )
        })?;

        Ok(PathBuf::from(home)
            .join(".config")
            .join("corex")
            .join("activity.log"))
    }

    /// Log a generation request
    pub fn log_generation(&self, spec: &ProjectSpec) -> std::io::Result<()> {
        let entry = format!(
            "[GENERATE] language={} database={} features={} schema={}",
            spec.language,
            spec.database,
            spec.features.join(","),
            spec.schema_file.as_deref().unwrap_or("-"),
        );
        self.append(&entry)
    }

    /// Log a settings save
    pub fn log_settings_save(&self, api_url: &str) -> std::io::Result<()> {
        self.append(&format!("[SETTINGS] core_x_api_url=\"{}\"", api_url))
    }

    fn append(&self, entry: &str) -> std::io::Result<()> {
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
        let line = format!("[{}] [{}] {}\n", timestamp, user, entry);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.log_path)?;
        if metadata.len() > MAX_LOG_SIZE {
            // Rotate: activity.log -> activity.log.1
            let backup_path = self.log_path.with_extension("log.1");
            fs::rename(&self.log_path, backup_path)?;
        }

        Ok(())
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn spec() -> ProjectSpec {
        ProjectSpec {
            description: "An invoicing API".to_string(),
            schema_file: None,
            language: "TypeScript".to_string(),
            database: "Supabase".to_string(),
            features: vec!["auth".to_string(), "crud".to_string()],
        }
    }

    #[test]
    fn test_create_logger() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = ActivityLogger::with_path(&log_path).unwrap();
        assert_eq!(logger.log_path(), log_path);
    }

    #[test]
    fn test_log_generation() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = ActivityLogger::with_path(&log_path).unwrap();
        logger.log_generation(&spec()).unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("[GENERATE]"));
        assert!(content.contains("language=TypeScript"));
        assert!(content.contains("features=auth,crud"));
        assert!(content.contains("schema=-"));
    }

    #[test]
    fn test_log_settings_save() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = ActivityLogger::with_path(&log_path).unwrap();
        logger.log_settings_save("https://api.example.com/v1").unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert!(content.contains("[SETTINGS]"));
        assert!(content.contains("https://api.example.com/v1"));
    }

    #[test]
    fn test_multiple_entries_append() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = ActivityLogger::with_path(&log_path).unwrap();
        logger.log_generation(&spec()).unwrap();
        logger.log_settings_save("").unwrap();

        let content = fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_log_rotation() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("test.log");

        let logger = ActivityLogger::with_path(&log_path).unwrap();

        // Oversized entry triggers rotation on the next write.
        let huge = "x".repeat(MAX_LOG_SIZE as usize + 1);
        logger.log_settings_save(&huge).unwrap();
        logger.log_settings_save("after rotation").unwrap();

        let backup_path = log_path.with_extension("log.1");
        assert!(backup_path.exists());
        assert!(log_path.exists());
        assert!(fs::metadata(&log_path).unwrap().len() < MAX_LOG_SIZE);
    }
}
