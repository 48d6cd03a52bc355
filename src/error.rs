use std::io;
use thiserror::Error;

// Import module-level errors for AppError
use crate::generator::client::GeneratorError;
use crate::newsletter::EmailError;
use crate::prefs::storage::StorageError;

/// Top-level application error that wraps all module-specific errors
///
/// This provides a unified error type for application-level code while preserving
/// the specific error context from each module. All module errors automatically
/// convert to AppError via the `From` trait.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Preference storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Generation error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Email validation error: {0}")]
    Email(#[from] EmailError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_errors_convert_to_app_error() {
        let app: AppError = StorageError::DirectoryNotFound.into();
        assert!(matches!(app, AppError::Storage(_)));

        let app: AppError = GeneratorError::Unavailable("offline".to_string()).into();
        assert!(matches!(app, AppError::Generator(_)));

        let app: AppError = EmailError::InvalidFormat.into();
        assert!(matches!(app, AppError::Email(_)));
    }

    #[test]
    fn test_error_messages_preserve_context() {
        let app: AppError = EmailError::InvalidFormat.into();
        assert!(app.to_string().contains("valid email address"));
    }
}
