//! Newsletter signup form logic: the single validated input in the app.

use std::time::Duration;
use thiserror::Error;

/// Simulated latency of the subscribe request.
pub const SUBSCRIBE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("Please enter a valid email address")]
    InvalidFormat,
}

/// Basic email format check, surfaced inline as a field-level message.
/// Deliberately loose: one `@`, a non-empty local part, a dotted domain,
/// no whitespace.
pub fn validate_email(input: &str) -> Result<(), EmailError> {
    let input = input.trim();

    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return Err(EmailError::InvalidFormat);
    }

    let Some((local, domain)) = input.split_once('@') else {
        return Err(EmailError::InvalidFormat);
    };

    if local.is_empty() || domain.contains('@') {
        return Err(EmailError::InvalidFormat);
    }

    let valid_domain = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.len() >= 3;

    if valid_domain {
        Ok(())
    } else {
        Err(EmailError::InvalidFormat)
    }
}

/// Validate and "submit" the address. The network call is a timer
/// simulation and always succeeds once validation passes.
pub async fn subscribe(email: &str) -> Result<(), EmailError> {
    validate_email(email)?;
    tokio::time::sleep(SUBSCRIBE_DELAY).await;
    Ok(())
}
