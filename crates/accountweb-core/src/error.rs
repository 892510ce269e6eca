//! Error types for accountweb-core
//!
//! Three families of failures reach the user interface:
//! - field validation errors, rendered inline next to the inputs
//! - transport errors from the Accounts API
//! - domain errors raised by the transfer flow, shown as a blocking alert

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input failed validation
    ValidationError,
    /// Accounts API call failed
    TransportError,
    /// Account id not present in the local snapshot
    AccountNotFound,
    /// Source and destination of a transfer are the same account
    SameAccount,
    /// Source balance below the requested amount
    InsufficientBalance,
    /// First write of a transfer succeeded, second failed
    PartialTransfer,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::TransportError => write!(f, "TRANSPORT_ERROR"),
            ErrorCode::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            ErrorCode::SameAccount => write!(f, "SAME_ACCOUNT"),
            ErrorCode::InsufficientBalance => write!(f, "INSUFFICIENT_BALANCE"),
            ErrorCode::PartialTransfer => write!(f, "PARTIAL_TRANSFER"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational, the user can correct the input
    Info,
    /// Warning - operation rejected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - remote state may be inconsistent
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Failure of a call to the Accounts API
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{method} {url} failed: {source}")]
    Request {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned status {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
    },
}

/// Rejections raised by the transfer flow
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Account not found: {id}")]
    AccountNotFound { id: String },

    #[error("Cannot transfer from account {id} to itself")]
    SameAccount { id: String },

    #[error("Insufficient balance: {available} available, {requested} requested")]
    InsufficientBalance { available: f64, requested: f64 },
}

/// Main error type for accountweb-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Accounts API error: {0}")]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Transfer partially applied: account {debited} was debited but account {credited} was not credited: {source}")]
    PartialTransfer {
        debited: String,
        credited: String,
        #[source]
        source: TransportError,
    },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Validation(_) => ErrorCode::ValidationError,
            CoreError::Transport(_) => ErrorCode::TransportError,
            CoreError::Domain(DomainError::AccountNotFound { .. }) => ErrorCode::AccountNotFound,
            CoreError::Domain(DomainError::SameAccount { .. }) => ErrorCode::SameAccount,
            CoreError::Domain(DomainError::InsufficientBalance { .. }) => ErrorCode::InsufficientBalance,
            CoreError::PartialTransfer { .. } => ErrorCode::PartialTransfer,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Validation(_) => ErrorSeverity::Info,
            CoreError::Domain(_) => ErrorSeverity::Warning,
            CoreError::Transport(_) => ErrorSeverity::Error,
            CoreError::PartialTransfer { .. } => ErrorSeverity::Critical,
        }
    }

    /// Text of the blocking alert shown to the user
    pub fn user_message(&self) -> String {
        match self {
            CoreError::Validation(errors) => errors.to_string(),
            CoreError::Transport(_) => "The accounts service could not be reached".to_string(),
            CoreError::Domain(DomainError::AccountNotFound { .. }) => "Account not found".to_string(),
            CoreError::Domain(DomainError::SameAccount { .. }) => {
                "You can not transfer money to the same account".to_string()
            }
            CoreError::Domain(DomainError::InsufficientBalance { .. }) => "Insufficient balance".to_string(),
            CoreError::PartialTransfer { debited, credited, .. } => format!(
                "Account {} was debited but account {} could not be credited",
                debited, credited
            ),
        }
    }

    /// Whether the form should show this as a blocking alert rather than inline messages
    pub fn is_alert(&self) -> bool {
        !matches!(self, CoreError::Validation(_))
    }

    /// Field errors, when this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CoreError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Log an error at a level matching its severity
pub fn log_error(error: &CoreError, operation: &str) {
    match error.severity() {
        ErrorSeverity::Info => log::debug!(
            target: "accountweb::error",
            "[{}] {} - Operation: {}",
            error.code(),
            error,
            operation
        ),
        ErrorSeverity::Warning => log::warn!(
            target: "accountweb::error",
            "[{}] {} - Operation: {}",
            error.code(),
            error,
            operation
        ),
        ErrorSeverity::Error | ErrorSeverity::Critical => log::error!(
            target: "accountweb::error",
            "[{}] {} - Operation: {}",
            error.code(),
            error,
            operation
        ),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_account;

    fn unavailable() -> TransportError {
        TransportError::Status {
            method: "PUT",
            url: "http://localhost:5000/accounts/2".to_string(),
            status: 503,
        }
    }

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::SameAccount.to_string(), "SAME_ACCOUNT");
        assert_eq!(ErrorCode::InsufficientBalance.to_string(), "INSUFFICIENT_BALANCE");
        assert_eq!(ErrorCode::TransportError.to_string(), "TRANSPORT_ERROR");
    }

    #[test]
    fn test_domain_error_codes() {
        let error = CoreError::from(DomainError::AccountNotFound { id: "9".to_string() });
        assert_eq!(error.code(), ErrorCode::AccountNotFound);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
        assert_eq!(error.user_message(), "Account not found");

        let error = CoreError::from(DomainError::SameAccount { id: "1".to_string() });
        assert_eq!(error.user_message(), "You can not transfer money to the same account");

        let error = CoreError::from(DomainError::InsufficientBalance { available: 10.0, requested: 20.0 });
        assert_eq!(error.user_message(), "Insufficient balance");
        assert!(error.is_alert());
    }

    #[test]
    fn test_validation_is_not_an_alert() {
        let errors = validate_account("usd", "10").unwrap_err();
        let error = CoreError::from(errors);
        assert_eq!(error.code(), ErrorCode::ValidationError);
        assert!(!error.is_alert());
        assert!(error.validation_errors().is_some());
    }

    #[test]
    fn test_transport_error_display() {
        let error = CoreError::from(unavailable());
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert!(error.to_string().contains("PUT http://localhost:5000/accounts/2 returned status 503"));
        assert!(error.validation_errors().is_none());
    }

    #[test]
    fn test_partial_transfer_is_critical() {
        let error = CoreError::PartialTransfer {
            debited: "1".to_string(),
            credited: "2".to_string(),
            source: unavailable(),
        };
        assert_eq!(error.code(), ErrorCode::PartialTransfer);
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(error.user_message().contains("Account 1 was debited"));
    }
}
