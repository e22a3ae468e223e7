//! Freight-specific error types.
//!
//! Returned by every freight handler.
//!
//! | Error | Meaning for the operator |
//! |-------|--------------------------|
//! | NotFound | record was removed or the link is stale |
//! | InvalidState | action not allowed in the current status |
//! | ValidationFailed | a form field is missing or out of range |
//! | UnknownCarrier | carrier was not invited to this quotation |
//! | Conflict | someone else saved the record first |
//! | Infrastructure | store or upload failed, retry |

use crate::domain::foundation::{DomainError, ErrorCode, FreightId};

/// Freight-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreightError {
    /// Freight record was not found.
    NotFound(FreightId),

    /// Action not allowed in the record's current status.
    InvalidState(String),

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Carrier is not one of the record's invited carriers.
    UnknownCarrier(String),

    /// The stored revision moved on since the record was read.
    Conflict(FreightId),

    /// Store, upload or serialization failure.
    Infrastructure(String),
}

impl FreightError {
    pub fn not_found(id: FreightId) -> Self {
        FreightError::NotFound(id)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        FreightError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        FreightError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(id: FreightId) -> Self {
        FreightError::Conflict(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        FreightError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            FreightError::NotFound(_) => ErrorCode::FreightNotFound,
            FreightError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            FreightError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            FreightError::UnknownCarrier(_) => ErrorCode::UnknownCarrier,
            FreightError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            FreightError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    /// Returns a detailed error message for logs.
    pub fn message(&self) -> String {
        match self {
            FreightError::NotFound(id) => format!("Freight not found: {}", id),
            FreightError::InvalidState(msg) => msg.clone(),
            FreightError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            FreightError::UnknownCarrier(carrier) => {
                format!("Carrier '{}' was not invited to quote this freight", carrier)
            }
            FreightError::Conflict(id) => {
                format!("Freight {} was modified by another session", id)
            }
            FreightError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Message safe to show the operator.
    ///
    /// Infrastructure details stay in the logs; the operator only gets a
    /// prompt to try again.
    pub fn user_message(&self) -> String {
        match self {
            FreightError::Infrastructure(_) => {
                "Could not save your changes. Please try again.".to_string()
            }
            FreightError::Conflict(_) => {
                "This freight was changed by someone else. Reload it and try again.".to_string()
            }
            other => other.message(),
        }
    }

    /// Returns true if repeating the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FreightError::Infrastructure(_) | FreightError::Conflict(_)
        )
    }
}

impl std::fmt::Display for FreightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for FreightError {}

impl From<DomainError> for FreightError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                FreightError::ValidationFailed {
                    field: err.detail("field").unwrap_or("unknown").to_string(),
                    message: err.message,
                }
            }
            ErrorCode::InvalidStateTransition => FreightError::InvalidState(err.message),
            ErrorCode::UnknownCarrier => FreightError::UnknownCarrier(
                err.detail("carrier").unwrap_or("unknown").to_string(),
            ),
            ErrorCode::FreightNotFound => match err.detail("freight_id").map(str::parse) {
                Some(Ok(id)) => FreightError::NotFound(id),
                _ => FreightError::Infrastructure(err.to_string()),
            },
            ErrorCode::ConcurrencyConflict => match err.detail("freight_id").map(str::parse) {
                Some(Ok(id)) => FreightError::Conflict(id),
                _ => FreightError::Infrastructure(err.to_string()),
            },
            _ => FreightError::Infrastructure(err.to_string()),
        }
    }
}

impl From<FreightError> for DomainError {
    fn from(err: FreightError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
