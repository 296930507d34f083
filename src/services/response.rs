// src/services/response.rs
//
// Service result envelope
//
// ARCHITECTURE:
// - Every public service operation returns a ServiceResponse
// - Internal errors are mapped to an ErrorKind + user-facing message here
// - Failures are logged once, at the point of conversion

use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Failure categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed or out-of-range input
    Validation,

    /// Uniqueness rule violated
    Conflict,

    /// Missing id
    NotFound,

    /// Store or infrastructure failure
    Storage,
}

impl From<&AppError> for ErrorKind {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::Domain(_) => ErrorKind::Validation,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::Other(_) => ErrorKind::Storage,
        }
    }
}

/// Outcome of a service operation
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse<T> {
    Success {
        data: T,
        message: String,
        /// Present for list operations
        count: Option<usize>,
    },
    Failure {
        kind: ErrorKind,
        message: String,
    },
}

impl<T> ServiceResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        ServiceResponse::Success {
            data,
            message: message.into(),
            count: None,
        }
    }

    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        ServiceResponse::Failure {
            kind,
            message: message.into(),
        }
    }

    /// Convert an internal error, logging it with the operation name.
    pub fn from_error(operation: &str, error: AppError) -> Self {
        let kind = ErrorKind::from(&error);
        log_failure(operation, kind, &error);
        Self::failure(kind, error.to_string())
    }

    /// Like `from_error`, but storage failures get a fixed message instead
    /// of the driver's text.
    pub fn from_error_masked(operation: &str, error: AppError, storage_message: &str) -> Self {
        let kind = ErrorKind::from(&error);
        log_failure(operation, kind, &error);
        match kind {
            ErrorKind::Storage => Self::failure(kind, storage_message),
            _ => Self::failure(kind, error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ServiceResponse::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceResponse::Success { message, .. } | ServiceResponse::Failure { message, .. } => {
                message
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ServiceResponse::Success { data, .. } => Some(data),
            ServiceResponse::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ServiceResponse::Success { data, .. } => Some(data),
            ServiceResponse::Failure { .. } => None,
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ServiceResponse::Success { .. } => None,
            ServiceResponse::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn count(&self) -> Option<usize> {
        match self {
            ServiceResponse::Success { count, .. } => *count,
            ServiceResponse::Failure { .. } => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> ServiceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ServiceResponse::Success {
                data,
                message,
                count,
            } => ServiceResponse::Success {
                data: f(data),
                message,
                count,
            },
            ServiceResponse::Failure { kind, message } => {
                ServiceResponse::Failure { kind, message }
            }
        }
    }
}

impl<T> ServiceResponse<Vec<T>> {
    /// Success for a list operation; `count` is the number of items
    pub fn listed(data: Vec<T>, message: impl Into<String>) -> Self {
        let count = data.len();
        ServiceResponse::Success {
            data,
            message: message.into(),
            count: Some(count),
        }
    }
}

fn log_failure(operation: &str, kind: ErrorKind, error: &AppError) {
    match kind {
        ErrorKind::Storage => error!("Failed to {}: {}", operation, error),
        _ => warn!("Rejected {}: {}", operation, error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_kind_mapping() {
        let validation = AppError::Domain(DomainError::InvariantViolation("bad".to_string()));
        assert_eq!(ErrorKind::from(&validation), ErrorKind::Validation);
        assert_eq!(
            ErrorKind::from(&AppError::Conflict("dup".to_string())),
            ErrorKind::Conflict
        );
        assert_eq!(
            ErrorKind::from(&AppError::NotFound("gone".to_string())),
            ErrorKind::NotFound
        );
        assert_eq!(
            ErrorKind::from(&AppError::Pool("timeout".to_string())),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_masked_storage_message() {
        let response: ServiceResponse<Vec<i32>> = ServiceResponse::from_error_masked(
            "fetch things",
            AppError::Pool("connection refused".to_string()),
            "Error fetching things",
        );
        assert_eq!(response.message(), "Error fetching things");
        assert_eq!(response.kind(), Some(ErrorKind::Storage));

        let not_masked: ServiceResponse<()> = ServiceResponse::from_error_masked(
            "fetch things",
            AppError::NotFound("Thing with ID 3 not found".to_string()),
            "Error fetching things",
        );
        assert_eq!(not_masked.message(), "Thing with ID 3 not found");
    }

    #[test]
    fn test_listed_sets_count_and_map_keeps_it() {
        let response = ServiceResponse::listed(vec![1, 2, 3], "3 found");
        assert_eq!(response.count(), Some(3));

        let mapped = response.map(|v| v.into_iter().map(|n| n * 2).collect::<Vec<_>>());
        assert_eq!(mapped.count(), Some(3));
        assert_eq!(mapped.into_data(), Some(vec![2, 4, 6]));
    }
}
