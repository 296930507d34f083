// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("{0}")]
    Domain(#[from] DomainError),

    /// A uniqueness rule was violated; the message names the clashing value
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Map a failed INSERT/UPDATE, turning a UNIQUE constraint hit into a
    /// `Conflict` with the given message.
    pub fn from_write<F>(err: rusqlite::Error, conflict_message: F) -> Self
    where
        F: FnOnce() -> String,
    {
        if is_unique_violation(&err) {
            AppError::Conflict(conflict_message())
        } else {
            AppError::Database(err)
        }
    }
}

/// True when SQLite rejected a write because of a UNIQUE (or primary key) constraint
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => {
            e.code == rusqlite::ErrorCode::ConstraintViolation
                && (e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_domain_error_message_is_passed_through() {
        let err = AppError::from(DomainError::InvariantViolation("Bad title".to_string()));
        assert_eq!(err.to_string(), "Bad title");
    }

    #[test]
    fn test_unique_violation_becomes_conflict() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (n INTEGER UNIQUE); INSERT INTO t VALUES (1);")
            .unwrap();

        let err = conn.execute("INSERT INTO t VALUES (1)", []).unwrap_err();
        assert!(is_unique_violation(&err));

        let mapped = AppError::from_write(err, || "duplicate".to_string());
        assert!(matches!(mapped, AppError::Conflict(ref m) if m == "duplicate"));
    }

    #[test]
    fn test_other_constraint_stays_database_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (n INTEGER CHECK (n > 0));").unwrap();

        let err = conn.execute("INSERT INTO t VALUES (0)", []).unwrap_err();
        assert!(!is_unique_violation(&err));
        assert!(matches!(
            AppError::from_write(err, || unreachable!()),
            AppError::Database(_)
        ));
    }
}
