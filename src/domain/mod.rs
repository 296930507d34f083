// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod auditorium;
pub mod movie;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{
    title_key, validate_duration, validate_movie_patch, validate_new_movie, validate_title,
    Certification, Movie, MovieFilter, MoviePatch, MovieStatus, NewMovie, DEFAULT_GENRE,
};

// Auditorium Domain
pub use auditorium::{
    validate_auditorium_patch, validate_new_auditorium, validate_number, validate_seats,
    Auditorium, AuditoriumFilter, AuditoriumPatch, AuditoriumStatus, AuditoriumType,
    NewAuditorium,
};

// ============================================================================
// SHARED DOMAIN CONTRACTS
// ============================================================================

use std::str::FromStr;

/// A persisted entity with a store-generated integer identity.
///
/// `Draft` is the normalized data for an insert, `Patch` the set of supplied
/// changes for a partial update, `Filter` the entity-specific query criteria.
pub trait Record: Send + Sync + Sized {
    type Draft: Send + Sync;
    type Patch: Send + Sync;
    type Filter: Send + Sync;
}

/// A closed set of textual choices (status, certification, room type).
pub trait Choice: FromStr<Err = DomainError> + Copy {
    /// Human name of the field, used in messages
    const FIELD: &'static str;
    /// Comma separated list of accepted values
    const ALLOWED: &'static str;

    fn as_str(&self) -> &'static str;

    fn invalid(value: &str) -> DomainError {
        DomainError::InvalidChoice {
            field: Self::FIELD,
            value: value.to_string(),
            allowed: Self::ALLOWED,
        }
    }

    fn missing() -> DomainError {
        DomainError::MissingChoice {
            field: Self::FIELD,
            allowed: Self::ALLOWED,
        }
    }
}

/// Parse an optional choice where an absent or blank value means "not supplied".
pub fn parse_optional_choice<T: Choice>(raw: Option<&str>) -> DomainResult<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}

/// Parse a choice that must be present.
pub fn parse_required_choice<T: Choice>(raw: Option<&str>) -> DomainResult<T> {
    match raw.map(str::trim) {
        None | Some("") => Err(T::missing()),
        Some(value) => value.parse(),
    }
}

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants.
/// The display text is shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    InvariantViolation(String),

    #[error("Invalid {field} \"{value}\". Use: {allowed}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },

    #[error("Missing {field}. Use: {allowed}")]
    MissingChoice {
        field: &'static str,
        allowed: &'static str,
    },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
