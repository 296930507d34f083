// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations (camelCase on the wire)
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)
// - Every handler answers with an Envelope

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::services::{DeletedAuditorium, DeletedMovie, ErrorKind, ServiceResponse};

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDto {
    pub id: i64,
    pub title: String,
    pub duration: u32,
    pub overview: Option<String>,
    pub status: String,
    pub genre: String,
    pub certification: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedMovieDto {
    pub id: i64,
    pub title: String,
}

// ============================================================================
// AUDITORIUM DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditoriumDto {
    pub id: i64,
    pub number: i64,
    pub seats: i64,
    pub status: String,
    #[serde(rename = "type")]
    pub auditorium_type: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedAuditoriumDto {
    pub id: i64,
    pub number: i64,
}

// ============================================================================
// ENVELOPE
// ============================================================================

/// Uniform response wrapper sent back to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub data: Value,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorKind>,
}

impl Envelope {
    /// Failure with `data: null`
    pub fn failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            message: message.into(),
            count: None,
            error: Some(kind),
        }
    }

    /// Failure for a list operation: `data: []`, `count: 0`
    pub fn list_failure(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            data: Value::Array(Vec::new()),
            count: Some(0),
            ..Self::failure(kind, message)
        }
    }

    pub fn from_response<T: Serialize>(response: ServiceResponse<T>) -> Self {
        match response {
            ServiceResponse::Success {
                data,
                message,
                count,
            } => match serde_json::to_value(data) {
                Ok(data) => Self {
                    success: true,
                    data,
                    message,
                    count,
                    error: None,
                },
                Err(e) => Self::failure(ErrorKind::Storage, format!("Serialization error: {}", e)),
            },
            ServiceResponse::Failure { kind, message } => Self::failure(kind, message),
        }
    }

    pub fn from_list_response<T: Serialize>(response: ServiceResponse<Vec<T>>) -> Self {
        match response {
            ServiceResponse::Failure { kind, message } => Self::list_failure(kind, message),
            success => Self::from_response(success),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<crate::domain::Movie> for MovieDto {
    fn from(movie: crate::domain::Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            duration: movie.duration,
            overview: movie.overview,
            status: movie.status.to_string(),
            genre: movie.genre,
            certification: movie.certification.to_string(),
            created_at: movie.created_at.to_rfc3339(),
            updated_at: movie.updated_at.to_rfc3339(),
        }
    }
}

impl From<DeletedMovie> for DeletedMovieDto {
    fn from(deleted: DeletedMovie) -> Self {
        Self {
            id: deleted.id,
            title: deleted.title,
        }
    }
}

impl From<crate::domain::Auditorium> for AuditoriumDto {
    fn from(auditorium: crate::domain::Auditorium) -> Self {
        Self {
            id: auditorium.id,
            number: auditorium.number,
            seats: auditorium.seats,
            status: auditorium.status.to_string(),
            auditorium_type: auditorium.auditorium_type.to_string(),
            created_at: auditorium.created_at.to_rfc3339(),
            updated_at: auditorium.updated_at.to_rfc3339(),
        }
    }
}

impl From<DeletedAuditorium> for DeletedAuditoriumDto {
    fn from(deleted: DeletedAuditorium) -> Self {
        Self {
            id: deleted.id,
            number: deleted.number,
        }
    }
}
