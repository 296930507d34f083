use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{Choice, DomainError, Record};

/// Genre stored when none is supplied
pub const DEFAULT_GENRE: &str = "Unknown";

/// Key under which titles must be unique: trimmed and lowercased
pub fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// A movie in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Store-generated identifier
    pub id: i64,

    /// Trimmed title, unique ignoring case
    pub title: String,

    /// Running time in minutes
    pub duration: u32,

    pub overview: Option<String>,

    pub status: MovieStatus,

    pub genre: String,

    /// Age rating
    pub certification: Certification,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Screening availability of a movie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieStatus {
    Available,
    #[default]
    Unavailable,
    Soon,
}

/// Age rating of a movie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Certification {
    #[default]
    Everyone,
    Teen,
    Mature,
    Adult,
}

/// Normalized data for a new movie row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub duration: u32,
    pub overview: Option<String>,
    pub status: MovieStatus,
    pub genre: String,
    pub certification: Certification,
}

/// Supplied changes for a partial update.
///
/// `None` leaves the column untouched. `overview: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub duration: Option<u32>,
    pub overview: Option<Option<String>>,
    pub status: Option<MovieStatus>,
    pub genre: Option<String>,
    pub certification: Option<Certification>,
}

/// Query criteria for listing movies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieFilter {
    Status(MovieStatus),
    Genre(String),
    Certification(Certification),
    /// Exact match on the title key
    TitleKey(String),
    /// Partial, case-insensitive match on the title
    TitleContains(String),
    /// Inclusive duration range in minutes
    DurationRange { min: u32, max: u32 },
}

impl Record for Movie {
    type Draft = NewMovie;
    type Patch = MoviePatch;
    type Filter = MovieFilter;
}

impl MoviePatch {
    pub fn status(status: MovieStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Choice for MovieStatus {
    const FIELD: &'static str = "status";
    const ALLOWED: &'static str = "available, unavailable, soon";

    fn as_str(&self) -> &'static str {
        match self {
            MovieStatus::Available => "available",
            MovieStatus::Unavailable => "unavailable",
            MovieStatus::Soon => "soon",
        }
    }
}

impl Choice for Certification {
    const FIELD: &'static str = "certification";
    const ALLOWED: &'static str = "everyone, teen, mature, adult";

    fn as_str(&self) -> &'static str {
        match self {
            Certification::Everyone => "everyone",
            Certification::Teen => "teen",
            Certification::Mature => "mature",
            Certification::Adult => "adult",
        }
    }
}

impl FromStr for MovieStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(MovieStatus::Available),
            "unavailable" => Ok(MovieStatus::Unavailable),
            "soon" => Ok(MovieStatus::Soon),
            other => Err(Self::invalid(other)),
        }
    }
}

impl FromStr for Certification {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "everyone" => Ok(Certification::Everyone),
            "teen" => Ok(Certification::Teen),
            "mature" => Ok(Certification::Mature),
            "adult" => Ok(Certification::Adult),
            other => Err(Self::invalid(other)),
        }
    }
}

impl std::fmt::Display for MovieStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Certification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
