use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::{Choice, DomainError, Record};

/// A screening room ("sala")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auditorium {
    /// Store-generated identifier
    pub id: i64,

    /// Room number shown to customers, unique
    pub number: i64,

    /// Seat capacity
    pub seats: i64,

    pub status: AuditoriumStatus,

    #[serde(rename = "type")]
    pub auditorium_type: AuditoriumType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditoriumStatus {
    #[default]
    Available,
    Unavailable,
}

/// Projection format of the room
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuditoriumType {
    #[default]
    #[serde(rename = "2d")]
    TwoD,
    #[serde(rename = "3d")]
    ThreeD,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditorium {
    pub number: i64,
    pub seats: i64,
    pub status: AuditoriumStatus,
    pub auditorium_type: AuditoriumType,
}

/// Supplied changes for a partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditoriumPatch {
    pub number: Option<i64>,
    pub seats: Option<i64>,
    pub status: Option<AuditoriumStatus>,
    pub auditorium_type: Option<AuditoriumType>,
}

impl AuditoriumPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditoriumFilter {
    Status(AuditoriumStatus),
    Type(AuditoriumType),
    Number(i64),
    /// Inclusive seat capacity range
    SeatsRange { min: i64, max: i64 },
}

impl Record for Auditorium {
    type Draft = NewAuditorium;
    type Patch = AuditoriumPatch;
    type Filter = AuditoriumFilter;
}

impl Choice for AuditoriumStatus {
    const FIELD: &'static str = "status";
    const ALLOWED: &'static str = "available, unavailable";

    fn as_str(&self) -> &'static str {
        match self {
            AuditoriumStatus::Available => "available",
            AuditoriumStatus::Unavailable => "unavailable",
        }
    }
}

impl Choice for AuditoriumType {
    const FIELD: &'static str = "type";
    const ALLOWED: &'static str = "2d, 3d";

    fn as_str(&self) -> &'static str {
        match self {
            AuditoriumType::TwoD => "2d",
            AuditoriumType::ThreeD => "3d",
        }
    }
}

impl FromStr for AuditoriumStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(AuditoriumStatus::Available),
            "unavailable" => Ok(AuditoriumStatus::Unavailable),
            other => Err(Self::invalid(other)),
        }
    }
}

impl FromStr for AuditoriumType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2d" => Ok(AuditoriumType::TwoD),
            "3d" => Ok(AuditoriumType::ThreeD),
            other => Err(Self::invalid(other)),
        }
    }
}

impl std::fmt::Display for AuditoriumStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for AuditoriumType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
