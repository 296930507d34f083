// src/lib.rs
// Cinema Catalog - Local-first movie and auditorium catalog backend
//
// Architecture:
// - Domain-centric: validation rules live with the entities
// - Services: normalization, uniqueness and the response envelope
// - Repositories: one SQLite table per entity behind a generic contract
// - Application Layer: JSON channels for the UI

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    // Shared
    Choice,
    DomainError,
    Record,
    // Movie
    Certification,
    Movie,
    MovieFilter,
    MoviePatch,
    MovieStatus,
    NewMovie,
    // Auditorium
    Auditorium,
    AuditoriumFilter,
    AuditoriumPatch,
    AuditoriumStatus,
    AuditoriumType,
    NewAuditorium,
};

// ============================================================================
// PUBLIC API - Configuration & Errors
// ============================================================================

pub use config::{AppConfig, DatabaseConfig};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{
    close_connection_pool, create_connection_pool, initialize_database, ConnectionPool,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    AuditoriumRepository,
    FindOptions,
    MovieRepository,
    Repository,
    SqliteAuditoriumRepository,
    SqliteMovieRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Auditorium Service
    AuditoriumFilters,
    AuditoriumService,
    CreateAuditoriumRequest,
    UpdateAuditoriumRequest,
    // Movie Service
    CreateMovieRequest,
    MovieFilters,
    MovieService,
    UpdateMovieRequest,
    // Envelope
    ErrorKind,
    ServiceResponse,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{dispatch, serve_json_lines, AppState, Envelope};
