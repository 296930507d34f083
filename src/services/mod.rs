// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// Services validate and normalize input, enforce uniqueness, call the
// repositories and wrap every outcome in a ServiceResponse.

pub mod auditorium_service;
pub mod input;
pub mod movie_service;
pub mod response;

// Re-export all services and their types
pub use movie_service::{
    CreateMovieRequest,
    DeletedMovie,
    MovieFilters,
    MovieService,
    UpdateMovieRequest,
};

pub use auditorium_service::{
    AuditoriumFilters,
    AuditoriumService,
    CreateAuditoriumRequest,
    DeletedAuditorium,
    UpdateAuditoriumRequest,
};

pub use input::IntegerInput;

pub use response::{ErrorKind, ServiceResponse};
