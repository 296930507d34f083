// src/application/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::repositories::{SqliteAuditoriumRepository, SqliteMovieRepository};
use crate::services::{AuditoriumService, MovieService};

/// Application state shared by every command handler.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub movie_service: Arc<MovieService>,
    pub auditorium_service: Arc<AuditoriumService>,
}

impl AppState {
    pub fn new(
        movie_service: Arc<MovieService>,
        auditorium_service: Arc<AuditoriumService>,
    ) -> Self {
        Self {
            movie_service,
            auditorium_service,
        }
    }

    /// Wire the SQLite repositories and services over one pool
    pub fn from_pool(pool: Arc<ConnectionPool>) -> Self {
        let movie_repo = Arc::new(SqliteMovieRepository::new(pool.clone()));
        let auditorium_repo = Arc::new(SqliteAuditoriumRepository::new(pool));

        Self::new(
            Arc::new(MovieService::new(movie_repo)),
            Arc::new(AuditoriumService::new(auditorium_repo)),
        )
    }
}
