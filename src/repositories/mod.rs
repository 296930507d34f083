// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement (the store's own constraints aside)
// - NO cross-repository calls
// - Explicit SQL only

pub mod auditorium_repository;
pub mod movie_repository;
mod sql;

pub use auditorium_repository::{AuditoriumRepository, SqliteAuditoriumRepository};
pub use movie_repository::{MovieRepository, SqliteMovieRepository};

use crate::domain::Record;
use crate::error::AppResult;

/// Options for `find_all` and `count`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindOptions<F> {
    pub filter: Option<F>,
    /// Ignored by `count`
    pub limit: Option<u32>,
}

impl<F> Default for FindOptions<F> {
    fn default() -> Self {
        Self {
            filter: None,
            limit: None,
        }
    }
}

impl<F> FindOptions<F> {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filtered(filter: F) -> Self {
        Self {
            filter: Some(filter),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Generic persistence contract over one entity's table.
///
/// Rows come back in insertion (id) order.
pub trait Repository<E: Record>: Send + Sync {
    /// Insert a row and return it as stored
    fn create(&self, draft: &E::Draft) -> AppResult<E>;

    fn find_all(&self, options: &FindOptions<E::Filter>) -> AppResult<Vec<E>>;

    fn find_by_id(&self, id: i64) -> AppResult<Option<E>>;

    /// Apply a partial update. `None` when no row has this id.
    fn update(&self, id: i64, patch: &E::Patch) -> AppResult<Option<E>>;

    /// `false` when no row has this id
    fn delete(&self, id: i64) -> AppResult<bool>;

    fn count(&self, options: &FindOptions<E::Filter>) -> AppResult<i64>;

    fn exists(&self, id: i64) -> AppResult<bool>;
}
