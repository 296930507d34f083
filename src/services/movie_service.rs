// src/services/movie_service.rs
use log::info;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::domain::{
    parse_optional_choice, validate_duration, validate_movie_patch, validate_new_movie,
    validate_title, Certification, Choice, Movie, MoviePatch, MovieStatus, NewMovie,
    DEFAULT_GENRE,
};
use crate::domain::movie::invariants::{MAX_DURATION, MIN_DURATION};
use crate::error::{AppError, AppResult};
use crate::repositories::MovieRepository;
use crate::services::input::{integer, IntegerInput};
use crate::services::response::ServiceResponse;

const MIN_SEARCH_CHARS: usize = 2;

/// Raw input for a new movie, as received from the UI
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    pub duration: Option<IntegerInput>,
    pub overview: Option<String>,
    pub status: Option<String>,
    pub genre: Option<String>,
    pub certification: Option<String>,
}

/// Raw partial update. Absent fields stay untouched; `"overview": null`
/// clears the overview.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMovieRequest {
    pub title: Option<String>,
    pub duration: Option<IntegerInput>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub overview: Option<Option<String>>,
    pub status: Option<String>,
    pub genre: Option<String>,
    pub certification: Option<String>,
}

/// List filters. Only the first non-empty one applies, in field order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieFilters {
    pub status: Option<String>,
    pub genre: Option<String>,
    pub certification: Option<String>,
}

/// Payload returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedMovie {
    pub id: i64,
    pub title: String,
}

/// Distinguishes `"field": null` (Some(None)) from an absent field (None)
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub struct MovieService {
    movie_repo: Arc<dyn MovieRepository>,
}

impl MovieService {
    pub fn new(movie_repo: Arc<dyn MovieRepository>) -> Self {
        Self { movie_repo }
    }

    pub fn create_movie(&self, request: CreateMovieRequest) -> ServiceResponse<Movie> {
        match self.try_create_movie(request) {
            Ok(movie) => {
                info!("Created movie {} \"{}\"", movie.id, movie.title);
                ServiceResponse::success(movie, "Movie created successfully")
            }
            Err(e) => ServiceResponse::from_error("create movie", e),
        }
    }

    pub fn get_all_movies(&self, filters: MovieFilters) -> ServiceResponse<Vec<Movie>> {
        match self.try_get_all_movies(filters) {
            Ok(movies) => {
                let message = format!("{} movie(s) found", movies.len());
                ServiceResponse::listed(movies, message)
            }
            Err(e) => ServiceResponse::from_error_masked("list movies", e, "Error fetching movies"),
        }
    }

    pub fn get_movie_by_id(&self, id: i64) -> ServiceResponse<Movie> {
        match self.find_existing(id) {
            Ok(movie) => ServiceResponse::success(movie, "Movie found"),
            Err(e) => ServiceResponse::from_error("get movie", e),
        }
    }

    pub fn update_movie(&self, id: i64, request: UpdateMovieRequest) -> ServiceResponse<Movie> {
        match self.try_update_movie(id, request) {
            Ok(movie) => {
                info!("Updated movie {}", movie.id);
                ServiceResponse::success(movie, "Movie updated successfully")
            }
            Err(e) => ServiceResponse::from_error("update movie", e),
        }
    }

    pub fn delete_movie(&self, id: i64) -> ServiceResponse<DeletedMovie> {
        match self.try_delete_movie(id) {
            Ok(deleted) => {
                info!("Deleted movie {} \"{}\"", deleted.id, deleted.title);
                let message = format!("Movie \"{}\" deleted successfully", deleted.title);
                ServiceResponse::success(deleted, message)
            }
            Err(e) => ServiceResponse::from_error("delete movie", e),
        }
    }

    pub fn get_available_movies(&self) -> ServiceResponse<Vec<Movie>> {
        match self.movie_repo.find_available() {
            Ok(movies) => {
                let message = format!("{} movie(s) available", movies.len());
                ServiceResponse::listed(movies, message)
            }
            Err(e) => ServiceResponse::from_error_masked(
                "list available movies",
                e,
                "Error fetching available movies",
            ),
        }
    }

    pub fn search_movies(&self, term: &str) -> ServiceResponse<Vec<Movie>> {
        match self.try_search_movies(term) {
            Ok(movies) => {
                let message = format!("{} movie(s) found", movies.len());
                ServiceResponse::listed(movies, message)
            }
            Err(e) => ServiceResponse::from_error("search movies", e),
        }
    }

    /// Movies whose duration lies in `min..=max` minutes
    pub fn get_movies_by_duration(&self, min: i64, max: i64) -> ServiceResponse<Vec<Movie>> {
        match self.try_get_movies_by_duration(min, max) {
            Ok(movies) => {
                let message = format!("{} movie(s) found", movies.len());
                ServiceResponse::listed(movies, message)
            }
            Err(e) => ServiceResponse::from_error("list movies by duration", e),
        }
    }

    pub fn change_movie_status(&self, id: i64, status: &str) -> ServiceResponse<Movie> {
        match self.try_change_movie_status(id, status) {
            Ok(movie) => {
                info!("Movie {} status set to {}", movie.id, movie.status);
                let message = format!("Movie status changed to \"{}\"", movie.status);
                ServiceResponse::success(movie, message)
            }
            Err(e) => ServiceResponse::from_error("change movie status", e),
        }
    }

    // ------------------------------------------------------------------------
    // Fallible internals
    // ------------------------------------------------------------------------

    fn try_create_movie(&self, request: CreateMovieRequest) -> AppResult<Movie> {
        let title = request.title.as_deref().unwrap_or_default().trim();
        validate_title(title)?;
        let duration = validate_duration(integer(&request.duration))?;

        let status: MovieStatus =
            parse_optional_choice(request.status.as_deref())?.unwrap_or_default();
        let certification: Certification =
            parse_optional_choice(request.certification.as_deref())?.unwrap_or_default();

        self.ensure_title_available(title, None)?;

        let draft = NewMovie {
            title: title.to_string(),
            duration,
            overview: normalize_overview(request.overview.as_deref()),
            status,
            genre: request
                .genre
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .unwrap_or(DEFAULT_GENRE)
                .to_string(),
            certification,
        };
        validate_new_movie(&draft)?;

        self.movie_repo.create(&draft)
    }

    fn try_get_all_movies(&self, filters: MovieFilters) -> AppResult<Vec<Movie>> {
        if let Some(status) = parse_optional_choice::<MovieStatus>(filters.status.as_deref())? {
            return self.movie_repo.find_by_status(status);
        }
        if let Some(genre) = non_blank(filters.genre.as_deref()) {
            return self.movie_repo.find_by_genre(genre);
        }
        if let Some(certification) =
            parse_optional_choice::<Certification>(filters.certification.as_deref())?
        {
            return self.movie_repo.find_by_certification(certification);
        }
        self.movie_repo.find_all(&Default::default())
    }

    fn try_update_movie(&self, id: i64, request: UpdateMovieRequest) -> AppResult<Movie> {
        if !self.movie_repo.exists(id)? {
            return Err(movie_not_found(id));
        }

        let mut patch = MoviePatch::default();

        if let Some(title) = request.title.as_deref().map(str::trim) {
            validate_title(title)?;
            self.ensure_title_available(title, Some(id))?;
            patch.title = Some(title.to_string());
        }
        if request.duration.is_some() {
            patch.duration = Some(validate_duration(integer(&request.duration))?);
        }
        if let Some(overview) = request.overview {
            patch.overview = Some(normalize_overview(overview.as_deref()));
        }
        patch.genre = request.genre.as_deref().map(|g| g.trim().to_string());
        patch.status = parse_optional_choice(request.status.as_deref())?;
        patch.certification = parse_optional_choice(request.certification.as_deref())?;

        validate_movie_patch(&patch)?;

        // nothing supplied: keep updated_at as is
        if patch.is_empty() {
            return self.find_existing(id);
        }

        self.movie_repo
            .update(id, &patch)?
            .ok_or_else(|| movie_not_found(id))
    }

    fn try_delete_movie(&self, id: i64) -> AppResult<DeletedMovie> {
        let movie = self.find_existing(id)?;

        if !self.movie_repo.delete(id)? {
            return Err(AppError::Other("Error deleting movie".to_string()));
        }

        Ok(DeletedMovie {
            id,
            title: movie.title,
        })
    }

    fn try_search_movies(&self, term: &str) -> AppResult<Vec<Movie>> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_CHARS {
            return Err(invalid(format!(
                "Search term must be at least {} characters long",
                MIN_SEARCH_CHARS
            )));
        }
        self.movie_repo.search_by_title(term)
    }

    fn try_get_movies_by_duration(&self, min: i64, max: i64) -> AppResult<Vec<Movie>> {
        let bounds = i64::from(MIN_DURATION)..=i64::from(MAX_DURATION);
        if !bounds.contains(&min) || !bounds.contains(&max) || min > max {
            return Err(invalid(format!(
                "Duration range must satisfy {} <= min <= max <= {}",
                MIN_DURATION, MAX_DURATION
            )));
        }
        self.movie_repo
            .find_by_duration_range(min as u32, max as u32)
    }

    fn try_change_movie_status(&self, id: i64, status: &str) -> AppResult<Movie> {
        let status: MovieStatus = status.trim().parse().map_err(|_| {
            invalid(format!("Invalid status. Use: {}", MovieStatus::ALLOWED))
        })?;

        if self.movie_repo.find_by_id(id)?.is_none() {
            return Err(movie_not_found(id));
        }

        self.movie_repo
            .update(id, &MoviePatch::status(status))?
            .ok_or_else(|| movie_not_found(id))
    }

    fn find_existing(&self, id: i64) -> AppResult<Movie> {
        if id <= 0 {
            return Err(AppError::NotFound("Invalid ID".to_string()));
        }
        self.movie_repo
            .find_by_id(id)?
            .ok_or_else(|| movie_not_found(id))
    }

    /// Fast-path uniqueness check; the store's unique title key is authoritative.
    fn ensure_title_available(&self, title: &str, exclude_id: Option<i64>) -> AppResult<()> {
        match self.movie_repo.find_by_title(title)? {
            Some(existing) if Some(existing.id) != exclude_id => {
                let message = match exclude_id {
                    None => format!("A movie with the title \"{}\" already exists", title),
                    Some(_) => {
                        format!("Another movie with the title \"{}\" already exists", title)
                    }
                };
                Err(AppError::Conflict(message))
            }
            _ => Ok(()),
        }
    }
}

fn movie_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Movie with ID {} not found", id))
}

fn invalid(message: String) -> AppError {
    AppError::Domain(crate::domain::DomainError::InvariantViolation(message))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_overview(overview: Option<&str>) -> Option<String> {
    non_blank(overview).map(str::to_string)
}
