// src/repositories/movie_repository.rs
//
// Movie persistence

use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use std::sync::Arc;

use super::sql::{
    count_sql, get_parsed, get_timestamp, like_pattern, select_sql, text, Assignments, SqlFilter,
};
use super::{FindOptions, Repository};
use crate::db::{ConnectionPool, PooledConn};
use crate::domain::{
    title_key, Certification, Choice, Movie, MovieFilter, MoviePatch, MovieStatus, NewMovie,
};
use crate::error::{AppError, AppResult};

const TABLE: &str = "movies";
const COLUMNS: &str =
    "id, title, duration, overview, status, genre, certification, created_at, updated_at";

/// Movie-specific finders on top of the generic contract
pub trait MovieRepository: Repository<Movie> {
    fn find_by_status(&self, status: MovieStatus) -> AppResult<Vec<Movie>> {
        self.find_all(&FindOptions::filtered(MovieFilter::Status(status)))
    }

    fn find_by_genre(&self, genre: &str) -> AppResult<Vec<Movie>> {
        self.find_all(&FindOptions::filtered(MovieFilter::Genre(genre.to_string())))
    }

    fn find_by_certification(&self, certification: Certification) -> AppResult<Vec<Movie>> {
        self.find_all(&FindOptions::filtered(MovieFilter::Certification(
            certification,
        )))
    }

    /// Exact title match ignoring case (Unicode-aware)
    fn find_by_title(&self, title: &str) -> AppResult<Option<Movie>> {
        let mut found = self.find_all(
            &FindOptions::filtered(MovieFilter::TitleKey(title_key(title))).with_limit(1),
        )?;
        Ok(found.pop())
    }

    /// Partial, case-insensitive title match
    fn search_by_title(&self, term: &str) -> AppResult<Vec<Movie>> {
        self.find_all(&FindOptions::filtered(MovieFilter::TitleContains(
            term.to_string(),
        )))
    }

    fn find_by_duration_range(&self, min: u32, max: u32) -> AppResult<Vec<Movie>> {
        self.find_all(&FindOptions::filtered(MovieFilter::DurationRange { min, max }))
    }

    fn find_available(&self) -> AppResult<Vec<Movie>> {
        self.find_by_status(MovieStatus::Available)
    }
}

pub struct SqliteMovieRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteMovieRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Movie - returns rusqlite::Error for query_map compatibility
    fn row_to_movie(row: &Row) -> Result<Movie, rusqlite::Error> {
        let duration: i64 = row.get("duration")?;

        Ok(Movie {
            id: row.get("id")?,
            title: row.get("title")?,
            duration: u32::try_from(duration)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?,
            overview: row.get("overview")?,
            status: get_parsed(row, "status")?,
            genre: row.get("genre")?,
            certification: get_parsed(row, "certification")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
        })
    }

    fn fetch(conn: &PooledConn, id: i64) -> AppResult<Option<Movie>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, TABLE);
        let movie = conn
            .query_row(&sql, params![id], Self::row_to_movie)
            .optional()?;
        Ok(movie)
    }

    fn duplicate_title(title: &str) -> String {
        format!("A movie with the title \"{}\" already exists", title)
    }
}

impl SqlFilter for MovieFilter {
    fn to_sql(&self) -> (&'static str, Vec<Value>) {
        match self {
            MovieFilter::Status(status) => ("status = ?", vec![text(status.as_str())]),
            MovieFilter::Genre(genre) => ("genre = ?", vec![text(genre)]),
            MovieFilter::Certification(c) => ("certification = ?", vec![text(c.as_str())]),
            MovieFilter::TitleKey(key) => ("title_key = ?", vec![text(key)]),
            // title_key is already lowercased, so LIKE needs no case folding
            MovieFilter::TitleContains(term) => (
                "title_key LIKE ? ESCAPE '\\'",
                vec![Value::Text(like_pattern(&title_key(term)))],
            ),
            MovieFilter::DurationRange { min, max } => (
                "duration BETWEEN ? AND ?",
                vec![Value::from(*min), Value::from(*max)],
            ),
        }
    }
}

impl Repository<Movie> for SqliteMovieRepository {
    fn create(&self, draft: &NewMovie) -> AppResult<Movie> {
        let conn = self.pool.get()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO movies (
                title, title_key, duration, overview, status, genre, certification,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                draft.title,
                title_key(&draft.title),
                draft.duration,
                draft.overview,
                draft.status.as_str(),
                draft.genre,
                draft.certification.as_str(),
                now,
                now,
            ],
        )
        .map_err(|e| AppError::from_write(e, || Self::duplicate_title(&draft.title)))?;

        let id = conn.last_insert_rowid();
        Self::fetch(&conn, id)?
            .ok_or_else(|| AppError::Other(format!("Movie {} vanished after insert", id)))
    }

    fn find_all(&self, options: &FindOptions<MovieFilter>) -> AppResult<Vec<Movie>> {
        let conn = self.pool.get()?;
        let (sql, values) = select_sql(TABLE, COLUMNS, options);

        let mut stmt = conn.prepare(&sql)?;
        let movies: Vec<Movie> = stmt
            .query_map(params_from_iter(values), Self::row_to_movie)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(movies)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;
        Self::fetch(&conn, id)
    }

    fn update(&self, id: i64, patch: &MoviePatch) -> AppResult<Option<Movie>> {
        let conn = self.pool.get()?;

        let mut assignments = Assignments::default();
        assignments.set_opt("title", patch.title.clone());
        assignments.set_opt("title_key", patch.title.as_deref().map(title_key));
        assignments.set_opt("duration", patch.duration);
        if let Some(overview) = &patch.overview {
            assignments.set(
                "overview",
                overview.clone().map(Value::Text).unwrap_or(Value::Null),
            );
        }
        assignments.set_opt("status", patch.status.map(|s| s.as_str().to_string()));
        assignments.set_opt("genre", patch.genre.clone());
        assignments.set_opt(
            "certification",
            patch.certification.map(|c| c.as_str().to_string()),
        );

        let (sql, values) = assignments.into_update(TABLE, id, Utc::now());
        let rows_affected = conn
            .execute(&sql, params_from_iter(values))
            .map_err(|e| {
                AppError::from_write(e, || {
                    Self::duplicate_title(patch.title.as_deref().unwrap_or_default())
                })
            })?;

        if rows_affected == 0 {
            return Ok(None);
        }

        Self::fetch(&conn, id)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM movies WHERE id = ?1", params![id])?;

        Ok(rows_affected > 0)
    }

    fn count(&self, options: &FindOptions<MovieFilter>) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let (sql, values) = count_sql(TABLE, options);

        let count: i64 = conn.query_row(&sql, params_from_iter(values), |row| row.get(0))?;
        Ok(count)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM movies WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

impl MovieRepository for SqliteMovieRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn repo() -> SqliteMovieRepository {
        SqliteMovieRepository::new(Arc::new(create_test_pool().unwrap()))
    }

    fn draft(title: &str, duration: u32) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            duration,
            overview: None,
            status: MovieStatus::Unavailable,
            genre: "Drama".to_string(),
            certification: Certification::Everyone,
        }
    }

    #[test]
    fn test_create_and_find_by_id() {
        let repo = repo();
        let created = repo.create(&draft("City of God", 130)).unwrap();

        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let found = repo.find_by_id(created.id).unwrap().unwrap();
        assert_eq!(found, created);
        assert!(repo.find_by_id(created.id + 100).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_title_is_conflict() {
        let repo = repo();
        repo.create(&draft("Elite Squad", 115)).unwrap();

        let err = repo.create(&draft("ELITE SQUAD", 115)).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.count(&FindOptions::all()).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_accented_title_is_conflict() {
        let repo = repo();
        repo.create(&draft("Ébano", 88)).unwrap();

        let err = repo.create(&draft("ébano", 88)).unwrap_err();
        assert_eq!(err.to_string(), "A movie with the title \"ébano\" already exists");

        let renamed = repo.create(&draft("Órfãos", 90)).unwrap();
        let patch = MoviePatch {
            title: Some("ÉBANO".to_string()),
            ..MoviePatch::default()
        };
        assert!(matches!(
            repo.update(renamed.id, &patch).unwrap_err(),
            AppError::Conflict(_)
        ));
    }

    #[test]
    fn test_find_by_title_folds_unicode_case() {
        let repo = repo();
        let created = repo.create(&draft("Árido Movie", 115)).unwrap();

        assert_eq!(repo.find_by_title("  árido MOVIE ").unwrap(), Some(created));
        assert!(repo.find_by_title("Árido").unwrap().is_none());
        assert_eq!(repo.search_by_title("ÁRIDO").unwrap().len(), 1);
    }

    #[test]
    fn test_partial_update() {
        let repo = repo();
        let created = repo.create(&draft("Bacurau", 131)).unwrap();

        let patch = MoviePatch {
            overview: Some(Some("A village vanishes from the map".to_string())),
            status: Some(MovieStatus::Soon),
            ..MoviePatch::default()
        };
        let updated = repo.update(created.id, &patch).unwrap().unwrap();

        assert_eq!(updated.title, "Bacurau");
        assert_eq!(updated.duration, 131);
        assert_eq!(updated.status, MovieStatus::Soon);
        assert_eq!(updated.overview.as_deref(), Some("A village vanishes from the map"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let cleared = repo
            .update(
                created.id,
                &MoviePatch {
                    overview: Some(None),
                    ..MoviePatch::default()
                },
            )
            .unwrap()
            .unwrap();
        assert!(cleared.overview.is_none());
    }

    #[test]
    fn test_update_missing_row_returns_none() {
        let repo = repo();
        assert!(repo.update(42, &MoviePatch::status(MovieStatus::Soon)).unwrap().is_none());
    }

    #[test]
    fn test_delete_and_exists() {
        let repo = repo();
        let created = repo.create(&draft("Aquarius", 146)).unwrap();

        assert!(repo.exists(created.id).unwrap());
        assert!(repo.delete(created.id).unwrap());
        assert!(!repo.exists(created.id).unwrap());
        assert!(!repo.delete(created.id).unwrap());
    }

    #[test]
    fn test_entity_finders() {
        let repo = repo();
        repo.create(&draft("The Second Mother", 112)).unwrap();
        repo.create(&NewMovie {
            status: MovieStatus::Available,
            genre: "Horror".to_string(),
            certification: Certification::Adult,
            ..draft("Good Manners", 135)
        })
        .unwrap();
        repo.create(&draft("Mother!", 121)).unwrap();

        assert_eq!(repo.find_available().unwrap().len(), 1);
        assert_eq!(repo.find_by_genre("Horror").unwrap()[0].title, "Good Manners");
        assert_eq!(repo.find_by_certification(Certification::Adult).unwrap().len(), 1);
        assert_eq!(repo.search_by_title("mother").unwrap().len(), 2);
        assert_eq!(repo.find_by_duration_range(112, 121).unwrap().len(), 2);
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let repo = repo();
        repo.create(&draft("100% Wolf", 96)).unwrap();
        repo.create(&draft("1000 Wolves", 90)).unwrap();

        let found = repo.search_by_title("0%").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "100% Wolf");
    }

    #[test]
    fn test_find_all_limit_and_count() {
        let repo = repo();
        for (i, title) in ["One", "Two", "Three"].iter().enumerate() {
            repo.create(&draft(title, 90 + i as u32)).unwrap();
        }

        let first_two = repo.find_all(&FindOptions::all().with_limit(2)).unwrap();
        assert_eq!(
            first_two.iter().map(|m| m.title.as_str()).collect::<Vec<_>>(),
            vec!["One", "Two"]
        );
        assert_eq!(repo.count(&FindOptions::all()).unwrap(), 3);
        assert_eq!(
            repo.count(&FindOptions::filtered(MovieFilter::Status(MovieStatus::Soon)))
                .unwrap(),
            0
        );
    }
}
