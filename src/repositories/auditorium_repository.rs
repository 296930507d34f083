// src/repositories/auditorium_repository.rs

use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use std::sync::Arc;

use super::sql::{count_sql, get_parsed, get_timestamp, select_sql, text, Assignments, SqlFilter};
use super::{FindOptions, Repository};
use crate::db::{ConnectionPool, PooledConn};
use crate::domain::{
    Auditorium, AuditoriumFilter, AuditoriumPatch, AuditoriumStatus, AuditoriumType, Choice,
    NewAuditorium,
};
use crate::error::{AppError, AppResult};

const TABLE: &str = "auditoriums";
const COLUMNS: &str = "id, number, seats, status, type, created_at, updated_at";

pub trait AuditoriumRepository: Repository<Auditorium> {
    /// Room numbers are unique, so at most one row matches
    fn find_by_number(&self, number: i64) -> AppResult<Option<Auditorium>> {
        let mut found = self.find_all(
            &FindOptions::filtered(AuditoriumFilter::Number(number)).with_limit(1),
        )?;
        Ok(found.pop())
    }

    fn find_by_type(&self, auditorium_type: AuditoriumType) -> AppResult<Vec<Auditorium>> {
        self.find_all(&FindOptions::filtered(AuditoriumFilter::Type(auditorium_type)))
    }

    fn find_by_seats_range(&self, min: i64, max: i64) -> AppResult<Vec<Auditorium>> {
        self.find_all(&FindOptions::filtered(AuditoriumFilter::SeatsRange { min, max }))
    }

    fn find_by_status(&self, status: AuditoriumStatus) -> AppResult<Vec<Auditorium>> {
        self.find_all(&FindOptions::filtered(AuditoriumFilter::Status(status)))
    }

    fn find_available(&self) -> AppResult<Vec<Auditorium>> {
        self.find_by_status(AuditoriumStatus::Available)
    }
}

pub struct SqliteAuditoriumRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAuditoriumRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_auditorium(row: &Row) -> Result<Auditorium, rusqlite::Error> {
        Ok(Auditorium {
            id: row.get("id")?,
            number: row.get("number")?,
            seats: row.get("seats")?,
            status: get_parsed(row, "status")?,
            auditorium_type: get_parsed(row, "type")?,
            created_at: get_timestamp(row, "created_at")?,
            updated_at: get_timestamp(row, "updated_at")?,
        })
    }

    fn fetch(conn: &PooledConn, id: i64) -> AppResult<Option<Auditorium>> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, TABLE);
        let auditorium = conn
            .query_row(&sql, params![id], Self::row_to_auditorium)
            .optional()?;
        Ok(auditorium)
    }

    fn duplicate_number(number: i64) -> String {
        format!("An auditorium with number {} already exists", number)
    }
}

impl SqlFilter for AuditoriumFilter {
    fn to_sql(&self) -> (&'static str, Vec<Value>) {
        match self {
            AuditoriumFilter::Status(status) => ("status = ?", vec![text(status.as_str())]),
            AuditoriumFilter::Type(t) => ("type = ?", vec![text(t.as_str())]),
            AuditoriumFilter::Number(number) => ("number = ?", vec![Value::Integer(*number)]),
            AuditoriumFilter::SeatsRange { min, max } => (
                "seats BETWEEN ? AND ?",
                vec![Value::Integer(*min), Value::Integer(*max)],
            ),
        }
    }
}

impl Repository<Auditorium> for SqliteAuditoriumRepository {
    fn create(&self, draft: &NewAuditorium) -> AppResult<Auditorium> {
        let conn = self.pool.get()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO auditoriums (number, seats, status, type, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                draft.number,
                draft.seats,
                draft.status.as_str(),
                draft.auditorium_type.as_str(),
                now,
                now,
            ],
        )
        .map_err(|e| AppError::from_write(e, || Self::duplicate_number(draft.number)))?;

        let id = conn.last_insert_rowid();
        Self::fetch(&conn, id)?
            .ok_or_else(|| AppError::Other(format!("Auditorium {} vanished after insert", id)))
    }

    fn find_all(&self, options: &FindOptions<AuditoriumFilter>) -> AppResult<Vec<Auditorium>> {
        let conn = self.pool.get()?;
        let (sql, values) = select_sql(TABLE, COLUMNS, options);

        let mut stmt = conn.prepare(&sql)?;
        let auditoriums: Vec<Auditorium> = stmt
            .query_map(params_from_iter(values), Self::row_to_auditorium)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(auditoriums)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Auditorium>> {
        let conn = self.pool.get()?;
        Self::fetch(&conn, id)
    }

    fn update(&self, id: i64, patch: &AuditoriumPatch) -> AppResult<Option<Auditorium>> {
        let conn = self.pool.get()?;

        let mut assignments = Assignments::default();
        assignments.set_opt("number", patch.number);
        assignments.set_opt("seats", patch.seats);
        assignments.set_opt("status", patch.status.map(|s| s.as_str().to_string()));
        assignments.set_opt("type", patch.auditorium_type.map(|t| t.as_str().to_string()));

        let (sql, values) = assignments.into_update(TABLE, id, Utc::now());
        let rows_affected = conn
            .execute(&sql, params_from_iter(values))
            .map_err(|e| {
                AppError::from_write(e, || Self::duplicate_number(patch.number.unwrap_or_default()))
            })?;

        if rows_affected == 0 {
            return Ok(None);
        }

        Self::fetch(&conn, id)
    }

    fn delete(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;
        let rows_affected = conn.execute("DELETE FROM auditoriums WHERE id = ?1", params![id])?;
        Ok(rows_affected > 0)
    }

    fn count(&self, options: &FindOptions<AuditoriumFilter>) -> AppResult<i64> {
        let conn = self.pool.get()?;
        let (sql, values) = count_sql(TABLE, options);

        let count: i64 = conn.query_row(&sql, params_from_iter(values), |row| row.get(0))?;
        Ok(count)
    }

    fn exists(&self, id: i64) -> AppResult<bool> {
        let conn = self.pool.get()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM auditoriums WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }
}

impl AuditoriumRepository for SqliteAuditoriumRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn repo() -> SqliteAuditoriumRepository {
        SqliteAuditoriumRepository::new(Arc::new(create_test_pool().unwrap()))
    }

    fn draft(number: i64, seats: i64) -> NewAuditorium {
        NewAuditorium {
            number,
            seats,
            status: AuditoriumStatus::Available,
            auditorium_type: AuditoriumType::TwoD,
        }
    }

    #[test]
    fn test_create_and_find_by_number() {
        let repo = repo();
        let created = repo.create(&draft(3, 180)).unwrap();

        assert_eq!(repo.find_by_number(3).unwrap(), Some(created));
        assert!(repo.find_by_number(4).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_number_is_conflict() {
        let repo = repo();
        repo.create(&draft(1, 100)).unwrap();

        let err = repo.create(&draft(1, 50)).unwrap_err();
        assert_eq!(err.to_string(), "An auditorium with number 1 already exists");
    }

    #[test]
    fn test_update_number_collision_is_conflict() {
        let repo = repo();
        repo.create(&draft(1, 100)).unwrap();
        let second = repo.create(&draft(2, 100)).unwrap();

        let patch = AuditoriumPatch {
            number: Some(1),
            ..AuditoriumPatch::default()
        };
        assert!(matches!(
            repo.update(second.id, &patch).unwrap_err(),
            AppError::Conflict(_)
        ));
    }

    #[test]
    fn test_seats_range_is_inclusive() {
        let repo = repo();
        repo.create(&draft(1, 50)).unwrap();
        repo.create(&draft(2, 100)).unwrap();
        repo.create(&draft(3, 150)).unwrap();

        let numbers: Vec<i64> = repo
            .find_by_seats_range(50, 100)
            .unwrap()
            .into_iter()
            .map(|a| a.number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn test_type_and_status_finders() {
        let repo = repo();
        repo.create(&draft(1, 80)).unwrap();
        repo.create(&NewAuditorium {
            status: AuditoriumStatus::Unavailable,
            auditorium_type: AuditoriumType::ThreeD,
            ..draft(2, 90)
        })
        .unwrap();

        assert_eq!(repo.find_by_type(AuditoriumType::ThreeD).unwrap()[0].number, 2);
        assert_eq!(repo.find_available().unwrap().len(), 1);
        assert_eq!(
            repo.count(&FindOptions::filtered(AuditoriumFilter::Status(
                AuditoriumStatus::Unavailable
            )))
            .unwrap(),
            1
        );
    }

    #[test]
    fn test_update_and_delete() {
        let repo = repo();
        let created = repo.create(&draft(5, 60)).unwrap();

        let updated = repo
            .update(
                created.id,
                &AuditoriumPatch {
                    seats: Some(75),
                    auditorium_type: Some(AuditoriumType::ThreeD),
                    ..AuditoriumPatch::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.number, 5);
        assert_eq!(updated.seats, 75);
        assert_eq!(updated.auditorium_type, AuditoriumType::ThreeD);

        assert!(repo.delete(created.id).unwrap());
        assert!(!repo.exists(created.id).unwrap());
    }
}
