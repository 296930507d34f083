// src/repositories/sql.rs
//
// SQL fragments shared by the SQLite repositories

use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::Row;
use std::str::FromStr;

use crate::repositories::FindOptions;

/// A filter that knows how to express itself as a WHERE clause with
/// positional (`?`) parameters.
pub(crate) trait SqlFilter {
    fn to_sql(&self) -> (&'static str, Vec<Value>);
}

/// SELECT for `find_all`, ordered by id
pub(crate) fn select_sql<F: SqlFilter>(
    table: &str,
    columns: &str,
    options: &FindOptions<F>,
) -> (String, Vec<Value>) {
    let (where_clause, values) = where_sql(options);
    let mut sql = format!("SELECT {} FROM {}{} ORDER BY id", columns, table, where_clause);
    if let Some(limit) = options.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }
    (sql, values)
}

/// SELECT COUNT(*) honouring the filter only
pub(crate) fn count_sql<F: SqlFilter>(
    table: &str,
    options: &FindOptions<F>,
) -> (String, Vec<Value>) {
    let (where_clause, values) = where_sql(options);
    (format!("SELECT COUNT(*) FROM {}{}", table, where_clause), values)
}

fn where_sql<F: SqlFilter>(options: &FindOptions<F>) -> (String, Vec<Value>) {
    match &options.filter {
        Some(filter) => {
            let (clause, values) = filter.to_sql();
            (format!(" WHERE {}", clause), values)
        }
        None => (String::new(), Vec::new()),
    }
}

/// Collects `column = ?` assignments for a partial UPDATE
#[derive(Default)]
pub(crate) struct Assignments {
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl Assignments {
    pub(crate) fn set(&mut self, column: &'static str, value: Value) {
        self.columns.push(column);
        self.values.push(value);
    }

    pub(crate) fn set_opt<T: Into<Value>>(&mut self, column: &'static str, value: Option<T>) {
        if let Some(v) = value {
            self.set(column, v.into());
        }
    }

    /// Finish the statement; `updated_at` is always refreshed
    pub(crate) fn into_update(
        mut self,
        table: &str,
        id: i64,
        now: DateTime<Utc>,
    ) -> (String, Vec<Value>) {
        self.set("updated_at", Value::Text(now.to_rfc3339()));
        let set_clause = self
            .columns
            .iter()
            .map(|c| format!("{} = ?", c))
            .collect::<Vec<_>>()
            .join(", ");
        self.values.push(Value::Integer(id));
        (format!("UPDATE {} SET {} WHERE id = ?", table, set_clause), self.values)
    }
}

/// Escape LIKE wildcards so user input matches literally (ESCAPE '\')
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

pub(crate) fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub(crate) fn get_timestamp(row: &Row, column: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Read a text column through the type's `FromStr`
pub(crate) fn get_parsed<T>(row: &Row, column: &str) -> Result<T, rusqlite::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(column)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Even;

    impl SqlFilter for Even {
        fn to_sql(&self) -> (&'static str, Vec<Value>) {
            ("n % ? = 0", vec![Value::Integer(2)])
        }
    }

    #[test]
    fn test_select_with_filter_and_limit() {
        let (sql, values) = select_sql("t", "n", &FindOptions::filtered(Even).with_limit(3));
        assert_eq!(sql, "SELECT n FROM t WHERE n % ? = 0 ORDER BY id LIMIT 3");
        assert_eq!(values, vec![Value::Integer(2)]);
    }

    #[test]
    fn test_count_ignores_limit() {
        let (sql, _) = count_sql("t", &FindOptions::<Even>::all().with_limit(3));
        assert_eq!(sql, "SELECT COUNT(*) FROM t");
    }

    #[test]
    fn test_update_always_touches_updated_at() {
        let mut assignments = Assignments::default();
        assignments.set_opt("seats", Some(10i64));
        assignments.set_opt::<i64>("number", None);

        let (sql, values) = assignments.into_update("rooms", 4, Utc::now());
        assert_eq!(sql, "UPDATE rooms SET seats = ?, updated_at = ? WHERE id = ?");
        assert_eq!(values.len(), 3);
        assert_eq!(values[2], Value::Integer(4));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("Alien"), "%Alien%");
    }
}
