// src/config.rs
//
// Runtime configuration
//
// Values come from the process environment (a `.env` file is loaded by the
// binary before this runs). Everything has a default so a bare launch works.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Environment variable overriding the database file location
pub const DB_PATH_VAR: &str = "CINEMA_DB_PATH";

/// Environment variable overriding the connection pool size
pub const POOL_SIZE_VAR: &str = "CINEMA_DB_POOL_SIZE";

const APP_DIR_NAME: &str = "cinema-catalog";
const DB_FILE_NAME: &str = "cinema.db";
const DEFAULT_POOL_SIZE: u32 = 15;

/// Storage settings used to open the connection pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Build the configuration from the current environment
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    ///
    /// Split out from `from_env` so tests don't have to mutate the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match lookup(DB_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            Some(p) => PathBuf::from(p),
            None => default_database_path()?,
        };

        let max_connections = match lookup(POOL_SIZE_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    AppError::Other(format!(
                        "{} must be a positive integer, got '{}'",
                        POOL_SIZE_VAR, raw
                    ))
                })?,
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database: DatabaseConfig {
                path,
                max_connections,
            },
        })
    }
}

/// Default database location: {APP_DATA}/cinema-catalog/cinema.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join(APP_DIR_NAME).join(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_explicit_path_and_pool_size() {
        let config = AppConfig::from_lookup(lookup_from(&[
            (DB_PATH_VAR, "/tmp/cinema-test.db"),
            (POOL_SIZE_VAR, "4"),
        ]))
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/tmp/cinema-test.db"));
        assert_eq!(config.database.max_connections, 4);
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert!(config.database.path.ends_with("cinema-catalog/cinema.db"));
        assert_eq!(config.database.max_connections, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_invalid_pool_size_rejected() {
        let zero = AppConfig::from_lookup(lookup_from(&[(POOL_SIZE_VAR, "0")]));
        assert!(zero.is_err());

        let garbage = AppConfig::from_lookup(lookup_from(&[(POOL_SIZE_VAR, "many")]));
        assert!(garbage.is_err());
    }
}
