// src/main.rs

use anyhow::Context;
use log::{info, warn};
use std::io;
use std::sync::Arc;

use cinema_catalog::application::{serve_json_lines, AppState};
use cinema_catalog::config::AppConfig;
use cinema_catalog::db::{
    close_connection_pool, create_connection_pool, get_database_stats, initialize_database,
    verify_database_integrity,
};
use cinema_catalog::logging::init_logger;
use cinema_catalog::repositories::*;
use cinema_catalog::services::*;

fn main() -> anyhow::Result<()> {
    // 0. ENVIRONMENT
    dotenvy::dotenv().ok();
    init_logger();

    let config = AppConfig::from_env().context("Invalid configuration")?;

    // 1. INFRASTRUCTURE
    let pool = Arc::new(
        create_connection_pool(&config.database).context("Failed to open database")?,
    );

    // Initialize schema (idempotent)
    {
        let conn = pool.get()?;
        initialize_database(&conn).context("Failed to initialize schema")?;
        verify_database_integrity(&conn)?;
        let stats = get_database_stats(&conn)?;
        info!(
            "Database ready: {} movie(s), {} auditorium(s), {} bytes",
            stats.movie_count, stats.auditorium_count, stats.size_bytes
        );
    }

    // 2. REPOSITORIES
    let movie_repo: Arc<dyn MovieRepository> = Arc::new(SqliteMovieRepository::new(pool.clone()));
    let auditorium_repo: Arc<dyn AuditoriumRepository> =
        Arc::new(SqliteAuditoriumRepository::new(pool.clone()));

    // 3. SERVICES
    let movie_service = Arc::new(MovieService::new(movie_repo));
    let auditorium_service = Arc::new(AuditoriumService::new(auditorium_repo));

    // 4. APPLICATION STATE
    let app_state = AppState::new(movie_service, auditorium_service);

    // 5. SERVE
    info!("Listening for requests on stdin");
    let stdin = io::stdin();
    let answered = serve_json_lines(&app_state, stdin.lock(), io::stdout().lock())?;
    info!("Input closed after {} request(s)", answered);

    // 6. SHUTDOWN
    drop(app_state);
    match Arc::try_unwrap(pool) {
        Ok(pool) => close_connection_pool(pool)?,
        Err(_) => warn!("Connection pool still shared at shutdown; skipping checkpoint"),
    }

    Ok(())
}
