// src/logging.rs

use log::info;
use std::sync::Once;

static INIT: Once = Once::new();

/// Default filter when RUST_LOG is unset
const DEFAULT_FILTER: &str = "info,r2d2=warn";

/// Initialize the logging system.
/// This should be called once at application startup. Output goes to stderr
/// because stdout carries the response stream.
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
            .target(env_logger::Target::Stderr)
            .format_timestamp_secs()
            .format_module_path(false)
            .init();

        info!("Logging system initialized");
    });
}
