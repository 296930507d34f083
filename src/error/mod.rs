// src/error/mod.rs

pub mod types;

pub use types::{is_unique_violation, AppError, AppResult};
