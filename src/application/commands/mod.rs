// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the UI channel and Services
// - Commands check payload SHAPE only; business validation lives in services
// - Commands convert results to DTOs inside an Envelope
// - Commands NEVER contain business logic

pub mod auditorium_commands;
pub mod movie_commands;

pub use auditorium_commands::*;
pub use movie_commands::*;

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::dto::Envelope;
use crate::application::state::AppState;
use crate::services::{ErrorKind, IntegerInput};

/// Every channel the dispatcher answers on
pub const CHANNELS: &[&str] = &[
    "movies:create",
    "movies:getAll",
    "movies:getById",
    "movies:update",
    "movies:delete",
    "movies:search",
    "movies:changeStatus",
    "movies:getAvailable",
    "auditorium:create",
    "auditorium:getAll",
    "auditorium:getById",
    "auditorium:update",
    "auditorium:delete",
    "auditorium:getAvailable",
];

/// Route a channel name and its JSON payload to the matching handler
pub fn dispatch(state: &AppState, channel: &str, payload: Value) -> Envelope {
    debug!("Dispatching {}", channel);

    match channel {
        "movies:create" => create_movie(state, payload),
        "movies:getAll" => get_movies(state, payload),
        "movies:getById" => get_movie_by_id(state, payload),
        "movies:update" => update_movie(state, payload),
        "movies:delete" => delete_movie(state, payload),
        "movies:search" => search_movies(state, payload),
        "movies:changeStatus" => change_movie_status(state, payload),
        "movies:getAvailable" => get_available_movies(state),
        "auditorium:create" => create_auditorium(state, payload),
        "auditorium:getAll" => get_auditoriums(state, payload),
        "auditorium:getById" => get_auditorium_by_id(state, payload),
        "auditorium:update" => update_auditorium(state, payload),
        "auditorium:delete" => delete_auditorium(state, payload),
        "auditorium:getAvailable" => get_available_auditoriums(state),
        unknown => Envelope::failure(
            ErrorKind::Validation,
            format!("Unknown channel: {}", unknown),
        ),
    }
}

// ============================================================================
// SHAPE CHECKS
// ============================================================================

pub(crate) fn shape_error(message: &str) -> Envelope {
    Envelope::failure(ErrorKind::Validation, message)
}

/// A positive id given as a number or numeric string
pub(crate) fn positive_id(value: &Value) -> Option<i64> {
    serde_json::from_value::<IntegerInput>(value.clone())
        .ok()
        .and_then(|input| input.as_integer())
        .filter(|id| *id > 0)
}

/// Deserialize an object payload; anything else is a shape failure
pub(crate) fn object_body<T: DeserializeOwned>(value: Value) -> Option<T> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Like `object_body`, but `null` means "no filters"
pub(crate) fn optional_body<T: DeserializeOwned + Default>(value: Value) -> Option<T> {
    match value {
        Value::Null => Some(T::default()),
        other => object_body(other),
    }
}

/// Split an update payload `{id, <key>}` into the id and the body
pub(crate) fn update_parts(payload: Value, key: &str) -> Result<(i64, Value), &'static str> {
    let mut payload = match payload {
        Value::Object(map) => map,
        _ => return Err("Missing or invalid data"),
    };

    let id = payload
        .get("id")
        .and_then(positive_id)
        .ok_or("Invalid ID")?;

    match payload.remove(key) {
        Some(body @ Value::Object(_)) => Ok((id, body)),
        _ => Err("Missing or invalid update data"),
    }
}
