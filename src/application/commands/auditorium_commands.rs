// src/application/commands/auditorium_commands.rs
//
// Auditorium Command Handlers

use serde_json::Value;

use super::{object_body, optional_body, positive_id, shape_error, update_parts};
use crate::application::{dto::*, state::AppState};
use crate::services::*;

/// Create a new auditorium
pub fn create_auditorium(state: &AppState, payload: Value) -> Envelope {
    let Some(request) = object_body::<CreateAuditoriumRequest>(payload) else {
        return shape_error("Missing or invalid auditorium data");
    };

    let response = state.auditorium_service.create_auditorium(request);
    Envelope::from_response(response.map(AuditoriumDto::from))
}

/// List auditoriums, optionally filtered
pub fn get_auditoriums(state: &AppState, payload: Value) -> Envelope {
    let Some(filters) = optional_body::<AuditoriumFilters>(payload) else {
        return Envelope::list_failure(ErrorKind::Validation, "Invalid auditorium filters");
    };

    let response = state.auditorium_service.get_all_auditoriums(filters);
    Envelope::from_list_response(response.map(|rooms| {
        rooms.into_iter().map(AuditoriumDto::from).collect::<Vec<_>>()
    }))
}

pub fn get_auditorium_by_id(state: &AppState, payload: Value) -> Envelope {
    let Some(id) = positive_id(&payload) else {
        return shape_error("Invalid auditorium ID");
    };

    let response = state.auditorium_service.get_auditorium_by_id(id);
    Envelope::from_response(response.map(AuditoriumDto::from))
}

/// Partially update an auditorium: `{id, auditorium}`
pub fn update_auditorium(state: &AppState, payload: Value) -> Envelope {
    let (id, body) = match update_parts(payload, "auditorium") {
        Ok(parts) => parts,
        Err(message) => return shape_error(message),
    };
    let Ok(request) = serde_json::from_value::<UpdateAuditoriumRequest>(body) else {
        return shape_error("Missing or invalid update data");
    };

    let response = state.auditorium_service.update_auditorium(id, request);
    Envelope::from_response(response.map(AuditoriumDto::from))
}

pub fn delete_auditorium(state: &AppState, payload: Value) -> Envelope {
    let Some(id) = positive_id(&payload) else {
        return shape_error("Invalid auditorium ID");
    };

    let response = state.auditorium_service.delete_auditorium(id);
    Envelope::from_response(response.map(DeletedAuditoriumDto::from))
}

pub fn get_available_auditoriums(state: &AppState) -> Envelope {
    let response = state.auditorium_service.get_available_auditoriums();
    Envelope::from_list_response(response.map(|rooms| {
        rooms.into_iter().map(AuditoriumDto::from).collect::<Vec<_>>()
    }))
}
