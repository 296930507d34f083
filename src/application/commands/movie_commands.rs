// src/application/commands/movie_commands.rs
//
// Movie Command Handlers
//
// RULES:
// - Accept raw JSON payloads
// - Call services
// - Return Envelopes of DTOs
// - Never contain business logic

use serde::Deserialize;
use serde_json::Value;

use super::{object_body, optional_body, positive_id, shape_error, update_parts};
use crate::application::{dto::*, state::AppState};
use crate::services::*;

#[derive(Debug, Deserialize)]
struct SearchPayload {
    term: String,
}

#[derive(Debug, Deserialize)]
struct ChangeStatusPayload {
    id: Value,
    status: String,
}

/// Create a new movie
pub fn create_movie(state: &AppState, payload: Value) -> Envelope {
    let Some(request) = object_body::<CreateMovieRequest>(payload) else {
        return shape_error("Missing or invalid movie data");
    };

    Envelope::from_response(state.movie_service.create_movie(request).map(MovieDto::from))
}

/// List movies, optionally filtered
pub fn get_movies(state: &AppState, payload: Value) -> Envelope {
    let Some(filters) = optional_body::<MovieFilters>(payload) else {
        return Envelope::list_failure(ErrorKind::Validation, "Invalid movie filters");
    };

    let response = state.movie_service.get_all_movies(filters);
    Envelope::from_list_response(response.map(|movies| {
        movies.into_iter().map(MovieDto::from).collect::<Vec<_>>()
    }))
}

/// Get a single movie by ID
pub fn get_movie_by_id(state: &AppState, payload: Value) -> Envelope {
    let Some(id) = positive_id(&payload) else {
        return shape_error("Invalid movie ID");
    };

    Envelope::from_response(state.movie_service.get_movie_by_id(id).map(MovieDto::from))
}

/// Partially update a movie: `{id, movie}`
pub fn update_movie(state: &AppState, payload: Value) -> Envelope {
    let (id, body) = match update_parts(payload, "movie") {
        Ok(parts) => parts,
        Err(message) => return shape_error(message),
    };
    let Ok(request) = serde_json::from_value::<UpdateMovieRequest>(body) else {
        return shape_error("Missing or invalid update data");
    };

    Envelope::from_response(state.movie_service.update_movie(id, request).map(MovieDto::from))
}

/// Delete a movie by ID
pub fn delete_movie(state: &AppState, payload: Value) -> Envelope {
    let Some(id) = positive_id(&payload) else {
        return shape_error("Invalid movie ID");
    };

    Envelope::from_response(state.movie_service.delete_movie(id).map(DeletedMovieDto::from))
}

/// Search titles: the payload is the term itself or `{term}`
pub fn search_movies(state: &AppState, payload: Value) -> Envelope {
    let term = match payload {
        Value::String(term) => term,
        other => match object_body::<SearchPayload>(other) {
            Some(body) => body.term,
            None => {
                return Envelope::list_failure(ErrorKind::Validation, "Missing search term")
            }
        },
    };

    let response = state.movie_service.search_movies(&term);
    Envelope::from_list_response(response.map(|movies| {
        movies.into_iter().map(MovieDto::from).collect::<Vec<_>>()
    }))
}

/// Change only the status: `{id, status}`
pub fn change_movie_status(state: &AppState, payload: Value) -> Envelope {
    let Some(body) = object_body::<ChangeStatusPayload>(payload) else {
        return shape_error("Missing or invalid data");
    };
    let Some(id) = positive_id(&body.id) else {
        return shape_error("Invalid movie ID");
    };

    let response = state.movie_service.change_movie_status(id, &body.status);
    Envelope::from_response(response.map(MovieDto::from))
}

/// List movies currently available for screening
pub fn get_available_movies(state: &AppState) -> Envelope {
    let response = state.movie_service.get_available_movies();
    Envelope::from_list_response(response.map(|movies| {
        movies.into_iter().map(MovieDto::from).collect::<Vec<_>>()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::dispatch;
    use crate::db::create_test_pool;
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::from_pool(Arc::new(create_test_pool().unwrap()))
    }

    fn create(state: &AppState, title: &str) -> i64 {
        let envelope = dispatch(
            state,
            "movies:create",
            json!({"title": title, "duration": 100}),
        );
        assert!(envelope.success, "{}", envelope.message);
        envelope.data["id"].as_i64().unwrap()
    }

    #[test]
    fn test_create_returns_camel_case_dto() {
        let state = state();
        let envelope = dispatch(
            &state,
            "movies:create",
            json!({"title": "  Aquarius ", "duration": 142, "genre": "Drama"}),
        );

        assert!(envelope.success);
        assert_eq!(envelope.data["title"], "Aquarius");
        assert_eq!(envelope.data["status"], "unavailable");
        assert_eq!(envelope.data["certification"], "everyone");
        assert!(envelope.data["createdAt"].is_string());
        assert!(envelope.data.get("created_at").is_none());
    }

    #[test]
    fn test_create_shape_failures() {
        let state = state();

        for payload in [Value::Null, json!("Aquarius"), json!([1, 2])] {
            let envelope = dispatch(&state, "movies:create", payload);
            assert_eq!(envelope.message, "Missing or invalid movie data");
            assert_eq!(envelope.data, Value::Null);
        }
    }

    #[test]
    fn test_get_all_and_filters() {
        let state = state();
        create(&state, "Tatuagem");
        create(&state, "O Som ao Redor");

        let all = dispatch(&state, "movies:getAll", Value::Null);
        assert_eq!(all.count, Some(2));
        assert_eq!(all.data.as_array().unwrap().len(), 2);

        let none_available = dispatch(&state, "movies:getAll", json!({"status": "available"}));
        assert_eq!(none_available.count, Some(0));
        assert_eq!(none_available.data, json!([]));

        let bad_filter = dispatch(&state, "movies:getAll", json!({"status": "gone"}));
        assert!(!bad_filter.success);
        assert_eq!(bad_filter.data, json!([]));
        assert_eq!(bad_filter.count, Some(0));
    }

    #[test]
    fn test_get_by_id_and_delete() {
        let state = state();
        let id = create(&state, "Bicho de Sete Cabeças");

        let found = dispatch(&state, "movies:getById", json!(id));
        assert_eq!(found.data["id"], id);

        let as_text = dispatch(&state, "movies:getById", json!(id.to_string()));
        assert!(as_text.success);

        let invalid = dispatch(&state, "movies:getById", json!(-1));
        assert_eq!(invalid.message, "Invalid movie ID");

        let deleted = dispatch(&state, "movies:delete", json!(id));
        assert_eq!(deleted.data, json!({"id": id, "title": "Bicho de Sete Cabeças"}));

        let missing = dispatch(&state, "movies:getById", json!(id));
        assert_eq!(missing.error, Some(ErrorKind::NotFound));
        assert!(missing.message.contains(&id.to_string()));
    }

    #[test]
    fn test_update_channel() {
        let state = state();
        let id = create(&state, "Que Horas Ela Volta?");

        let updated = dispatch(
            &state,
            "movies:update",
            json!({"id": id, "movie": {"duration": 112, "overview": "Val"}}),
        );
        assert!(updated.success);
        assert_eq!(updated.data["duration"], 112);
        assert_eq!(updated.data["overview"], "Val");

        let cleared = dispatch(
            &state,
            "movies:update",
            json!({"id": id, "movie": {"overview": null}}),
        );
        assert_eq!(cleared.data["overview"], Value::Null);

        let no_body = dispatch(&state, "movies:update", json!({"id": id}));
        assert_eq!(no_body.message, "Missing or invalid update data");
    }

    #[test]
    fn test_numeric_text_duration_over_channels() {
        let state = state();

        let created = dispatch(
            &state,
            "movies:create",
            json!({"title": "Central do Brasil", "duration": "128"}),
        );
        assert!(created.success, "{}", created.message);
        assert_eq!(created.data["duration"], 128);
        let id = created.data["id"].as_i64().unwrap();

        let updated = dispatch(
            &state,
            "movies:update",
            json!({"id": id, "movie": {"duration": "130"}}),
        );
        assert!(updated.success, "{}", updated.message);
        assert_eq!(updated.data["duration"], 130);

        let fractional = dispatch(
            &state,
            "movies:update",
            json!({"id": id, "movie": {"duration": "90.5"}}),
        );
        assert_eq!(fractional.error, Some(ErrorKind::Validation));
    }

    #[test]
    fn test_search_and_status_channels() {
        let state = state();
        let id = create(&state, "Estômago");

        let found = dispatch(&state, "movies:search", json!("estô"));
        assert_eq!(found.count, Some(1));
        let found = dispatch(&state, "movies:search", json!({"term": "Est"}));
        assert_eq!(found.count, Some(1));

        let changed = dispatch(
            &state,
            "movies:changeStatus",
            json!({"id": id, "status": "available"}),
        );
        assert!(changed.success);
        assert_eq!(changed.data["status"], "available");

        let available = dispatch(&state, "movies:getAvailable", Value::Null);
        assert_eq!(available.count, Some(1));

        let rejected = dispatch(
            &state,
            "movies:changeStatus",
            json!({"id": id, "status": "invalid"}),
        );
        assert_eq!(rejected.error, Some(ErrorKind::Validation));
    }
}
