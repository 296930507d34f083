// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - It provides the boundary between the UI channel and the Services
// - It translates between raw JSON payloads, DTOs and service results
// - It never contains business rules

pub mod bridge;
pub mod commands;
pub mod dto;
pub mod state;

pub use bridge::{handle_line, serve_json_lines, BridgeRequest, BridgeResponse};
pub use commands::{dispatch, CHANNELS};
pub use dto::*;
pub use state::AppState;
