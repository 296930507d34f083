// src/application/bridge.rs
//
// JSON-lines transport
//
// One request per line: {"id": <any>, "channel": "...", "payload": <any>}
// One response per line: {"id": <echoed>, "channel": "...", ...envelope}

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};

use crate::application::commands::dispatch;
use crate::application::dto::Envelope;
use crate::application::state::AppState;
use crate::error::AppResult;
use crate::services::ErrorKind;

#[derive(Debug, Deserialize)]
pub struct BridgeRequest {
    #[serde(default)]
    pub id: Option<Value>,
    pub channel: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, Serialize)]
pub struct BridgeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(flatten)]
    pub envelope: Envelope,
}

/// Answer a single raw line
pub fn handle_line(state: &AppState, line: &str) -> BridgeResponse {
    match serde_json::from_str::<BridgeRequest>(line) {
        Ok(request) => BridgeResponse {
            envelope: dispatch(state, &request.channel, request.payload),
            id: request.id,
            channel: Some(request.channel),
        },
        Err(e) => {
            warn!("Malformed request: {}", e);
            BridgeResponse {
                id: None,
                channel: None,
                envelope: Envelope::failure(
                    ErrorKind::Validation,
                    format!("Malformed request: {}", e),
                ),
            }
        }
    }
}

/// Serve requests until the reader reaches EOF. Blank lines are skipped.
/// Returns the number of requests answered.
pub fn serve_json_lines<R: BufRead, W: Write>(
    state: &AppState,
    reader: R,
    mut writer: W,
) -> AppResult<usize> {
    let mut answered = 0;

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(state, &line);
        debug!(
            "{} -> success={}",
            response.channel.as_deref().unwrap_or("<malformed>"),
            response.envelope.success
        );

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        answered += 1;
    }

    Ok(answered)
}
