//! JSON request bridge.
//!
//! Transport-agnostic: a host reads a request string from wherever it likes
//! (socket, stdin, a webview) and gets a reply string back. Failures are
//! encoded in the reply rather than returned, so the caller always has
//! something to send.

use serde::{Deserialize, Serialize};

use skyguard_core::commands::{CommandOutcome, EngineCommand};
use skyguard_core::state::WorldState;
use skyguard_core::types::AircraftId;
use skyguard_sim::feed::FeedRecord;

use crate::state::{EngineHandle, HostError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "request", rename_all = "snake_case")]
pub enum Request {
    Command { command: EngineCommand },
    IngestFeed { records: Vec<FeedRecord> },
    GetState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
    Outcome { outcome: CommandOutcome },
    Ingested { ids: Vec<AircraftId> },
    State { state: Box<WorldState> },
    Error { message: String },
}

/// Parse, dispatch and encode one request.
pub fn handle_request(handle: &EngineHandle, request: &str) -> String {
    let reply = match serde_json::from_str::<Request>(request) {
        Ok(request) => dispatch(handle, request).unwrap_or_else(|e| Reply::Error {
            message: e.to_string(),
        }),
        Err(e) => Reply::Error {
            message: format!("malformed request: {e}"),
        },
    };
    serde_json::to_string(&reply).unwrap_or_else(|e| {
        format!(r#"{{"reply":"error","message":"failed to encode reply: {e}"}}"#)
    })
}

pub fn dispatch(handle: &EngineHandle, request: Request) -> Result<Reply, HostError> {
    match request {
        Request::Command { command } => Ok(Reply::Outcome {
            outcome: handle.command(command)?,
        }),
        Request::IngestFeed { records } => Ok(Reply::Ingested {
            ids: handle.ingest_feed(records)?,
        }),
        Request::GetState => Ok(Reply::State {
            state: Box::new(handle.current_state()?),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use skyguard_core::enums::RunState;
    use skyguard_sim::EngineConfig;

    use crate::game_loop::spawn_engine_loop;

    fn reply(handle: &EngineHandle, request: &str) -> Reply {
        serde_json::from_str(&handle_request(handle, request)).unwrap()
    }

    #[test]
    fn test_command_request() {
        let handle = spawn_engine_loop(EngineConfig::client_local(), Duration::from_millis(1)).unwrap();
        let start = reply(&handle, r#"{"request":"command","command":{"type":"Start"}}"#);
        assert_eq!(
            start,
            Reply::Outcome {
                outcome: CommandOutcome::Ack
            }
        );

        match reply(&handle, r#"{"request":"get_state"}"#) {
            Reply::State { state } => assert_eq!(state.run_state, RunState::Running),
            other => panic!("unexpected reply {other:?}"),
        }
        handle.shutdown();
    }

    #[test]
    fn test_errors_become_replies() {
        let handle = spawn_engine_loop(EngineConfig::client_local(), Duration::from_millis(1)).unwrap();

        match reply(&handle, "not json") {
            Reply::Error { message } => assert!(message.starts_with("malformed request")),
            other => panic!("unexpected reply {other:?}"),
        }
        match reply(&handle, r#"{"request":"command","command":{"type":"Pause"}}"#) {
            Reply::Error { message } => assert!(message.contains("stopped")),
            other => panic!("unexpected reply {other:?}"),
        }
        handle.shutdown();
    }

    #[test]
    fn test_ingest_request() {
        let handle = spawn_engine_loop(EngineConfig::client_local(), Duration::from_millis(1)).unwrap();
        handle.start().unwrap();
        handle.pause().unwrap();

        let request = Request::IngestFeed {
            records: vec![FeedRecord {
                icao: "3c6444".to_string(),
                callsign: Some("DLH4AB".to_string()),
                lat: 46.1,
                lng: 8.2,
                altitude_m: Some(9000.0),
                speed_kmh: Some(780.0),
                heading: Some(90.0),
                category_hint: Some("airline".to_string()),
            }],
        };
        let text = serde_json::to_string(&request).unwrap();
        match reply(&handle, &text) {
            Reply::Ingested { ids } => assert_eq!(ids.len(), 1),
            other => panic!("unexpected reply {other:?}"),
        }
        let state = handle.current_state().unwrap();
        assert!(state.aircraft.iter().any(|a| a.callsign == "DLH4AB"));
        handle.shutdown();
    }
}
