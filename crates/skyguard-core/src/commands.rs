//! Commands a host can send to an engine.
//!
//! Each command is applied synchronously against the orchestrator.

use serde::{Deserialize, Serialize};

use crate::types::{AircraftId, MissileId};

/// All inbound engine commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineCommand {
    // --- Lifecycle ---
    Start,
    Stop,
    Pause,
    Resume,
    /// Replace live state with the snapshot `steps` entries behind the newest.
    Rewind { steps: usize },

    // --- Engagement ---
    LaunchAt { target_id: AircraftId },
}

/// Successful outcome of a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandOutcome {
    Ack,
    Launched { missile_id: MissileId },
    Rewound { tick: u64 },
}
