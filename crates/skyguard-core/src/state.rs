//! World state views: the complete inspectable state of an engine.

use serde::{Deserialize, Serialize};

use crate::components::{Aircraft, Explosion, Missile};
use crate::enums::*;
use crate::events::Alert;
use crate::types::{AircraftId, SimTime};

/// Complete engine state returned by `current_state()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub time: SimTime,
    pub run_state: RunState,
    pub revision: u64,
    /// Sorted by id.
    pub aircraft: Vec<Aircraft>,
    /// Sorted by id; includes recently deactivated missiles.
    pub missiles: Vec<Missile>,
    /// Oldest first.
    pub alerts: Vec<Alert>,
    pub explosions: Vec<Explosion>,
    pub engagement_queue: Vec<EngagementCandidate>,
    pub status: SystemStatus,
    pub history_len: usize,
}

/// Derived engagement priority for one aircraft. Rebuilt every world tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementCandidate {
    pub aircraft_id: AircraftId,
    pub callsign: String,
    pub threat_level: ThreatLevel,
    pub engagement_score: f64,
    pub recommendation: Recommendation,
    /// Seconds for a reference interceptor to cover the distance to the
    /// defended center. `None` unless HOSTILE.
    pub time_to_impact_secs: Option<f64>,
}

/// Aggregate system status summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub aircraft_count: u32,
    pub hostile_count: u32,
    pub suspect_count: u32,
    pub threat_level: SystemThreatLevel,
    /// Simulation seconds spent running.
    pub uptime_secs: f64,
    /// Available interceptors as a percentage of the maximum.
    pub readiness: f64,
    pub available_interceptors: u32,
}
