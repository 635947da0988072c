//! Events emitted by the engine for whatever transport the host chooses.

use serde::{Deserialize, Serialize};

use crate::components::{Aircraft, Explosion, Missile};
use crate::enums::{AlertCategory, AlertPriority};
use crate::state::SystemStatus;
use crate::types::{GeoPosition, SimTime};

/// Entry in the alert log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u32,
    /// Simulation seconds.
    pub timestamp: f64,
    pub category: AlertCategory,
    pub priority: AlertPriority,
    pub message: String,
    pub position: Option<GeoPosition>,
}

/// Outbound notification that some part of the shared state changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineEvent {
    /// Full aircraft list after a world update.
    AircraftUpdated(Vec<Aircraft>),
    /// Alerts created since the previous report.
    AlertsRaised(Vec<Alert>),
    /// Missiles touched by this tick (launched, moved, or deactivated).
    MissilesUpdated(Vec<Missile>),
    /// Explosions created since the previous report.
    Explosions(Vec<Explosion>),
    StatusChanged(SystemStatus),
}

/// What one call to `tick()` produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub time: SimTime,
    /// Monotone counter, bumped whenever shared state is mutated.
    pub revision: u64,
    pub events: Vec<EngineEvent>,
}

impl TickReport {
    /// Whether anything observable changed during the tick.
    pub fn changed(&self) -> bool {
        !self.events.is_empty()
    }
}
