//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Broad aircraft category. Drives base risk, IFF behavior and envelopes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftCategory {
    Commercial,
    Military,
    Private,
    Drone,
    #[default]
    Unknown,
}

/// Threat classification bucket. Ordered from least to most threatening.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    Friendly,
    #[default]
    Neutral,
    Suspect,
    Hostile,
}

/// Direction of an aircraft's recent confidence scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTrend {
    Rising,
    Falling,
    #[default]
    Flat,
}

/// Engagement recommendation tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Engage,
    Track,
    Clear,
}

/// Interceptor missile lifecycle state. LAUNCHED is instantaneous and
/// never observed; a fresh missile is already `Pursuing`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileStatus {
    #[default]
    Pursuing,
    /// Reached the target; kill effects applied.
    Impacted,
    /// Target vanished mid-flight.
    Lost,
    /// In-flight timeout.
    Expired,
}

/// Whether a confirmed kill replenishes available interceptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestockPolicy {
    RestockOnKill,
    #[default]
    NoRestock,
}

/// Alert category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCategory {
    Detection,
    Threat,
    System,
    Info,
}

/// Alert priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
}

/// Aggregate threat level for the system status summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemThreatLevel {
    #[default]
    Low,
    Medium,
    High,
}

/// Engine lifecycle state (top-level).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
    Paused,
    /// Live state was replaced from history; behaves as paused.
    Rewinding,
}

impl RunState {
    /// Whether the periodic activities may mutate world state.
    pub fn is_live(self) -> bool {
        self == RunState::Running
    }
}
