//! Per-instance engine tunables.
//!
//! Two engines differ only in their `EngineConfig`. Fixed physical values
//! live in `skyguard_core::constants`.

use serde::{Deserialize, Serialize};

use skyguard_core::enums::RestockPolicy;
use skyguard_core::error::ConfigError;
use skyguard_core::types::GeoPosition;

/// Geographic rectangle aircraft live in. Leaving it retires the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl SpawnBounds {
    /// Rectangle of `half_lat` by `half_lng` degrees around a center.
    pub fn around(center: &GeoPosition, half_lat: f64, half_lng: f64) -> Self {
        Self {
            min_lat: center.lat - half_lat,
            max_lat: center.lat + half_lat,
            min_lng: center.lng - half_lng,
            max_lng: center.lng + half_lng,
        }
    }

    pub fn contains(&self, position: &GeoPosition) -> bool {
        (self.min_lat..=self.max_lat).contains(&position.lat)
            && (self.min_lng..=self.max_lng).contains(&position.lng)
    }

    /// Finite, non-empty and within latitude/longitude limits.
    pub fn is_valid(&self) -> bool {
        [self.min_lat, self.max_lat, self.min_lng, self.max_lng]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lat <= self.max_lat
            && self.min_lng <= self.max_lng
            && self.min_lat >= -90.0
            && self.max_lat <= 90.0
            && self.min_lng >= -180.0
            && self.max_lng <= 180.0
    }
}

/// Inclusive range of seconds between jittered activity runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl IntervalRange {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    pub fn is_valid(&self) -> bool {
        self.min_secs.is_finite()
            && self.max_secs.is_finite()
            && self.min_secs >= 0.0
            && self.min_secs <= self.max_secs
    }
}

/// Configuration for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Label used in log fields.
    pub name: String,
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Where interceptors launch from; proximity is measured against it.
    pub defended_center: GeoPosition,
    pub spawn_bounds: SpawnBounds,

    // --- Population ---
    pub initial_aircraft: u32,
    /// Population floor; no random retirement at or below it.
    pub min_aircraft: u32,
    /// Population cap; no spawning at or above it.
    pub max_aircraft: u32,
    /// Chance per world tick of spawning one aircraft.
    pub spawn_probability: f64,
    /// Chance per world tick of retiring one aircraft.
    pub retire_probability: f64,

    // --- Alerts ---
    pub alert_interval: IntervalRange,
    pub alert_probability: f64,

    // --- Autonomous engagement ---
    pub engagement_interval: IntervalRange,
    pub launch_probability: f64,

    // --- Interceptors ---
    pub max_interceptors: u32,
    pub initial_interceptors: u32,
    pub restock_policy: RestockPolicy,
    pub missile_speed_kmh: f64,
    pub missile_designation: String,
}

impl EngineConfig {
    /// Server-side engine: larger population, conservative fire doctrine,
    /// no restock.
    pub fn authoritative() -> Self {
        let defended_center = GeoPosition::new(46.0, 8.0, 0.0);
        Self {
            name: "authoritative".to_string(),
            seed: 42,
            defended_center,
            spawn_bounds: SpawnBounds::around(&defended_center, 2.5, 3.5),
            initial_aircraft: 18,
            min_aircraft: 10,
            max_aircraft: 28,
            spawn_probability: 0.35,
            retire_probability: 0.05,
            alert_interval: IntervalRange::new(4.0, 10.0),
            alert_probability: 0.7,
            engagement_interval: IntervalRange::new(6.0, 12.0),
            launch_probability: 0.4,
            max_interceptors: 12,
            initial_interceptors: 12,
            restock_policy: RestockPolicy::NoRestock,
            missile_speed_kmh: 4_500.0,
            missile_designation: "SG-9".to_string(),
        }
    }

    /// Browser-local engine: smaller population, eager fire doctrine,
    /// restocks on every kill so the demo never runs dry.
    pub fn client_local() -> Self {
        let defended_center = GeoPosition::new(46.0, 8.0, 0.0);
        Self {
            name: "client-local".to_string(),
            seed: 7,
            defended_center,
            spawn_bounds: SpawnBounds::around(&defended_center, 2.0, 3.0),
            initial_aircraft: 10,
            min_aircraft: 5,
            max_aircraft: 16,
            spawn_probability: 0.3,
            retire_probability: 0.08,
            alert_interval: IntervalRange::new(3.0, 8.0),
            alert_probability: 0.8,
            engagement_interval: IntervalRange::new(3.0, 8.0),
            launch_probability: 0.65,
            max_interceptors: 10,
            initial_interceptors: 8,
            restock_policy: RestockPolicy::RestockOnKill,
            missile_speed_kmh: 4_000.0,
            missile_designation: "SG-7L".to_string(),
        }
    }

    /// Reject values the engine cannot run with. Configs built in code
    /// from the presets always pass; deserialized ones should be checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spawn_bounds.is_valid() {
            return Err(ConfigError::InvalidBounds);
        }
        let center = &self.defended_center;
        if !(center.lat.is_finite() && center.lng.is_finite() && center.altitude.is_finite()) {
            return Err(ConfigError::InvalidCenter);
        }
        if !self.alert_interval.is_valid() {
            return Err(ConfigError::InvalidInterval { field: "alert" });
        }
        if !self.engagement_interval.is_valid() {
            return Err(ConfigError::InvalidInterval {
                field: "engagement",
            });
        }
        for (field, value) in [
            ("spawn_probability", self.spawn_probability),
            ("retire_probability", self.retire_probability),
            ("alert_probability", self.alert_probability),
            ("launch_probability", self.launch_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        if self.min_aircraft > self.max_aircraft {
            return Err(ConfigError::InvalidPopulation {
                min: self.min_aircraft,
                max: self.max_aircraft,
            });
        }
        if !(self.missile_speed_kmh.is_finite() && self.missile_speed_kmh > 0.0) {
            return Err(ConfigError::InvalidMissileSpeed(self.missile_speed_kmh));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::authoritative()
    }
}
