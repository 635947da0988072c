//! Simulation constants and tuning parameters.
//!
//! Per-instance tunables (population caps, launch probabilities, restock
//! policy) live in the sim crate's `EngineConfig`; values here are fixed
//! for every engine.

// --- Time ---

/// Seconds of simulation time per base tick (missile kinematics cadence).
pub const BASE_TICK_SECS: f64 = 0.1;

/// Base ticks between world updates (position, classification, snapshot).
pub const WORLD_UPDATE_TICKS: u64 = 20;

/// Seconds between world updates.
pub const WORLD_UPDATE_SECS: f64 = BASE_TICK_SECS * WORLD_UPDATE_TICKS as f64;

// --- Geography ---

/// Kilometers per degree of latitude.
pub const KM_PER_DEG_LAT: f64 = 111.32;

// --- Bounded buffers ---

/// Maximum number of world snapshots kept for rewind.
pub const HISTORY_CAPACITY: usize = 100;

/// Maximum number of alerts kept in the log.
pub const ALERT_LOG_CAPACITY: usize = 50;

/// Capacity of the per-aircraft confidence score ring buffer.
pub const SCORE_HISTORY_CAPACITY: usize = 10;

// --- Classification ---

/// Weight of the category base-risk factor.
pub const WEIGHT_CATEGORY: f64 = 0.20;
/// Weight of the IFF factor.
pub const WEIGHT_IFF: f64 = 0.15;
/// Weight of the proximity factor.
pub const WEIGHT_PROXIMITY: f64 = 0.20;
/// Weight of the heading-change factor.
pub const WEIGHT_HEADING_CHANGE: f64 = 0.10;
/// Weight of the speed-envelope factor.
pub const WEIGHT_SPEED_DEVIATION: f64 = 0.10;
/// Weight of the altitude-envelope factor.
pub const WEIGHT_ALTITUDE_DEVIATION: f64 = 0.10;
/// Weight of the anomaly factor.
pub const WEIGHT_ANOMALY: f64 = 0.15;

/// Distance from the defended center at which proximity risk reaches zero (km).
pub const PROXIMITY_RADIUS_KM: f64 = 300.0;

/// Heading change that saturates the heading factor (degrees).
pub const HEADING_CHANGE_SATURATION_DEG: f64 = 45.0;

/// Upper bound (exclusive) of the FRIENDLY score band.
pub const FRIENDLY_MAX_SCORE: f64 = 20.0;
/// Upper bound (exclusive) of the NEUTRAL score band.
pub const NEUTRAL_MAX_SCORE: f64 = 40.0;
/// Upper bound (exclusive) of the SUSPECT score band.
pub const SUSPECT_MAX_SCORE: f64 = 60.0;

/// Score change between oldest and newest sample that counts as a trend.
pub const TREND_BAND: f64 = 5.0;

// --- Prediction / anomaly ---

/// Number of samples in a predicted path.
pub const PREDICTION_SAMPLES: usize = 6;

/// Spacing between predicted samples (seconds). Matches the world update
/// period so sample 0 is the expected position at the next classification.
pub const PREDICTION_STEP_SECS: f64 = WORLD_UPDATE_SECS;

/// Deviations at or below this distance score zero (km).
pub const ANOMALY_DEAD_ZONE_KM: f64 = 0.02;

/// Deviations at or above this distance score 100 (km).
pub const ANOMALY_SATURATION_KM: f64 = 0.5;

// --- Engagement scheduling ---

/// Level weight applied to SUSPECT tracks.
pub const SUSPECT_ENGAGEMENT_WEIGHT: f64 = 0.6;
/// Level weight applied to HOSTILE tracks.
pub const HOSTILE_ENGAGEMENT_WEIGHT: f64 = 1.0;

/// Distance scale for the inverse-distance term (km).
pub const ENGAGEMENT_DISTANCE_SCALE_KM: f64 = 100.0;

/// Minimum engagement score for an ENGAGE recommendation.
pub const ENGAGE_SCORE_THRESHOLD: f64 = 45.0;
/// Minimum engagement score for a TRACK recommendation.
pub const TRACK_SCORE_THRESHOLD: f64 = 20.0;

// --- Missiles ---

/// Remaining distance below which a pursuing missile impacts (km).
pub const IMPACT_EPSILON_KM: f64 = 0.5;

/// In-flight time after which a missile self-destructs (seconds).
pub const MISSILE_MAX_FLIGHT_SECS: f64 = 240.0;

/// How long a deactivated missile is kept for trail fade-out (seconds).
pub const MISSILE_RETENTION_SECS: f64 = 3.0;

/// Lifetime of an explosion record (seconds).
pub const EXPLOSION_TTL_SECS: f64 = 3.0;
