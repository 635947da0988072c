//! Naive future-path prediction by linear extrapolation.
//!
//! The only consumer is the anomaly detector's next-tick comparison, so
//! there is no filtering or turn modelling.

use skyguard_core::constants::{PREDICTION_SAMPLES, PREDICTION_STEP_SECS};
use skyguard_core::types::GeoPosition;

/// Distance covered at `speed_kmh` in `secs` seconds (km).
pub fn distance_km(speed_kmh: f64, secs: f64) -> f64 {
    speed_kmh * secs / 3600.0
}

/// Extrapolate `PREDICTION_SAMPLES` future positions spaced by
/// `PREDICTION_STEP_SECS`, holding heading, speed and altitude.
pub fn predict_path(position: &GeoPosition, heading_deg: f64, speed_kmh: f64) -> Vec<GeoPosition> {
    (1..=PREDICTION_SAMPLES)
        .map(|step| {
            let secs = PREDICTION_STEP_SECS * step as f64;
            position.advanced(heading_deg, distance_km(speed_kmh, secs))
        })
        .collect()
}
