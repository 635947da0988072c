//! Prediction-deviation anomaly detector.
//!
//! Remembers the path predicted for each aircraft on the previous
//! classification pass and scores how far the aircraft strayed from the
//! first predicted sample.

use std::collections::BTreeMap;

use skyguard_core::constants::{ANOMALY_DEAD_ZONE_KM, ANOMALY_SATURATION_KM};
use skyguard_core::types::{AircraftId, GeoPosition};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnomalyDetector {
    predictions: BTreeMap<AircraftId, Vec<GeoPosition>>,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anomaly score for an aircraft's actual position. Zero when no
    /// prediction exists for the id.
    pub fn score(&self, id: AircraftId, actual: &GeoPosition) -> f64 {
        match self.predictions.get(&id).and_then(|path| path.first()) {
            Some(predicted) => saturation_score(predicted.planar_distance_km(actual)),
            None => 0.0,
        }
    }

    /// Replace all predictions with this pass's paths. Ids missing from
    /// `paths` are evicted.
    pub fn replace(&mut self, paths: BTreeMap<AircraftId, Vec<GeoPosition>>) {
        self.predictions = paths;
    }

    /// Drop the prediction for one id.
    pub fn forget(&mut self, id: AircraftId) {
        self.predictions.remove(&id);
    }

    pub fn predictions(&self) -> &BTreeMap<AircraftId, Vec<GeoPosition>> {
        &self.predictions
    }

    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}

/// Map a deviation distance to [0, 100]: zero inside the dead zone, 100 at
/// and beyond saturation, linear in between.
pub fn saturation_score(deviation_km: f64) -> f64 {
    if !deviation_km.is_finite() || deviation_km <= ANOMALY_DEAD_ZONE_KM {
        return 0.0;
    }
    if deviation_km >= ANOMALY_SATURATION_KM {
        return 100.0;
    }
    (deviation_km - ANOMALY_DEAD_ZONE_KM) / (ANOMALY_SATURATION_KM - ANOMALY_DEAD_ZONE_KM) * 100.0
}
