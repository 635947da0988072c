//! Weighted multi-factor threat classifier.
//!
//! Seven independent risk factors, each normalized to [0, 100], are
//! weighted and summed into a confidence score. The level comes from
//! `levels::bucket`, never from anywhere else.

use skyguard_core::components::{Aircraft, RiskFactor, ThreatAssessment};
use skyguard_core::constants::*;
use skyguard_core::enums::ScoreTrend;
use skyguard_core::ring::RingBuffer;
use skyguard_core::types::GeoPosition;

use crate::levels::bucket;
use crate::prediction::predict_path;
use crate::profiles::get_profile;

/// Input to the classifier for a single aircraft.
pub struct ClassificationInput<'a> {
    pub aircraft: &'a Aircraft,
    /// Absolute heading change since the previous tick (degrees, [0, 180]).
    /// Zero on an aircraft's first tick.
    pub heading_delta: f64,
    /// Score from the anomaly detector. Zero on an aircraft's first tick.
    pub anomaly_score: f64,
    /// Outcome of this tick's IFF interrogation.
    pub iff_responding: bool,
    pub defended_center: GeoPosition,
}

/// Produce a complete assessment for one aircraft.
pub fn assess(input: &ClassificationInput) -> ThreatAssessment {
    let aircraft = input.aircraft;
    let risk_factors = risk_factors(input);

    let confidence_score = risk_factors
        .iter()
        .map(|f| f.weighted_score)
        .sum::<f64>()
        .clamp(0.0, 100.0);

    let mut previous_scores = aircraft.score_history();
    previous_scores.push(confidence_score);
    let trend = score_trend(&previous_scores);

    ThreatAssessment {
        confidence_score,
        threat_level: bucket(confidence_score, aircraft.category),
        risk_factors,
        anomaly_score: sanitize(input.anomaly_score),
        iff_responding: input.iff_responding,
        predicted_path: predict_path(&aircraft.position, aircraft.heading, aircraft.speed_kmh),
        previous_scores,
        trend,
    }
}

/// Evaluate all seven factors in display order.
pub fn risk_factors(input: &ClassificationInput) -> Vec<RiskFactor> {
    let aircraft = input.aircraft;
    let profile = get_profile(aircraft.category);

    let distance_km = input.defended_center.planar_distance_km(&aircraft.position);
    let proximity = (1.0 - distance_km / PROXIMITY_RADIUS_KM).clamp(0.0, 1.0) * 100.0;
    let heading_change =
        (input.heading_delta.abs() / HEADING_CHANGE_SATURATION_DEG).min(1.0) * 100.0;

    vec![
        factor("category", profile.base_risk, WEIGHT_CATEGORY),
        factor(
            "iff",
            if input.iff_responding { 0.0 } else { 100.0 },
            WEIGHT_IFF,
        ),
        factor("proximity", proximity, WEIGHT_PROXIMITY),
        factor("headingChange", heading_change, WEIGHT_HEADING_CHANGE),
        factor(
            "speedDeviation",
            profile.speed.deviation_score(aircraft.speed_kmh),
            WEIGHT_SPEED_DEVIATION,
        ),
        factor(
            "altitudeDeviation",
            profile.altitude.deviation_score(aircraft.position.altitude),
            WEIGHT_ALTITUDE_DEVIATION,
        ),
        factor("anomaly", input.anomaly_score, WEIGHT_ANOMALY),
    ]
}

/// Direction of the score history, oldest sample vs newest.
pub fn score_trend(scores: &RingBuffer<f64>) -> ScoreTrend {
    match (scores.oldest(), scores.newest()) {
        (Some(oldest), Some(newest)) if scores.len() > 1 => {
            let delta = newest - oldest;
            if delta > TREND_BAND {
                ScoreTrend::Rising
            } else if delta < -TREND_BAND {
                ScoreTrend::Falling
            } else {
                ScoreTrend::Flat
            }
        }
        _ => ScoreTrend::Flat,
    }
}

fn factor(name: &str, raw_score: f64, weight: f64) -> RiskFactor {
    let raw_score = sanitize(raw_score);
    RiskFactor {
        name: name.to_string(),
        raw_score,
        weight,
        weighted_score: raw_score * weight,
    }
}

/// NaN/inf inputs count as zero; everything else is clamped to [0, 100].
fn sanitize(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
