//! Engagement scheduler: ranks classified aircraft for interception.
//!
//! Rebuilt from scratch every world tick and stored on the engine, not in
//! the ECS world.

use std::cmp::Ordering;

use skyguard_core::components::Aircraft;
use skyguard_core::constants::*;
use skyguard_core::enums::{Recommendation, ThreatLevel};
use skyguard_core::state::EngagementCandidate;
use skyguard_core::types::GeoPosition;

use crate::guidance::time_to_intercept_secs;

/// Build the ordered engagement queue. Only SUSPECT and HOSTILE aircraft are
/// candidates; highest score first, ties broken by lower id.
pub fn build_queue<'a>(
    aircraft: impl IntoIterator<Item = &'a Aircraft>,
    defended_center: &GeoPosition,
    interceptor_speed_kmh: f64,
) -> Vec<EngagementCandidate> {
    let mut queue: Vec<EngagementCandidate> = aircraft
        .into_iter()
        .filter_map(|a| candidate(a, defended_center, interceptor_speed_kmh))
        .collect();

    queue.sort_by(|a, b| {
        b.engagement_score
            .partial_cmp(&a.engagement_score)
            .unwrap_or(Ordering::Equal)
            .then(a.aircraft_id.cmp(&b.aircraft_id))
    });
    queue
}

/// Score a single aircraft, or `None` if it is not a candidate.
pub fn candidate(
    aircraft: &Aircraft,
    defended_center: &GeoPosition,
    interceptor_speed_kmh: f64,
) -> Option<EngagementCandidate> {
    let level = aircraft.threat_level();
    let weight = level_weight(level)?;
    let distance_km = defended_center.planar_distance_km(&aircraft.position);
    let engagement_score = engagement_score(weight, aircraft.confidence_score(), distance_km);

    Some(EngagementCandidate {
        aircraft_id: aircraft.id,
        callsign: aircraft.callsign.clone(),
        threat_level: level,
        engagement_score,
        recommendation: recommend(engagement_score),
        time_to_impact_secs: if level == ThreatLevel::Hostile {
            time_to_intercept_secs(distance_km, interceptor_speed_kmh)
        } else {
            None
        },
    })
}

fn level_weight(level: ThreatLevel) -> Option<f64> {
    match level {
        ThreatLevel::Hostile => Some(HOSTILE_ENGAGEMENT_WEIGHT),
        ThreatLevel::Suspect => Some(SUSPECT_ENGAGEMENT_WEIGHT),
        ThreatLevel::Friendly | ThreatLevel::Neutral => None,
    }
}

/// levelWeight × confidence × inverse distance.
pub fn engagement_score(level_weight: f64, confidence: f64, distance_km: f64) -> f64 {
    let inverse_distance = 1.0 / (1.0 + distance_km.max(0.0) / ENGAGEMENT_DISTANCE_SCALE_KM);
    let score = level_weight * confidence * inverse_distance;
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

pub fn recommend(score: f64) -> Recommendation {
    if score >= ENGAGE_SCORE_THRESHOLD {
        Recommendation::Engage
    } else if score >= TRACK_SCORE_THRESHOLD {
        Recommendation::Track
    } else {
        Recommendation::Clear
    }
}
