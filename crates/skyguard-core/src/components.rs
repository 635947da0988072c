//! Entity records stored as hecs components.
//!
//! These are plain data. The one exception is `Aircraft`, whose threat level
//! can only be written together with the assessment that implies it.

use serde::{Deserialize, Serialize};

use crate::constants::SCORE_HISTORY_CAPACITY;
use crate::enums::*;
use crate::ring::RingBuffer;
use crate::types::{AircraftId, GeoPosition, MissileId};

/// One named, weighted input to the threat score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    /// Normalized score in [0, 100].
    pub raw_score: f64,
    pub weight: f64,
    pub weighted_score: f64,
}

/// Classifier output for one aircraft on one tick. Replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatAssessment {
    /// Weighted sum of risk factors, clamped to [0, 100].
    pub confidence_score: f64,
    pub threat_level: ThreatLevel,
    pub risk_factors: Vec<RiskFactor>,
    /// Deviation from last tick's prediction, [0, 100].
    pub anomaly_score: f64,
    pub iff_responding: bool,
    /// Future positions, one per prediction step.
    pub predicted_path: Vec<GeoPosition>,
    /// Recent confidence scores, oldest first. Display only.
    pub previous_scores: RingBuffer<f64>,
    pub trend: ScoreTrend,
}

/// A tracked aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AircraftRecord")]
pub struct Aircraft {
    pub id: AircraftId,
    pub callsign: String,
    pub category: AircraftCategory,
    pub position: GeoPosition,
    /// Ground speed (km/h).
    pub speed_kmh: f64,
    /// Heading in degrees, 0 = North, clockwise, [0, 360).
    pub heading: f64,
    threat_level: ThreatLevel,
    classification: Option<ThreatAssessment>,
}

impl Aircraft {
    /// A fresh, unclassified aircraft. Threat level starts NEUTRAL.
    pub fn new(
        id: AircraftId,
        callsign: impl Into<String>,
        category: AircraftCategory,
        position: GeoPosition,
        speed_kmh: f64,
        heading: f64,
    ) -> Self {
        Self {
            id,
            callsign: callsign.into(),
            category,
            position,
            speed_kmh,
            heading: crate::types::normalize_heading(heading),
            threat_level: ThreatLevel::Neutral,
            classification: None,
        }
    }

    pub fn threat_level(&self) -> ThreatLevel {
        self.threat_level
    }

    pub fn classification(&self) -> Option<&ThreatAssessment> {
        self.classification.as_ref()
    }

    /// Confidence score of the current assessment, 0 when unclassified.
    pub fn confidence_score(&self) -> f64 {
        self.classification
            .as_ref()
            .map(|c| c.confidence_score)
            .unwrap_or(0.0)
    }

    /// Score history carried over from the previous assessment.
    pub fn score_history(&self) -> RingBuffer<f64> {
        self.classification
            .as_ref()
            .map(|c| c.previous_scores.clone())
            .unwrap_or_else(|| RingBuffer::new(SCORE_HISTORY_CAPACITY))
    }

    /// Replace the assessment. The threat level follows it.
    pub fn apply_assessment(&mut self, assessment: ThreatAssessment) {
        self.threat_level = assessment.threat_level;
        self.classification = Some(assessment);
    }
}

/// Inbound shape of `Aircraft`. Any threat level on the wire is ignored
/// and re-derived from the assessment.
#[derive(Deserialize)]
struct AircraftRecord {
    id: AircraftId,
    callsign: String,
    category: AircraftCategory,
    position: GeoPosition,
    speed_kmh: f64,
    heading: f64,
    #[serde(default)]
    classification: Option<ThreatAssessment>,
}

impl From<AircraftRecord> for Aircraft {
    fn from(record: AircraftRecord) -> Self {
        let mut aircraft = Aircraft::new(
            record.id,
            record.callsign,
            record.category,
            record.position,
            record.speed_kmh,
            record.heading,
        );
        if let Some(assessment) = record.classification {
            aircraft.apply_assessment(assessment);
        }
        aircraft
    }
}

/// An interceptor missile. `target_id` is a weak reference resolved by
/// lookup each kinematics tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub id: MissileId,
    /// Weapon system name.
    pub designation: String,
    pub start_position: GeoPosition,
    pub current_position: GeoPosition,
    pub target_position: GeoPosition,
    pub target_id: AircraftId,
    /// Simulation seconds at launch.
    pub launch_time: f64,
    pub speed_kmh: f64,
    pub active: bool,
    pub status: MissileStatus,
    /// Simulation seconds at deactivation, for the retention window.
    pub deactivated_at: Option<f64>,
}

/// Transient impact marker for the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub position: GeoPosition,
    /// Simulation seconds at impact.
    pub timestamp: f64,
    pub callsign: String,
}
