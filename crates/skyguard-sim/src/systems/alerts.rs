//! Alert generation system.
//!
//! On its cadence, with the configured probability, picks one live aircraft
//! and writes a contextual alert about it. Other systems hand back
//! `AlertDraft`s too; the engine stamps id and time on all of them.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::components::Aircraft;
use skyguard_core::enums::{AlertCategory, AlertPriority, ThreatLevel};
use skyguard_core::types::GeoPosition;

use crate::config::EngineConfig;

/// Anomaly score above which a suspect track is reported as off-course.
const OFF_COURSE_ANOMALY: f64 = 50.0;

/// An alert before the log assigns it an id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDraft {
    pub category: AlertCategory,
    pub priority: AlertPriority,
    pub message: String,
    pub position: Option<GeoPosition>,
}

impl AlertDraft {
    pub fn new(category: AlertCategory, priority: AlertPriority, message: impl Into<String>) -> Self {
        Self {
            category,
            priority,
            message: message.into(),
            position: None,
        }
    }

    pub fn at(mut self, position: GeoPosition) -> Self {
        self.position = Some(position);
        self
    }
}

/// Maybe produce one alert about the current airspace.
pub fn run(world: &World, rng: &mut ChaCha8Rng, config: &EngineConfig) -> Option<AlertDraft> {
    if !rng.gen_bool(config.alert_probability.clamp(0.0, 1.0)) {
        return None;
    }

    let mut query = world.query::<&Aircraft>();
    let mut fleet: Vec<&Aircraft> = query.iter().map(|(_, aircraft)| aircraft).collect();
    if fleet.is_empty() {
        return Some(AlertDraft::new(
            AlertCategory::System,
            AlertPriority::Low,
            "Airspace clear: no tracks in sector",
        ));
    }
    fleet.sort_by_key(|a| a.id);

    let aircraft = fleet[rng.gen_range(0..fleet.len())];
    Some(describe(aircraft, &config.defended_center))
}

/// Contextual alert for one aircraft, worded by its threat level.
pub fn describe(aircraft: &Aircraft, defended_center: &GeoPosition) -> AlertDraft {
    let range_km = defended_center.planar_distance_km(&aircraft.position);
    let callsign = &aircraft.callsign;
    let assessment = aircraft.classification();

    let draft = match aircraft.threat_level() {
        ThreatLevel::Hostile => AlertDraft::new(
            AlertCategory::Threat,
            AlertPriority::High,
            format!(
                "HOSTILE {callsign} ({:?}) {range_km:.0} km from defended point, heading {:03.0}",
                aircraft.category, aircraft.heading
            ),
        ),
        ThreatLevel::Suspect => match assessment {
            Some(a) if !a.iff_responding => AlertDraft::new(
                AlertCategory::Threat,
                AlertPriority::Medium,
                format!("{callsign} not responding to IFF interrogation at {range_km:.0} km"),
            ),
            Some(a) if a.anomaly_score > OFF_COURSE_ANOMALY => AlertDraft::new(
                AlertCategory::Threat,
                AlertPriority::Medium,
                format!("{callsign} deviating from predicted track"),
            ),
            _ => AlertDraft::new(
                AlertCategory::Detection,
                AlertPriority::Medium,
                format!("SUSPECT {callsign} tracked at {range_km:.0} km"),
            ),
        },
        ThreatLevel::Neutral | ThreatLevel::Friendly => AlertDraft::new(
            AlertCategory::Detection,
            AlertPriority::Low,
            format!(
                "Tracking {callsign} ({:?}) at {:.0} m, {:.0} km/h",
                aircraft.category, aircraft.position.altitude, aircraft.speed_kmh
            ),
        ),
    };
    draft.at(aircraft.position)
}
