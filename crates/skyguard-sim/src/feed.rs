//! Mapping external traffic records into aircraft.
//!
//! Fetching the feed is the host's business; this module only shapes a
//! record into an `Aircraft` that starts NEUTRAL and unclassified.

use serde::{Deserialize, Serialize};

use skyguard_core::components::Aircraft;
use skyguard_core::enums::AircraftCategory;
use skyguard_core::types::{AircraftId, GeoPosition};

/// One record from a live-traffic source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    /// 24-bit transponder address, hex.
    pub icao: String,
    pub callsign: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub altitude_m: Option<f64>,
    pub speed_kmh: Option<f64>,
    pub heading: Option<f64>,
    /// Free-form category hint, e.g. an emitter category or operator type.
    pub category_hint: Option<String>,
}

impl FeedRecord {
    /// Whether the record has a usable position.
    pub fn is_plottable(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Build an aircraft with the given id. Missing numeric fields default
    /// to zero; a missing callsign falls back to the ICAO address.
    pub fn to_aircraft(&self, id: AircraftId) -> Aircraft {
        let callsign = self
            .callsign
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.icao)
            .to_uppercase();

        Aircraft::new(
            id,
            callsign,
            category_from_hint(self.category_hint.as_deref()),
            GeoPosition::new(self.lat, self.lng, finite_or_zero(self.altitude_m)),
            finite_or_zero(self.speed_kmh).max(0.0),
            finite_or_zero(self.heading),
        )
    }
}

/// Map a free-form hint to a category. Anything unrecognized is Unknown.
pub fn category_from_hint(hint: Option<&str>) -> AircraftCategory {
    let Some(hint) = hint else {
        return AircraftCategory::Unknown;
    };
    match hint.trim().to_ascii_lowercase().as_str() {
        "commercial" | "airline" | "heavy" | "large" | "a3" | "a4" | "a5" => {
            AircraftCategory::Commercial
        }
        "military" | "mil" => AircraftCategory::Military,
        "private" | "ga" | "light" | "small" | "a1" | "a2" | "rotorcraft" | "a7" => {
            AircraftCategory::Private
        }
        "drone" | "uav" | "uas" | "b6" => AircraftCategory::Drone,
        _ => AircraftCategory::Unknown,
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyguard_core::enums::ThreatLevel;

    fn record() -> FeedRecord {
        FeedRecord {
            icao: "4b1805".to_string(),
            callsign: Some(" swr12k ".to_string()),
            lat: 46.5,
            lng: 7.9,
            altitude_m: Some(10_500.0),
            speed_kmh: Some(820.0),
            heading: Some(-45.0),
            category_hint: Some("A3".to_string()),
        }
    }

    #[test]
    fn test_record_maps_to_neutral_aircraft() {
        let aircraft = record().to_aircraft(9);
        assert_eq!(aircraft.id, 9);
        assert_eq!(aircraft.callsign, "SWR12K");
        assert_eq!(aircraft.category, AircraftCategory::Commercial);
        assert_eq!(aircraft.threat_level(), ThreatLevel::Neutral);
        assert!(aircraft.classification().is_none());
        assert_eq!(aircraft.heading, 315.0);
    }

    #[test]
    fn test_sparse_record_defaults() {
        let sparse = FeedRecord {
            callsign: None,
            altitude_m: None,
            speed_kmh: Some(f64::NAN),
            heading: None,
            category_hint: None,
            ..record()
        };
        let aircraft = sparse.to_aircraft(1);
        assert_eq!(aircraft.callsign, "4B1805");
        assert_eq!(aircraft.category, AircraftCategory::Unknown);
        assert_eq!(aircraft.speed_kmh, 0.0);
        assert_eq!(aircraft.position.altitude, 0.0);
    }

    #[test]
    fn test_unplottable_record() {
        let bad = FeedRecord {
            lat: 123.0,
            ..record()
        };
        assert!(!bad.is_plottable());
        assert!(record().is_plottable());
    }
}
