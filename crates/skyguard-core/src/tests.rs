#[cfg(test)]
mod tests {
    use crate::commands::EngineCommand;
    use crate::components::{Aircraft, ThreatAssessment};
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::CommandError;
    use crate::ring::RingBuffer;
    use crate::types::{heading_delta, normalize_heading, GeoPosition, SimTime};

    fn assessment(level: ThreatLevel, score: f64) -> ThreatAssessment {
        ThreatAssessment {
            confidence_score: score,
            threat_level: level,
            risk_factors: Vec::new(),
            anomaly_score: 0.0,
            iff_responding: true,
            predicted_path: Vec::new(),
            previous_scores: RingBuffer::new(SCORE_HISTORY_CAPACITY),
            trend: ScoreTrend::Flat,
        }
    }

    #[test]
    fn test_threat_level_wire_names() {
        assert_eq!(
            serde_json::to_string(&ThreatLevel::Hostile).unwrap(),
            "\"HOSTILE\""
        );
        let back: ThreatLevel = serde_json::from_str("\"FRIENDLY\"").unwrap();
        assert_eq!(back, ThreatLevel::Friendly);
    }

    #[test]
    fn test_threat_level_ordering() {
        assert!(ThreatLevel::Friendly < ThreatLevel::Neutral);
        assert!(ThreatLevel::Neutral < ThreatLevel::Suspect);
        assert!(ThreatLevel::Suspect < ThreatLevel::Hostile);
    }

    #[test]
    fn test_new_aircraft_is_neutral_and_unclassified() {
        let aircraft = Aircraft::new(
            7,
            "BAW123",
            AircraftCategory::Commercial,
            GeoPosition::new(51.0, 0.0, 10_000.0),
            850.0,
            370.0,
        );
        assert_eq!(aircraft.threat_level(), ThreatLevel::Neutral);
        assert!(aircraft.classification().is_none());
        assert_eq!(aircraft.confidence_score(), 0.0);
        assert!((aircraft.heading - 10.0).abs() < 1e-9);
        assert!(aircraft.score_history().is_empty());
    }

    #[test]
    fn test_deserialized_level_follows_assessment() {
        let aircraft = Aircraft::new(
            3,
            "N123AB",
            AircraftCategory::Private,
            GeoPosition::new(46.0, 8.0, 1_500.0),
            220.0,
            90.0,
        );
        let mut value = serde_json::to_value(&aircraft).unwrap();
        value["threat_level"] = serde_json::json!("HOSTILE");
        let back: Aircraft = serde_json::from_value(value).unwrap();
        assert_eq!(back.threat_level(), ThreatLevel::Neutral);
        assert_eq!(back, aircraft);

        let mut classified = aircraft.clone();
        classified.apply_assessment(assessment(ThreatLevel::Suspect, 48.0));
        let mut value = serde_json::to_value(&classified).unwrap();
        value["threat_level"] = serde_json::json!("FRIENDLY");
        let back: Aircraft = serde_json::from_value(value).unwrap();
        assert_eq!(back.threat_level(), ThreatLevel::Suspect);
        assert_eq!(back, classified);
    }

    #[test]
    fn test_apply_assessment_sets_level() {
        let mut aircraft = Aircraft::new(
            1,
            "UNK01",
            AircraftCategory::Unknown,
            GeoPosition::default(),
            300.0,
            90.0,
        );
        aircraft.apply_assessment(assessment(ThreatLevel::Hostile, 88.0));
        assert_eq!(aircraft.threat_level(), ThreatLevel::Hostile);
        assert_eq!(aircraft.confidence_score(), 88.0);
        assert_eq!(
            aircraft.classification().map(|c| c.threat_level),
            Some(ThreatLevel::Hostile)
        );
    }

    #[test]
    fn test_advance_north_one_degree() {
        let start = GeoPosition::new(40.0, -74.0, 1000.0);
        let end = start.advanced(0.0, KM_PER_DEG_LAT);
        assert!((end.lat - 41.0).abs() < 1e-9);
        assert!((end.lng - -74.0).abs() < 1e-9);
        assert_eq!(end.altitude, 1000.0);
    }

    #[test]
    fn test_advance_then_distance() {
        let start = GeoPosition::new(35.0, 139.0, 0.0);
        let end = start.advanced(90.0, 25.0);
        let distance = start.planar_distance_km(&end);
        assert!((distance - 25.0).abs() < 0.01, "got {distance}");
    }

    #[test]
    fn test_distance_includes_altitude() {
        let a = GeoPosition::new(0.0, 0.0, 0.0);
        let b = GeoPosition::new(0.0, 0.0, 3000.0);
        assert_eq!(a.planar_distance_km(&b), 0.0);
        assert!((a.distance_km(&b) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_heading_helpers() {
        assert_eq!(heading_delta(350.0, 10.0), 20.0);
        assert_eq!(heading_delta(10.0, 350.0), 20.0);
        assert_eq!(heading_delta(0.0, 180.0), 180.0);
        assert_eq!(normalize_heading(-90.0), 270.0);
    }

    #[test]
    fn test_world_period_in_base_ticks() {
        let mut time = SimTime::default();
        for _ in 0..WORLD_UPDATE_TICKS {
            time.advance();
        }
        assert_eq!(time.tick, 20);
        assert!((time.elapsed_secs - WORLD_UPDATE_SECS).abs() < 1e-12);
    }

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::to_string(&EngineCommand::LaunchAt { target_id: 4 }).unwrap();
        assert_eq!(json, r#"{"type":"LaunchAt","target_id":4}"#);
        let back: EngineCommand = serde_json::from_str(r#"{"type":"Rewind","steps":3}"#).unwrap();
        assert_eq!(back, EngineCommand::Rewind { steps: 3 });
    }

    #[test]
    fn test_command_error_messages() {
        assert_eq!(
            CommandError::UnknownTarget(42).to_string(),
            "unknown target: no aircraft with id 42"
        );
        assert_eq!(
            CommandError::NoInterceptorsRemaining.to_string(),
            "no interceptors remaining"
        );
    }

    #[test]
    fn test_factor_weights_sum_to_one() {
        let total = WEIGHT_CATEGORY
            + WEIGHT_IFF
            + WEIGHT_PROXIMITY
            + WEIGHT_HEADING_CHANGE
            + WEIGHT_SPEED_DEVIATION
            + WEIGHT_ALTITUDE_DEVIATION
            + WEIGHT_ANOMALY;
        assert!((total - 1.0).abs() < 1e-12);
    }
}
