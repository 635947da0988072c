#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skyguard_core::components::Aircraft;
    use skyguard_core::constants::*;
    use skyguard_core::enums::{AircraftCategory, ScoreTrend, ThreatLevel};
    use skyguard_core::types::GeoPosition;

    use crate::anomaly::{saturation_score, AnomalyDetector};
    use crate::classifier::{assess, risk_factors, ClassificationInput};
    use crate::levels::bucket;
    use crate::prediction::{distance_km, predict_path};
    use crate::profiles::{get_profile, pick_category, roll_iff};

    const CENTER: GeoPosition = GeoPosition {
        lat: 0.0,
        lng: 0.0,
        altitude: 0.0,
    };

    fn make_aircraft(
        category: AircraftCategory,
        lat: f64,
        speed_kmh: f64,
        altitude: f64,
    ) -> Aircraft {
        Aircraft::new(
            1,
            "TEST01",
            category,
            GeoPosition::new(lat, 0.0, altitude),
            speed_kmh,
            180.0,
        )
    }

    fn make_input(
        aircraft: &Aircraft,
        heading_delta: f64,
        anomaly_score: f64,
        iff_responding: bool,
    ) -> ClassificationInput<'_> {
        ClassificationInput {
            aircraft,
            heading_delta,
            anomaly_score,
            iff_responding,
            defended_center: CENTER,
        }
    }

    /// Worst case on every factor: at the center, silent, turning hard,
    /// far outside both envelopes, maximally anomalous.
    fn worst_case(category: AircraftCategory) -> Aircraft {
        make_aircraft(category, 0.0, 3000.0, 25_000.0)
    }

    // ---- Classification ----

    #[test]
    fn test_first_tick_assessment() {
        let aircraft = make_aircraft(AircraftCategory::Private, 1.0, 300.0, 2000.0);
        let detector = AnomalyDetector::new();
        let anomaly = detector.score(aircraft.id, &aircraft.position);
        assert_eq!(anomaly, 0.0);

        let assessment = assess(&make_input(&aircraft, 0.0, anomaly, true));
        assert_eq!(assessment.anomaly_score, 0.0);
        assert_eq!(assessment.risk_factors.len(), 7);
        assert_eq!(assessment.previous_scores.len(), 1);
        assert_eq!(assessment.trend, ScoreTrend::Flat);
        assert_eq!(assessment.predicted_path.len(), PREDICTION_SAMPLES);
        assert!((0.0..=100.0).contains(&assessment.confidence_score));
        assert_eq!(
            assessment.threat_level,
            bucket(assessment.confidence_score, AircraftCategory::Private)
        );
    }

    #[test]
    fn test_worst_case_unknown_is_hostile() {
        let aircraft = worst_case(AircraftCategory::Unknown);
        let assessment = assess(&make_input(&aircraft, 90.0, 100.0, false));
        assert!(assessment.confidence_score > 90.0);
        assert_eq!(assessment.threat_level, ThreatLevel::Hostile);
    }

    #[test]
    fn test_worst_case_commercial_capped_at_suspect() {
        let aircraft = worst_case(AircraftCategory::Commercial);
        let assessment = assess(&make_input(&aircraft, 90.0, 100.0, false));
        assert!(
            assessment.confidence_score >= SUSPECT_MAX_SCORE,
            "score {} should be in the hostile band",
            assessment.confidence_score
        );
        assert_eq!(assessment.threat_level, ThreatLevel::Suspect);
    }

    #[test]
    fn test_benign_unknown_floored_at_neutral() {
        // ~1000 km out, in envelope, answering IFF.
        let aircraft = make_aircraft(AircraftCategory::Unknown, 9.0, 500.0, 5000.0);
        let assessment = assess(&make_input(&aircraft, 0.0, 0.0, true));
        assert!(assessment.confidence_score < FRIENDLY_MAX_SCORE);
        assert_eq!(assessment.threat_level, ThreatLevel::Neutral);
    }

    #[test]
    fn test_benign_commercial_is_friendly() {
        let aircraft = make_aircraft(AircraftCategory::Commercial, 9.0, 850.0, 11_000.0);
        let assessment = assess(&make_input(&aircraft, 0.0, 0.0, true));
        assert!((assessment.confidence_score - 2.0).abs() < 1e-9);
        assert_eq!(assessment.threat_level, ThreatLevel::Friendly);
    }

    #[test]
    fn test_weighted_scores_sum_to_confidence() {
        let aircraft = make_aircraft(AircraftCategory::Military, 0.5, 1200.0, 8000.0);
        let assessment = assess(&make_input(&aircraft, 20.0, 40.0, false));
        let sum: f64 = assessment
            .risk_factors
            .iter()
            .map(|f| f.weighted_score)
            .sum();
        assert!((sum - assessment.confidence_score).abs() < 1e-9);
        for factor in &assessment.risk_factors {
            assert!((factor.raw_score * factor.weight - factor.weighted_score).abs() < 1e-12);
        }
    }

    #[test]
    fn test_closer_aircraft_scores_higher() {
        let near = make_aircraft(AircraftCategory::Drone, 0.2, 120.0, 500.0);
        let far = make_aircraft(AircraftCategory::Drone, 2.5, 120.0, 500.0);
        let near_score = assess(&make_input(&near, 0.0, 0.0, true)).confidence_score;
        let far_score = assess(&make_input(&far, 0.0, 0.0, true)).confidence_score;
        assert!(near_score > far_score);
    }

    #[test]
    fn test_heading_change_saturates() {
        let aircraft = make_aircraft(AircraftCategory::Private, 5.0, 300.0, 2000.0);
        let small = risk_factors(&make_input(&aircraft, 9.0, 0.0, true));
        let large = risk_factors(&make_input(&aircraft, 170.0, 0.0, true));
        let heading = |factors: &[skyguard_core::components::RiskFactor]| {
            factors
                .iter()
                .find(|f| f.name == "headingChange")
                .map(|f| f.raw_score)
                .unwrap()
        };
        assert!((heading(&small) - 20.0).abs() < 1e-9);
        assert_eq!(heading(&large), 100.0);
    }

    #[test]
    fn test_envelope_deviation() {
        let commercial = get_profile(AircraftCategory::Commercial);
        assert_eq!(commercial.speed.deviation_score(800.0), 0.0);
        // 125 km/h below a 250 km/h-wide envelope.
        assert!((commercial.speed.deviation_score(575.0) - 50.0).abs() < 1e-9);
        assert_eq!(commercial.speed.deviation_score(5000.0), 100.0);
    }

    #[test]
    fn test_non_finite_anomaly_counts_as_zero() {
        let aircraft = make_aircraft(AircraftCategory::Private, 5.0, 300.0, 2000.0);
        let assessment = assess(&make_input(&aircraft, 0.0, f64::NAN, true));
        assert_eq!(assessment.anomaly_score, 0.0);
        assert!(assessment.confidence_score.is_finite());
    }

    #[test]
    fn test_trend_from_history() {
        let mut aircraft = make_aircraft(AircraftCategory::Unknown, 3.0, 500.0, 5000.0);
        // Repeated passes with growing anomaly raise the score.
        for anomaly in [0.0, 30.0, 60.0, 90.0] {
            let assessment = assess(&make_input(&aircraft, 0.0, anomaly, true));
            aircraft.apply_assessment(assessment);
        }
        let assessment = aircraft.classification().unwrap();
        assert_eq!(assessment.previous_scores.len(), 4);
        assert_eq!(assessment.trend, ScoreTrend::Rising);
    }

    #[test]
    fn test_score_history_bounded() {
        let mut aircraft = make_aircraft(AircraftCategory::Private, 3.0, 300.0, 2000.0);
        for _ in 0..(SCORE_HISTORY_CAPACITY + 5) {
            let assessment = assess(&make_input(&aircraft, 0.0, 0.0, true));
            aircraft.apply_assessment(assessment);
        }
        assert_eq!(
            aircraft.classification().unwrap().previous_scores.len(),
            SCORE_HISTORY_CAPACITY
        );
    }

    // ---- Prediction ----

    #[test]
    fn test_predicted_path_spacing() {
        let start = GeoPosition::new(10.0, 10.0, 3000.0);
        let path = predict_path(&start, 45.0, 720.0);
        assert_eq!(path.len(), PREDICTION_SAMPLES);
        let step = distance_km(720.0, PREDICTION_STEP_SECS);
        assert!((step - 0.4).abs() < 1e-12);
        assert!((start.planar_distance_km(&path[0]) - step).abs() < 1e-4);
        assert!((path[0].planar_distance_km(&path[1]) - step).abs() < 1e-4);
        assert!(path.iter().all(|p| p.altitude == 3000.0));
    }

    #[test]
    fn test_zero_speed_prediction_is_stationary() {
        let start = GeoPosition::new(10.0, 10.0, 3000.0);
        let path = predict_path(&start, 45.0, 0.0);
        assert!(path.iter().all(|p| *p == start));
    }

    // ---- Anomaly ----

    #[test]
    fn test_anomaly_on_prediction_is_zero() {
        let start = GeoPosition::new(10.0, 10.0, 3000.0);
        let path = predict_path(&start, 90.0, 500.0);
        let mut detector = AnomalyDetector::new();
        detector.replace(BTreeMap::from([(3, path.clone())]));
        assert_eq!(detector.score(3, &path[0]), 0.0);
    }

    #[test]
    fn test_anomaly_saturates_on_large_deviation() {
        let start = GeoPosition::new(10.0, 10.0, 3000.0);
        let path = predict_path(&start, 90.0, 500.0);
        let mut detector = AnomalyDetector::new();
        detector.replace(BTreeMap::from([(3, path.clone())]));
        let strayed = path[0].advanced(0.0, 5.0);
        assert_eq!(detector.score(3, &strayed), 100.0);
    }

    #[test]
    fn test_anomaly_unknown_id_is_zero() {
        let detector = AnomalyDetector::new();
        assert_eq!(detector.score(99, &GeoPosition::default()), 0.0);
    }

    #[test]
    fn test_anomaly_replace_evicts_stale_ids() {
        let start = GeoPosition::new(10.0, 10.0, 3000.0);
        let mut detector = AnomalyDetector::new();
        detector.replace(BTreeMap::from([
            (1, predict_path(&start, 0.0, 100.0)),
            (2, predict_path(&start, 0.0, 100.0)),
        ]));
        assert_eq!(detector.len(), 2);
        detector.replace(BTreeMap::from([(2, predict_path(&start, 0.0, 100.0))]));
        assert_eq!(detector.len(), 1);
        assert!(!detector.predictions().contains_key(&1));
        detector.forget(2);
        assert!(detector.is_empty());
    }

    #[test]
    fn test_saturation_curve() {
        assert_eq!(saturation_score(0.0), 0.0);
        assert_eq!(saturation_score(ANOMALY_DEAD_ZONE_KM), 0.0);
        assert_eq!(saturation_score(ANOMALY_SATURATION_KM), 100.0);
        assert_eq!(saturation_score(50.0), 100.0);
        let mid = (ANOMALY_DEAD_ZONE_KM + ANOMALY_SATURATION_KM) / 2.0;
        assert!((saturation_score(mid) - 50.0).abs() < 1e-9);
        assert_eq!(saturation_score(f64::NAN), 0.0);
    }

    // ---- Profiles ----

    #[test]
    fn test_iff_response_rates() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let trials = 2000;
        let commercial = (0..trials)
            .filter(|_| roll_iff(AircraftCategory::Commercial, &mut rng))
            .count();
        let unknown = (0..trials)
            .filter(|_| roll_iff(AircraftCategory::Unknown, &mut rng))
            .count();
        assert!(commercial > trials * 9 / 10);
        assert!(unknown < trials / 2);
    }

    #[test]
    fn test_pick_category_covers_all() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(pick_category(&mut rng));
        }
        assert_eq!(seen.len(), 5);
    }
}
