//! Classification pass: assesses every aircraft and refreshes the anomaly
//! detector's predictions.

use std::collections::BTreeMap;

use hecs::World;
use rand_chacha::ChaCha8Rng;

use skyguard_core::components::Aircraft;
use skyguard_core::types::{heading_delta, AircraftId, GeoPosition};
use skyguard_threat_ai::anomaly::AnomalyDetector;
use skyguard_threat_ai::classifier::{assess, ClassificationInput};
use skyguard_threat_ai::profiles::roll_iff;

/// Classify all aircraft in id order.
///
/// `last_headings` holds each aircraft's heading at the previous pass; an
/// aircraft without an entry gets a zero heading delta. Both the detector
/// and `last_headings` are replaced wholesale afterwards, which evicts ids
/// that no longer exist.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    detector: &mut AnomalyDetector,
    last_headings: &mut BTreeMap<AircraftId, f64>,
    defended_center: &GeoPosition,
) {
    let mut fleet: Vec<&mut Aircraft> = world
        .query_mut::<&mut Aircraft>()
        .into_iter()
        .map(|(_, aircraft)| aircraft)
        .collect();
    fleet.sort_by_key(|a| a.id);

    let mut predictions = BTreeMap::new();
    let mut headings = BTreeMap::new();

    for aircraft in fleet {
        let delta = last_headings
            .get(&aircraft.id)
            .map(|previous| heading_delta(*previous, aircraft.heading))
            .unwrap_or(0.0);
        let input = ClassificationInput {
            aircraft: &*aircraft,
            heading_delta: delta,
            anomaly_score: detector.score(aircraft.id, &aircraft.position),
            iff_responding: roll_iff(aircraft.category, rng),
            defended_center: *defended_center,
        };
        let assessment = assess(&input);

        predictions.insert(aircraft.id, assessment.predicted_path.clone());
        headings.insert(aircraft.id, aircraft.heading);
        aircraft.apply_assessment(assessment);
    }

    detector.replace(predictions);
    *last_headings = headings;
}
