//! Aircraft generator.
//!
//! Creates plausible aircraft for a category: speed and altitude inside the
//! category envelope, a callsign from the category's prefixes, and either an
//! interior position (initial population) or an edge position heading into
//! the defended area (runtime spawns).

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::components::Aircraft;
use skyguard_core::enums::AircraftCategory;
use skyguard_core::types::{normalize_heading, AircraftId, GeoPosition};
use skyguard_threat_ai::profiles::{get_profile, pick_category};

use crate::config::{EngineConfig, SpawnBounds};
use crate::history::IdCounters;

/// Largest deviation from a straight-in course for edge spawns (degrees).
const EDGE_COURSE_SPREAD_DEG: f64 = 45.0;

/// Where a generated aircraft appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSite {
    /// Anywhere inside the bounds, any heading.
    Interior,
    /// On a random edge of the bounds, heading roughly toward the center.
    Edge,
}

/// Spawn the initial population.
pub fn populate(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ids: &mut IdCounters,
    config: &EngineConfig,
) {
    for _ in 0..config.initial_aircraft {
        spawn_aircraft(world, rng, ids, config, SpawnSite::Interior);
    }
}

/// Generate one aircraft of a weighted-random category and spawn it.
pub fn spawn_aircraft(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ids: &mut IdCounters,
    config: &EngineConfig,
    site: SpawnSite,
) -> AircraftId {
    let category = pick_category(rng);
    let aircraft = generate_aircraft(rng, ids.next_aircraft(), category, config, site);
    let id = aircraft.id;
    world.spawn((aircraft,));
    id
}

/// Build an aircraft without touching the world.
pub fn generate_aircraft(
    rng: &mut ChaCha8Rng,
    id: AircraftId,
    category: AircraftCategory,
    config: &EngineConfig,
    site: SpawnSite,
) -> Aircraft {
    let profile = get_profile(category);
    let speed_kmh = rng.gen_range(profile.speed.min..=profile.speed.max);
    let altitude = rng.gen_range(profile.altitude.min..=profile.altitude.max);

    let (lat, lng, heading) = match site {
        SpawnSite::Interior => {
            let (lat, lng) = interior_point(rng, &config.spawn_bounds);
            (lat, lng, rng.gen_range(0.0..360.0))
        }
        SpawnSite::Edge => {
            let (lat, lng) = edge_point(rng, &config.spawn_bounds);
            let inbound = bearing_deg(
                &GeoPosition::new(lat, lng, 0.0),
                &config.defended_center,
            );
            let spread = rng.gen_range(-EDGE_COURSE_SPREAD_DEG..=EDGE_COURSE_SPREAD_DEG);
            (lat, lng, inbound + spread)
        }
    };

    let prefix = profile.callsign_prefixes[rng.gen_range(0..profile.callsign_prefixes.len())];
    let callsign = format!("{prefix}{}", rng.gen_range(100..1000));

    Aircraft::new(
        id,
        callsign,
        category,
        GeoPosition::new(lat, lng, altitude),
        speed_kmh,
        heading,
    )
}

/// Initial bearing from one position to another (degrees, 0 = North).
pub fn bearing_deg(from: &GeoPosition, to: &GeoPosition) -> f64 {
    let offset = from.offset_km(to);
    normalize_heading(offset.x.atan2(offset.y).to_degrees())
}

fn interior_point(rng: &mut ChaCha8Rng, bounds: &SpawnBounds) -> (f64, f64) {
    (
        rng.gen_range(bounds.min_lat..=bounds.max_lat),
        rng.gen_range(bounds.min_lng..=bounds.max_lng),
    )
}

fn edge_point(rng: &mut ChaCha8Rng, bounds: &SpawnBounds) -> (f64, f64) {
    let lat = rng.gen_range(bounds.min_lat..=bounds.max_lat);
    let lng = rng.gen_range(bounds.min_lng..=bounds.max_lng);
    match rng.gen_range(0..4) {
        0 => (bounds.max_lat, lng),
        1 => (bounds.min_lat, lng),
        2 => (lat, bounds.max_lng),
        _ => (lat, bounds.min_lng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_generated_aircraft_within_envelope() {
        let config = EngineConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for (id, category) in skyguard_threat_ai::profiles::CATEGORIES.iter().enumerate() {
            let aircraft =
                generate_aircraft(&mut rng, id as u32, *category, &config, SpawnSite::Interior);
            let profile = get_profile(*category);
            assert_eq!(profile.speed.deviation_score(aircraft.speed_kmh), 0.0);
            assert_eq!(
                profile.altitude.deviation_score(aircraft.position.altitude),
                0.0
            );
            assert!(config.spawn_bounds.contains(&aircraft.position));
            assert!(!aircraft.callsign.is_empty());
        }
    }

    #[test]
    fn test_edge_spawn_heads_inward() {
        let config = EngineConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for id in 0..20 {
            let aircraft = generate_aircraft(
                &mut rng,
                id,
                AircraftCategory::Commercial,
                &config,
                SpawnSite::Edge,
            );
            let inbound = bearing_deg(&aircraft.position, &config.defended_center);
            let off_course = skyguard_core::types::heading_delta(inbound, aircraft.heading);
            assert!(off_course <= EDGE_COURSE_SPREAD_DEG + 1e-9);
        }
    }

    #[test]
    fn test_bearing_cardinal() {
        let origin = GeoPosition::new(0.0, 0.0, 0.0);
        assert!((bearing_deg(&origin, &GeoPosition::new(1.0, 0.0, 0.0)) - 0.0).abs() < 1e-9);
        assert!((bearing_deg(&origin, &GeoPosition::new(0.0, 1.0, 0.0)) - 90.0).abs() < 1e-9);
    }
}
