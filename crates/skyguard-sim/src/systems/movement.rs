//! Aircraft movement system.
//!
//! Each world tick an aircraft may change course within its category's
//! turn limit, then flies straight for the tick at its current speed.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::components::Aircraft;
use skyguard_core::types::normalize_heading;
use skyguard_threat_ai::prediction::distance_km;
use skyguard_threat_ai::profiles::get_profile;

/// Move every aircraft forward by `dt_secs`. Aircraft are visited in id
/// order so RNG draws do not depend on ECS storage order.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, dt_secs: f64) {
    let mut fleet: Vec<&mut Aircraft> = world
        .query_mut::<&mut Aircraft>()
        .into_iter()
        .map(|(_, aircraft)| aircraft)
        .collect();
    fleet.sort_by_key(|a| a.id);

    for aircraft in fleet {
        let profile = get_profile(aircraft.category);
        if rng.gen_bool(profile.turn_probability) {
            let turn = rng.gen_range(-profile.max_turn_deg..=profile.max_turn_deg);
            aircraft.heading = normalize_heading(aircraft.heading + turn);
        }
        aircraft.position = aircraft
            .position
            .advanced(aircraft.heading, distance_km(aircraft.speed_kmh, dt_secs));
    }
}
