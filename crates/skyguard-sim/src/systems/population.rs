//! Population control system.
//!
//! Retires aircraft that left the spawn bounds, then keeps the count
//! between the configured floor and cap with one probabilistic spawn and
//! one probabilistic retirement per world tick.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::components::Aircraft;
use skyguard_core::types::AircraftId;

use crate::config::EngineConfig;
use crate::history::IdCounters;
use crate::world_setup::{self, SpawnSite};

/// What population control changed this tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationChange {
    pub spawned: Vec<AircraftId>,
    /// Left the bounds.
    pub departed: Vec<AircraftId>,
    /// Pruned to keep the population near its floor.
    pub retired: Vec<AircraftId>,
}

impl PopulationChange {
    pub fn removed(&self) -> impl Iterator<Item = AircraftId> + '_ {
        self.departed.iter().chain(self.retired.iter()).copied()
    }
}

pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    ids: &mut IdCounters,
    config: &EngineConfig,
    despawn_buffer: &mut Vec<Entity>,
) -> PopulationChange {
    let mut change = PopulationChange::default();

    despawn_buffer.clear();
    for (entity, aircraft) in world.query_mut::<&Aircraft>() {
        if !config.spawn_bounds.contains(&aircraft.position) {
            despawn_buffer.push(entity);
            change.departed.push(aircraft.id);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    change.departed.sort_unstable();

    // Retirement only considers aircraft that existed before this tick's
    // spawn, so a newcomer is classified at least once.
    let mut fleet: Vec<(Entity, AircraftId)> = world
        .query_mut::<&Aircraft>()
        .into_iter()
        .map(|(entity, aircraft)| (entity, aircraft.id))
        .collect();
    fleet.sort_by_key(|(_, id)| *id);
    let count = fleet.len() as u32;

    if count < config.max_aircraft && rng.gen_bool(config.spawn_probability.clamp(0.0, 1.0)) {
        let id = world_setup::spawn_aircraft(world, rng, ids, config, SpawnSite::Edge);
        change.spawned.push(id);
    }

    if count > config.min_aircraft && rng.gen_bool(config.retire_probability.clamp(0.0, 1.0)) {
        let (entity, id) = fleet[rng.gen_range(0..fleet.len())];
        let _ = world.despawn(entity);
        change.retired.push(id);
    }

    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use skyguard_core::enums::AircraftCategory;

    #[test]
    fn test_newcomer_is_never_retired_on_arrival() {
        let config = EngineConfig {
            min_aircraft: 0,
            spawn_probability: 1.0,
            retire_probability: 1.0,
            ..EngineConfig::client_local()
        };
        for seed in 0..20 {
            let mut world = World::new();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut ids = IdCounters::default();
            let veteran = ids.next_aircraft();
            world.spawn((Aircraft::new(
                veteran,
                "VET01",
                AircraftCategory::Private,
                config.defended_center,
                200.0,
                0.0,
            ),));

            let change = run(&mut world, &mut rng, &mut ids, &config, &mut Vec::new());

            assert_eq!(change.retired, vec![veteran]);
            assert_eq!(change.spawned.len(), 1);
            let remaining: Vec<AircraftId> = world
                .query_mut::<&Aircraft>()
                .into_iter()
                .map(|(_, a)| a.id)
                .collect();
            assert_eq!(remaining, change.spawned);
        }
    }
}
