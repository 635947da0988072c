//! Fire control: interceptor launch and autonomous target selection.

use std::collections::BTreeSet;

use hecs::World;

use skyguard_core::components::{Aircraft, Missile};
use skyguard_core::enums::MissileStatus;
use skyguard_core::error::{CommandError, CommandResult};
use skyguard_core::state::EngagementCandidate;
use skyguard_core::types::{AircraftId, GeoPosition};

use crate::config::EngineConfig;
use crate::history::IdCounters;

/// Launch one interceptor at `target_id` from the defended center.
///
/// Fails with `UnknownTarget` when no live aircraft has the id and with
/// `NoInterceptorsRemaining` when the magazine is empty. Nothing changes
/// on failure.
pub fn launch(
    world: &mut World,
    ids: &mut IdCounters,
    available_interceptors: &mut u32,
    config: &EngineConfig,
    target_id: AircraftId,
    now_secs: f64,
) -> CommandResult<Missile> {
    let target_position =
        find_aircraft(world, target_id).ok_or(CommandError::UnknownTarget(target_id))?;
    if *available_interceptors == 0 {
        return Err(CommandError::NoInterceptorsRemaining);
    }

    let start = GeoPosition::new(config.defended_center.lat, config.defended_center.lng, 0.0);
    let missile = Missile {
        id: ids.next_missile(),
        designation: config.missile_designation.clone(),
        start_position: start,
        current_position: start,
        target_position,
        target_id,
        launch_time: now_secs,
        speed_kmh: config.missile_speed_kmh,
        active: true,
        status: MissileStatus::Pursuing,
        deactivated_at: None,
    };

    *available_interceptors -= 1;
    world.spawn((missile.clone(),));
    Ok(missile)
}

/// Head of the engagement queue among live targets that no active missile
/// is already pursuing.
pub fn autonomous_target(world: &World, queue: &[EngagementCandidate]) -> Option<AircraftId> {
    let engaged: BTreeSet<AircraftId> = world
        .query::<&Missile>()
        .iter()
        .filter(|(_, missile)| missile.active)
        .map(|(_, missile)| missile.target_id)
        .collect();

    queue
        .iter()
        .map(|candidate| candidate.aircraft_id)
        .find(|id| !engaged.contains(id) && find_aircraft(world, *id).is_some())
}

fn find_aircraft(world: &World, id: AircraftId) -> Option<GeoPosition> {
    world
        .query::<&Aircraft>()
        .iter()
        .find(|(_, aircraft)| aircraft.id == id)
        .map(|(_, aircraft)| aircraft.position)
}
