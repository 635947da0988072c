//! Snapshot system: read-only views of the ECS world.
//!
//! This system never modifies the world. Every list is sorted by id so
//! views of identical worlds serialize identically.

use hecs::World;

use skyguard_core::components::{Aircraft, Explosion, Missile};
use skyguard_core::enums::{SystemThreatLevel, ThreatLevel};
use skyguard_core::state::SystemStatus;

pub fn aircraft(world: &World) -> Vec<Aircraft> {
    let mut list: Vec<Aircraft> = world
        .query::<&Aircraft>()
        .iter()
        .map(|(_, aircraft)| aircraft.clone())
        .collect();
    list.sort_by_key(|a| a.id);
    list
}

pub fn missiles(world: &World) -> Vec<Missile> {
    let mut list: Vec<Missile> = world
        .query::<&Missile>()
        .iter()
        .map(|(_, missile)| missile.clone())
        .collect();
    list.sort_by_key(|m| m.id);
    list
}

pub fn explosions(world: &World) -> Vec<Explosion> {
    let mut list: Vec<Explosion> = world
        .query::<&Explosion>()
        .iter()
        .map(|(_, explosion)| explosion.clone())
        .collect();
    list.sort_by_key(|e| e.id);
    list
}

/// Aggregate status over the given aircraft.
pub fn system_status(
    aircraft: &[Aircraft],
    uptime_secs: f64,
    available_interceptors: u32,
    max_interceptors: u32,
) -> SystemStatus {
    let count_level =
        |level: ThreatLevel| aircraft.iter().filter(|a| a.threat_level() == level).count() as u32;
    let hostile_count = count_level(ThreatLevel::Hostile);
    let suspect_count = count_level(ThreatLevel::Suspect);

    let readiness = if max_interceptors == 0 {
        0.0
    } else {
        (available_interceptors as f64 / max_interceptors as f64 * 100.0).clamp(0.0, 100.0)
    };

    SystemStatus {
        aircraft_count: aircraft.len() as u32,
        hostile_count,
        suspect_count,
        threat_level: system_threat_level(hostile_count, suspect_count),
        uptime_secs,
        readiness,
        available_interceptors,
    }
}

/// HIGH at three or more hostiles; MEDIUM with any hostile or three or more
/// suspects; LOW otherwise.
pub fn system_threat_level(hostile_count: u32, suspect_count: u32) -> SystemThreatLevel {
    if hostile_count >= 3 {
        SystemThreatLevel::High
    } else if hostile_count >= 1 || suspect_count >= 3 {
        SystemThreatLevel::Medium
    } else {
        SystemThreatLevel::Low
    }
}
