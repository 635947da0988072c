//! Missile kinematics system: per-base-tick pursuit and intercept
//! resolution.
//!
//! For each active missile, in id order: resolve the target by id (gone
//! means LOST), enforce the flight-time limit (EXPIRED), sync the target
//! position, then either impact or advance.

use std::collections::{BTreeMap, BTreeSet};

use hecs::{Entity, World};

use skyguard_core::components::{Aircraft, Missile};
use skyguard_core::constants::MISSILE_MAX_FLIGHT_SECS;
use skyguard_core::enums::MissileStatus;
use skyguard_core::types::{AircraftId, GeoPosition, MissileId};

use crate::guidance::{pursue, PursuitStep};

/// Terminal event for one missile this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum MissileOutcome {
    Impacted {
        missile_id: MissileId,
        designation: String,
        target_id: AircraftId,
        callsign: String,
        at: GeoPosition,
    },
    Lost {
        missile_id: MissileId,
        target_id: AircraftId,
    },
    Expired {
        missile_id: MissileId,
        target_id: AircraftId,
    },
}

/// What the kinematics pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KinematicsReport {
    /// Missiles that moved or changed state.
    pub touched: usize,
    pub outcomes: Vec<MissileOutcome>,
}

struct Target {
    entity: Entity,
    position: GeoPosition,
    callsign: String,
}

/// Advance every active missile by `dt_secs`. Intercepted aircraft are
/// despawned here; the caller handles explosions, alerts and restock.
pub fn run(world: &mut World, now_secs: f64, dt_secs: f64) -> KinematicsReport {
    let targets: BTreeMap<AircraftId, Target> = world
        .query::<&Aircraft>()
        .iter()
        .map(|(entity, aircraft)| {
            (
                aircraft.id,
                Target {
                    entity,
                    position: aircraft.position,
                    callsign: aircraft.callsign.clone(),
                },
            )
        })
        .collect();

    let mut report = KinematicsReport::default();
    let mut destroyed: BTreeSet<AircraftId> = BTreeSet::new();
    let mut kills: Vec<Entity> = Vec::new();

    let mut missiles: Vec<&mut Missile> = world
        .query_mut::<&mut Missile>()
        .into_iter()
        .map(|(_, missile)| missile)
        .filter(|missile| missile.active)
        .collect();
    missiles.sort_by_key(|m| m.id);

    for missile in missiles {
        report.touched += 1;

        let target = match targets.get(&missile.target_id) {
            Some(target) if !destroyed.contains(&missile.target_id) => target,
            _ => {
                deactivate(missile, MissileStatus::Lost, now_secs);
                report.outcomes.push(MissileOutcome::Lost {
                    missile_id: missile.id,
                    target_id: missile.target_id,
                });
                continue;
            }
        };

        if now_secs - missile.launch_time > MISSILE_MAX_FLIGHT_SECS {
            deactivate(missile, MissileStatus::Expired, now_secs);
            report.outcomes.push(MissileOutcome::Expired {
                missile_id: missile.id,
                target_id: missile.target_id,
            });
            continue;
        }

        missile.target_position = target.position;
        match pursue(
            &missile.current_position,
            &missile.target_position,
            missile.speed_kmh,
            dt_secs,
        ) {
            PursuitStep::Impact { at } => {
                missile.current_position = at;
                deactivate(missile, MissileStatus::Impacted, now_secs);
                destroyed.insert(missile.target_id);
                kills.push(target.entity);
                report.outcomes.push(MissileOutcome::Impacted {
                    missile_id: missile.id,
                    designation: missile.designation.clone(),
                    target_id: missile.target_id,
                    callsign: target.callsign.clone(),
                    at,
                });
            }
            PursuitStep::Advance { position, .. } => {
                missile.current_position = position;
            }
        }
    }

    for entity in kills {
        let _ = world.despawn(entity);
    }
    report
}

fn deactivate(missile: &mut Missile, status: MissileStatus, now_secs: f64) {
    missile.active = false;
    missile.status = status;
    missile.deactivated_at = Some(now_secs);
}
