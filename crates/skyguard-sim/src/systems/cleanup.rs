//! Cleanup system: purges deactivated missiles after their retention
//! window and explosions past their lifetime.

use hecs::{Entity, World};

use skyguard_core::components::{Explosion, Missile};
use skyguard_core::constants::{EXPLOSION_TTL_SECS, MISSILE_RETENTION_SECS};

/// Counts of purged records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub missiles: usize,
    pub explosions: usize,
}

/// Uses a caller-owned buffer to avoid per-tick allocation.
pub fn run(world: &mut World, now_secs: f64, despawn_buffer: &mut Vec<Entity>) -> CleanupReport {
    let mut report = CleanupReport::default();
    despawn_buffer.clear();

    for (entity, missile) in world.query_mut::<&Missile>() {
        let expired = missile
            .deactivated_at
            .is_some_and(|at| now_secs - at >= MISSILE_RETENTION_SECS);
        if !missile.active && expired {
            despawn_buffer.push(entity);
            report.missiles += 1;
        }
    }

    for (entity, explosion) in world.query_mut::<&Explosion>() {
        if now_secs - explosion.timestamp >= EXPLOSION_TTL_SECS {
            despawn_buffer.push(entity);
            report.explosions += 1;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    report
}

/// Remove every explosion regardless of age.
pub fn clear_explosions(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();
    despawn_buffer.extend(
        world
            .query_mut::<&Explosion>()
            .into_iter()
            .map(|(entity, _)| entity),
    );
    let count = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    count
}
