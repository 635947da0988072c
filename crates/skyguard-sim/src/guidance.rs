//! Pursuit guidance for interceptors.
//!
//! Each kinematics tick the missile re-aims at the target's live position
//! and closes along the line of sight in a local east/north/up frame (km).
//! The step is capped at the remaining distance so the missile never
//! overshoots and the range to a stationary target strictly decreases.

use glam::DVec3;

use skyguard_core::constants::IMPACT_EPSILON_KM;
use skyguard_core::types::GeoPosition;

/// Outcome of one guidance step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PursuitStep {
    /// Within the impact epsilon of the target.
    Impact { at: GeoPosition },
    /// Moved toward the target.
    Advance {
        position: GeoPosition,
        remaining_km: f64,
    },
}

/// Advance a missile one step toward `target` at `speed_kmh` for `dt_secs`.
pub fn pursue(
    current: &GeoPosition,
    target: &GeoPosition,
    speed_kmh: f64,
    dt_secs: f64,
) -> PursuitStep {
    let line_of_sight = current.offset_km(target);
    let remaining = line_of_sight.length();
    if !remaining.is_finite() || remaining < IMPACT_EPSILON_KM {
        return PursuitStep::Impact { at: *target };
    }

    let step = step_km(speed_kmh, dt_secs).min(remaining);
    let direction: DVec3 = line_of_sight / remaining;
    PursuitStep::Advance {
        position: current.translated(direction * step),
        remaining_km: remaining - step,
    }
}

/// Distance covered in one step (km). Non-finite or negative inputs yield zero.
pub fn step_km(speed_kmh: f64, dt_secs: f64) -> f64 {
    let step = speed_kmh * dt_secs / 3600.0;
    if step.is_finite() {
        step.max(0.0)
    } else {
        0.0
    }
}

/// Seconds for an interceptor at `speed_kmh` to cover `distance_km`.
/// `None` when the speed is not positive.
pub fn time_to_intercept_secs(distance_km: f64, speed_kmh: f64) -> Option<f64> {
    if speed_kmh > 0.0 && distance_km.is_finite() {
        Some(distance_km.max(0.0) / speed_kmh * 3600.0)
    } else {
        None
    }
}
