//! Fundamental geographic and simulation-time types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::{BASE_TICK_SECS, KM_PER_DEG_LAT};

/// Stable identifier of an aircraft for its whole lifetime.
pub type AircraftId = u32;

/// Identifier of an interceptor missile.
pub type MissileId = u32;

/// Geographic position. Latitude/longitude in degrees, altitude in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Base tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl GeoPosition {
    pub fn new(lat: f64, lng: f64, altitude: f64) -> Self {
        Self { lat, lng, altitude }
    }

    /// Offset to another position in a local tangent frame, in kilometers.
    /// x = East, y = North, z = Up. Equirectangular approximation around
    /// the mean latitude of the two points.
    pub fn offset_km(&self, other: &GeoPosition) -> DVec3 {
        let mean_lat = ((self.lat + other.lat) / 2.0).to_radians();
        DVec3::new(
            (other.lng - self.lng) * KM_PER_DEG_LAT * mean_lat.cos(),
            (other.lat - self.lat) * KM_PER_DEG_LAT,
            (other.altitude - self.altitude) / 1000.0,
        )
    }

    /// Horizontal (planar) distance in kilometers, ignoring altitude.
    pub fn planar_distance_km(&self, other: &GeoPosition) -> f64 {
        self.offset_km(other).truncate().length()
    }

    /// Slant distance in kilometers, including altitude.
    pub fn distance_km(&self, other: &GeoPosition) -> f64 {
        self.offset_km(other).length()
    }

    /// Position displaced by a local east/north/up offset in kilometers.
    pub fn translated(&self, offset_km: DVec3) -> GeoPosition {
        let cos_lat = self.lat.to_radians().cos().max(1e-6);
        GeoPosition {
            lat: self.lat + offset_km.y / KM_PER_DEG_LAT,
            lng: self.lng + offset_km.x / (KM_PER_DEG_LAT * cos_lat),
            altitude: self.altitude + offset_km.z * 1000.0,
        }
    }

    /// Position reached after flying `distance_km` along `heading_deg`
    /// (0 = North, clockwise) at constant altitude.
    pub fn advanced(&self, heading_deg: f64, distance_km: f64) -> GeoPosition {
        let heading = heading_deg.to_radians();
        self.translated(DVec3::new(
            distance_km * heading.sin(),
            distance_km * heading.cos(),
            0.0,
        ))
    }
}

impl SimTime {
    /// Seconds per base tick.
    pub fn dt(&self) -> f64 {
        BASE_TICK_SECS
    }

    /// Advance by one base tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs = self.tick as f64 * BASE_TICK_SECS;
    }
}

/// Normalize a heading into [0, 360).
pub fn normalize_heading(heading_deg: f64) -> f64 {
    heading_deg.rem_euclid(360.0)
}

/// Smallest absolute angle between two headings, in [0, 180].
pub fn heading_delta(from_deg: f64, to_deg: f64) -> f64 {
    let diff = (to_deg - from_deg).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}
