//! Bounded snapshot history for rewind.
//!
//! A snapshot holds everything needed to continue the simulation from that
//! point, including the RNG and activity cadences, so resuming after a
//! rewind replays the same future.

use std::collections::BTreeMap;

use rand_chacha::ChaCha8Rng;

use skyguard_core::components::{Aircraft, Explosion, Missile};
use skyguard_core::constants::HISTORY_CAPACITY;
use skyguard_core::events::Alert;
use skyguard_core::ring::RingBuffer;
use skyguard_core::state::EngagementCandidate;
use skyguard_core::types::{AircraftId, GeoPosition, SimTime};

use crate::schedule::Cadences;

/// Next free id for each kind of record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdCounters {
    pub aircraft: u32,
    pub missile: u32,
    pub alert: u32,
    pub explosion: u32,
}

impl IdCounters {
    pub fn next_aircraft(&mut self) -> u32 {
        bump(&mut self.aircraft)
    }

    pub fn next_missile(&mut self) -> u32 {
        bump(&mut self.missile)
    }

    pub fn next_alert(&mut self) -> u32 {
        bump(&mut self.alert)
    }

    pub fn next_explosion(&mut self) -> u32 {
        bump(&mut self.explosion)
    }
}

fn bump(counter: &mut u32) -> u32 {
    let id = *counter;
    *counter = counter.wrapping_add(1);
    id
}

/// Complete engine state at the end of a world-update tick.
#[derive(Debug, Clone)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub uptime_secs: f64,
    /// Sorted by id.
    pub aircraft: Vec<Aircraft>,
    /// Sorted by id.
    pub missiles: Vec<Missile>,
    /// Oldest first.
    pub alerts: Vec<Alert>,
    pub explosions: Vec<Explosion>,
    pub engagement_queue: Vec<EngagementCandidate>,
    pub available_interceptors: u32,
    pub predictions: BTreeMap<AircraftId, Vec<GeoPosition>>,
    pub last_headings: BTreeMap<AircraftId, f64>,
    pub ids: IdCounters,
    pub rng: ChaCha8Rng,
    pub cadences: Cadences,
}

/// FIFO of snapshots; the oldest is evicted once capacity is reached.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: RingBuffer<WorldSnapshot>,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: RingBuffer::new(capacity),
        }
    }

    pub fn push(&mut self, snapshot: WorldSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Snapshot `steps_back` entries behind the newest (0 = newest).
    pub fn get(&self, steps_back: usize) -> Option<&WorldSnapshot> {
        self.snapshots.from_newest(steps_back)
    }

    /// Drop the `steps_back` newest snapshots, branching history at a
    /// rewound point.
    pub fn discard_newer_than(&mut self, steps_back: usize) {
        self.snapshots.truncate_newest(steps_back);
    }

    pub fn newest(&self) -> Option<&WorldSnapshot> {
        self.snapshots.newest()
    }

    pub fn oldest(&self) -> Option<&WorldSnapshot> {
        self.snapshots.oldest()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.snapshots.capacity()
    }
}
