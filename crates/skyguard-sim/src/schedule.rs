//! Activity cadences inside a single engine.
//!
//! Every activity is a `Cadence` checked against the base tick counter.
//! Fixed cadences fire every N ticks; jittered ones draw their next gap
//! from a configured range when they fire.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skyguard_core::constants::{BASE_TICK_SECS, WORLD_UPDATE_TICKS};

use crate::config::{EngineConfig, IntervalRange};

/// When an activity next runs, and how its gap is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadence {
    next_due: u64,
    min_ticks: u64,
    max_ticks: u64,
}

impl Cadence {
    /// Runs every `period_ticks`, first at `first_due`.
    pub fn fixed(period_ticks: u64, first_due: u64) -> Self {
        let period = period_ticks.max(1);
        Self {
            next_due: first_due,
            min_ticks: period,
            max_ticks: period,
        }
    }

    /// Runs at a random gap drawn from `range`, first one gap after `now`.
    pub fn jittered(range: IntervalRange, now: u64, rng: &mut ChaCha8Rng) -> Self {
        let min_ticks = secs_to_ticks(range.min_secs);
        let max_ticks = secs_to_ticks(range.max_secs).max(min_ticks);
        let mut cadence = Self {
            next_due: now,
            min_ticks,
            max_ticks,
        };
        cadence.reschedule(now, rng);
        cadence
    }

    pub fn is_due(&self, tick: u64) -> bool {
        tick >= self.next_due
    }

    pub fn next_due(&self) -> u64 {
        self.next_due
    }

    /// Pick the next due tick after running at `now`. Fixed cadences do not
    /// consume randomness.
    pub fn reschedule(&mut self, now: u64, rng: &mut ChaCha8Rng) {
        let gap = if self.min_ticks == self.max_ticks {
            self.min_ticks
        } else {
            rng.gen_range(self.min_ticks..=self.max_ticks)
        };
        self.next_due = now + gap;
    }
}

/// The three scheduled activities. Missile kinematics runs every base tick
/// and needs no cadence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cadences {
    pub world: Cadence,
    pub alerts: Cadence,
    pub engagement: Cadence,
}

impl Cadences {
    /// Fresh cadences for a run starting at `now`. The world update fires
    /// on the first tick so aircraft are classified straight away.
    pub fn starting_at(now: u64, config: &EngineConfig, rng: &mut ChaCha8Rng) -> Self {
        Self {
            world: Cadence::fixed(WORLD_UPDATE_TICKS, now),
            alerts: Cadence::jittered(config.alert_interval, now, rng),
            engagement: Cadence::jittered(config.engagement_interval, now, rng),
        }
    }
}

/// Convert seconds to whole base ticks, never less than one.
pub fn secs_to_ticks(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        ((secs / BASE_TICK_SECS).round() as u64).max(1)
    } else {
        1
    }
}
