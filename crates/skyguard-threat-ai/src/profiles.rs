//! Category-specific behavioral profiles.
//!
//! Consolidates per-category parameters used by the classifier and by the
//! aircraft generator.

use rand::Rng;

use skyguard_core::enums::AircraftCategory;

/// Closed interval of plausible values for a category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min: f64,
    pub max: f64,
}

impl Envelope {
    const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Distance outside the envelope relative to its width, as a [0, 100]
    /// score. Zero anywhere inside.
    pub fn deviation_score(&self, value: f64) -> f64 {
        let width = (self.max - self.min).max(f64::EPSILON);
        let outside = if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        };
        (outside / width * 100.0).clamp(0.0, 100.0)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Behavioral profile for an aircraft category.
#[derive(Debug, Clone)]
pub struct CategoryProfile {
    /// Category base-risk factor score, [0, 100].
    pub base_risk: f64,
    /// Per-tick probability that an IFF interrogation is answered.
    pub iff_response_probability: f64,
    /// Expected ground speed (km/h).
    pub speed: Envelope,
    /// Expected altitude (m).
    pub altitude: Envelope,
    /// Probability of a course change on a world tick.
    pub turn_probability: f64,
    /// Largest course change in one world tick (degrees).
    pub max_turn_deg: f64,
    /// Relative weight when the generator picks a category.
    pub spawn_weight: u32,
    /// Callsign prefixes used by the generator.
    pub callsign_prefixes: &'static [&'static str],
}

/// Get the profile for a given category.
pub fn get_profile(category: AircraftCategory) -> CategoryProfile {
    match category {
        AircraftCategory::Commercial => CategoryProfile {
            base_risk: 10.0,
            iff_response_probability: 0.98,
            speed: Envelope::new(700.0, 950.0),
            altitude: Envelope::new(9_000.0, 12_500.0),
            turn_probability: 0.05,
            max_turn_deg: 5.0,
            spawn_weight: 45,
            callsign_prefixes: &["BAW", "DLH", "AFR", "UAL", "KLM", "SWR"],
        },
        AircraftCategory::Military => CategoryProfile {
            base_risk: 50.0,
            iff_response_probability: 0.85,
            speed: Envelope::new(600.0, 2_200.0),
            altitude: Envelope::new(3_000.0, 15_000.0),
            turn_probability: 0.2,
            max_turn_deg: 30.0,
            spawn_weight: 15,
            callsign_prefixes: &["RCH", "VIPER", "HAWK", "COBRA"],
        },
        AircraftCategory::Private => CategoryProfile {
            base_risk: 30.0,
            iff_response_probability: 0.90,
            speed: Envelope::new(150.0, 450.0),
            altitude: Envelope::new(500.0, 4_500.0),
            turn_probability: 0.1,
            max_turn_deg: 15.0,
            spawn_weight: 20,
            callsign_prefixes: &["N", "G-", "D-E", "F-G"],
        },
        AircraftCategory::Drone => CategoryProfile {
            base_risk: 70.0,
            iff_response_probability: 0.40,
            speed: Envelope::new(50.0, 250.0),
            altitude: Envelope::new(50.0, 1_500.0),
            turn_probability: 0.4,
            max_turn_deg: 60.0,
            spawn_weight: 10,
            callsign_prefixes: &["UAV", "DRN"],
        },
        AircraftCategory::Unknown => CategoryProfile {
            base_risk: 85.0,
            iff_response_probability: 0.30,
            speed: Envelope::new(100.0, 1_000.0),
            altitude: Envelope::new(100.0, 12_000.0),
            turn_probability: 0.35,
            max_turn_deg: 75.0,
            spawn_weight: 10,
            callsign_prefixes: &["UNK", "TGT"],
        },
    }
}

/// All categories in generator order.
pub const CATEGORIES: [AircraftCategory; 5] = [
    AircraftCategory::Commercial,
    AircraftCategory::Military,
    AircraftCategory::Private,
    AircraftCategory::Drone,
    AircraftCategory::Unknown,
];

/// Simulated IFF interrogation for one tick.
pub fn roll_iff<R: Rng + ?Sized>(category: AircraftCategory, rng: &mut R) -> bool {
    rng.gen_bool(get_profile(category).iff_response_probability)
}

/// Pick a category by spawn weight.
pub fn pick_category<R: Rng + ?Sized>(rng: &mut R) -> AircraftCategory {
    let total: u32 = CATEGORIES.iter().map(|c| get_profile(*c).spawn_weight).sum();
    let mut roll = rng.gen_range(0..total);
    for category in CATEGORIES {
        let weight = get_profile(category).spawn_weight;
        if roll < weight {
            return category;
        }
        roll -= weight;
    }
    AircraftCategory::Unknown
}
