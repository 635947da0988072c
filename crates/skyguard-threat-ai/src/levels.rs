//! Category-aware threat level bucketing.
//!
//! Kept apart from the weighted-sum computation: the floors and ceilings
//! here are policy. A Commercial aircraft is never HOSTILE and an Unknown
//! or Drone aircraft is never FRIENDLY, whatever the score says.

use skyguard_core::constants::{FRIENDLY_MAX_SCORE, NEUTRAL_MAX_SCORE, SUSPECT_MAX_SCORE};
use skyguard_core::enums::{AircraftCategory, ThreatLevel};

/// Level implied by the score alone.
pub fn level_for_score(score: f64) -> ThreatLevel {
    if score < FRIENDLY_MAX_SCORE {
        ThreatLevel::Friendly
    } else if score < NEUTRAL_MAX_SCORE {
        ThreatLevel::Neutral
    } else if score < SUSPECT_MAX_SCORE {
        ThreatLevel::Suspect
    } else {
        ThreatLevel::Hostile
    }
}

/// Lowest level a category may be assigned.
pub fn category_floor(category: AircraftCategory) -> ThreatLevel {
    match category {
        AircraftCategory::Unknown | AircraftCategory::Drone => ThreatLevel::Neutral,
        _ => ThreatLevel::Friendly,
    }
}

/// Highest level a category may be assigned.
pub fn category_ceiling(category: AircraftCategory) -> ThreatLevel {
    match category {
        AircraftCategory::Commercial => ThreatLevel::Suspect,
        _ => ThreatLevel::Hostile,
    }
}

/// Bucket a confidence score into a threat level for the given category.
pub fn bucket(score: f64, category: AircraftCategory) -> ThreatLevel {
    level_for_score(score).clamp(category_floor(category), category_ceiling(category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(level_for_score(0.0), ThreatLevel::Friendly);
        assert_eq!(level_for_score(19.99), ThreatLevel::Friendly);
        assert_eq!(level_for_score(20.0), ThreatLevel::Neutral);
        assert_eq!(level_for_score(40.0), ThreatLevel::Suspect);
        assert_eq!(level_for_score(59.99), ThreatLevel::Suspect);
        assert_eq!(level_for_score(60.0), ThreatLevel::Hostile);
        assert_eq!(level_for_score(100.0), ThreatLevel::Hostile);
    }

    #[test]
    fn test_commercial_never_hostile() {
        for score in [60.0, 90.0, 100.0] {
            assert_eq!(bucket(score, AircraftCategory::Commercial), ThreatLevel::Suspect);
        }
        assert_eq!(bucket(10.0, AircraftCategory::Commercial), ThreatLevel::Friendly);
    }

    #[test]
    fn test_unknown_and_drone_never_friendly() {
        for category in [AircraftCategory::Unknown, AircraftCategory::Drone] {
            assert_eq!(bucket(0.0, category), ThreatLevel::Neutral);
            assert_eq!(bucket(80.0, category), ThreatLevel::Hostile);
        }
    }

    #[test]
    fn test_military_and_private_unclamped() {
        for category in [AircraftCategory::Military, AircraftCategory::Private] {
            assert_eq!(bucket(5.0, category), ThreatLevel::Friendly);
            assert_eq!(bucket(95.0, category), ThreatLevel::Hostile);
        }
    }
}
