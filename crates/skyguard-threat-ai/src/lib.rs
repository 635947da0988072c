//! Threat assessment for SkyGuard.
//!
//! Pure functions over plain data: category profiles, the weighted
//! multi-factor classifier, category-aware level bucketing, naive path
//! prediction and the prediction-deviation anomaly detector.
//! No ECS dependency.

pub mod anomaly;
pub mod classifier;
pub mod levels;
pub mod prediction;
pub mod profiles;

pub use skyguard_core as core;

#[cfg(test)]
mod tests;
