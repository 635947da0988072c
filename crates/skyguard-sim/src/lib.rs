//! Simulation engine for SkyGuard.
//!
//! Owns the hecs ECS world, runs its activities on a fixed base tick,
//! and produces `WorldState` views and `TickReport`s for the host.

pub mod config;
pub mod engagement;
pub mod engine;
pub mod feed;
pub mod guidance;
pub mod history;
pub mod schedule;
pub mod systems;
pub mod world_setup;

pub use config::EngineConfig;
pub use engine::SimulationEngine;
pub use skyguard_core as core;
