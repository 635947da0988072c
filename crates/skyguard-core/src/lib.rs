//! Core types and definitions for the SkyGuard airspace simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! entity records, commands, state views, events, errors and constants.
//! It has no dependency on the ECS, the host, or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod ring;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
