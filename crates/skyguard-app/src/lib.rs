//! SkyGuard engine host.
//!
//! Runs each engine on its own thread, exposes a synchronous handle for
//! commands and queries, and bridges JSON requests for whatever transport
//! sits in front.

pub mod config;
pub mod game_loop;
pub mod ipc;
pub mod observability;
pub mod state;

pub use skyguard_core as core;
