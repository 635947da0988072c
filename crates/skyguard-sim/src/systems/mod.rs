//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are free functions over `&mut World` (or `&World` for read-only
//! views). Engine-level state they need is passed in explicitly.

pub mod alerts;
pub mod classification;
pub mod cleanup;
pub mod fire_control;
pub mod missile_kinematics;
pub mod movement;
pub mod population;
pub mod snapshot;
