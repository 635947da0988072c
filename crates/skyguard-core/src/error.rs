//! Synchronous command rejections and engine configuration errors.

use thiserror::Error;

use crate::types::AircraftId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown target: no aircraft with id {0}")]
    UnknownTarget(AircraftId),

    #[error("no interceptors remaining")]
    NoInterceptorsRemaining,

    #[error("engine is stopped or rewinding")]
    Halted,

    #[error("no snapshot {0} steps back in history")]
    HistoryUnavailable(usize),
}

/// Result type alias for engine commands.
pub type CommandResult<T> = Result<T, CommandError>;

/// Why an engine configuration was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("spawn bounds must be finite, ordered and on the globe")]
    InvalidBounds,

    #[error("defended center must be finite")]
    InvalidCenter,

    #[error("{field} interval must be finite, non-negative and ordered")]
    InvalidInterval { field: &'static str },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },

    #[error("min_aircraft {min} exceeds max_aircraft {max}")]
    InvalidPopulation { min: u32, max: u32 },

    #[error("missile speed must be finite and positive, got {0}")]
    InvalidMissileSpeed(f64),
}
