//! Game error types

use shade_engine::config::ConfigError;
use shade_engine::physics::GeometryError;

/// Random placement gave up
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Every attempt landed somewhere invalid
    #[error("no valid placement found after {attempts} attempts")]
    Exhausted {
        /// Number of points tried
        attempts: u32,
    },
}

/// Errors raised while building or running a level
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// A level definition described a degenerate shape
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    /// Settings could not be read or written
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A spawn could not find room
    #[error("Placement failed: {0}")]
    Placement(#[from] PlacementError),
}
