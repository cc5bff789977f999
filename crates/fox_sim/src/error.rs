//! Error types for the simulation

use crate::assets::SessionStatus;
use thiserror::Error;

/// Simulation errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    /// Character assets could not be loaded
    #[error("Asset load failed: {0}")]
    AssetLoad(String),

    /// Invalid configuration
    #[error("Invalid game configuration: {0}")]
    InvalidConfig(String),

    /// Lifecycle call made in the wrong status
    #[error("Session is {actual:?}, expected {expected:?}")]
    InvalidStatus {
        expected: SessionStatus,
        actual: SessionStatus,
    },
}

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
