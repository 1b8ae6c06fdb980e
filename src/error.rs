//! Error type for arena construction and wall queries

use thiserror::Error;

use crate::sim::Side;

/// Errors surfaced by the simulation core
#[derive(Debug, Error)]
pub enum SimError {
    /// Arena, wall or tuning values that cannot produce a playable session
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A hazard lookup fell outside the wall's long axis
    #[error("hazard query at {coordinate} is outside the {side:?} wall span [0, {length})")]
    OutOfRangeQuery {
        side: Side,
        coordinate: f32,
        length: f32,
    },

    /// Settings JSON could not be parsed or written
    #[error("settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// Settings file could not be read
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}
