//! Error types shared by the simulator, analytics, and scenario configuration.

use thiserror::Error;

pub use crate::config::ConfigError;

/// Errors raised while building or running a simulation, or analysing its output.
#[derive(Debug, Error)]
pub enum SimError {
    /// A load's schedule or input series does not cover the simulation horizon.
    #[error("load \"{load}\" has {actual} steps, expected {expected}")]
    LengthMismatch {
        load: String,
        expected: usize,
        actual: usize,
    },

    /// Analytics were requested on a table with zero rows.
    #[error("load table has no rows")]
    EmptyTable,

    /// A load was registered under a column name the table reserves for itself.
    #[error("subsystem label \"{0}\" is reserved")]
    ReservedLabel(String),

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}
