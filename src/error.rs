// Typed errors with thiserror. Only configuration can fail; every rail operation is total.

use thiserror::Error;

/// Rail engine error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RailError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RailError {
    fn from(err: serde_json::Error) -> Self {
        RailError::Serialization(err.to_string())
    }
}
