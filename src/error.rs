//! Error types for genesis-surgeon

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("Input not found: {}: {source}", path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed genesis at `{path}`: {reason}")]
    MalformedGenesis { path: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid amount at `{field}`: {value:?} is not a valid number")]
    InvalidAmount { field: String, value: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GenesisError {
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        GenesisError::MalformedGenesis {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_amount(field: impl Into<String>, value: impl Into<String>) -> Self {
        GenesisError::InvalidAmount {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for GenesisError {
    fn from(err: serde_json::Error) -> Self {
        GenesisError::Serialization(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, GenesisError>;
