//! Error types for datahub-search.

use thiserror::Error;

use crate::temporal::TemporalError;

/// Result type alias using datahub-search's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for datahub-search operations.
///
/// Library crates keep their own narrower enums (search, auth, config) and
/// convert into this one at the boundary, so callers only need to match a
/// single taxonomy.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (unknown region, bad page size, missing type)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential acquisition failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Search request failed (non-2xx, timeout, transport)
    #[error("Search error: {0}")]
    Search(String),

    /// A date string could not be decoded
    #[error(transparent)]
    Temporal(#[from] TemporalError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
