//! Search and authentication errors.

use thiserror::Error;

/// Failure of a search call. Every variant is returned as a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The region key is not in the routing table. No request was sent.
    #[error("Unknown region: {0}. Use --list-regions to see options.")]
    UnknownRegion(String),

    /// The request named no item types. No request was sent.
    #[error("At least one item type is required")]
    NoItemTypes,

    /// The backend answered with a non-success status.
    /// `body` holds at most the first 200 characters of the response.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request timed out ({secs}s)")]
    Timeout { secs: u64 },

    /// Connection, TLS or other low-level failure.
    #[error("{0}")]
    Transport(String),

    /// A success response whose body is not JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl SearchError {
    /// True for failures detected before any network traffic.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::UnknownRegion(_) | Self::NoItemTypes)
    }
}

impl From<SearchError> for datahub_core::Error {
    fn from(e: SearchError) -> Self {
        if e.is_configuration() {
            datahub_core::Error::Config(e.to_string())
        } else {
            datahub_core::Error::Search(e.to_string())
        }
    }
}

/// Failure to obtain an access token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Azure CLI not installed. Install it and run 'az login'")]
    CliNotFound,

    #[error("Azure CLI not authenticated. Run 'az login' first.")]
    NotLoggedIn { stderr: String },

    #[error("Token request timed out ({secs}s)")]
    Timeout { secs: u64 },

    #[error("Unexpected Azure CLI output: {0}")]
    MalformedOutput(String),

    #[error("Error getting token: {0}")]
    Io(String),
}

impl From<AuthError> for datahub_core::Error {
    fn from(e: AuthError) -> Self {
        datahub_core::Error::Auth(e.to_string())
    }
}
