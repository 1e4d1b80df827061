//! Environment-driven configuration for the search client.
//!
//! | Variable               | Default        |
//! |------------------------|----------------|
//! | `DATAHUB_REGION`       | `west-europe`  |
//! | `DATAHUB_PAGE_SIZE`    | `100`          |
//! | `DATAHUB_TIMEOUT_SECS` | `60`           |
//! | `DATAHUB_BASE_URL`     | regional host  |
//! | `DATAHUB_TOKEN`        | Azure CLI      |
//!
//! Unparseable numbers fall back to their defaults; [`SearchConfig::validate`]
//! catches values that parse but make no sense.

use std::env;
use std::fmt;
use thiserror::Error;

use datahub_core::defaults;

use crate::regions::resolve_region;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Unknown region: {0}. Use --list-regions to see options.")]
    UnknownRegion(String),

    #[error("Page size must be at least 1")]
    ZeroPageSize,

    #[error("Timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("Base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(String),
}

impl From<ConfigError> for datahub_core::Error {
    fn from(e: ConfigError) -> Self {
        datahub_core::Error::Config(e.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub region: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    /// Overrides the regional host when set.
    pub base_url: Option<String>,
    /// Pre-acquired bearer token; skips the Azure CLI when set.
    pub token: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            region: defaults::REGION.to_string(),
            page_size: defaults::PAGE_SIZE,
            timeout_secs: defaults::SEARCH_TIMEOUT_SECS,
            base_url: None,
            token: None,
        }
    }
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("region", &self.region)
            .field("page_size", &self.page_size)
            .field("timeout_secs", &self.timeout_secs)
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl SearchConfig {
    /// Load from `DATAHUB_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let default = Self::default();

        Self {
            region: non_empty(defaults::ENV_REGION).unwrap_or(default.region),
            page_size: Self::page_size_from_lookup(&lookup).unwrap_or(default.page_size),
            timeout_secs: non_empty(defaults::ENV_TIMEOUT_SECS)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default.timeout_secs),
            base_url: non_empty(defaults::ENV_BASE_URL),
            token: non_empty(defaults::ENV_TOKEN),
        }
    }

    /// `DATAHUB_PAGE_SIZE`, when set to a parseable value. Blank or
    /// malformed values count as unset.
    pub fn page_size_from_lookup<F>(lookup: F) -> Option<u32>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(defaults::ENV_PAGE_SIZE).and_then(|v| v.trim().parse().ok())
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if resolve_region(&self.region).is_none() {
            return Err(ConfigError::UnknownRegion(self.region.clone()));
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if let Some(url) = &self.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidBaseUrl(url.clone()));
            }
        }
        Ok(())
    }
}
