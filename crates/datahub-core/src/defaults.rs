//! Centralized default constants for datahub-search.
//!
//! **This module is the single source of truth** for shared default values.
//! The search client, the configuration loader and the CLI all reference
//! these constants instead of defining their own magic numbers.

// =============================================================================
// SEARCH REQUEST
// =============================================================================

/// Region used when neither the CLI nor the environment picks one.
pub const REGION: &str = "west-europe";

/// Hard cap on the page size accepted by the search endpoint.
/// Larger values are clamped, never rejected.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Page size used by library callers that do not specify one.
pub const PAGE_SIZE: u32 = 100;

/// Page size used by the command-line tool.
pub const CLI_PAGE_SIZE: u32 = 200;

/// Pages are 1-indexed.
pub const PAGE_NUMBER: u32 = 1;

/// Host-family discriminator sent with every search request.
pub const HOST_FAMILY: u32 = 4;

/// Ordering hint sent to the backend. Results are re-ordered locally.
pub const ORDER_BY: &str = "Default";

/// Path of the metadata search endpoint on the regional host.
pub const SEARCH_PATH: &str = "/metadata/datahub/V2/artifacts";

/// Maximum number of characters of an error body kept in failure messages.
pub const ERROR_BODY_MAX_CHARS: usize = 200;

// =============================================================================
// TIMEOUTS
// =============================================================================

/// Timeout for the search request (seconds).
pub const SEARCH_TIMEOUT_SECS: u64 = 60;

/// Timeout for the Azure CLI token subprocess (seconds).
pub const TOKEN_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Resource the access token is requested for.
pub const TOKEN_RESOURCE: &str = "https://analysis.windows.net/powerbi/api";

/// Azure CLI executable name.
pub const AZ_CLI: &str = "az";

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

/// Region key override.
pub const ENV_REGION: &str = "DATAHUB_REGION";

/// Page size override.
pub const ENV_PAGE_SIZE: &str = "DATAHUB_PAGE_SIZE";

/// Search timeout override in seconds.
pub const ENV_TIMEOUT_SECS: &str = "DATAHUB_TIMEOUT_SECS";

/// Base URL override (bypasses the regional host, used against mocks and proxies).
pub const ENV_BASE_URL: &str = "DATAHUB_BASE_URL";

/// Pre-acquired bearer token; when set the Azure CLI is not invoked.
pub const ENV_TOKEN: &str = "DATAHUB_TOKEN";
