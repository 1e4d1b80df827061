//! Structured logging schema and field name constants for datahub-search.
//!
//! Every crate uses these names for structured `tracing` fields so the JSON
//! log output can be queried consistently.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Search or authentication failed, pipeline halted |
//! | WARN  | Recoverable issue (skipped filter, unknown type label) |
//! | INFO  | Lifecycle events (search issued, results returned) |
//! | DEBUG | Decision points (resolved labels, clamped page size) |
//! | TRACE | Per-item evaluation |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "core", "search"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "filter", "sort", "pipeline", "client", "auth"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "search", "apply_filters", "sort_items", "access_token"
pub const OPERATION: &str = "op";

// ─── Request fields ────────────────────────────────────────────────────────

/// Region key the search targeted.
pub const REGION: &str = "region";

/// Fully-qualified backend host.
pub const HOST: &str = "host";

/// Public item-type labels requested.
pub const ITEM_TYPES: &str = "item_types";

/// Workspace GUID scoping the request.
pub const WORKSPACE_ID: &str = "workspace_id";

/// Effective page size after clamping.
pub const PAGE_SIZE: &str = "page_size";

/// 1-indexed page number.
pub const PAGE_NUMBER: &str = "page_number";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of results returned by the backend.
pub const RESULT_COUNT: &str = "result_count";

/// Number of results left after filtering.
pub const FILTERED_COUNT: &str = "filtered_count";

/// Number of filter predicates that were applied.
pub const ACTIVE_FILTERS: &str = "active_filters";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// HTTP status code of a failed request.
pub const STATUS: &str = "status";

/// Filter whose boundary could not be parsed.
pub const FILTER: &str = "filter";

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// All field names, used to keep the schema free of duplicates.
pub const ALL_FIELDS: &[&str] = &[
    SUBSYSTEM,
    COMPONENT,
    OPERATION,
    REGION,
    HOST,
    ITEM_TYPES,
    WORKSPACE_ID,
    PAGE_SIZE,
    PAGE_NUMBER,
    DURATION_MS,
    RESULT_COUNT,
    FILTERED_COUNT,
    ACTIVE_FILTERS,
    STATUS,
    FILTER,
    SUCCESS,
    ERROR_MSG,
];
