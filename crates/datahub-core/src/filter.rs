//! Predicate engine over search results.
//!
//! A [`FilterSpec`] lists the optional predicates a caller wants applied.
//! Every field is independent; the effective predicate is their conjunction.
//! [`apply_filters`] borrows the input records and returns the survivors in
//! input order, never mutating or cloning a record.
//!
//! # Example
//!
//! ```
//! use datahub_core::{apply_filters, FilterSpec, SearchResultItem, StorageModeFilter};
//! use serde_json::json;
//!
//! let items: Vec<SearchResultItem> = serde_json::from_value(json!([
//!     {"displayName": "Sales", "artifact": {"directLakeMode": true}},
//!     {"displayName": "Sales (old)", "artifact": {"storageMode": 1}},
//! ]))
//! .unwrap();
//!
//! let spec = FilterSpec::new()
//!     .name_contains("sales")
//!     .storage_mode(StorageModeFilter::DirectLake);
//!
//! let outcome = apply_filters(&items, &spec);
//! assert_eq!(outcome.items.len(), 1);
//! assert!(outcome.warnings.is_empty());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::models::SearchResultItem;
use crate::temporal::{day_start, parse_day_boundary};

// =============================================================================
// STORAGE MODE FILTER
// =============================================================================

/// Storage mode a caller can filter on.
///
/// Any value other than the three known modes is kept as `Unrecognized` and
/// matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StorageModeFilter {
    /// `artifact.storageMode == 1`
    Import,
    /// `artifact.storageMode == 2`
    DirectQuery,
    /// `artifact.directLakeMode` is set
    DirectLake,
    Unrecognized(String),
}

impl StorageModeFilter {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "import" => Self::Import,
            "directquery" => Self::DirectQuery,
            "directlake" => Self::DirectLake,
            _ => Self::Unrecognized(value.to_string()),
        }
    }

    fn matches(&self, item: &SearchResultItem) -> bool {
        let artifact = item.artifact();
        match self {
            Self::Import => artifact.storage_mode_code() == Some(1),
            Self::DirectQuery => artifact.storage_mode_code() == Some(2),
            Self::DirectLake => artifact.direct_lake(),
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<String> for StorageModeFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<StorageModeFilter> for String {
    fn from(mode: StorageModeFilter) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for StorageModeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import => f.write_str("import"),
            Self::DirectQuery => f.write_str("directquery"),
            Self::DirectLake => f.write_str("directlake"),
            Self::Unrecognized(other) => f.write_str(other),
        }
    }
}

// =============================================================================
// FILTER SPEC
// =============================================================================

/// Optional predicates applied to a result list.
///
/// Text predicates are case-insensitive substring matches. Temporal bounds
/// are `YYYY-MM-DD` strings kept as given so a malformed value can be
/// reported and skipped at evaluation time instead of failing the whole
/// pipeline. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Matches `displayName` or `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Matches `workspaceName`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    /// Matches the owner's email, given name or family name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited_since: Option<String>,

    /// Stale items: last visit strictly before the boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_visited_since: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_since: Option<String>,

    /// Stale data: last refresh strictly before the boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_refreshed_since: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_since: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub not_updated_since: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_mode: Option<StorageModeFilter>,

    /// Matches `artifact.sharedFromEnterpriseCapacitySku`. Substring match,
    /// so `F2` also matches `F20`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_sku: Option<String>,
}

impl FilterSpec {
    /// Create an empty spec (matches every item).
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // BUILDER METHODS
    // =========================================================================

    pub fn name_contains(mut self, text: impl Into<String>) -> Self {
        self.name = Some(text.into());
        self
    }

    pub fn workspace_contains(mut self, text: impl Into<String>) -> Self {
        self.workspace = Some(text.into());
        self
    }

    pub fn owner_contains(mut self, text: impl Into<String>) -> Self {
        self.owner = Some(text.into());
        self
    }

    pub fn visited_since(mut self, day: impl Into<String>) -> Self {
        self.visited_since = Some(day.into());
        self
    }

    pub fn not_visited_since(mut self, day: impl Into<String>) -> Self {
        self.not_visited_since = Some(day.into());
        self
    }

    pub fn refreshed_since(mut self, day: impl Into<String>) -> Self {
        self.refreshed_since = Some(day.into());
        self
    }

    pub fn not_refreshed_since(mut self, day: impl Into<String>) -> Self {
        self.not_refreshed_since = Some(day.into());
        self
    }

    pub fn updated_since(mut self, day: impl Into<String>) -> Self {
        self.updated_since = Some(day.into());
        self
    }

    pub fn not_updated_since(mut self, day: impl Into<String>) -> Self {
        self.not_updated_since = Some(day.into());
        self
    }

    pub fn storage_mode(mut self, mode: StorageModeFilter) -> Self {
        self.storage_mode = Some(mode);
        self
    }

    pub fn capacity_sku(mut self, sku: impl Into<String>) -> Self {
        self.capacity_sku = Some(sku.into());
        self
    }

    // =========================================================================
    // CONSTRAINT CHECKS
    // =========================================================================

    /// Number of predicates that will be evaluated.
    pub fn active_count(&self) -> usize {
        let text = [&self.name, &self.workspace, &self.owner, &self.capacity_sku]
            .into_iter()
            .filter(|v| active(v).is_some())
            .count();
        let temporal = self.temporal_bounds().count();
        text + temporal + usize::from(self.storage_mode.is_some())
    }

    /// Check if the spec is empty (matches every item).
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    fn temporal_bounds(&self) -> impl Iterator<Item = TemporalBound<'_>> {
        use self::Comparison::{Before, OnOrAfter};
        use self::Timestamp::{LastModified, LastRefreshed, LastVisited};

        [
            ("visited_since", &self.visited_since, LastVisited, OnOrAfter),
            ("not_visited_since", &self.not_visited_since, LastVisited, Before),
            ("refreshed_since", &self.refreshed_since, LastRefreshed, OnOrAfter),
            ("not_refreshed_since", &self.not_refreshed_since, LastRefreshed, Before),
            ("updated_since", &self.updated_since, LastModified, OnOrAfter),
            ("not_updated_since", &self.not_updated_since, LastModified, Before),
        ]
        .into_iter()
        .filter_map(|(filter, raw, timestamp, comparison)| {
            active(raw).map(|raw| TemporalBound {
                filter,
                raw,
                timestamp,
                comparison,
            })
        })
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// =============================================================================
// TEMPORAL DIMENSIONS
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum Timestamp {
    LastVisited,
    LastRefreshed,
    LastModified,
}

impl Timestamp {
    fn of(self, item: &SearchResultItem) -> Option<DateTime<Utc>> {
        match self {
            Self::LastVisited => item.last_visited_instant(),
            Self::LastRefreshed => item.refresh_instant(),
            Self::LastModified => item.modified_instant(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Comparison {
    OnOrAfter,
    Before,
}

struct TemporalBound<'a> {
    filter: &'static str,
    raw: &'a str,
    timestamp: Timestamp,
    comparison: Comparison,
}

impl TemporalBound<'_> {
    /// Items without a decodable timestamp never match, in either direction.
    fn admits(&self, item: &SearchResultItem, boundary: DateTime<Utc>) -> bool {
        match (self.timestamp.of(item), self.comparison) {
            (Some(instant), Comparison::OnOrAfter) => instant >= boundary,
            (Some(instant), Comparison::Before) => instant < boundary,
            (None, _) => false,
        }
    }
}

// =============================================================================
// EVALUATION
// =============================================================================

/// A predicate that was skipped because its boundary was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterWarning {
    /// Name of the skipped predicate (e.g. `not_visited_since`).
    pub filter: &'static str,
    /// The value the caller supplied.
    pub value: String,
    pub message: String,
}

/// Result of [`apply_filters`].
#[derive(Debug, Clone, Default)]
pub struct FilterOutcome<'a> {
    /// Surviving records, in input order.
    pub items: Vec<&'a SearchResultItem>,
    /// Predicates that were skipped.
    pub warnings: Vec<FilterWarning>,
}

fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle_lower))
}

/// Apply every active predicate of `spec`, left to right.
///
/// Order: name, workspace, owner, the six temporal bounds, storage mode,
/// capacity SKU. Each predicate narrows the working set. A temporal bound
/// that is not a valid `YYYY-MM-DD` date is skipped and reported in
/// [`FilterOutcome::warnings`]; the remaining predicates still apply.
pub fn apply_filters<'a, I>(items: I, spec: &FilterSpec) -> FilterOutcome<'a>
where
    I: IntoIterator<Item = &'a SearchResultItem>,
{
    let mut result: Vec<&'a SearchResultItem> = items.into_iter().collect();
    let mut warnings = Vec::new();
    let input_count = result.len();

    if let Some(needle) = active(&spec.name) {
        let needle = needle.to_lowercase();
        result.retain(|item| {
            contains_ci(item.raw_display_name(), &needle) || contains_ci(item.name(), &needle)
        });
    }

    if let Some(needle) = active(&spec.workspace) {
        let needle = needle.to_lowercase();
        result.retain(|item| contains_ci(item.workspace_name(), &needle));
    }

    if let Some(needle) = active(&spec.owner) {
        let needle = needle.to_lowercase();
        result.retain(|item| {
            let owner = item.owner();
            contains_ci(owner.email(), &needle)
                || contains_ci(owner.given_name(), &needle)
                || contains_ci(owner.family_name(), &needle)
        });
    }

    for bound in spec.temporal_bounds() {
        match parse_day_boundary(bound.raw) {
            Ok(day) => {
                let boundary = day_start(day);
                result.retain(|item| bound.admits(item, boundary));
            }
            Err(e) => {
                warn!(
                    subsystem = "core",
                    component = "filter",
                    filter = bound.filter,
                    error = %e,
                    "Skipping filter with malformed date"
                );
                warnings.push(FilterWarning {
                    filter: bound.filter,
                    value: bound.raw.to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    if let Some(mode) = &spec.storage_mode {
        result.retain(|item| mode.matches(item));
    }

    if let Some(needle) = active(&spec.capacity_sku) {
        let needle = needle.to_lowercase();
        result.retain(|item| contains_ci(item.artifact().capacity_sku(), &needle));
    }

    debug!(
        subsystem = "core",
        component = "filter",
        op = "apply_filters",
        active_filters = spec.active_count(),
        result_count = input_count,
        filtered_count = result.len(),
        "Filters applied"
    );

    FilterOutcome {
        items: result,
        warnings,
    }
}
