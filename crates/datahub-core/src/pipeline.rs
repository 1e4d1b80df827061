//! Filter, sort and truncate in one pass.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::{apply_filters, FilterSpec, FilterWarning};
use crate::models::SearchResultItem;
use crate::sort::{sort_items, SortSpec};

/// Post-processing applied to a fetched result list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineOptions {
    #[serde(default)]
    pub filter: FilterSpec,
    /// `None` keeps backend order.
    #[serde(default)]
    pub sort: Option<SortSpec>,
    /// Maximum items kept after sorting. `None` or `0` keeps all.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Output of [`process`].
#[derive(Debug, Clone, Default)]
pub struct Processed<'a> {
    /// Records to render, in final order.
    pub items: Vec<&'a SearchResultItem>,
    /// Filters skipped because of malformed input.
    pub warnings: Vec<FilterWarning>,
    /// Number of records that passed the filters, before the limit.
    pub matched: usize,
}

/// Filter, then sort, then truncate `items`.
pub fn process<'a>(items: &'a [SearchResultItem], options: &PipelineOptions) -> Processed<'a> {
    let outcome = apply_filters(items, &options.filter);
    let matched = outcome.items.len();

    let mut selected = match &options.sort {
        Some(spec) => sort_items(outcome.items, spec),
        None => outcome.items,
    };

    if let Some(limit) = options.limit.filter(|&n| n > 0) {
        selected.truncate(limit);
    }

    debug!(
        subsystem = "core",
        component = "pipeline",
        op = "process",
        result_count = items.len(),
        filtered_count = matched,
        returned = selected.len(),
        "Pipeline complete"
    );

    Processed {
        items: selected,
        warnings: outcome.warnings,
        matched,
    }
}
