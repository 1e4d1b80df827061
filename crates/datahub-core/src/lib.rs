//! # datahub-core
//!
//! Core types and the in-memory half of the datahub-search pipeline.
//!
//! This crate owns everything that happens after the metadata search
//! returns: decoding the backend's inconsistent timestamps, narrowing the
//! result list with a [`FilterSpec`], ordering it with a [`SortSpec`], and
//! rendering it in one of the [`OutputFormat`] shapes. It also carries the
//! static item-type registry used to build search requests.
//!
//! None of these stages perform I/O; the network call lives in
//! `datahub-search`.

pub mod defaults;
pub mod error;
pub mod filter;
pub mod format;
pub mod item_types;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod sort;
pub mod temporal;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use filter::{apply_filters, FilterOutcome, FilterSpec, FilterWarning, StorageModeFilter};
pub use format::{format_items, summarize, ItemSummary, OutputFormat, NO_ITEMS_MESSAGE};
pub use item_types::{resolve_backend_label, ItemTypeDescriptor};
pub use models::{Artifact, Owner, SearchResultItem, StorageMode};
pub use pipeline::{process, PipelineOptions, Processed};
pub use sort::{sort_by_name, sort_items, SortDirection, SortField, SortSpec};
pub use temporal::{parse_day_boundary, parse_instant, TemporalError};
