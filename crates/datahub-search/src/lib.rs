//! # datahub-search
//!
//! Network side of datahub-search: the metadata search client, the
//! regional routing table, bearer-token providers and environment
//! configuration.
//!
//! ```no_run
//! use datahub_search::{AzureCliTokenProvider, SearchClient, SearchRequest, TokenProvider};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let token = AzureCliTokenProvider::new().access_token().await?;
//! let client = SearchClient::new(60)?;
//! let results = client
//!     .search(&token, &SearchRequest::new(["Model"]).region("west-europe"))
//!     .await?;
//! println!("{} items from {}", results.count, results.host);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod regions;

pub use auth::{AzureCliTokenProvider, StaticTokenProvider, TokenProvider};
pub use client::{FilterClause, SearchClient, SearchPayload, SearchRequest, SearchResults};
pub use config::{ConfigError, SearchConfig};
pub use error::{AuthError, SearchError};
pub use regions::{resolve_region, Region, DEFAULT_REGION, REGIONS};
