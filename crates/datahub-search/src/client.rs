//! Client for the DataHub V2 metadata search endpoint.

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use datahub_core::defaults;
use datahub_core::{resolve_backend_label, SearchResultItem};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::regions::{resolve_region, DEFAULT_REGION};

/// Parameters of one search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Public item-type labels, e.g. `Model` or `PowerBIReport`.
    pub item_types: Vec<String>,
    pub region: String,
    /// Restrict results to one workspace.
    pub workspace_id: Option<String>,
    /// Clamped to [`defaults::MAX_PAGE_SIZE`] when sent.
    pub page_size: u32,
    /// 1-indexed.
    pub page_number: u32,
}

impl SearchRequest {
    pub fn new<I, S>(item_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            item_types: item_types.into_iter().map(Into::into).collect(),
            region: DEFAULT_REGION.to_string(),
            workspace_id: None,
            page_size: defaults::PAGE_SIZE,
            page_number: defaults::PAGE_NUMBER,
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// An empty id is ignored.
    pub fn workspace_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.workspace_id = (!id.is_empty()).then_some(id);
        self
    }

    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = size;
        self
    }

    pub fn page_number(mut self, page: u32) -> Self {
        self.page_number = page;
        self
    }

    /// Build the wire payload.
    pub fn payload(&self) -> SearchPayload {
        let filters = self
            .workspace_id
            .iter()
            .map(|id| FilterClause {
                datahub_filter_type: "workspace".to_string(),
                values: vec![id.clone()],
            })
            .collect();

        SearchPayload {
            filters,
            host_family: defaults::HOST_FAMILY,
            order_by: defaults::ORDER_BY.to_string(),
            order_direction: String::new(),
            page_number: self.page_number,
            page_size: self.page_size.min(defaults::MAX_PAGE_SIZE),
            supported_types: self.item_types.clone(),
            trident_supported_types: self
                .item_types
                .iter()
                .map(|label| resolve_backend_label(label))
                .collect(),
        }
    }
}

/// JSON body of the search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload {
    pub filters: Vec<FilterClause>,
    pub host_family: u32,
    pub order_by: String,
    pub order_direction: String,
    pub page_number: u32,
    pub page_size: u32,
    pub supported_types: Vec<String>,
    pub trident_supported_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    pub datahub_filter_type: String,
    pub values: Vec<String>,
}

/// Successful search response.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
    pub items: Vec<SearchResultItem>,
    pub count: usize,
    pub region: String,
    /// Regional host the region resolved to.
    pub host: String,
}

/// HTTP client for the metadata search endpoint.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: Client,
    timeout_secs: u64,
    base_url: Option<String>,
}

impl SearchClient {
    /// Create a client whose requests time out after `timeout_secs`.
    pub fn new(timeout_secs: u64) -> Result<Self, SearchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| SearchError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            timeout_secs,
            base_url: None,
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        let client = Self::new(config.timeout_secs)?;
        Ok(match &config.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }

    /// Send requests to `base_url` instead of the regional host.
    ///
    /// The region key is still validated and still reported in
    /// [`SearchResults::host`].
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn endpoint(&self, host: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}{}", base, defaults::SEARCH_PATH),
            None => format!("https://{}{}", host, defaults::SEARCH_PATH),
        }
    }

    fn map_send_error(&self, e: reqwest::Error) -> SearchError {
        if e.is_timeout() {
            SearchError::Timeout {
                secs: self.timeout_secs,
            }
        } else {
            SearchError::Transport(e.to_string())
        }
    }

    /// Run one search.
    ///
    /// Region and item types are validated before anything is sent. The
    /// call is never retried.
    #[instrument(
        skip(self, token, request),
        fields(
            subsystem = "search",
            component = "client",
            op = "search",
            region = %request.region,
            item_types = ?request.item_types,
            workspace_id = request.workspace_id.as_deref().unwrap_or(""),
            page_number = request.page_number,
        )
    )]
    pub async fn search(
        &self,
        token: &str,
        request: &SearchRequest,
    ) -> Result<SearchResults, SearchError> {
        let region = resolve_region(&request.region)
            .ok_or_else(|| SearchError::UnknownRegion(request.region.clone()))?;
        if request.item_types.is_empty() {
            return Err(SearchError::NoItemTypes);
        }

        let payload = request.payload();
        if payload.page_size < request.page_size {
            debug!(
                requested = request.page_size,
                page_size = payload.page_size,
                "Page size clamped"
            );
        }

        let url = self.endpoint(region.host);
        let start = Instant::now();

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        let elapsed = start.elapsed().as_millis() as u64;

        if !status.is_success() {
            warn!(
                host = region.host,
                status = status.as_u16(),
                success = false,
                duration_ms = elapsed,
                "Search request failed"
            );
            return Err(SearchError::Http {
                status: status.as_u16(),
                body: body.chars().take(defaults::ERROR_BODY_MAX_CHARS).collect(),
            });
        }

        let value: Value =
            serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))?;
        let items: Vec<SearchResultItem> = match value {
            Value::Array(values) => values
                .into_iter()
                .filter_map(SearchResultItem::from_value)
                .collect(),
            _ => {
                debug!("Response body is not an array; treating as empty");
                Vec::new()
            }
        };

        info!(
            host = region.host,
            page_size = payload.page_size,
            success = true,
            result_count = items.len(),
            duration_ms = elapsed,
            "Search complete"
        );

        Ok(SearchResults {
            count: items.len(),
            items,
            region: region.key.to_string(),
            host: region.host.to_string(),
        })
    }
}
