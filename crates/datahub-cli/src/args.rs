//! Command-line arguments.

use anyhow::Result;
use clap::Parser;

use datahub_core::defaults;
use datahub_core::{
    FilterSpec, OutputFormat, PipelineOptions, SortDirection, SortField, SortSpec,
    StorageModeFilter,
};

const ABOUT: &str = "Search Fabric and Power BI items across all workspaces.";

const LONG_ABOUT: &str = "\
Search Fabric and Power BI items across all workspaces.

Returns metadata not available from the standard APIs: last visit time,
storage mode, owner and capacity SKU.

Type labels:
  semantic models   --type Model
  dataflows         --type DataFlow
  notebooks         --type SynapseNotebook";

const AFTER_HELP: &str = "\
Examples:
  datahub-search --type Model --filter Sales
  datahub-search --type Model --not-visited-since 2024-06-01 --sort last-visited --sort-order asc
  datahub-search --type Model --storage-mode directlake --output json
  datahub-search --list-types";

#[derive(Parser, Debug)]
#[command(name = "datahub-search")]
#[command(version, about = ABOUT, long_about = LONG_ABOUT, after_help = AFTER_HELP)]
pub struct Cli {
    /// Item type label to search for (see --list-types)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub item_type: Option<String>,

    /// Name contains TEXT (case-insensitive)
    #[arg(short = 'f', long = "filter", value_name = "TEXT")]
    pub filter: Option<String>,

    /// Workspace name contains TEXT (case-insensitive)
    #[arg(short = 'w', long = "workspace", value_name = "TEXT")]
    pub workspace: Option<String>,

    /// Restrict the search to one workspace id (applied server-side)
    #[arg(long, value_name = "GUID")]
    pub workspace_id: Option<String>,

    /// Owner email or name contains TEXT (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    pub owner: Option<String>,

    /// Visited on or after DATE (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub visited_since: Option<String>,

    /// Not visited since DATE (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub not_visited_since: Option<String>,

    /// Refreshed on or after DATE (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub refreshed_since: Option<String>,

    /// Not refreshed since DATE (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub not_refreshed_since: Option<String>,

    /// Modified on or after DATE (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub updated_since: Option<String>,

    /// Not modified since DATE (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub not_updated_since: Option<String>,

    /// Semantic model storage mode
    #[arg(
        long,
        value_name = "MODE",
        value_parser = ["import", "directquery", "directlake"]
    )]
    pub storage_mode: Option<String>,

    /// Capacity SKU contains TEXT (e.g. F64)
    #[arg(long, value_name = "SKU")]
    pub capacity_sku: Option<String>,

    /// Sort field
    #[arg(
        long,
        value_name = "FIELD",
        value_parser = ["name", "workspace", "last-visited", "last-refreshed", "last-modified", "owner"]
    )]
    pub sort: Option<String>,

    /// Sort direction
    #[arg(long, value_name = "ORDER", value_parser = ["asc", "desc"], default_value = "desc")]
    pub sort_order: String,

    /// Output layout
    #[arg(
        short = 'o',
        long,
        value_name = "FORMAT",
        value_parser = ["table", "json", "brief", "detailed"],
        default_value = "table"
    )]
    pub output: String,

    /// Show at most N items after sorting (0 shows all)
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Region key (see --list-regions) [env: DATAHUB_REGION] [default: west-europe]
    #[arg(short = 'r', long, value_name = "REGION")]
    pub region: Option<String>,

    /// Results requested from the API, capped at 1000 [env: DATAHUB_PAGE_SIZE] [default: 200]
    #[arg(long, value_name = "N")]
    pub page_size: Option<u32>,

    /// Page to request, 1-indexed
    #[arg(long, value_name = "N", default_value_t = defaults::PAGE_NUMBER)]
    pub page: u32,

    /// List known item types and exit
    #[arg(long)]
    pub list_types: bool,

    /// List known regions and exit
    #[arg(long)]
    pub list_regions: bool,
}

impl Cli {
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            name: self.filter.clone(),
            workspace: self.workspace.clone(),
            owner: self.owner.clone(),
            visited_since: self.visited_since.clone(),
            not_visited_since: self.not_visited_since.clone(),
            refreshed_since: self.refreshed_since.clone(),
            not_refreshed_since: self.not_refreshed_since.clone(),
            updated_since: self.updated_since.clone(),
            not_updated_since: self.not_updated_since.clone(),
            storage_mode: self.storage_mode.as_deref().map(StorageModeFilter::parse),
            capacity_sku: self.capacity_sku.clone(),
        }
    }

    pub fn sort_spec(&self) -> Result<Option<SortSpec>> {
        let direction = SortDirection::parse(&self.sort_order);
        match &self.sort {
            Some(field) => Ok(Some(SortSpec::new(field.parse::<SortField>()?, direction))),
            None => Ok(None),
        }
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        Ok(self.output.parse::<OutputFormat>()?)
    }

    pub fn pipeline_options(&self) -> Result<PipelineOptions> {
        Ok(PipelineOptions {
            filter: self.filter_spec(),
            sort: self.sort_spec()?,
            limit: self.limit,
        })
    }
}
