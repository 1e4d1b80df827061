//! Rendering of result lists.
//!
//! Three human-oriented layouts (table, brief, detailed) and one structured
//! layout (JSON) meant for programmatic consumers. Only the JSON form is a
//! stable contract; the others are for reading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::Result;
use crate::models::{SearchResultItem, StorageMode};
use crate::temporal::to_iso;

/// Rendered by every human-oriented layout when there is nothing to show.
pub const NO_ITEMS_MESSAGE: &str = "No items found.";

const NAME_WIDTH: usize = 35;
const WORKSPACE_WIDTH: usize = 22;
const VISITED_WIDTH: usize = 12;
const OWNER_WIDTH: usize = 20;
const TABLE_RULE_WIDTH: usize = 92;
const DETAIL_RULE_WIDTH: usize = 60;
const DETAIL_VISIT_CHARS: usize = 19;
const DAY_CHARS: usize = 10;

/// Output layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width columns: name, workspace, last visit, owner.
    #[default]
    Table,
    /// Cleaned records as a JSON array.
    Json,
    /// One `workspace/name` line per item.
    Brief,
    /// Labeled block per item.
    Detailed,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Brief => "brief",
            Self::Detailed => "detailed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown output format: {0}")]
pub struct UnknownOutputFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownOutputFormat;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "brief" => Ok(Self::Brief),
            "detailed" => Ok(Self::Detailed),
            _ => Err(UnknownOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reduced, cleaned view of a record for machine consumption.
///
/// Absent values serialize as `null`. `lastRefreshed` and `lastModified` are
/// decoded and re-rendered as RFC 3339, so consumers never see the
/// `/Date(...)/` encoding; `lastVisited` is passed through as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub name: Option<String>,
    pub workspace: Option<String>,
    pub workspace_id: Option<String>,
    pub id: Option<String>,
    pub last_visited: Option<String>,
    pub last_refreshed: Option<String>,
    pub last_modified: Option<String>,
    /// Owner email.
    pub owner: Option<String>,
    pub owner_name: String,
    pub storage_mode: StorageMode,
    pub capacity_sku: Option<String>,
    pub is_discoverable: Option<bool>,
}

impl From<&SearchResultItem> for ItemSummary {
    fn from(item: &SearchResultItem) -> Self {
        let owner = item.owner();
        Self {
            name: item.display_name().map(str::to_string),
            workspace: item.workspace_name().map(str::to_string),
            workspace_id: item.workspace_id().map(str::to_string),
            id: item.object_id().map(str::to_string),
            last_visited: item.last_visited().map(str::to_string),
            last_refreshed: item.refresh_instant().as_ref().map(to_iso),
            last_modified: item.modified_instant().as_ref().map(to_iso),
            owner: owner.email().map(str::to_string),
            owner_name: owner.full_name().trim().to_string(),
            storage_mode: item.storage_mode(),
            capacity_sku: item.artifact().capacity_sku().map(str::to_string),
            is_discoverable: item.is_discoverable(),
        }
    }
}

/// Build the structured summaries without serializing them.
pub fn summarize(items: &[&SearchResultItem]) -> Vec<ItemSummary> {
    items.iter().map(|&item| ItemSummary::from(item)).collect()
}

/// Render `items` in the requested layout.
///
/// Errors only if JSON serialization fails.
pub fn format_items(items: &[&SearchResultItem], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(&summarize(items))?);
    }

    if items.is_empty() {
        return Ok(NO_ITEMS_MESSAGE.to_string());
    }

    let rendered = match format {
        OutputFormat::Brief => format_brief(items),
        OutputFormat::Detailed => format_detailed(items),
        OutputFormat::Table | OutputFormat::Json => format_table(items),
    };
    Ok(rendered)
}

fn truncate(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

fn format_table(items: &[&SearchResultItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 2);
    lines.push(format!(
        "{:<nw$} {:<ww$} {:<vw$} {:<ow$}",
        "Name",
        "Workspace",
        "Last Visited",
        "Owner",
        nw = NAME_WIDTH,
        ww = WORKSPACE_WIDTH,
        vw = VISITED_WIDTH,
        ow = OWNER_WIDTH,
    ));
    lines.push("-".repeat(TABLE_RULE_WIDTH));

    for item in items {
        let owner_name = item.owner().full_name();
        lines.push(format!(
            "{:<nw$} {:<ww$} {:<vw$} {:<ow$}",
            truncate(item.display_name().unwrap_or("Unknown"), NAME_WIDTH - 1),
            truncate(item.workspace_name().unwrap_or_default(), WORKSPACE_WIDTH - 1),
            truncate(item.last_visited().unwrap_or_default(), DAY_CHARS),
            truncate(&owner_name, OWNER_WIDTH - 1),
            nw = NAME_WIDTH,
            ww = WORKSPACE_WIDTH,
            vw = VISITED_WIDTH,
            ow = OWNER_WIDTH,
        ));
    }

    lines.join("\n")
}

fn format_brief(items: &[&SearchResultItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{}/{}",
                item.workspace_name().unwrap_or_default(),
                item.display_name().unwrap_or("Unknown")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_detailed(items: &[&SearchResultItem]) -> String {
    let mut lines = Vec::with_capacity(items.len() * 9);
    for item in items {
        let owner = item.owner();
        let last_visit = item
            .last_visited()
            .filter(|v| !v.is_empty())
            .map(|v| truncate(v, DETAIL_VISIT_CHARS))
            .unwrap_or("N/A");
        let discoverable = item
            .is_discoverable()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        lines.push(format!("Name:        {}", item.display_name().unwrap_or("Unknown")));
        lines.push(format!("Workspace:   {}", item.workspace_name().unwrap_or("N/A")));
        lines.push(format!("ID:          {}", item.object_id().unwrap_or("N/A")));
        lines.push(format!("Last Visit:  {}", last_visit));
        lines.push(format!(
            "Owner:       {} <{}>",
            owner.full_name(),
            owner.email().unwrap_or("N/A")
        ));
        lines.push(format!("Storage:     {}", item.storage_mode()));
        lines.push(format!(
            "Capacity:    {}",
            item.artifact().capacity_sku().unwrap_or("N/A")
        ));
        lines.push(format!("Discoverable:{}", discoverable));
        lines.push("-".repeat(DETAIL_RULE_WIDTH));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn items(value: Value) -> Vec<SearchResultItem> {
        serde_json::from_value(value).unwrap()
    }

    fn sample() -> Vec<SearchResultItem> {
        items(json!([
            {
                "displayName": "Quarterly Revenue Semantic Model With A Long Name",
                "workspaceName": "Finance Production Workspace",
                "workspaceObjectId": "ws-1",
                "objectId": "item-1",
                "lastVisitedTimeUTC": "2024-11-02T13:45:10.123Z",
                "modifiedDate": "/Date(1700000000000)/",
                "lastRefreshTime": "2024-11-20T02:00:00",
                "isDiscoverable": true,
                "ownerUser": {"givenName": "Ada", "familyName": "Lovelace", "emailAddress": "ada@example.com"},
                "artifact": {"directLakeMode": true, "storageMode": 1, "sharedFromEnterpriseCapacitySku": "F64"}
            },
            {
                "name": "bare"
            }
        ]))
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("Detailed".parse::<OutputFormat>(), Ok(OutputFormat::Detailed));
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }

    #[test]
    fn test_empty_list_renders_no_items_indicator() {
        for format in [OutputFormat::Table, OutputFormat::Brief, OutputFormat::Detailed] {
            assert_eq!(format_items(&[], format).unwrap(), NO_ITEMS_MESSAGE);
        }
        let json = format_items(&[], OutputFormat::Json).unwrap();
        let parsed: Vec<ItemSummary> = serde_json::from_str(&json).unwrap();
        assert!(parsed.is_empty());
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_table_layout() {
        let data = sample();
        let refs: Vec<_> = data.iter().collect();
        let out = format_items(&refs, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert_eq!(lines[0].chars().count(), 35 + 1 + 22 + 1 + 12 + 1 + 20);
        assert_eq!(lines[1], "-".repeat(92));

        let row = lines[2];
        assert!(row.starts_with("Quarterly Revenue Semantic Model W "));
        assert!(row.contains("Finance Production Wo "));
        assert!(row.contains("2024-11-02 "));
        assert!(row.contains("Ada Lovelace"));
        assert_eq!(row.chars().count(), lines[0].chars().count());

        assert!(lines[3].starts_with("bare "));
    }

    #[test]
    fn test_table_truncation_is_char_safe() {
        let data = items(json!([{"displayName": "é".repeat(50), "workspaceName": "ü".repeat(30)}]));
        let refs: Vec<_> = data.iter().collect();
        let out = format_items(&refs, OutputFormat::Table).unwrap();
        let row = out.lines().nth(2).unwrap();
        assert!(row.starts_with(&"é".repeat(34)));
        assert!(!row.starts_with(&"é".repeat(35)));
    }

    #[test]
    fn test_brief_layout() {
        let data = sample();
        let refs: Vec<_> = data.iter().collect();
        let out = format_items(&refs, OutputFormat::Brief).unwrap();
        assert_eq!(
            out,
            "Finance Production Workspace/Quarterly Revenue Semantic Model With A Long Name\n/bare"
        );
    }

    #[test]
    fn test_detailed_layout() {
        let data = sample();
        let refs: Vec<_> = data.iter().collect();
        let out = format_items(&refs, OutputFormat::Detailed).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 18);
        assert_eq!(lines[2], "ID:          item-1");
        assert_eq!(lines[3], "Last Visit:  2024-11-02T13:45:10");
        assert_eq!(lines[4], "Owner:       Ada Lovelace <ada@example.com>");
        assert_eq!(lines[5], "Storage:     DirectLake");
        assert_eq!(lines[6], "Capacity:    F64");
        assert_eq!(lines[7], "Discoverable:true");
        assert_eq!(lines[8], "-".repeat(60));

        assert_eq!(lines[9], "Name:        bare");
        assert_eq!(lines[10], "Workspace:   N/A");
        assert_eq!(lines[12], "Last Visit:  N/A");
        assert_eq!(lines[13], format!("Owner:       {} <N/A>", " "));
        assert_eq!(lines[14], "Storage:     Unknown");
        assert_eq!(lines[16], "Discoverable:N/A");
    }

    #[test]
    fn test_json_layout_fields() {
        let data = sample();
        let refs: Vec<_> = data.iter().collect();
        let out = format_items(&refs, OutputFormat::Json).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(
            parsed[0],
            json!({
                "name": "Quarterly Revenue Semantic Model With A Long Name",
                "workspace": "Finance Production Workspace",
                "workspaceId": "ws-1",
                "id": "item-1",
                "lastVisited": "2024-11-02T13:45:10.123Z",
                "lastRefreshed": "2024-11-20T00:00:00Z",
                "lastModified": "2023-11-14T22:13:20Z",
                "owner": "ada@example.com",
                "ownerName": "Ada Lovelace",
                "storageMode": "DirectLake",
                "capacitySku": "F64",
                "isDiscoverable": true
            })
        );
        assert_eq!(parsed[1]["name"], "bare");
        assert_eq!(parsed[1]["ownerName"], "");
        assert_eq!(parsed[1]["lastRefreshed"], Value::Null);
        assert_eq!(parsed[1]["storageMode"], "Unknown");
    }

    #[test]
    fn test_json_is_round_trip_parseable() {
        let data = sample();
        let refs: Vec<_> = data.iter().collect();
        let out = format_items(&refs, OutputFormat::Json).unwrap();
        let parsed: Vec<ItemSummary> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, summarize(&refs));
    }
}
