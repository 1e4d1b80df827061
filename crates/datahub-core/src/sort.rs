//! Stable ordering of search results.
//!
//! Text keys compare case-insensitively with missing values treated as the
//! empty string. Timestamp keys compare decoded instants, with missing or
//! undecodable values ordered before every real instant. ISO values decode
//! to their calendar day, so records on the same day fall back to the raw
//! string, which orders ISO time-of-day correctly. Equal keys keep their
//! input order in both directions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::models::SearchResultItem;
use crate::temporal::parse_optional;

/// Field a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortField {
    /// Display name, falling back to `name`.
    Name,
    Workspace,
    LastVisited,
    /// Derived refresh time (see [`SearchResultItem::refresh_time`]).
    LastRefreshed,
    LastModified,
    /// Owner email.
    Owner,
}

impl SortField {
    pub const ALL: [SortField; 6] = [
        Self::Name,
        Self::Workspace,
        Self::LastVisited,
        Self::LastRefreshed,
        Self::LastModified,
        Self::Owner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Workspace => "workspace",
            Self::LastVisited => "last-visited",
            Self::LastRefreshed => "last-refreshed",
            Self::LastModified => "last-modified",
            Self::Owner => "owner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown sort field: {0}")]
pub struct UnknownSortField(pub String);

impl FromStr for SortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownSortField(s.to_string()))
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction. Descending is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// `asc` (any case) is ascending; every other value is descending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// Field plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

fn text_key(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

fn stable_sort_by_key<'a, K, F>(
    items: Vec<&'a SearchResultItem>,
    direction: SortDirection,
    key: F,
) -> Vec<&'a SearchResultItem>
where
    K: Ord,
    F: Fn(&'a SearchResultItem) -> K,
{
    let mut keyed: Vec<(K, &'a SearchResultItem)> =
        items.into_iter().map(|item| (key(item), item)).collect();

    // Reverse the comparator, not the output: ties keep input order.
    keyed.sort_by(|a, b| match direction {
        SortDirection::Asc => a.0.cmp(&b.0),
        SortDirection::Desc => b.0.cmp(&a.0),
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}

fn instant_key<'a>(
    direction: SortDirection,
    items: Vec<&'a SearchResultItem>,
    raw: fn(&SearchResultItem) -> Option<&str>,
) -> Vec<&'a SearchResultItem> {
    // Option orders None before Some, which places undated records first
    // under ascending order.
    stable_sort_by_key(items, direction, |item| {
        let value = raw(item);
        (parse_optional(value), value)
    })
}

/// Order `items` according to `spec`. The records themselves are untouched.
pub fn sort_items<'a>(
    items: Vec<&'a SearchResultItem>,
    spec: &SortSpec,
) -> Vec<&'a SearchResultItem> {
    debug!(
        subsystem = "core",
        component = "sort",
        op = "sort_items",
        field = %spec.field,
        direction = %spec.direction,
        result_count = items.len(),
        "Sorting results"
    );

    let direction = spec.direction;
    match spec.field {
        SortField::Name => stable_sort_by_key(items, direction, |i| text_key(i.display_name())),
        SortField::Workspace => {
            stable_sort_by_key(items, direction, |i| text_key(i.workspace_name()))
        }
        SortField::Owner => stable_sort_by_key(items, direction, |i| text_key(i.owner().email())),
        SortField::LastVisited => {
            instant_key(direction, items, SearchResultItem::last_visited)
        }
        SortField::LastRefreshed => {
            instant_key(direction, items, SearchResultItem::refresh_time)
        }
        SortField::LastModified => {
            instant_key(direction, items, SearchResultItem::modified_date)
        }
    }
}

/// Order `items` by a field given as a raw name (`"last-visited"`).
///
/// An unrecognized field name is a no-op: the input is returned unchanged.
pub fn sort_by_name<'a>(
    items: Vec<&'a SearchResultItem>,
    field: &str,
    direction: SortDirection,
) -> Vec<&'a SearchResultItem> {
    match field.parse::<SortField>() {
        Ok(field) => sort_items(items, &SortSpec::new(field, direction)),
        Err(e) => {
            debug!(subsystem = "core", component = "sort", error = %e, "Leaving order unchanged");
            items
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn items(value: Value) -> Vec<SearchResultItem> {
        serde_json::from_value(value).unwrap()
    }

    fn ids(sorted: &[&SearchResultItem]) -> Vec<String> {
        sorted
            .iter()
            .map(|i| i.object_id().unwrap_or("-").to_string())
            .collect()
    }

    #[test]
    fn test_sort_field_parse() {
        assert_eq!("last-visited".parse::<SortField>(), Ok(SortField::LastVisited));
        assert_eq!("owner".parse::<SortField>(), Ok(SortField::Owner));
        assert!("size".parse::<SortField>().is_err());
        for field in SortField::ALL {
            assert_eq!(field.as_str().parse::<SortField>(), Ok(field));
        }
    }

    #[test]
    fn test_direction_parse_defaults_to_desc() {
        assert_eq!(SortDirection::parse("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::parse("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::parse("sideways"), SortDirection::Desc);
        assert_eq!(SortDirection::default(), SortDirection::Desc);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let data = items(json!([
            {"objectId": "1", "displayName": "beta"},
            {"objectId": "2", "displayName": "Alpha"},
            {"objectId": "3", "displayName": "Gamma"}
        ]));
        let refs: Vec<_> = data.iter().collect();
        let sorted = sort_items(refs, &SortSpec::asc(SortField::Name));
        assert_eq!(ids(&sorted), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_missing_text_sorts_first_ascending() {
        let data = items(json!([
            {"objectId": "1", "workspaceName": "b"},
            {"objectId": "2"},
            {"objectId": "3", "workspaceName": "a"}
        ]));
        let asc = sort_items(data.iter().collect(), &SortSpec::asc(SortField::Workspace));
        assert_eq!(ids(&asc), vec!["2", "3", "1"]);

        let desc = sort_items(data.iter().collect(), &SortSpec::desc(SortField::Workspace));
        assert_eq!(ids(&desc), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let data = items(json!([
            {"objectId": "a1", "workspaceName": "Ops"},
            {"objectId": "b1", "workspaceName": "Finance"},
            {"objectId": "a2", "workspaceName": "ops"},
            {"objectId": "b2", "workspaceName": "finance"},
            {"objectId": "a3", "workspaceName": "OPS"}
        ]));

        let asc = sort_items(data.iter().collect(), &SortSpec::asc(SortField::Workspace));
        assert_eq!(ids(&asc), vec!["b1", "b2", "a1", "a2", "a3"]);

        let desc = sort_items(data.iter().collect(), &SortSpec::desc(SortField::Workspace));
        assert_eq!(ids(&desc), vec!["a1", "a2", "a3", "b1", "b2"]);
    }

    #[test]
    fn test_last_visited_compares_decoded_instants() {
        let data = items(json!([
            {"objectId": "iso-late", "lastVisitedTimeUTC": "2024-12-01T00:00:00Z"},
            {"objectId": "epoch", "lastVisitedTimeUTC": "/Date(1700000000000)/"},
            {"objectId": "none"},
            {"objectId": "iso-early", "lastVisitedTimeUTC": "2020-01-01"}
        ]));
        let asc = sort_items(data.iter().collect(), &SortSpec::asc(SortField::LastVisited));
        assert_eq!(ids(&asc), vec!["none", "iso-early", "epoch", "iso-late"]);

        let desc = sort_items(data.iter().collect(), &SortSpec::desc(SortField::LastVisited));
        assert_eq!(ids(&desc), vec!["iso-late", "epoch", "iso-early", "none"]);
    }

    #[test]
    fn test_last_refreshed_uses_derived_source() {
        let data = items(json!([
            {"objectId": "notebook", "artifact": {"lastUpdatedDate": "2024-03-01"}},
            {"objectId": "model", "lastRefreshTime": "2023-03-01"},
            {"objectId": "artifact", "artifact": {"LastRefreshTime": "/Date(1735689600000)/"}}
        ]));
        let asc = sort_items(data.iter().collect(), &SortSpec::asc(SortField::LastRefreshed));
        assert_eq!(ids(&asc), vec!["model", "notebook", "artifact"]);
    }

    #[test]
    fn test_owner_sorts_by_email() {
        let data = items(json!([
            {"objectId": "1", "ownerUser": {"emailAddress": "Zed@x.com", "givenName": "Al"}},
            {"objectId": "2", "ownerUser": {"emailAddress": "amy@x.com", "givenName": "Zoe"}}
        ]));
        let asc = sort_items(data.iter().collect(), &SortSpec::asc(SortField::Owner));
        assert_eq!(ids(&asc), vec!["2", "1"]);
    }

    #[test]
    fn test_unknown_field_name_is_noop() {
        let data = items(json!([
            {"objectId": "3", "displayName": "c"},
            {"objectId": "1", "displayName": "a"},
            {"objectId": "2", "displayName": "b"}
        ]));
        let input: Vec<_> = data.iter().collect();
        let output = sort_by_name(input.clone(), "popularity", SortDirection::Asc);
        assert_eq!(output, input);
    }

    #[test]
    fn test_sort_by_name_known_field() {
        let data = items(json!([
            {"objectId": "3", "displayName": "c"},
            {"objectId": "1", "displayName": "a"}
        ]));
        let output = sort_by_name(data.iter().collect(), "name", SortDirection::Asc);
        assert_eq!(ids(&output), vec!["1", "3"]);
    }

    #[test]
    fn test_same_day_visits_keep_time_of_day_order() {
        let data = items(json!([
            {"objectId": "morning", "lastVisitedTimeUTC": "2024-11-02T08:00:00Z"},
            {"objectId": "evening", "lastVisitedTimeUTC": "2024-11-02T20:00:00Z"},
            {"objectId": "earlier", "lastVisitedTimeUTC": "2024-11-01T23:59:59.999Z"}
        ]));
        let desc = sort_items(data.iter().collect(), &SortSpec::desc(SortField::LastVisited));
        assert_eq!(ids(&desc), vec!["evening", "morning", "earlier"]);

        let asc = sort_items(data.iter().collect(), &SortSpec::asc(SortField::LastVisited));
        assert_eq!(ids(&asc), vec!["earlier", "morning", "evening"]);
    }

    #[test]
    fn test_same_day_modifications_order_by_time() {
        let data = items(json!([
            {"objectId": "1", "modifiedDate": "2024-03-05T17:45:10.123Z"},
            {"objectId": "2", "modifiedDate": "2024-03-05T09:15:00.000Z"}
        ]));
        let asc = sort_items(data.iter().collect(), &SortSpec::asc(SortField::LastModified));
        assert_eq!(ids(&asc), vec!["2", "1"]);
    }

    #[test]
    fn test_sort_spec_serde() {
        let spec: SortSpec = serde_json::from_value(json!({"field": "last-refreshed"})).unwrap();
        assert_eq!(spec, SortSpec::desc(SortField::LastRefreshed));
    }
}
