//! Search result records and typed views over them.
//!
//! The backend returns loosely-shaped JSON objects and no field is
//! guaranteed to be present. [`SearchResultItem`] keeps the object exactly
//! as received (so nothing is lost and nothing is mutated) and exposes
//! accessors that return `None` for absent values and for values of the
//! wrong JSON type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::temporal::parse_optional;

/// One record returned by the metadata search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResultItem(Map<String, Value>);

impl SearchResultItem {
    /// Wrap a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Borrow the raw attribute map.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    /// A top-level string attribute.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// `displayName` as sent by the backend.
    pub fn raw_display_name(&self) -> Option<&str> {
        self.str_field("displayName")
    }

    /// `name` as sent by the backend.
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// The name shown to users: `displayName`, falling back to `name`.
    pub fn display_name(&self) -> Option<&str> {
        self.raw_display_name().or_else(|| self.name())
    }

    pub fn workspace_name(&self) -> Option<&str> {
        self.str_field("workspaceName")
    }

    pub fn workspace_id(&self) -> Option<&str> {
        self.str_field("workspaceObjectId")
    }

    pub fn object_id(&self) -> Option<&str> {
        self.str_field("objectId")
    }

    /// `lastVisitedTimeUTC`, undecoded.
    pub fn last_visited(&self) -> Option<&str> {
        self.str_field("lastVisitedTimeUTC")
    }

    /// `modifiedDate`, undecoded.
    pub fn modified_date(&self) -> Option<&str> {
        self.str_field("modifiedDate")
    }

    pub fn is_discoverable(&self) -> Option<bool> {
        self.0.get("isDiscoverable").and_then(Value::as_bool)
    }

    pub fn owner(&self) -> Owner<'_> {
        Owner(self.0.get("ownerUser").and_then(Value::as_object))
    }

    pub fn artifact(&self) -> Artifact<'_> {
        Artifact(self.0.get("artifact").and_then(Value::as_object))
    }

    /// The raw refresh timestamp, taken from the first non-empty source in
    /// priority order: top-level `lastRefreshTime`, `artifact.LastRefreshTime`,
    /// `artifact.lastRefreshTime`, `artifact.lastUpdatedDate`.
    ///
    /// Models report the top-level field, notebooks only `lastUpdatedDate`.
    /// The order matters: a record carrying several of these must always
    /// resolve to the same one.
    pub fn refresh_time(&self) -> Option<&str> {
        let artifact = self.artifact();
        non_empty(self.str_field("lastRefreshTime"))
            .or_else(|| non_empty(artifact.str_field("LastRefreshTime")))
            .or_else(|| non_empty(artifact.str_field("lastRefreshTime")))
            .or_else(|| non_empty(artifact.str_field("lastUpdatedDate")))
    }

    /// Decoded `lastVisitedTimeUTC`.
    pub fn last_visited_instant(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.last_visited())
    }

    /// Decoded refresh timestamp. Computed on every call.
    pub fn refresh_instant(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.refresh_time())
    }

    /// Decoded `modifiedDate`.
    pub fn modified_instant(&self) -> Option<DateTime<Utc>> {
        parse_optional(self.modified_date())
    }

    /// Storage mode derived from the artifact sub-record.
    pub fn storage_mode(&self) -> StorageMode {
        let artifact = self.artifact();
        if artifact.direct_lake() {
            return StorageMode::DirectLake;
        }
        match artifact.storage_mode_code() {
            Some(1) => StorageMode::Import,
            Some(2) => StorageMode::DirectQuery,
            _ => StorageMode::Unknown,
        }
    }
}

impl From<Map<String, Value>> for SearchResultItem {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// View over the `ownerUser` sub-record.
#[derive(Debug, Clone, Copy)]
pub struct Owner<'a>(Option<&'a Map<String, Value>>);

impl<'a> Owner<'a> {
    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.0.and_then(|m| m.get(key)).and_then(Value::as_str)
    }

    pub fn given_name(&self) -> Option<&'a str> {
        self.str_field("givenName")
    }

    pub fn family_name(&self) -> Option<&'a str> {
        self.str_field("familyName")
    }

    pub fn email(&self) -> Option<&'a str> {
        self.str_field("emailAddress")
    }

    /// `"given family"` with missing parts left empty; not trimmed.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.given_name().unwrap_or_default(),
            self.family_name().unwrap_or_default()
        )
    }
}

/// View over the `artifact` sub-record.
#[derive(Debug, Clone, Copy)]
pub struct Artifact<'a>(Option<&'a Map<String, Value>>);

impl<'a> Artifact<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|m| m.get(key))
    }

    pub fn str_field(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Numeric `storageMode` code (1 = import, 2 = direct query).
    pub fn storage_mode_code(&self) -> Option<i64> {
        self.get("storageMode").and_then(Value::as_i64)
    }

    /// `directLakeMode`. Anything other than `true` or a non-zero number
    /// counts as unset.
    pub fn direct_lake(&self) -> bool {
        match self.get("directLakeMode") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            _ => false,
        }
    }

    pub fn capacity_sku(&self) -> Option<&'a str> {
        self.str_field("sharedFromEnterpriseCapacitySku")
    }
}

/// Human-readable storage mode of a semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageMode {
    Import,
    DirectQuery,
    DirectLake,
    Unknown,
}

impl StorageMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Import => "Import",
            Self::DirectQuery => "DirectQuery",
            Self::DirectLake => "DirectLake",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
