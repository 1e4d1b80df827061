//! Item-type registry and label resolution.
//!
//! The search endpoint does not understand the labels users type. Each
//! public label maps to a backend ("trident") label, and several public
//! aliases share one backend label (`PowerBIReport` and `Report` both
//! resolve to `report`). Labels missing from the registry are forwarded
//! lower-cased: the backend is authoritative on what exists.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Static description of a searchable item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemTypeDescriptor {
    /// Label accepted from users (`--type Model`).
    pub label: &'static str,
    /// Label the search endpoint expects in `tridentSupportedTypes`.
    pub backend_label: &'static str,
    /// Grouping used by `--list-types`.
    pub category: &'static str,
    /// One-line human description.
    pub description: &'static str,
}

const fn item(
    label: &'static str,
    backend_label: &'static str,
    category: &'static str,
    description: &'static str,
) -> ItemTypeDescriptor {
    ItemTypeDescriptor {
        label,
        backend_label,
        category,
        description,
    }
}

/// Every known item type, in registry order.
pub static ITEM_TYPES: &[ItemTypeDescriptor] = &[
    // Reports & dashboards
    item("PowerBIReport", "report", "Reports", "Power BI reports (.pbix)"),
    item("Report", "report", "Reports", "Alias for PowerBIReport"),
    item("PaginatedReport", "rdlreport", "Reports", "Paginated/RDL reports"),
    item("Dashboard", "dashboard", "Reports", "Power BI dashboards"),
    item("OrgApp", "OrgApp", "Reports", "Published Power BI apps"),
    // Models: "Model" is the label that actually returns semantic models
    item("Model", "dataset", "Models", "Semantic models/datasets (USE THIS)"),
    item("SemanticModel", "semanticModel", "Models", "Alternative (often returns 0)"),
    item("MetricSet", "MetricSet", "Models", "Metric sets"),
    // Data storage
    item("Lakehouse", "Lakehouse", "Data", "Fabric lakehouses"),
    item("Warehouse", "Warehouse", "Data", "Fabric data warehouses"),
    item("Datamart", "datamart", "Data", "Power BI datamarts"),
    item("Sql", "datamart", "Data", "SQL endpoints"),
    item("KustoDatabase", "KustoDatabase", "Data", "KQL databases"),
    item("KustoEventHouse", "KustoEventHouse", "Data", "Eventhouse"),
    item("SQLDbNative", "SQLDbNative", "Data", "SQL databases"),
    item("CosmosDB", "CosmosDB", "Data", "Cosmos DB mirrors"),
    item("DatabricksCatalog", "DatabricksCatalog", "Data", "Databricks catalogs"),
    item("SqlAnalyticsEndpoint", "SqlAnalyticsEndpoint", "Data", "SQL analytics endpoints"),
    item("WarehouseSnapshot", "WarehouseSnapshot", "Data", "Warehouse snapshots"),
    item("Lakewarehouse", "lake-warehouse", "Data", "Lake warehouses"),
    item("MountedWarehouse", "mounted-warehouse", "Data", "Mounted warehouses"),
    item("MountedRelationalDatabase", "MountedRelationalDatabase", "Data", "Mounted databases"),
    // Data integration: "DataFlow" with a capital F
    item("DataFlow", "dataflow", "Integration", "Power BI dataflows (USE THIS)"),
    item("Dataflow", "dataflow", "Integration", "Alias (may not work)"),
    item("DataflowFabric", "DataflowFabric", "Integration", "Fabric dataflows Gen2"),
    item("Pipeline", "Pipeline", "Integration", "Data pipelines"),
    item("DataPipeline", "DataPipeline", "Integration", "Alias for Pipeline"),
    item("CopyJob", "CopyJob", "Integration", "Copy jobs"),
    item("EventStream", "EventStream", "Integration", "Event streams"),
    item("MountedDataFactory", "MountedDataFactory", "Integration", "ADF connections"),
    item("ApacheAirflowProject", "ApacheAirflowProject", "Integration", "Airflow projects"),
    // Compute
    item("SynapseNotebook", "SynapseNotebook", "Compute", "Fabric notebooks (USE THIS)"),
    item("Notebook", "SynapseNotebook", "Compute", "Alias for SynapseNotebook"),
    item("SparkJobDefinition", "SparkJobDefinition", "Compute", "Spark job definitions"),
    // ML & AI
    item("MLModel", "MLModel", "ML", "ML models"),
    item("MLExperiment", "MLExperiment", "ML", "ML experiments"),
    item("OperationalAgents", "OperationalAgents", "ML", "Operational agents"),
    item("LLMPlugin", "LLMPlugin", "ML", "LLM/AI plugins"),
    // Real-time intelligence
    item("KustoDashboard", "KustoDashboard", "Real-Time", "Real-time dashboards"),
    item("KustoQueryWorkbench", "KustoQueryWorkbench", "Real-Time", "KQL query workbench"),
    // Solutions & development
    item("Reflex", "Reflex", "Solutions", "Reflex/Activator items"),
    item("ReflexProject", "ReflexProject", "Solutions", "Reflex projects"),
    item("GraphQL", "GraphQL", "Solutions", "GraphQL APIs"),
    item("GraphModel", "GraphModel", "Solutions", "Graph models"),
    item("FunctionSet", "FunctionSet", "Solutions", "Function sets"),
    item("DataExploration", "DataExploration", "Solutions", "Data exploration"),
    item("Exploration", "Exploration", "Solutions", "Explorations"),
    // Ontology & knowledge
    item("Ontology", "Ontology", "Knowledge", "Ontology items (IQ)"),
    // Industry solutions
    item("DigitalTwinBuilder", "DigitalTwinBuilder", "Industry", "Digital twin builder"),
    item("HealthDataManager", "HealthDataManager", "Industry", "Healthcare data manager"),
    item("HLSCohort", "HLSCohort", "Industry", "Healthcare cohorts"),
    item("RetailDataManager", "RetailDataManager", "Industry", "Retail data manager"),
    item("SustainabilityDataManager", "SustainabilityDataManager", "Industry", "Sustainability manager"),
    // Configuration
    item("Environment", "Environment", "Config", "Spark environments"),
    item("Variables", "Variables", "Config", "Variable groups"),
];

static BY_LABEL: Lazy<HashMap<&'static str, &'static ItemTypeDescriptor>> =
    Lazy::new(|| ITEM_TYPES.iter().map(|d| (d.label, d)).collect());

/// Look up a public label. Matching is exact (labels are case-sensitive:
/// `DataFlow` and `Dataflow` are distinct entries).
pub fn lookup(label: &str) -> Option<&'static ItemTypeDescriptor> {
    BY_LABEL.get(label).copied()
}

/// Whether the label is present in the registry.
pub fn is_known(label: &str) -> bool {
    BY_LABEL.contains_key(label)
}

/// Resolve a public label to the backend label used for search scoping.
///
/// Total: unknown labels are returned lower-cased.
pub fn resolve_backend_label(label: &str) -> String {
    match lookup(label) {
        Some(descriptor) => descriptor.backend_label.to_string(),
        None => label.to_lowercase(),
    }
}

/// All descriptors in registry order.
pub fn all() -> &'static [ItemTypeDescriptor] {
    ITEM_TYPES
}

/// Descriptors grouped by category. Categories and the labels within each
/// category are sorted.
pub fn by_category() -> BTreeMap<&'static str, Vec<&'static ItemTypeDescriptor>> {
    let mut groups: BTreeMap<&'static str, Vec<&'static ItemTypeDescriptor>> = BTreeMap::new();
    for descriptor in ITEM_TYPES {
        groups.entry(descriptor.category).or_default().push(descriptor);
    }
    for members in groups.values_mut() {
        members.sort_by(|a, b| a.label.cmp(b.label));
    }
    groups
}
