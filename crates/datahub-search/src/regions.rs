//! Regional routing table.
//!
//! Each region key maps to the primary redirect host that serves the
//! metadata search endpoint for tenants homed in that region.

use datahub_core::defaults;

/// A region key and the host that serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub key: &'static str,
    pub host: &'static str,
}

impl Region {
    pub fn is_default(&self) -> bool {
        self.key == DEFAULT_REGION
    }
}

/// Region used when none is given.
pub const DEFAULT_REGION: &str = defaults::REGION;

const fn region(key: &'static str, host: &'static str) -> Region {
    Region { key, host }
}

/// All known regions.
pub static REGIONS: &[Region] = &[
    region("west-europe", "wabi-west-europe-e-primary-redirect.analysis.windows.net"),
    region("north-europe", "wabi-north-europe-e-primary-redirect.analysis.windows.net"),
    region("us-east", "wabi-us-east-e-primary-redirect.analysis.windows.net"),
    region("us-east2", "wabi-us-east2-e-primary-redirect.analysis.windows.net"),
    region("us-west", "wabi-us-west-e-primary-redirect.analysis.windows.net"),
    region(
        "us-north-central",
        "wabi-us-north-central-e-primary-redirect.analysis.windows.net",
    ),
    region(
        "us-south-central",
        "wabi-us-south-central-e-primary-redirect.analysis.windows.net",
    ),
    region(
        "south-east-asia",
        "wabi-south-east-asia-e-primary-redirect.analysis.windows.net",
    ),
    region("australia-east", "wabi-australia-east-e-primary-redirect.analysis.windows.net"),
    region("brazil-south", "wabi-brazil-south-e-primary-redirect.analysis.windows.net"),
    region("canada-central", "wabi-canada-central-e-primary-redirect.analysis.windows.net"),
    region("india-west", "wabi-india-west-e-primary-redirect.analysis.windows.net"),
    region("japan-east", "wabi-japan-east-e-primary-redirect.analysis.windows.net"),
    region("uk-south", "wabi-uk-south-e-primary-redirect.analysis.windows.net"),
];

/// Look up a region by exact key.
pub fn resolve_region(key: &str) -> Option<&'static Region> {
    REGIONS.iter().find(|r| r.key == key)
}

/// Regions ordered by key.
pub fn sorted() -> Vec<&'static Region> {
    let mut regions: Vec<_> = REGIONS.iter().collect();
    regions.sort_by_key(|r| r.key);
    regions
}
