use serde::{Deserialize, Serialize};

use super::defaults;

/// One curated knowledge collection and the domains its sources may come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub id: String,
    pub allowed_domains: Vec<String>,
}

impl CollectionConfig {
    pub fn new(id: impl Into<String>, allowed_domains: &[&str]) -> Self {
        Self {
            id: id.into(),
            allowed_domains: allowed_domains.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// NHS and Cancer Research UK.
pub fn default_collections() -> Vec<CollectionConfig> {
    vec![
        CollectionConfig::new(defaults::DEFAULT_NHS_COLLECTION, &[defaults::DEFAULT_NHS_DOMAIN]),
        CollectionConfig::new(
            defaults::DEFAULT_CRUK_COLLECTION,
            &[defaults::DEFAULT_CRUK_DOMAIN],
        ),
    ]
}
