use serde::{Deserialize, Serialize};

use super::defaults;

/// Evidence gate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Minimum blended score for evidence to be used (inclusive).
    pub threshold: f64,
    /// Per-node cut as a fraction of `threshold`.
    pub node_threshold_factor: f64,
}

impl GateConfig {
    /// Minimum score for a single node's text to be included.
    pub fn node_threshold(&self) -> f64 {
        self.threshold * self.node_threshold_factor
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            threshold: defaults::DEFAULT_SIMILARITY_THRESHOLD,
            node_threshold_factor: defaults::DEFAULT_NODE_THRESHOLD_FACTOR,
        }
    }
}
