//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    default_collections, CategorizerConfig, ClassifierConfig, CollectionConfig, GateConfig,
    GenerationConfig, ProviderConfig, RetrievalConfig, WindowConfig,
};
use crate::errors::ConfigError;

/// Weights must sum to one within this tolerance.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Top-level configuration aggregating all sub-configs.
///
/// Built once at process start and shared read-only by every request.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`KYRA_*`)
/// 2. Config file (`kyra.toml`)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KyraConfig {
    pub collections: Vec<CollectionConfig>,
    pub retrieval: RetrievalConfig,
    pub gate: GateConfig,
    pub windows: WindowConfig,
    pub classifier: ClassifierConfig,
    pub generation: GenerationConfig,
    pub categorizer: CategorizerConfig,
    pub providers: ProviderConfig,
}

impl Default for KyraConfig {
    fn default() -> Self {
        Self {
            collections: default_collections(),
            retrieval: RetrievalConfig::default(),
            gate: GateConfig::default(),
            windows: WindowConfig::default(),
            classifier: ClassifierConfig::default(),
            generation: GenerationConfig::default(),
            categorizer: CategorizerConfig::default(),
            providers: ProviderConfig::default(),
        }
    }
}

impl KyraConfig {
    /// Load configuration: defaults, then `path` if it exists, then `KYRA_*`
    /// environment overrides. The result is validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })?;
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            tracing::debug!(path = %path.display(), "config file absent, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply overrides looked up by variable name.
    /// Pattern: `KYRA_SIMILARITY_THRESHOLD`, `KYRA_GENERATION_MODEL`, etc.
    /// Unparseable values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse_f64 = |key: &str| lookup(key).and_then(|v| v.parse::<f64>().ok());
        let parse_usize = |key: &str| lookup(key).and_then(|v| v.parse::<usize>().ok());

        if let Some(v) = parse_f64("KYRA_SIMILARITY_THRESHOLD") {
            self.gate.threshold = v;
        }
        if let Some(v) = parse_f64("KYRA_PRIMARY_WEIGHT") {
            self.retrieval.primary_weight = v;
        }
        if let Some(v) = parse_f64("KYRA_CONTEXT_WEIGHT") {
            self.retrieval.context_weight = v;
        }
        if let Some(v) = parse_usize("KYRA_TOP_K") {
            self.retrieval.top_k = v;
        }
        if let Some(v) = parse_usize("KYRA_GENERATION_WINDOW") {
            self.windows.generation_window = v;
        }
        if let Some(v) = lookup("KYRA_CLASSIFIER_MODEL") {
            self.classifier.model = v;
        }
        if let Some(v) = lookup("KYRA_GENERATION_MODEL") {
            self.generation.model = v;
        }
        if let Some(v) = lookup("KYRA_OPENAI_BASE_URL") {
            self.providers.openai_base_url = v;
        }
        if let Some(v) = lookup("KYRA_CHROMA_URL") {
            self.providers.chroma_url = v;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.retrieval;
        for (field, value) in [
            ("retrieval.primary_weight", r.primary_weight),
            ("retrieval.context_weight", r.context_weight),
            ("gate.threshold", self.gate.threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "must be between 0.0 and 1.0"));
            }
        }
        if (r.primary_weight + r.context_weight - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(
                "retrieval.context_weight",
                "primary_weight + context_weight must equal 1.0",
            ));
        }
        let factor = self.gate.node_threshold_factor;
        if factor <= 0.0 || factor > 1.0 {
            return Err(invalid("gate.node_threshold_factor", "must be in (0.0, 1.0]"));
        }
        if r.top_k == 0 {
            return Err(invalid("retrieval.top_k", "must be greater than 0"));
        }
        if r.candidate_limit == 0 {
            return Err(invalid("retrieval.candidate_limit", "must be greater than 0"));
        }
        let w = &self.windows;
        for (field, value) in [
            ("windows.generation_window", w.generation_window),
            ("windows.contextual_query_window", w.contextual_query_window),
            ("windows.contextual_retrieval_window", w.contextual_retrieval_window),
        ] {
            if value == 0 {
                return Err(invalid(field, "must be greater than 0"));
            }
        }
        if self.collections.is_empty() {
            return Err(invalid("collections", "at least one collection is required"));
        }
        if let Some(c) = self.collections.iter().find(|c| c.id.trim().is_empty()) {
            return Err(invalid(
                "collections.id",
                &format!("empty collection id (domains: {:?})", c.allowed_domains),
            ));
        }
        Ok(())
    }

    /// Every allow-listed source domain across all collections, deduplicated.
    pub fn allowed_domains(&self) -> Vec<String> {
        let mut domains: Vec<String> = Vec::new();
        for domain in self.collections.iter().flat_map(|c| &c.allowed_domains) {
            let domain = domain.trim().to_lowercase();
            if !domain.is_empty() && !domains.contains(&domain) {
                domains.push(domain);
            }
        }
        domains
    }

    pub fn collection_ids(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.id.as_str()).collect()
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
