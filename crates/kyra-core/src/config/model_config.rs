//! Per-call completion settings for the classifier, generator, and categorizer.

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Classification;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Label used when the service fails or answers outside the enumeration.
    pub fail_open_label: Classification,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_CLASSIFIER_MODEL.to_string(),
            temperature: defaults::DEFAULT_CLASSIFIER_TEMPERATURE,
            max_tokens: defaults::DEFAULT_CLASSIFIER_MAX_TOKENS,
            fail_open_label: defaults::DEFAULT_FAIL_OPEN_LABEL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
            temperature: defaults::DEFAULT_GENERATION_TEMPERATURE,
            max_tokens: defaults::DEFAULT_GENERATION_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategorizerConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CategorizerConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_CATEGORIZER_MODEL.to_string(),
            temperature: defaults::DEFAULT_CATEGORIZER_TEMPERATURE,
            max_tokens: defaults::DEFAULT_CATEGORIZER_MAX_TOKENS,
        }
    }
}
