// Single source of truth for all default values.

use crate::models::Classification;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_CANDIDATE_LIMIT: usize = 6;
pub const DEFAULT_PRIMARY_WEIGHT: f64 = 0.8;
pub const DEFAULT_CONTEXT_WEIGHT: f64 = 0.2;
pub const DEFAULT_MISSING_SCORE: f64 = 0.0;

// --- Evidence gate ---
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.30;
pub const DEFAULT_NODE_THRESHOLD_FACTOR: f64 = 0.8;

// --- Conversation windows ---
pub const DEFAULT_GENERATION_WINDOW: usize = 10;
pub const DEFAULT_CONTEXTUAL_QUERY_WINDOW: usize = 5;
pub const DEFAULT_CONTEXTUAL_RETRIEVAL_WINDOW: usize = 2;

// --- Classifier ---
pub const DEFAULT_CLASSIFIER_MODEL: &str = "gpt-4o";
pub const DEFAULT_CLASSIFIER_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_CLASSIFIER_MAX_TOKENS: u32 = 10;
pub const DEFAULT_FAIL_OPEN_LABEL: Classification = Classification::Medical;

// --- Generation ---
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o";
pub const DEFAULT_GENERATION_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_GENERATION_MAX_TOKENS: u32 = 1200;

// --- Categorizer ---
pub const DEFAULT_CATEGORIZER_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_CATEGORIZER_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_CATEGORIZER_MAX_TOKENS: u32 = 50;

// --- Collections ---
pub const DEFAULT_NHS_COLLECTION: &str = "nhs_docs";
pub const DEFAULT_NHS_DOMAIN: &str = "nhs.uk";
pub const DEFAULT_CRUK_COLLECTION: &str = "cancer_research_docs";
pub const DEFAULT_CRUK_DOMAIN: &str = "cancerresearchuk.org";

// --- Providers ---
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_CHROMA_URL: &str = "http://localhost:8000";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const LOG_FILTER_ENV: &str = "KYRA_LOG";

// --- Config files ---
pub const DEFAULT_CONFIG_FILENAME: &str = "kyra.toml";
