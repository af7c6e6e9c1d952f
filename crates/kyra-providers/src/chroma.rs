//! Vector search against a Chroma server.
//!
//! Queries are embedded with an [`IEmbeddingProvider`] and sent as
//! `query_embeddings`. Chroma returns distances; they are converted to
//! similarities with `clamp(1 - distance, 0, 1)`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use kyra_core::config::ProviderConfig;
use kyra_core::errors::{ConfigError, KyraResult, SearchError};
use kyra_core::models::SearchHit;
use kyra_core::traits::{IEmbeddingProvider, IVectorSearch};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::http;
use crate::openai_embedder::OpenAiEmbedder;

/// Metadata key holding a chunk's source URL.
const SOURCE_METADATA_KEY: &str = "source";

pub struct ChromaSearch {
    base_url: String,
    embedder: Box<dyn IEmbeddingProvider>,
    timeout: Duration,
    /// Collection name → Chroma collection id.
    collection_ids: Mutex<HashMap<String, String>>,
}

#[derive(Deserialize)]
struct CollectionInfo {
    id: String,
}

#[derive(Serialize)]
struct QueryRequest<'r> {
    query_embeddings: Vec<&'r [f32]>,
    n_results: usize,
    include: [&'static str; 3],
}

/// Column-oriented query response: one inner list per query embedding.
#[derive(Debug, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub documents: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    pub metadatas: Option<Vec<Vec<Option<Map<String, Value>>>>>,
    #[serde(default)]
    pub distances: Option<Vec<Vec<Option<f64>>>>,
}

impl ChromaSearch {
    pub fn new(base_url: &str, embedder: Box<dyn IEmbeddingProvider>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            embedder,
            timeout,
            collection_ids: Mutex::new(HashMap::new()),
        }
    }

    /// Chroma at `config.chroma_url`, embedding queries with [`OpenAiEmbedder`].
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let embedder = OpenAiEmbedder::from_config(config)?;
        Ok(Self::new(
            &config.chroma_url,
            Box::new(embedder),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    fn collection_id(&self, collection: &str) -> Result<String, SearchError> {
        if let Some(id) = self.cached_id(collection) {
            return Ok(id);
        }

        let url = http::endpoint(&self.base_url, &format!("api/v1/collections/{collection}"));
        let body = self.request(collection, |client| client.get(&url))?;
        let info: CollectionInfo =
            serde_json::from_str(&body).map_err(|e| SearchError::MalformedResponse {
                collection: collection.to_string(),
                reason: e.to_string(),
            })?;

        debug!(collection, id = %info.id, "resolved collection id");
        if let Ok(mut ids) = self.collection_ids.lock() {
            ids.insert(collection.to_string(), info.id.clone());
        }
        Ok(info.id)
    }

    fn cached_id(&self, collection: &str) -> Option<String> {
        self.collection_ids
            .lock()
            .ok()
            .and_then(|ids| ids.get(collection).cloned())
    }

    /// Send one request and return the body of a successful response.
    fn request<F>(&self, collection: &str, build: F) -> Result<String, SearchError>
    where
        F: FnOnce(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        let failed = |reason: String| SearchError::QueryFailed {
            collection: collection.to_string(),
            reason,
        };
        let client = http::client(self.timeout).map_err(failed)?;
        let request = build(&client);

        http::block_on(async {
            let response = request
                .send()
                .await
                .map_err(|e| failed(format!("HTTP error: {e}")))?;
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(SearchError::CollectionNotFound {
                    collection: collection.to_string(),
                });
            }
            if !status.is_success() {
                return Err(failed(format!("server returned {status}: {text}")));
            }
            Ok(text)
        })
        .map_err(failed)?
    }
}

impl IVectorSearch for ChromaSearch {
    fn query(&self, collection_id: &str, text: &str, top_k: usize) -> KyraResult<Vec<SearchHit>> {
        let embedding = self.embedder.embed(text)?;
        let id = self.collection_id(collection_id)?;

        let body = serde_json::to_string(&QueryRequest {
            query_embeddings: vec![embedding.as_slice()],
            n_results: top_k,
            include: ["documents", "metadatas", "distances"],
        })?;
        let url = http::endpoint(&self.base_url, &format!("api/v1/collections/{id}/query"));
        let raw = self.request(collection_id, |client| {
            client
                .post(&url)
                .header("Content-Type", "application/json")
                .body(body)
        })?;

        let response: QueryResponse =
            serde_json::from_str(&raw).map_err(|e| SearchError::MalformedResponse {
                collection: collection_id.to_string(),
                reason: e.to_string(),
            })?;
        let hits = hits_from_response(response);
        debug!(collection = collection_id, hits = hits.len(), "chroma query complete");
        Ok(hits)
    }
}

/// Similarity for a Chroma distance.
pub fn score_from_distance(distance: f64) -> f64 {
    if distance.is_finite() {
        (1.0 - distance).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Hits for the first query embedding, in server rank order. Rows without a
/// document are dropped.
pub fn hits_from_response(response: QueryResponse) -> Vec<SearchHit> {
    let documents = first_row(response.documents);
    let metadatas = first_row(response.metadatas);
    let distances = first_row(response.distances);

    documents
        .into_iter()
        .enumerate()
        .filter_map(|(i, document)| {
            let text = document?;
            let score = distances.get(i).copied().flatten().map(score_from_distance);
            let source_url = metadatas
                .get(i)
                .and_then(Option::as_ref)
                .and_then(|m| m.get(SOURCE_METADATA_KEY))
                .and_then(Value::as_str)
                .map(str::to_string);
            Some(SearchHit {
                text,
                score,
                source_url,
            })
        })
        .collect()
}

fn first_row<T>(columns: Option<Vec<Vec<T>>>) -> Vec<T> {
    columns
        .and_then(|rows| rows.into_iter().next())
        .unwrap_or_default()
}
