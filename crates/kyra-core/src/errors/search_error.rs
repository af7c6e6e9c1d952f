/// Vector similarity search errors. Scoped to a single collection query.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("collection not found: {collection}")]
    CollectionNotFound { collection: String },

    #[error("query against {collection} failed: {reason}")]
    QueryFailed { collection: String, reason: String },

    #[error("malformed response from {collection}: {reason}")]
    MalformedResponse { collection: String, reason: String },
}
