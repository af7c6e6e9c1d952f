/// Text-completion service errors.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("service returned {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("empty completion from model {model}")]
    EmptyResponse { model: String },

    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },
}
