//! Configuration errors.

/// Errors raised while loading or validating [`crate::KyraConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("missing credential: {name}")]
    MissingCredential { name: String },
}
