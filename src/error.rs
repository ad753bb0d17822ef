use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Collection {namespace} unavailable: {reason}")]
    CollectionUnavailable { namespace: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// True when the error only concerns a single collection and the run can go on.
    pub fn is_collection_unavailable(&self) -> bool {
        matches!(self, Error::CollectionUnavailable { .. })
    }
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
