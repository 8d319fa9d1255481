//! Errors raised by the document and blob capabilities.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// `update` targeted a document that does not exist.
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },

    #[error("`in` filter accepts at most {limit} values, got {got}")]
    TooManyValues { limit: usize, got: usize },

    #[error("invalid document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("blob `{0}` not found")]
    BlobNotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
