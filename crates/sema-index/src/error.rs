//! Error types for sema-index.

/// Errors that can occur in the chunking, storage, and retrieval core.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Chunking configuration rejected.
    #[error("invalid chunking parameters: {0}")]
    InvalidParameters(String),

    /// Embedding dimensionality inconsistent with the store.
    #[error("dimension mismatch: store holds {expected}-dimensional vectors, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Durable snapshot read or write failed.
    #[error("persistence error: {0}")]
    Persistence(#[from] std::io::Error),

    /// Snapshot serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic catch-all error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using `IndexError`.
pub type Result<T> = std::result::Result<T, IndexError>;
