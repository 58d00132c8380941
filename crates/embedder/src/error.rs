use thiserror::Error;

/// Errors that can occur when producing embeddings
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// The backend could not be initialised (missing weights, no network on
    /// first download, feature not compiled in, ...)
    #[error("Embedding model '{model}' is unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },

    /// The backend was loaded but failed while encoding a batch
    #[error("Failed to encode texts: {0}")]
    EncodingFailed(String),

    /// The backend returned a different number of vectors than texts
    #[error("Expected {expected} embeddings but received {found}")]
    CountMismatch { expected: usize, found: usize },

    /// A vector did not have the provider's dimensionality
    #[error("Expected embedding dimension {expected} but received {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;
