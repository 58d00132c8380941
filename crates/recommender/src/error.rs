//! Error types for ranking and export.

use embedder::EmbeddingError;
use thiserror::Error;

/// Errors that can occur while ranking courses
#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Expected {expected} course vectors, got {found}")]
    IndexMismatch { expected: usize, found: usize },
}

/// Errors that can occur while writing the tabular export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
