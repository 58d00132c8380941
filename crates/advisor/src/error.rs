//! Errors surfaced to advisor callers.

use catalog::CatalogError;
use embedder::EmbeddingError;
use recommender::{ProfileError, RecommendError};
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Course data unavailable: {0}")]
    DataUnavailable(#[from] CatalogError),

    #[error("Embedding model unavailable: {0}")]
    ModelUnavailable(#[from] EmbeddingError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ranking failed: {0}")]
    Recommend(RecommendError),

    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl From<RecommendError> for AdvisorError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::Embedding(inner) => AdvisorError::ModelUnavailable(inner),
            other => AdvisorError::Recommend(other),
        }
    }
}

impl From<ProfileError> for AdvisorError {
    fn from(err: ProfileError) -> Self {
        AdvisorError::InvalidInput(err.to_string())
    }
}

impl From<JoinError> for AdvisorError {
    fn from(err: JoinError) -> Self {
        AdvisorError::TaskFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
