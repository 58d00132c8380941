//! Text embedding providers for course ranking.
//!
//! This crate turns texts into fixed-length vectors. It handles:
//! - A common `EmbeddingProvider` interface the recommender ranks against
//! - A deterministic feature-hashing backend that needs no model files
//! - The pretrained all-MiniLM-L6-v2 sentence model (feature `sentence-model`)
//! - Loading each backend once per process and sharing it

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub mod error;
pub mod hashing;
#[cfg(feature = "sentence-model")]
pub mod sentence;
pub mod shared;

pub use error::{EmbeddingError, Result};
pub use hashing::HashingEmbedder;
#[cfg(feature = "sentence-model")]
pub use sentence::SentenceEmbedder;
pub use shared::{create_embedder, shared_embedder};

/// Anything that can turn texts into vectors of one fixed width.
///
/// Implementations must return exactly one vector per input text, in input
/// order, each `dimension()` long. Empty strings are valid input.
pub trait EmbeddingProvider: Send + Sync {
    /// Backend name, used in logs and output
    fn name(&self) -> &str;

    /// Length of every vector this provider returns
    fn dimension(&self) -> usize;

    /// Embed a batch of texts in one call
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text])?
            .pop()
            .ok_or(EmbeddingError::CountMismatch {
                expected: 1,
                found: 0,
            })
    }
}

/// Check a backend's output: one vector per text, each `dimension` long
pub fn check_batch(vectors: &[Vec<f32>], expected_count: usize, dimension: usize) -> Result<()> {
    if vectors.len() != expected_count {
        return Err(EmbeddingError::CountMismatch {
            expected: expected_count,
            found: vectors.len(),
        });
    }
    if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
        return Err(EmbeddingError::DimensionMismatch {
            expected: dimension,
            found: bad.len(),
        });
    }
    Ok(())
}

/// Which embedding backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbedderKind {
    /// Feature hashing; offline and deterministic
    Hashing,
    /// Pretrained all-MiniLM-L6-v2 sentence transformer
    MiniLm,
}

impl EmbedderKind {
    /// The sentence model when it is compiled in, hashing otherwise
    pub fn preferred() -> Self {
        if cfg!(feature = "sentence-model") {
            EmbedderKind::MiniLm
        } else {
            EmbedderKind::Hashing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmbedderKind::Hashing => "hashing",
            EmbedderKind::MiniLm => "minilm",
        }
    }
}

impl fmt::Display for EmbedderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmbedderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hashing" | "hash" => Ok(EmbedderKind::Hashing),
            "minilm" | "all-minilm-l6-v2" | "sentence" => Ok(EmbedderKind::MiniLm),
            other => Err(format!("unknown embedder '{other}' (expected hashing or minilm)")),
        }
    }
}

/// Settings used when a backend is first loaded
#[derive(Debug, Clone)]
pub struct EmbedderOptions {
    /// Width of the hashing backend's vectors
    pub dimension: usize,
    /// Where the sentence model keeps downloaded weights
    pub cache_dir: Option<PathBuf>,
    /// Texts per inference batch for the sentence model (backend default if None)
    pub batch_size: Option<usize>,
    pub show_download_progress: bool,
}

impl Default for EmbedderOptions {
    fn default() -> Self {
        Self {
            dimension: hashing::DEFAULT_DIMENSION,
            cache_dir: None,
            batch_size: None,
            show_download_progress: false,
        }
    }
}
