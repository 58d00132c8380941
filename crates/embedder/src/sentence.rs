//! Pretrained sentence-transformer backend.
//!
//! Runs all-MiniLM-L6-v2 through fastembed (ONNX Runtime). The first load
//! downloads the weights into the cache directory; later loads read them
//! from disk. Loading is the expensive part, so callers go through
//! `shared_embedder` rather than constructing this per request.

use crate::error::{EmbeddingError, Result};
use crate::{EmbedderOptions, EmbeddingProvider, check_batch};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::time::Instant;
use tracing::{debug, error, info};

/// Output width of all-MiniLM-L6-v2
pub const MINILM_DIMENSION: usize = 384;

pub struct SentenceEmbedder {
    model: TextEmbedding,
    batch_size: Option<usize>,
}

impl SentenceEmbedder {
    pub const NAME: &'static str = "all-MiniLM-L6-v2";

    /// Load the model, downloading weights on first use.
    pub fn load(options: &EmbedderOptions) -> Result<Self> {
        info!("Loading sentence model {}", Self::NAME);
        let start = Instant::now();

        let mut init = InitOptions::new(EmbeddingModel::AllMiniLML6V2)
            .with_show_download_progress(options.show_download_progress);
        if let Some(dir) = &options.cache_dir {
            init = init.with_cache_dir(dir.clone());
        }

        let model = TextEmbedding::try_new(init).map_err(|e| {
            error!("Failed to load sentence model: {}", e);
            EmbeddingError::ModelUnavailable {
                model: Self::NAME.to_string(),
                reason: e.to_string(),
            }
        })?;

        info!("Sentence model ready in {:.2?}", start.elapsed());
        Ok(Self {
            model,
            batch_size: options.batch_size,
        })
    }
}

impl EmbeddingProvider for SentenceEmbedder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn dimension(&self) -> usize {
        MINILM_DIMENSION
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Encoding {} texts with {}", texts.len(), Self::NAME);

        let vectors = self
            .model
            .embed(texts.to_vec(), self.batch_size)
            .map_err(|e| EmbeddingError::EncodingFailed(e.to_string()))?;

        check_batch(&vectors, texts.len(), MINILM_DIMENSION)?;
        Ok(vectors)
    }
}
