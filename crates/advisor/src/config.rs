//! Advisor configuration.

use embedder::{EmbedderKind, EmbedderOptions};
use std::path::PathBuf;

/// Where the course dataset is expected when no path is given
pub const DEFAULT_CATALOG_PATH: &str = "data/coursera_course_dataset_v3.csv";

/// Recommendations returned when the caller doesn't ask for a count
pub const DEFAULT_TOP_N: usize = 6;

/// Everything the advisor needs to start up.
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Course dataset CSV
    pub catalog_path: PathBuf,
    pub embedder: EmbedderKind,
    /// Download cache for sentence model weights
    pub model_cache_dir: Option<PathBuf>,
    /// Texts per inference batch when embedding the catalog
    pub batch_size: Option<usize>,
    pub default_top_n: usize,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            embedder: EmbedderKind::preferred(),
            model_cache_dir: None,
            batch_size: None,
            default_top_n: DEFAULT_TOP_N,
        }
    }
}

impl AdvisorConfig {
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_embedder(mut self, kind: EmbedderKind) -> Self {
        self.embedder = kind;
        self
    }

    /// Options passed to the embedder on first load
    pub fn embedder_options(&self) -> EmbedderOptions {
        EmbedderOptions {
            cache_dir: self.model_cache_dir.clone(),
            batch_size: self.batch_size,
            ..EmbedderOptions::default()
        }
    }
}
