//! Precomputed course embeddings.
//!
//! Course descriptions don't change after the catalog is loaded, so they are
//! embedded once when the index is built. Each request then only embeds the
//! profile sentence.

use crate::error::{RecommendError, Result};
use crate::ranking::{RankedCourse, collect_ranked};
use catalog::Catalog;
use embedder::EmbeddingProvider;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// A catalog together with one embedding per course.
pub struct CourseIndex {
    catalog: Arc<Catalog>,
    vectors: Vec<Vec<f32>>,
    embedder_name: String,
}

impl CourseIndex {
    /// Embed every description in `catalog` with `embedder`
    pub fn build(catalog: Arc<Catalog>, embedder: &dyn EmbeddingProvider) -> Result<Self> {
        let start = Instant::now();

        let vectors = if catalog.is_empty() {
            Vec::new()
        } else {
            embedder.embed(&catalog.descriptions())?
        };
        if vectors.len() != catalog.len() {
            return Err(RecommendError::IndexMismatch {
                expected: catalog.len(),
                found: vectors.len(),
            });
        }

        info!(
            "Built course index: {} courses, {} embedder, {:?}",
            catalog.len(),
            embedder.name(),
            start.elapsed()
        );

        Ok(Self {
            catalog,
            vectors,
            embedder_name: embedder.name().to_string(),
        })
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Name of the embedder the vectors came from
    pub fn embedder_name(&self) -> &str {
        &self.embedder_name
    }

    /// Rank the indexed courses against an already-embedded profile
    pub fn rank(&self, profile_vector: &[f32], top_n: usize) -> Vec<RankedCourse> {
        collect_ranked(&self.catalog, profile_vector, &self.vectors, top_n)
    }
}

/// Serves ranking requests from a prebuilt [`CourseIndex`].
///
/// Holds the same embedder that built the index so profile vectors and
/// course vectors live in one space.
pub struct Recommender {
    index: CourseIndex,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl Recommender {
    /// Build the index for `catalog` and keep `embedder` for queries
    pub fn new(catalog: Arc<Catalog>, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        let index = CourseIndex::build(catalog, embedder.as_ref())?;
        Ok(Self { index, embedder })
    }

    pub fn index(&self) -> &CourseIndex {
        &self.index
    }

    /// Rank the catalog against `profile`, embedding only the profile
    pub fn recommend(&self, profile: &str, top_n: usize) -> Result<Vec<RankedCourse>> {
        if top_n == 0 || self.index.is_empty() {
            return Ok(Vec::new());
        }

        let profile_vector = self.embedder.embed_one(profile)?;
        let ranked = self.index.rank(&profile_vector, top_n);
        debug!(
            "Ranked {} indexed courses, returning {}",
            self.index.len(),
            ranked.len()
        );
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::CourseRecord;
    use embedder::HashingEmbedder;

    fn sample_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_records(vec![
            CourseRecord::new("Rust", "Systems programming in Rust"),
            CourseRecord::new("Design", "User experience and interface design"),
            CourseRecord::new("Stats", "Statistics for data analysis"),
        ]))
    }

    #[test]
    fn test_index_embeds_every_course() {
        let embedder = HashingEmbedder::new(64);
        let index = CourseIndex::build(sample_catalog(), &embedder).unwrap();

        assert_eq!(index.len(), 3);
        assert_eq!(index.embedder_name(), "hashing");
    }

    #[test]
    fn test_empty_catalog_gives_empty_index() {
        let embedder = HashingEmbedder::new(64);
        let index = CourseIndex::build(Arc::new(Catalog::from_records(Vec::new())), &embedder)
            .unwrap();

        assert!(index.is_empty());
    }

    #[test]
    fn test_recommender_finds_matching_description() {
        let recommender =
            Recommender::new(sample_catalog(), Arc::new(HashingEmbedder::new(128))).unwrap();

        let ranked = recommender
            .recommend("User experience and interface design", 1)
            .unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].course.title, "Design");
        assert!((ranked[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_recommender_top_n_zero() {
        let recommender =
            Recommender::new(sample_catalog(), Arc::new(HashingEmbedder::new(16))).unwrap();

        assert!(recommender.recommend("anything", 0).unwrap().is_empty());
    }
}
