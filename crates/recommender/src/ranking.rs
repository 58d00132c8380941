//! Embedding-based ranking of catalog courses against a profile.
//!
//! ## Algorithm
//! 1. Embed the profile sentence
//! 2. Embed every course description in one batched call
//! 3. Score each course by cosine similarity to the profile (in parallel)
//! 4. Stable sort by score descending, so ties keep catalog order
//! 5. Keep the first `top_n`

use crate::error::{RecommendError, Result};
use crate::similarity::cosine_similarity;
use catalog::{Catalog, CourseId, CourseRecord};
use embedder::EmbeddingProvider;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// A course with its similarity to the learner profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCourse {
    /// Row position in the catalog
    pub catalog_index: CourseId,
    pub course: CourseRecord,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

/// Score every course vector against `query` and keep the best `top_n`.
///
/// Returns `(catalog_index, score)` pairs ordered by descending score.
/// Courses with equal scores keep their relative catalog order.
pub fn rank_by_similarity(
    query: &[f32],
    course_vectors: &[Vec<f32>],
    top_n: usize,
) -> Vec<(CourseId, f32)> {
    if top_n == 0 || course_vectors.is_empty() {
        return Vec::new();
    }

    let mut scored: Vec<(CourseId, f32)> = course_vectors
        .par_iter()
        .enumerate()
        .map(|(index, vector)| (index, cosine_similarity(query, vector)))
        .collect();

    // sort_by is stable; equal scores stay in index order
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);
    scored
}

/// Rank `catalog` against a free-text profile.
///
/// Embeds the profile and all descriptions on every call. For repeated
/// queries over one catalog, build a [`crate::CourseIndex`] instead.
///
/// `top_n == 0` and an empty catalog both give an empty list without
/// calling the embedder.
pub fn recommend(
    profile: &str,
    catalog: &Catalog,
    embedder: &dyn EmbeddingProvider,
    top_n: usize,
) -> Result<Vec<RankedCourse>> {
    if top_n == 0 || catalog.is_empty() {
        return Ok(Vec::new());
    }

    let profile_vector = embedder.embed_one(profile)?;
    let course_vectors = embedder.embed(&catalog.descriptions())?;
    if course_vectors.len() != catalog.len() {
        return Err(RecommendError::IndexMismatch {
            expected: catalog.len(),
            found: course_vectors.len(),
        });
    }

    let ranked = collect_ranked(catalog, &profile_vector, &course_vectors, top_n);
    debug!(
        "Ranked {} courses with {}, returning {}",
        catalog.len(),
        embedder.name(),
        ranked.len()
    );
    Ok(ranked)
}

/// Turn scored indices back into owned course rows
pub(crate) fn collect_ranked(
    catalog: &Catalog,
    query: &[f32],
    course_vectors: &[Vec<f32>],
    top_n: usize,
) -> Vec<RankedCourse> {
    rank_by_similarity(query, course_vectors, top_n)
        .into_iter()
        .filter_map(|(catalog_index, score)| {
            catalog.get(catalog_index).map(|course| RankedCourse {
                catalog_index,
                course: course.clone(),
                score,
            })
        })
        .collect()
}
