//! Deterministic feature-hashing embedder.
//!
//! Each lowercase alphanumeric token is hashed into one of `dimension`
//! buckets with a hashed sign, and the resulting count vector is L2
//! normalised. No model files, no network, identical output on every
//! platform. Texts that share words get positive cosine similarity.

use crate::error::Result;
use crate::EmbeddingProvider;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Fixed keys so bucket assignment is stable across runs and Rust versions.
/// Changing them changes every embedding, so any saved index must be rebuilt.
const HASH_KEY_0: u64 = 0x0123_4567_89ab_cdef;
const HASH_KEY_1: u64 = 0xfedc_ba98_7654_3210;

/// Same width as all-MiniLM-L6-v2 so either backend fits the same index
pub const DEFAULT_DIMENSION: usize = 384;

/// Feature-hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub const NAME: &'static str = "hashing";

    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(token: &str) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(HASH_KEY_0, HASH_KEY_1);
        hasher.write(token.as_bytes());
        hasher.finish()
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in tokenize(text) {
            let hash = Self::hash_token(&token);
            let bucket = (hash % self.dimension as u64) as usize;
            // Top bit picks the sign so collisions cancel out on average
            let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMENSION)
    }
}

impl EmbeddingProvider for HashingEmbedder {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}

/// Lowercase alphanumeric runs
///
/// Example: "Python, SQL & R." -> ["python", "sql", "r"]
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(v: &[f32]) -> f32 {
        v.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    fn dot(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<_> = tokenize("Python, SQL & Data-Analysis!").collect();
        assert_eq!(tokens, vec!["python", "sql", "data", "analysis"]);
    }

    #[test]
    fn test_vectors_are_normalized() {
        let embedder = HashingEmbedder::default();
        let vectors = embedder
            .embed(&["Learn SQL and databases", "Python programming"])
            .unwrap();

        assert_eq!(vectors.len(), 2);
        for v in &vectors {
            assert_eq!(v.len(), DEFAULT_DIMENSION);
            assert!((norm(v) - 1.0).abs() < 1e-5, "norm was {}", norm(v));
        }
    }

    #[test]
    fn test_embedding_is_deterministic_and_case_insensitive() {
        let embedder = HashingEmbedder::default();
        let a = embedder.embed_one("Machine Learning").unwrap();
        let b = embedder.embed_one("machine learning").unwrap();
        let c = HashingEmbedder::default().embed_one("Machine Learning").unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new(16);
        let v = embedder.embed_one("   ").unwrap();

        assert_eq!(v.len(), 16);
        assert!(v.iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_shared_words_raise_similarity() {
        let embedder = HashingEmbedder::default();
        let query = embedder.embed_one("python data analysis").unwrap();
        let related = embedder.embed_one("python programming and data analysis").unwrap();

        // Unit vectors, so the dot product is the cosine
        assert!(dot(&query, &related) > 0.5);
        assert!((dot(&query, &query) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_dimension_is_clamped() {
        let embedder = HashingEmbedder::new(0);
        assert_eq!(embedder.dimension(), 1);
    }
}
