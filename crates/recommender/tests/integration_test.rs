//! Integration tests for ranking.
//!
//! These tests run the full embed-score-sort path over small catalogs with
//! the hashing embedder and a few hand-built providers.

use catalog::{Catalog, CourseRecord};
use embedder::{EmbeddingError, EmbeddingProvider, HashingEmbedder};
use recommender::{
    CourseIndex, LearnerProfile, RecommendError, Recommender, TargetRole, export_csv_bytes,
    recommend,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn create_test_catalog() -> Catalog {
    Catalog::from_records(vec![
        CourseRecord::new("SQL Basics", "Learn SQL and databases"),
        CourseRecord::new("Python for Data", "Python programming and data analysis"),
        CourseRecord::new("Leading Teams", "Project management and agile leadership"),
        CourseRecord::new("Deep Learning", "Neural networks and machine learning models"),
        CourseRecord::new("Web APIs", "Backend development with REST services"),
        CourseRecord::new("Figma", "Prototyping user interfaces"),
    ])
}

/// Maps every text to the same vector, so every course ties
struct ConstantEmbedder;

impl EmbeddingProvider for ConstantEmbedder {
    fn name(&self) -> &str {
        "constant"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn embed(&self, texts: &[&str]) -> embedder::Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 1.0]).collect())
    }
}

/// Counts embed calls and delegates to the hashing embedder
struct CountingEmbedder {
    inner: HashingEmbedder,
    calls: AtomicUsize,
}

impl EmbeddingProvider for CountingEmbedder {
    fn name(&self) -> &str {
        "counting"
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn embed(&self, texts: &[&str]) -> embedder::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(texts)
    }
}

/// Always fails, like a model that could not be loaded
struct BrokenEmbedder;

impl EmbeddingProvider for BrokenEmbedder {
    fn name(&self) -> &str {
        "broken"
    }

    fn dimension(&self) -> usize {
        4
    }

    fn embed(&self, _texts: &[&str]) -> embedder::Result<Vec<Vec<f32>>> {
        Err(EmbeddingError::EncodingFailed("no weights".to_string()))
    }
}

#[test]
fn test_end_to_end_data_analyst_profile() {
    let catalog = Catalog::from_records(vec![
        CourseRecord::new("SQL Basics", "Learn SQL and databases"),
        CourseRecord::new("Python for Data", "Python programming and data analysis"),
    ]);
    let embedder = HashingEmbedder::default();
    let profile = "I want to become a Data Analyst. My current skills are Python, SQL.";

    let first = recommend(profile, &catalog, &embedder, 2).unwrap();
    let second = recommend(profile, &catalog, &embedder, 2).unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(first[0].course.title, "Python for Data");
    assert_eq!(first[1].course.title, "SQL Basics");
    assert!(first[0].score >= first[1].score);
    assert_eq!(first, second, "ranking should be deterministic");
}

#[test]
fn test_top_n_larger_than_catalog_returns_every_course_once() {
    let catalog = create_test_catalog();
    let embedder = HashingEmbedder::default();

    let ranked = recommend("machine learning engineer", &catalog, &embedder, 100).unwrap();

    assert_eq!(ranked.len(), catalog.len());
    let mut indices: Vec<_> = ranked.iter().map(|r| r.catalog_index).collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..catalog.len()).collect::<Vec<_>>());
}

#[test]
fn test_top_n_smaller_than_catalog_is_sorted() {
    let catalog = create_test_catalog();
    let embedder = HashingEmbedder::default();

    let ranked = recommend("backend services and data", &catalog, &embedder, 3).unwrap();

    assert_eq!(ranked.len(), 3);
    for pair in ranked.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "scores should be non-increasing: {} then {}",
            pair[0].score,
            pair[1].score
        );
    }
}

#[test]
fn test_top_n_zero_skips_embedding() {
    let catalog = create_test_catalog();
    let embedder = CountingEmbedder {
        inner: HashingEmbedder::default(),
        calls: AtomicUsize::new(0),
    };

    let ranked = recommend("anything", &catalog, &embedder, 0).unwrap();

    assert!(ranked.is_empty());
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_empty_catalog_returns_empty() {
    let catalog = Catalog::from_records(Vec::new());

    let ranked = recommend("anything", &catalog, &BrokenEmbedder, 5).unwrap();

    assert!(ranked.is_empty());
}

#[test]
fn test_profile_identical_to_description_scores_one() {
    let catalog = create_test_catalog();
    let embedder = HashingEmbedder::default();

    let ranked = recommend("Prototyping user interfaces", &catalog, &embedder, 1).unwrap();

    assert_eq!(ranked[0].course.title, "Figma");
    assert!((ranked[0].score - 1.0).abs() < 1e-5);
}

#[test]
fn test_ties_keep_catalog_order() {
    let catalog = create_test_catalog();

    let ranked = recommend("whatever", &catalog, &ConstantEmbedder, 4).unwrap();
    let order: Vec<_> = ranked.iter().map(|r| r.catalog_index).collect();

    assert_eq!(order, vec![0, 1, 2, 3]);
}

#[test]
fn test_whitespace_profile_is_not_an_error() {
    let catalog = create_test_catalog();
    let embedder = HashingEmbedder::default();

    let ranked = recommend("   ", &catalog, &embedder, 3).unwrap();

    assert_eq!(ranked.len(), 3);
    assert!(ranked.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_embedding_failure_surfaces() {
    let catalog = create_test_catalog();

    let err = recommend("data", &catalog, &BrokenEmbedder, 3).unwrap_err();

    assert!(matches!(err, RecommendError::Embedding(_)));
}

#[test]
fn test_cached_index_matches_uncached_ranking() {
    let catalog = Arc::new(create_test_catalog());
    let embedder = Arc::new(HashingEmbedder::default());
    let recommender = Recommender::new(Arc::clone(&catalog), embedder.clone()).unwrap();

    for role in TargetRole::ALL {
        let profile = LearnerProfile::new("Grow my career", "Python, communication", role)
            .profile_text();

        let cached = recommender.recommend(&profile, 4).unwrap();
        let uncached = recommend(&profile, &catalog, embedder.as_ref(), 4).unwrap();

        assert_eq!(cached, uncached, "mismatch for role {role}");
    }
}

#[test]
fn test_index_embeds_courses_once() {
    let catalog = Arc::new(create_test_catalog());
    let embedder = Arc::new(CountingEmbedder {
        inner: HashingEmbedder::default(),
        calls: AtomicUsize::new(0),
    });
    let recommender = Recommender::new(catalog, embedder.clone()).unwrap();

    for _ in 0..5 {
        recommender.recommend("data analysis", 2).unwrap();
    }

    // one batch for the index, then one profile per request
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 6);
    assert_eq!(recommender.index().len(), 6);
}

#[test]
fn test_index_rejects_short_embedding_batch() {
    struct ShortEmbedder;

    impl EmbeddingProvider for ShortEmbedder {
        fn name(&self) -> &str {
            "short"
        }

        fn dimension(&self) -> usize {
            1
        }

        fn embed(&self, _texts: &[&str]) -> embedder::Result<Vec<Vec<f32>>> {
            Ok(vec![vec![1.0]])
        }
    }

    let result = CourseIndex::build(Arc::new(create_test_catalog()), &ShortEmbedder);

    assert!(matches!(
        result,
        Err(RecommendError::IndexMismatch {
            expected: 6,
            found: 1
        })
    ));
}

#[test]
fn test_export_of_ranked_list() {
    let catalog = create_test_catalog();
    let embedder = HashingEmbedder::default();
    let ranked = recommend("agile project management", &catalog, &embedder, 2).unwrap();

    let text = String::from_utf8(export_csv_bytes(&ranked).unwrap()).unwrap();
    let mut lines = text.lines();

    assert_eq!(
        lines.next(),
        Some("Title,Skills,Difficulty,Ratings,course_url,Duration")
    );
    assert_eq!(lines.count(), 2);
}

#[cfg(feature = "sentence-model")]
mod sentence_model {
    use super::*;
    use embedder::{EmbedderOptions, SentenceEmbedder};

    fn load_minilm() -> SentenceEmbedder {
        SentenceEmbedder::load(&EmbedderOptions::default()).unwrap()
    }

    #[test]
    #[ignore = "downloads model weights"]
    fn test_minilm_end_to_end_is_deterministic() {
        let catalog = Catalog::from_records(vec![
            CourseRecord::new("SQL Basics", "Learn SQL and databases"),
            CourseRecord::new("Python for Data", "Python programming and data analysis"),
        ]);
        let embedder = load_minilm();
        let profile = "I want to become a Data Analyst. My current skills are Python, SQL.";

        let first = recommend(profile, &catalog, &embedder, 2).unwrap();
        let second = recommend(profile, &catalog, &embedder, 2).unwrap();

        assert_eq!(first.len(), 2);
        assert!(first[0].score >= first[1].score);
        let titles = |ranked: &[recommender::RankedCourse]| {
            ranked.iter().map(|r| r.course.title.clone()).collect::<Vec<_>>()
        };
        assert_eq!(titles(&first), titles(&second));
    }

    #[test]
    #[ignore = "downloads model weights"]
    fn test_minilm_description_scores_one_against_itself() {
        let catalog = create_test_catalog();
        let embedder = load_minilm();

        let ranked = recommend("Prototyping user interfaces", &catalog, &embedder, 1).unwrap();

        assert_eq!(ranked[0].course.title, "Figma");
        assert!((ranked[0].score - 1.0).abs() < 1e-5);
    }

    #[test]
    #[ignore = "downloads model weights"]
    fn test_minilm_matches_meaning_without_shared_words() {
        let catalog = Catalog::from_records(vec![
            CourseRecord::new("Gardening", "Growing tomatoes in the garden"),
            CourseRecord::new("Coding", "Software programming fundamentals"),
        ]);
        let embedder = load_minilm();

        let ranked =
            recommend("I want to learn to code and develop apps", &catalog, &embedder, 2).unwrap();

        assert_eq!(ranked[0].course.title, "Coding");
        assert!(ranked[0].score > ranked[1].score);
    }
}
