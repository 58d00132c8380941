//! Benchmarks for course ranking
//!
//! Run with: cargo bench --package recommender
//!
//! Uses a synthetic catalog so no dataset download is needed.

use catalog::{Catalog, CourseRecord};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use embedder::{EmbeddingProvider, HashingEmbedder};
use recommender::{Recommender, rank_by_similarity, recommend};
use std::sync::Arc;

const TOPICS: [&str; 8] = [
    "data analysis with Python and pandas",
    "relational databases and SQL queries",
    "REST APIs and backend services",
    "agile project management",
    "machine learning and neural networks",
    "user research and interface design",
    "cloud infrastructure and deployment",
    "statistics and probability",
];

const PROFILE: &str =
    "I want to work with data. My current skills are Python, SQL. I want to become a Data Analyst.";

fn synthetic_catalog(size: usize) -> Arc<Catalog> {
    let records = (0..size).map(|i| {
        let topic = TOPICS[i % TOPICS.len()];
        let other = TOPICS[(i * 7 + 3) % TOPICS.len()];
        CourseRecord::new(
            format!("Course {i}"),
            format!("Course {i} covers {topic}, with a module on {other}"),
        )
    });
    Arc::new(Catalog::from_records(records))
}

fn bench_uncached_recommend(c: &mut Criterion) {
    let catalog = synthetic_catalog(1_000);
    let embedder = HashingEmbedder::default();

    c.bench_function("recommend_uncached_1k", |b| {
        b.iter(|| {
            let ranked = recommend(black_box(PROFILE), &catalog, &embedder, black_box(5)).unwrap();
            black_box(ranked)
        })
    });
}

fn bench_cached_recommend(c: &mut Criterion) {
    let catalog = synthetic_catalog(5_000);
    let recommender = Recommender::new(catalog, Arc::new(HashingEmbedder::default()))
        .expect("Failed to build course index");

    c.bench_function("recommend_cached_5k", |b| {
        b.iter(|| {
            let ranked = recommender.recommend(black_box(PROFILE), black_box(5)).unwrap();
            black_box(ranked)
        })
    });
}

fn bench_rank_by_similarity(c: &mut Criterion) {
    let catalog = synthetic_catalog(5_000);
    let embedder = HashingEmbedder::default();
    let vectors = embedder
        .embed(&catalog.descriptions())
        .expect("Failed to embed catalog");
    let query = embedder.embed_one(PROFILE).expect("Failed to embed profile");

    c.bench_function("rank_by_similarity_5k", |b| {
        b.iter(|| {
            let ranked = rank_by_similarity(black_box(&query), &vectors, black_box(10));
            black_box(ranked)
        })
    });
}

criterion_group!(
    benches,
    bench_uncached_recommend,
    bench_cached_recommend,
    bench_rank_by_similarity
);
criterion_main!(benches);
