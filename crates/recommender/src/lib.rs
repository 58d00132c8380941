//! Embedding-based course ranking.
//!
//! This crate provides:
//! - LearnerProfile and the profile sentence it is ranked by
//! - Cosine similarity and the stable top-N ranking over a catalog
//! - CourseIndex / Recommender for serving many requests from one set of
//!   precomputed course embeddings
//! - CSV export of a ranked list
//!
//! ## Architecture
//! A request moves through these stages:
//! 1. The profile is validated and turned into one sentence
//! 2. The sentence is embedded with the same provider as the courses
//! 3. Every course is scored by cosine similarity and the best N are kept
//! 4. The caller renders or exports the ranked list
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{LearnerProfile, Recommender, TargetRole};
//!
//! let recommender = Recommender::new(catalog, embedder)?;
//! let profile = LearnerProfile::new("Work with data", "Python, SQL", TargetRole::DataAnalyst);
//! profile.validate()?;
//!
//! for ranked in recommender.recommend(&profile.profile_text(), 5)? {
//!     println!("{:.2} {}", ranked.score, ranked.course.title);
//! }
//! ```

pub mod error;
pub mod export;
pub mod index;
pub mod profile;
pub mod ranking;
pub mod similarity;

// Re-export main types
pub use error::{ExportError, RecommendError, Result};
pub use export::{export_csv, export_csv_bytes, write_export_file};
pub use index::{CourseIndex, Recommender};
pub use profile::{LearnerProfile, ProfileError, TargetRole};
pub use ranking::{RankedCourse, rank_by_similarity, recommend};
pub use similarity::cosine_similarity;
