//! Advisor crate for the LearnPath course recommender.
//!
//! This crate contains the orchestrator that loads the catalog and the
//! embedding model once and answers learning-path requests against them.

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::{AdvisorConfig, DEFAULT_CATALOG_PATH, DEFAULT_TOP_N};
pub use error::{AdvisorError, Result};
pub use orchestrator::{LearningPath, LearningPathAdvisor};
