//! # Learning Path Advisor
//!
//! This module coordinates one recommendation request end to end:
//! 1. Validate the learner profile
//! 2. Synthesize the profile sentence
//! 3. Embed it and rank the indexed catalog (on a blocking thread)
//! 4. Return the top N courses as a learning path
//!
//! Start-up does the expensive work once: the catalog is parsed, the
//! embedder is loaded and every course description is embedded. All of it
//! runs on `spawn_blocking` so the async runtime stays responsive.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use catalog::Catalog;
use embedder::{EmbeddingProvider, shared_embedder};
use recommender::{LearnerProfile, RankedCourse, Recommender, TargetRole};

use crate::config::AdvisorConfig;
use crate::error::Result;

/// Ranked courses for one learner, plus what they were ranked against
#[derive(Debug, Clone, Serialize)]
pub struct LearningPath {
    pub profile_text: String,
    pub target_role: TargetRole,
    pub weekly_hours: u8,
    pub recommendations: Vec<RankedCourse>,
}

/// Owns the loaded catalog, embedder and course index
#[derive(Clone)]
pub struct LearningPathAdvisor {
    recommender: Arc<Recommender>,
    config: AdvisorConfig,
}

impl LearningPathAdvisor {
    /// Load the catalog and embedder named in `config` and index the courses
    ///
    /// Both loads go through process-wide caches, so building a second
    /// advisor with the same config only re-embeds the catalog.
    pub async fn new(config: AdvisorConfig) -> Result<Self> {
        let start_time = Instant::now();

        info!("Loading catalog from {}", config.catalog_path.display());
        let catalog = tokio::task::spawn_blocking({
            let path = config.catalog_path.clone();
            move || Catalog::load(path)
        })
        .await??;
        info!("Catalog ready: {} courses", catalog.len());

        info!("Loading {} embedder", config.embedder);
        let embedder = tokio::task::spawn_blocking({
            let kind = config.embedder;
            let options = config.embedder_options();
            move || shared_embedder(kind, &options)
        })
        .await??;

        let advisor = Self::from_parts(catalog, embedder, config).await?;
        info!(
            "Advisor ready in {:.2?}",
            start_time.elapsed()
        );
        Ok(advisor)
    }

    /// Build an advisor from an already-loaded catalog and embedder
    pub async fn from_parts(
        catalog: Arc<Catalog>,
        embedder: Arc<dyn EmbeddingProvider>,
        config: AdvisorConfig,
    ) -> Result<Self> {
        let recommender = tokio::task::spawn_blocking(move || Recommender::new(catalog, embedder))
            .await??;

        Ok(Self {
            recommender: Arc::new(recommender),
            config,
        })
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.recommender.index().catalog()
    }

    /// Name of the embedder the catalog was indexed with
    pub fn embedder_name(&self) -> &str {
        self.recommender.index().embedder_name()
    }

    /// Main entry point: rank courses for a learner
    ///
    /// `limit` falls back to the configured default when `None`.
    pub async fn get_learning_path(
        &self,
        profile: &LearnerProfile,
        limit: Option<usize>,
    ) -> Result<LearningPath> {
        let start_time = Instant::now();

        profile.validate()?;
        let profile_text = profile.profile_text();
        debug!("Profile text: {}", profile_text);

        let recommendations = self.rank_profile_text(&profile_text, limit).await?;
        info!(
            "Built learning path for {} with {} courses in {:.2?}",
            profile.target_role,
            recommendations.len(),
            start_time.elapsed()
        );

        Ok(LearningPath {
            profile_text,
            target_role: profile.target_role,
            weekly_hours: profile.weekly_hours,
            recommendations,
        })
    }

    /// Rank the catalog against a raw profile sentence
    pub async fn rank_profile_text(
        &self,
        profile_text: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RankedCourse>> {
        let limit = limit.unwrap_or(self.config.default_top_n);
        let start_time = Instant::now();

        let ranked = tokio::task::spawn_blocking({
            let recommender = Arc::clone(&self.recommender);
            let text = profile_text.to_string();
            move || recommender.recommend(&text, limit)
        })
        .await??;

        debug!(
            "Ranked {} courses (limit {}) in {:.2?}",
            self.catalog().len(),
            limit,
            start_time.elapsed()
        );
        Ok(ranked)
    }
}
