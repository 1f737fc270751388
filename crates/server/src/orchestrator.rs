//! # Recommendation Orchestrator
//!
//! This module coordinates one recommendation request:
//! 1. Resolve the seed movie through the provider
//! 2. Fetch the candidate pool (fully materialized before ranking)
//! 3. Rank on the blocking pool, since scoring is CPU-bound
//! 4. Return the top N recommendations
//!
//! The orchestrator owns no mutable state. Cloning it is cheap and every
//! request gets its own result buffer, so one instance can serve many
//! concurrent requests.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use data_loader::MovieRecord;
use pipeline::{RankError, RankingEngine, RecommendationResult};
use sources::{CandidateCriteria, MovieProvider};

use crate::config::RecommenderConfig;
use crate::error::RecommendError;

/// Main orchestrator that sits between a provider and the ranking engine
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    provider: Arc<dyn MovieProvider>,
    engine: Arc<RankingEngine>,
    pool_limit: usize,
    /// Explicit candidate titles; empty means "ask the provider by genre"
    candidate_titles: Arc<Vec<String>>,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator from configuration
    ///
    /// # Arguments
    /// * `provider` - Where seeds and candidates come from
    /// * `config` - Engine tuning and pool size
    pub fn new(
        provider: Arc<dyn MovieProvider>,
        config: &RecommenderConfig,
    ) -> Result<Self, RecommendError> {
        config.validate()?;
        let engine = RankingEngine::new(config.ranking_config())?;
        Ok(Self::with_engine(provider, Arc::new(engine), config.pool_limit))
    }

    /// Create an orchestrator around an existing engine
    pub fn with_engine(
        provider: Arc<dyn MovieProvider>,
        engine: Arc<RankingEngine>,
        pool_limit: usize,
    ) -> Self {
        Self {
            provider,
            engine,
            pool_limit,
            candidate_titles: Arc::new(Vec::new()),
        }
    }

    /// Build candidate pools from a fixed title list (builder pattern)
    pub fn with_candidate_titles(mut self, titles: Vec<String>) -> Self {
        self.candidate_titles = Arc::new(titles);
        self
    }

    /// Main entry point: recommendations for a seed title
    ///
    /// # Arguments
    /// * `title` - Seed movie title as typed by the user
    /// * `limit` - Number of recommendations to return (at least 1)
    ///
    /// # Returns
    /// Ranked recommendations, or `SeedNotFound` / `SeedUnavailable` when
    /// the seed cannot be resolved
    #[instrument(skip(self))]
    pub async fn recommend(
        &self,
        title: &str,
        limit: usize,
    ) -> Result<RecommendationResult, RecommendError> {
        check_limit(limit)?;
        let seed = self.fetch_seed(title).await?;
        info!("Resolved seed '{}' to movie {}", title, seed.id);
        self.recommend_for(seed, limit).await
    }

    /// Recommendations for an already fetched seed
    #[instrument(skip(self, seed), fields(seed_id = seed.id))]
    pub async fn recommend_for(
        &self,
        seed: MovieRecord,
        limit: usize,
    ) -> Result<RecommendationResult, RecommendError> {
        check_limit(limit)?;
        let start_time = Instant::now();

        let candidates = self.fetch_pool(&seed).await?;
        info!(
            "Fetched {} candidates from provider {}",
            candidates.len(),
            self.provider.name()
        );

        let result = self.rank(seed, candidates, limit).await?;
        info!(
            "Selected top {} recommendations in {:.2?}",
            result.len(),
            start_time.elapsed()
        );
        Ok(result)
    }

    /// Resolve a seed title, translating provider failures into a
    /// "no seed available" condition
    async fn fetch_seed(&self, title: &str) -> Result<MovieRecord, RecommendError> {
        match self.provider.fetch_movie_by_title(title).await {
            Ok(Some(seed)) => Ok(seed),
            Ok(None) => Err(RecommendError::SeedNotFound {
                title: title.to_string(),
            }),
            Err(source) => Err(RecommendError::SeedUnavailable {
                title: title.to_string(),
                source,
            }),
        }
    }

    async fn fetch_pool(&self, seed: &MovieRecord) -> Result<Vec<MovieRecord>, RecommendError> {
        let criteria = CandidateCriteria::for_seed(seed, self.pool_limit)
            .with_titles(self.candidate_titles.as_ref().clone());
        self.provider
            .fetch_candidate_pool(&criteria)
            .await
            .map_err(RecommendError::CandidatePool)
    }

    /// Run the ranking engine on the blocking thread pool
    async fn rank(
        &self,
        seed: MovieRecord,
        candidates: Vec<MovieRecord>,
        limit: usize,
    ) -> Result<RecommendationResult, RecommendError> {
        let engine = self.engine.clone();
        let result = tokio::task::spawn_blocking(move || engine.rank(&seed, &candidates, limit))
            .await
            .map_err(|e| RecommendError::Task(e.to_string()))??;
        Ok(result)
    }
}

/// Reject a zero count before any provider call is made
fn check_limit(limit: usize) -> Result<(), RecommendError> {
    if limit == 0 {
        return Err(RankError::InvalidArgument("top_n must be at least 1".to_string()).into());
    }
    Ok(())
}
