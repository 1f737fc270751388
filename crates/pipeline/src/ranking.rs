//! Ranking engine: score a candidate pool against a seed and keep the top N.
//!
//! ## Algorithm
//! 1. Validate `top_n`
//! 2. Exclude the seed from its own pool, then run any configured filters
//! 3. Extract features and score every remaining candidate (in parallel,
//!    order preserving)
//! 4. Sort: score desc, rating desc, title asc, then input order
//! 5. Truncate to `top_n`
//!
//! The engine holds configuration only. Each call works on caller-owned
//! inputs and returns a freshly allocated result, so one engine can be
//! shared across concurrent requests.

use crate::error::RankError;
use crate::features::{FeatureConfig, FeatureExtractor};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{MinimumRatingFilter, ReleaseWindowFilter, SeedExclusionFilter};
use crate::similarity::{ScoreBreakdown, SimilarityScorer, SimilarityWeights};
use crate::traits::Filter;
use data_loader::{MovieId, MovieRecord, MAX_RATING};
use rayon::prelude::*;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Everything needed to build a `RankingEngine`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingConfig {
    pub features: FeatureConfig,
    pub weights: SimilarityWeights,
    /// Drop candidates rated below this value
    pub min_rating: Option<f32>,
    /// Drop candidates released more than this many years from the seed
    pub release_window: Option<u32>,
}

impl RankingConfig {
    pub fn with_reference_year(reference_year: i32) -> Self {
        Self {
            features: FeatureConfig::with_reference_year(reference_year),
            ..Default::default()
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            features: FeatureConfig::default(),
            weights: SimilarityWeights::default(),
            min_rating: None,
            release_window: None,
        }
    }
}

/// One ranked recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub movie: MovieRecord,
    /// Similarity to the seed, in [0, 1]
    pub score: f32,
    pub breakdown: ScoreBreakdown,
}

/// Ordered recommendations for one seed.
///
/// Entries are non-increasing by score; ties are broken by higher rating,
/// then smaller title, then the candidate that appeared first in the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    seed_id: MovieId,
    entries: Vec<ScoredMovie>,
}

impl RecommendationResult {
    pub fn seed_id(&self) -> MovieId {
        self.seed_id
    }

    pub fn entries(&self) -> &[ScoredMovie] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredMovie> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.movie.title.as_str()).collect()
    }

    pub fn contains(&self, id: MovieId) -> bool {
        self.entries.iter().any(|e| e.movie.id == id)
    }
}

impl<'a> IntoIterator for &'a RecommendationResult {
    type Item = &'a ScoredMovie;
    type IntoIter = std::slice::Iter<'a, ScoredMovie>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Scores, orders and truncates candidate pools.
pub struct RankingEngine {
    extractor: FeatureExtractor,
    scorer: SimilarityScorer,
    filters: FilterPipeline,
}

impl RankingEngine {
    /// Build an engine from configuration, validating the weights
    pub fn new(config: RankingConfig) -> Result<Self, RankError> {
        if config.features.cast_limit == 0 {
            return Err(RankError::InvalidConfig(
                "cast_limit must be at least 1".to_string(),
            ));
        }
        if !(config.features.recency_half_life > 0.0) {
            return Err(RankError::InvalidConfig(format!(
                "recency_half_life must be positive, got {}",
                config.features.recency_half_life
            )));
        }
        if let Some(min_rating) = config.min_rating {
            if !(0.0..=MAX_RATING).contains(&min_rating) {
                return Err(RankError::InvalidConfig(format!(
                    "min_rating must be within 0-{}, got {}",
                    MAX_RATING, min_rating
                )));
            }
        }

        let mut filters = FilterPipeline::new();
        if let Some(min_rating) = config.min_rating {
            filters = filters.add_filter(MinimumRatingFilter::new(min_rating));
        }
        if let Some(max_years) = config.release_window {
            filters = filters.add_filter(ReleaseWindowFilter::new(max_years));
        }

        Ok(Self::with_filters(
            FeatureExtractor::new(config.features),
            SimilarityScorer::new(config.weights)?,
            filters,
        ))
    }

    /// Assemble an engine from parts. Seed exclusion always runs before
    /// `filters`.
    pub fn with_filters(
        extractor: FeatureExtractor,
        scorer: SimilarityScorer,
        filters: FilterPipeline,
    ) -> Self {
        Self {
            extractor,
            scorer,
            filters,
        }
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Similarity of a single candidate to a seed
    pub fn score_pair(&self, seed: &MovieRecord, candidate: &MovieRecord) -> f32 {
        self.scorer
            .score(&self.extractor.extract(seed), &self.extractor.extract(candidate))
    }

    /// Rank `candidates` by similarity to `seed` and return at most `top_n`.
    ///
    /// # Errors
    /// * `RankError::InvalidArgument` - `top_n` is 0, or no candidate remains
    ///   after removing the seed (and applying configured filters)
    /// * `RankError::Filter` - a configured filter failed
    #[instrument(skip(self, seed, candidates), fields(seed_id = seed.id, pool = candidates.len()))]
    pub fn rank(
        &self,
        seed: &MovieRecord,
        candidates: &[MovieRecord],
        top_n: usize,
    ) -> Result<RecommendationResult, RankError> {
        if top_n == 0 {
            return Err(RankError::InvalidArgument(
                "top_n must be at least 1".to_string(),
            ));
        }

        let pool = SeedExclusionFilter
            .apply(candidates.iter().collect(), seed)
            .map_err(|e| RankError::Filter(format!("{:#}", e)))?;
        if pool.is_empty() {
            return Err(RankError::InvalidArgument(format!(
                "no candidates remain after excluding seed movie {}",
                seed.id
            )));
        }

        let pool = self
            .filters
            .apply(pool, seed)
            .map_err(|e| RankError::Filter(format!("{:#}", e)))?;
        if pool.is_empty() {
            return Err(RankError::InvalidArgument(format!(
                "no candidates for seed movie {} pass the configured filters",
                seed.id
            )));
        }

        let seed_features = self.extractor.extract(seed);
        let mut scored: Vec<(&MovieRecord, ScoreBreakdown)> = pool
            .par_iter()
            .map(|&movie| {
                let features = self.extractor.extract(movie);
                (movie, self.scorer.breakdown(&seed_features, &features))
            })
            .collect();
        debug!("Scored {} candidates", scored.len());

        // Stable sort: candidates equal on every key keep input order
        scored.sort_by(|a, b| rank_order(a.0, a.1.total, b.0, b.1.total));
        scored.truncate(top_n);

        let entries = scored
            .into_iter()
            .map(|(movie, breakdown)| ScoredMovie {
                movie: movie.clone(),
                score: breakdown.total,
                breakdown,
            })
            .collect();

        Ok(RecommendationResult {
            seed_id: seed.id,
            entries,
        })
    }
}

/// Total order used for ranking: score desc, rating desc, title asc
fn rank_order(a: &MovieRecord, a_score: f32, b: &MovieRecord, b_score: f32) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| a.title.cmp(&b.title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    fn engine() -> RankingEngine {
        RankingEngine::new(RankingConfig::with_reference_year(2024)).unwrap()
    }

    #[test]
    fn test_rank_rejects_zero_top_n() {
        let seed = movie(1, "Seed", &["Drama"], Some(2000), 7.0);
        let candidates = vec![movie(2, "Other", &["Drama"], Some(2000), 7.0)];

        let err = engine().rank(&seed, &candidates, 0).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_rank_rejects_empty_pool() {
        let seed = movie(1, "Seed", &["Drama"], Some(2000), 7.0);
        let err = engine().rank(&seed, &[], 5).unwrap_err();
        assert!(err.is_invalid_argument());

        // Only the seed itself in the pool
        let err = engine().rank(&seed, &[seed.clone()], 5).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_rank_excludes_seed_and_truncates() {
        let seed = movie(1, "Seed", &["Drama"], Some(2000), 7.0);
        let candidates = vec![
            movie(2, "A", &["Drama"], Some(2000), 7.0),
            seed.clone(),
            movie(3, "B", &["Comedy"], Some(1990), 6.0),
            movie(4, "C", &["Drama", "Comedy"], Some(2001), 6.5),
        ];

        let result = engine().rank(&seed, &candidates, 2).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.seed_id(), 1);
        assert!(!result.contains(1));
        assert_eq!(result.entries()[0].movie.id, 2);
    }

    #[test]
    fn test_tie_break_rating_then_title_then_input_order() {
        let seed = movie(1, "Seed", &["Drama"], Some(2000), 7.5);

        // Same genres and year; rating is part of the score, so give the
        // candidates equal distance from the seed's rating (0.75 +/- 0.25).
        let candidates = vec![
            movie(2, "Zeta", &["Drama"], Some(2000), 5.0),
            movie(3, "Alpha", &["Drama"], Some(2000), 10.0),
            movie(4, "Beta", &["Drama"], Some(2000), 10.0),
            movie(5, "Beta", &["Drama"], Some(2000), 10.0),
        ];

        let result = engine().rank(&seed, &candidates, 4).unwrap();
        let scores: Vec<f32> = result.iter().map(|e| e.score).collect();
        assert!(scores.windows(2).all(|w| w[0] == w[1]));

        let ids: Vec<u32> = result.iter().map(|e| e.movie.id).collect();
        assert_eq!(ids, vec![3, 4, 5, 2]);
    }

    #[test]
    fn test_filters_from_config() {
        let config = RankingConfig {
            min_rating: Some(7.0),
            release_window: Some(5),
            ..RankingConfig::with_reference_year(2024)
        };
        let engine = RankingEngine::new(config).unwrap();

        let seed = movie(1, "Seed", &["Drama"], Some(2000), 7.0);
        let candidates = vec![
            movie(2, "Too Old", &["Drama"], Some(1980), 9.0),
            movie(3, "Too Weak", &["Drama"], Some(2001), 5.0),
            movie(4, "Kept", &["Drama"], Some(2003), 7.5),
        ];

        let result = engine.rank(&seed, &candidates, 5).unwrap();
        assert_eq!(result.titles(), vec!["Kept"]);

        let strict = vec![movie(2, "Too Old", &["Drama"], Some(1980), 9.0)];
        assert!(engine.rank(&seed, &strict, 5).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = RankingConfig::with_reference_year(2024);
        config.features.cast_limit = 0;
        assert!(matches!(RankingEngine::new(config), Err(RankError::InvalidConfig(_))));

        let mut config = RankingConfig::with_reference_year(2024);
        config.features.recency_half_life = 0.0;
        assert!(RankingEngine::new(config).is_err());

        let mut config = RankingConfig::with_reference_year(2024);
        config.weights.genre = -1.0;
        assert!(RankingEngine::new(config).is_err());

        for min_rating in [11.0, -0.5, f32::NAN] {
            let config = RankingConfig {
                min_rating: Some(min_rating),
                ..RankingConfig::with_reference_year(2024)
            };
            assert!(matches!(RankingEngine::new(config), Err(RankError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_rank_candidates_with_extreme_years() {
        let config = RankingConfig {
            release_window: Some(30),
            ..RankingConfig::with_reference_year(2024)
        };
        let windowed = RankingEngine::new(config).unwrap();

        let seed = movie(1, "Seed", &["Drama"], Some(2010), 7.0);
        let candidates = vec![
            movie(2, "Ancient", &["Drama"], Some(i32::MIN), 7.0),
            movie(3, "Far Future", &["Drama"], Some(i32::MAX), 7.0),
            movie(4, "Contemporary", &["Drama"], Some(2012), 7.0),
        ];

        let result = engine().rank(&seed, &candidates, 3).unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result.entries()[0].movie.id, 4);
        assert!(result.iter().all(|e| (0.0..=1.0).contains(&e.score)));

        let result = windowed.rank(&seed, &candidates, 3).unwrap();
        assert_eq!(result.titles(), vec!["Contemporary"]);
    }

    #[test]
    fn test_score_pair_identical_is_one() {
        let engine = engine();
        let a = movie(1, "Same", &["Drama"], Some(2000), 7.0);
        let b = movie(2, "Same", &["Drama"], Some(2000), 7.0);
        assert_eq!(engine.score_pair(&a, &b), 1.0);
    }
}
