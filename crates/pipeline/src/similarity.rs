//! Pairwise similarity between two feature vectors.
//!
//! ## Algorithm
//! Each dimension produces a similarity in [0, 1]:
//! - genres, keywords, cast: Jaccard ratio `|A ∩ B| / |A ∪ B|`
//! - rating, recency: `1 - |a - b|`
//!
//! The overall score is the weighted mean over the dimensions that carry
//! information. A tag dimension that is empty on both sides says nothing
//! about similarity, so its weight drops out of both numerator and
//! denominator. With that rule two identical movies always score exactly
//! 1.0, even when the provider sent no keywords for either.

use crate::error::RankError;
use crate::features::FeatureVector;
use std::collections::BTreeSet;

/// Per-dimension weights. Defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityWeights {
    pub genre: f32,
    pub keywords: f32,
    pub cast: f32,
    pub rating: f32,
    pub recency: f32,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            genre: 0.4,
            keywords: 0.2,
            cast: 0.2,
            rating: 0.1,
            recency: 0.1,
        }
    }
}

impl SimilarityWeights {
    pub fn total(&self) -> f32 {
        self.genre + self.keywords + self.cast + self.rating + self.recency
    }

    /// Weights must be finite, non-negative and not all zero
    pub fn validate(&self) -> Result<(), RankError> {
        let all = [
            ("genre", self.genre),
            ("keywords", self.keywords),
            ("cast", self.cast),
            ("rating", self.rating),
            ("recency", self.recency),
        ];
        for (name, weight) in all {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RankError::InvalidConfig(format!(
                    "weight for {} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        if self.total() <= 0.0 {
            return Err(RankError::InvalidConfig(
                "at least one similarity weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Per-dimension similarities behind a score.
///
/// `None` marks a tag dimension that was empty on both sides and therefore
/// left out of the weighted mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub genre: Option<f32>,
    pub keywords: Option<f32>,
    pub cast: Option<f32>,
    pub rating: f32,
    pub recency: f32,
    pub total: f32,
}

/// Deterministic, side-effect free similarity scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    weights: SimilarityWeights,
}

impl SimilarityScorer {
    pub fn new(weights: SimilarityWeights) -> Result<Self, RankError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &SimilarityWeights {
        &self.weights
    }

    /// Similarity of `candidate` to `seed`, in [0, 1]
    pub fn score(&self, seed: &FeatureVector, candidate: &FeatureVector) -> f32 {
        self.breakdown(seed, candidate).total
    }

    /// Score together with the per-dimension similarities
    pub fn breakdown(&self, seed: &FeatureVector, candidate: &FeatureVector) -> ScoreBreakdown {
        let genre = jaccard(&seed.genres, &candidate.genres);
        let keywords = jaccard(&seed.keywords, &candidate.keywords);
        let cast = jaccard(&seed.cast, &candidate.cast);
        let rating = closeness(seed.rating, candidate.rating);
        let recency = closeness(seed.recency, candidate.recency);

        let w = &self.weights;
        let mut weighted = 0.0f32;
        let mut active = 0.0f32;
        for (weight, similarity) in [
            (w.genre, genre),
            (w.keywords, keywords),
            (w.cast, cast),
            (w.rating, Some(rating)),
            (w.recency, Some(recency)),
        ] {
            if let Some(similarity) = similarity {
                weighted += weight * similarity;
                active += weight;
            }
        }

        let total = if active > 0.0 {
            (weighted / active).clamp(0.0, 1.0)
        } else {
            0.0
        };

        ScoreBreakdown {
            genre,
            keywords,
            cast,
            rating,
            recency,
            total,
        }
    }
}

/// Jaccard ratio; `None` when both sets are empty
fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> Option<f32> {
    let union = a.union(b).count();
    if union == 0 {
        return None;
    }
    let intersection = a.intersection(b).count();
    Some(intersection as f32 / union as f32)
}

/// `1 - |a - b|` for values already in [0, 1]
fn closeness(a: f32, b: f32) -> f32 {
    (1.0 - (a - b).abs()).clamp(0.0, 1.0)
}
