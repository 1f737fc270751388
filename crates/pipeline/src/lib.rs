//! Content-based similarity ranking for movie recommendations.
//!
//! This crate provides:
//! - FeatureExtractor for turning movie records into feature vectors
//! - SimilarityScorer for weighted pairwise similarity
//! - Filter trait, implementations and FilterPipeline for candidate pools
//! - RankingEngine, which ties them together
//!
//! ## Architecture
//! A ranking request flows through these stages:
//! 1. The seed is excluded from its own candidate pool
//! 2. Optional filters remove unwanted candidates (low rating, wrong era)
//! 3. Features are extracted for the seed and each remaining candidate
//! 4. Candidates are scored against the seed, ordered and truncated
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RankingConfig, RankingEngine};
//!
//! let engine = RankingEngine::new(RankingConfig::default())?;
//! let result = engine.rank(&seed, &candidates, 5)?;
//! for entry in &result {
//!     println!("{} ({:.2})", entry.movie.title, entry.score);
//! }
//! ```

pub mod error;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod features;
pub mod similarity;
pub mod ranking;

// Re-export main types
pub use error::RankError;
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use features::{FeatureConfig, FeatureExtractor, FeatureVector};
pub use similarity::{ScoreBreakdown, SimilarityScorer, SimilarityWeights};
pub use ranking::{RankingConfig, RankingEngine, RecommendationResult, ScoredMovie};
