//! Error types for the recommendation service.

use crate::config::ConfigError;
use pipeline::RankError;
use sources::ProviderError;
use thiserror::Error;

/// Typed failures returned to the presentation layer
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The provider does not know the seed title
    #[error("No seed available: '{title}' was not found")]
    SeedNotFound { title: String },

    /// The provider failed while looking up the seed
    #[error("No seed available: looking up '{title}' failed: {source}")]
    SeedUnavailable {
        title: String,
        #[source]
        source: ProviderError,
    },

    /// The provider failed while assembling the candidate pool
    #[error("Candidate pool unavailable: {0}")]
    CandidatePool(#[source] ProviderError),

    /// The ranking engine rejected the request
    #[error(transparent)]
    Rank(#[from] RankError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The blocking ranking task panicked or was cancelled
    #[error("Ranking task failed: {0}")]
    Task(String),
}

impl RecommendError {
    /// True when the request itself was unusable (bad count, empty pool)
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RecommendError::Rank(e) if e.is_invalid_argument())
    }
}
