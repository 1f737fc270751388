//! Error types for the ranking pipeline.

use thiserror::Error;

/// Errors surfaced by the ranking engine.
///
/// Feature extraction and scoring never fail; only the engine's entry
/// contract and configuration are validated.
#[derive(Error, Debug)]
pub enum RankError {
    /// Caller supplied arguments no ranking can satisfy (`top_n == 0`, or
    /// nothing left to rank after excluding the seed)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A candidate filter returned an error
    #[error("Candidate filtering failed: {0}")]
    Filter(String),

    /// Engine configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl RankError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RankError::InvalidArgument(_))
    }
}
