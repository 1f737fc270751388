//! Core traits for the candidate filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to a candidate pool before scoring.

use anyhow::Result;
use data_loader::MovieRecord;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` lets one engine serve concurrent ranking requests
/// - Filters work on borrowed records; nothing is cloned until the final
///   top-N result is built
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a candidate pool.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter, in input order
    /// * `seed` - The movie recommendations are generated from
    ///
    /// # Returns
    /// * `Ok(Vec<&MovieRecord>)` - The kept candidates, input order preserved
    /// * `Err` - If filtering fails
    fn apply<'a>(
        &self,
        candidates: Vec<&'a MovieRecord>,
        seed: &MovieRecord,
    ) -> Result<Vec<&'a MovieRecord>>;
}
