//! Filter that removes the seed movie from its own candidate pool.
//!
//! The ranking engine always runs this first; a movie is never recommended
//! as similar to itself.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::MovieRecord;

/// Removes every candidate whose id equals the seed's id.
pub struct SeedExclusionFilter;

impl Filter for SeedExclusionFilter {
    fn name(&self) -> &str {
        "SeedExclusionFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a MovieRecord>,
        seed: &MovieRecord,
    ) -> Result<Vec<&'a MovieRecord>> {
        let filtered: Vec<&MovieRecord> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != seed.id)
            .collect();
        Ok(filtered)
    }
}
