//! Filter to ensure a minimum quality threshold.
//!
//! Removes candidates rated below a configured value so poorly received
//! movies are not recommended just because they look alike.

use crate::traits::Filter;
use anyhow::{bail, Result};
use data_loader::{MovieRecord, MAX_RATING};

/// Removes candidates whose rating is below `min_rating`.
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Minimum provider rating on the 0-10 scale (e.g. 6.5)
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a MovieRecord>,
        _seed: &MovieRecord,
    ) -> Result<Vec<&'a MovieRecord>> {
        if !(0.0..=MAX_RATING).contains(&self.min_rating) {
            bail!("minimum rating {} is outside 0-{}", self.min_rating, MAX_RATING);
        }
        let filtered: Vec<&MovieRecord> = candidates
            .into_iter()
            .filter(|candidate| candidate.rating >= self.min_rating)
            .collect();

        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    #[test]
    fn test_minimum_rating_filter() {
        let seed = movie(1, "Seed", &[], None, 8.0);
        let candidates = vec![
            movie(2, "Great", &[], None, 8.5),
            movie(3, "Poor", &[], None, 4.0),
            movie(4, "Borderline", &[], None, 6.5),
        ];

        let filter = MinimumRatingFilter::new(6.5);
        let filtered = filter.apply(candidates.iter().collect(), &seed).unwrap();

        let ids: Vec<u32> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[test]
    fn test_minimum_rating_out_of_range() {
        let seed = movie(1, "Seed", &[], None, 8.0);
        let candidates = vec![movie(2, "Great", &[], None, 8.5)];

        let filter = MinimumRatingFilter::new(11.0);
        assert!(filter.apply(candidates.iter().collect(), &seed).is_err());
    }
}
