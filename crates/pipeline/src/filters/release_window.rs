//! Optional filter for temporal proximity to the seed.
//!
//! Filters out movies released too far from the seed movie's year.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::MovieRecord;

/// Keeps candidates released within `max_years` of the seed.
///
/// ## Algorithm
/// 1. Use the seed's year as the center point
/// 2. Keep movies within +/- max_years
/// 3. If the seed has no year, keep all movies; candidates without a year
///    are kept as well
pub struct ReleaseWindowFilter {
    max_years: u32,
}

impl ReleaseWindowFilter {
    /// Create a new ReleaseWindowFilter.
    ///
    /// # Arguments
    /// * `max_years` - How many years +/- from the seed's release (typically 10-15)
    pub fn new(max_years: u32) -> Self {
        Self { max_years }
    }
}

impl Filter for ReleaseWindowFilter {
    fn name(&self) -> &str {
        "ReleaseWindowFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a MovieRecord>,
        seed: &MovieRecord,
    ) -> Result<Vec<&'a MovieRecord>> {
        let Some(seed_year) = seed.year else {
            return Ok(candidates);
        };
        let filtered: Vec<&MovieRecord> = candidates
            .into_iter()
            .filter(|candidate| match candidate.year {
                Some(year) => year.abs_diff(seed_year) <= self.max_years,
                None => true,
            })
            .collect();

        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    fn candidates() -> Vec<MovieRecord> {
        vec![
            movie(2, "Old Movie", &[], Some(1980), 7.0),
            movie(3, "Era Movie", &[], Some(2005), 7.0),
            movie(4, "Recent Movie", &[], Some(2020), 7.0),
            movie(5, "Undated Movie", &[], None, 7.0),
        ]
    }

    #[test]
    fn test_release_window_filter() {
        let seed = movie(1, "Seed", &[], Some(2000), 8.0);
        let candidates = candidates();

        let filter = ReleaseWindowFilter::new(10);
        let filtered = filter.apply(candidates.iter().collect(), &seed).unwrap();

        let ids: Vec<u32> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_release_window_extreme_years() {
        let seed = movie(1, "Seed", &[], Some(i32::MAX), 8.0);
        let candidates = vec![
            movie(2, "Ancient", &[], Some(i32::MIN), 7.0),
            movie(3, "Neighbour", &[], Some(i32::MAX - 3), 7.0),
        ];

        let filter = ReleaseWindowFilter::new(10);
        let filtered = filter.apply(candidates.iter().collect(), &seed).unwrap();

        let ids: Vec<u32> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_release_window_seed_without_year() {
        let seed = movie(1, "Seed", &[], None, 8.0);
        let candidates = candidates();

        let filter = ReleaseWindowFilter::new(10);
        let filtered = filter.apply(candidates.iter().collect(), &seed).unwrap();

        assert_eq!(filtered.len(), 4);
    }
}
