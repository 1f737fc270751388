//! MovieCatalog building, validation and search.
//!
//! The catalog is built from a list of validated records:
//! - primary index by id (duplicates rejected)
//! - title index (case-insensitive)
//! - genre index (lowercased genre -> ids in catalog order)

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::cmp::Ordering;
use std::path::Path;
use tracing::info;

/// Ranking of a title search hit; exact matches sort before substring matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    Exact,
    Substring,
}

impl MovieCatalog {
    /// Load a dataset file and index it
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let records = parser::load_dataset(path)?;
        let catalog = Self::from_records(records)?;
        info!(
            path = %path.display(),
            movies = catalog.len(),
            genres = catalog.genre_index.len(),
            "Catalog built"
        );
        Ok(catalog)
    }

    /// Build a catalog from records, rejecting duplicate ids
    pub fn from_records(records: Vec<MovieRecord>) -> Result<Self> {
        let mut catalog = Self::new();
        for record in records {
            if catalog.movies.contains_key(&record.id) {
                return Err(DataLoadError::DuplicateId { id: record.id });
            }
            catalog.insert_movie(record);
        }
        catalog.build_secondary_indices();
        catalog.validate()?;
        Ok(catalog)
    }

    /// Rebuild the genre index from the primary store.
    ///
    /// Must be called after a batch of `insert_movie` calls.
    pub fn build_secondary_indices(&mut self) {
        self.genre_index.clear();
        for id in &self.order {
            if let Some(movie) = self.movies.get(id) {
                for genre in &movie.genres {
                    self.genre_index
                        .entry(genre.to_lowercase())
                        .or_default()
                        .push(*id);
                }
            }
        }
    }

    /// Check invariants that `MovieRecord::from_raw` establishes, in case
    /// records were built by hand.
    pub fn validate(&self) -> Result<()> {
        for movie in self.movies() {
            if !(0.0..=MAX_RATING).contains(&movie.rating) {
                return Err(DataLoadError::InvalidValue {
                    field: format!("rating of movie {}", movie.id),
                    value: movie.rating.to_string(),
                });
            }
            if movie.title.trim().is_empty() {
                return Err(DataLoadError::InvalidValue {
                    field: format!("title of movie {}", movie.id),
                    value: movie.title.clone(),
                });
            }
        }
        Ok(())
    }

    /// (movies, distinct genres)
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.genre_index.len())
    }

    /// Case-insensitive title search.
    ///
    /// Exact matches come first, then substring matches; within each group
    /// higher rating first, then title.
    pub fn search(&self, query: &str, limit: usize) -> Vec<(MatchKind, &MovieRecord)> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(MatchKind, &MovieRecord)> = self
            .movies()
            .filter_map(|movie| {
                let title = movie.title.to_lowercase();
                if title == query {
                    Some((MatchKind::Exact, movie))
                } else if title.contains(&query) {
                    Some((MatchKind::Substring, movie))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| b.1.rating.partial_cmp(&a.1.rating).unwrap_or(Ordering::Equal))
                .then_with(|| a.1.title.cmp(&b.1.title))
        });
        matches.truncate(limit);
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: MovieId, title: &str, genres: &[&str], rating: f32) -> MovieRecord {
        let raw = RawMovie {
            id: Some(id),
            title: Some(title.to_string()),
            genres: Some(genres.iter().map(|g| g.to_string()).collect()),
            rating: Some(rating),
            year: Some(2000),
            ..Default::default()
        };
        MovieRecord::from_raw(raw).unwrap().0
    }

    #[test]
    fn test_from_records_builds_indices() {
        let catalog = MovieCatalog::from_records(vec![
            record(1, "Toy Story", &["Animation", "Comedy"], 8.3),
            record(2, "Toy Story 2", &["Animation"], 7.9),
            record(3, "Heat", &["Crime"], 8.3),
        ])
        .unwrap();

        assert_eq!(catalog.counts(), (3, 3));
        assert_eq!(catalog.get_movies_by_genre("animation"), &[1, 2]);
        assert_eq!(catalog.get_movies_by_genre("ANIMATION"), &[1, 2]);
        assert!(catalog.get_movies_by_genre("western").is_empty());
        assert_eq!(catalog.get_by_title("heat").map(|m| m.id), Some(3));
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let err = MovieCatalog::from_records(vec![
            record(1, "Heat", &[], 8.3),
            record(1, "Heat again", &[], 8.3),
        ])
        .unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateId { id: 1 }));
    }

    #[test]
    fn test_validate_rejects_hand_built_bad_rating() {
        let mut bad = record(1, "Heat", &[], 8.3);
        bad.rating = 11.0;
        let mut catalog = MovieCatalog::new();
        catalog.insert_movie(bad);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_search_orders_exact_then_substring() {
        let catalog = MovieCatalog::from_records(vec![
            record(1, "Toy Story 2", &[], 7.9),
            record(2, "Toy Story", &[], 8.3),
            record(3, "Toy Story 3", &[], 8.2),
            record(4, "Heat", &[], 8.3),
        ])
        .unwrap();

        let hits = catalog.search("toy story", 10);
        let ids: Vec<MovieId> = hits.iter().map(|(_, m)| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        assert_eq!(hits[0].0, MatchKind::Exact);
        assert_eq!(hits[1].0, MatchKind::Substring);

        assert!(catalog.search("   ", 10).is_empty());
        assert_eq!(catalog.search("toy", 1).len(), 1);
    }
}
