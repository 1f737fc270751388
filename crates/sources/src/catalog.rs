//! Catalog Source - local dataset provider
//!
//! Serves movies from an in-memory `MovieCatalog`, typically loaded from the
//! JSON dataset written by a previous `fetch` run.
//!
//! ## Candidate pool
//! 1. Explicit titles in the criteria are resolved one by one
//! 2. Otherwise every movie sharing a genre with the criteria is taken
//!    (every movie when no genres are given)
//! 3. The excluded id is skipped, catalog order is kept, then the pool is
//!    capped at `limit`

use crate::provider::{CandidateCriteria, MovieProvider, ProviderError};
use async_trait::async_trait;
use data_loader::{MovieCatalog, MovieId, MovieRecord};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Provider backed by a local catalog
#[derive(Clone)]
pub struct CatalogProvider {
    /// Shared reference to the catalog
    catalog: Arc<MovieCatalog>,
}

impl CatalogProvider {
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &MovieCatalog {
        &self.catalog
    }

    fn pool_from_titles(&self, criteria: &CandidateCriteria) -> Vec<MovieRecord> {
        let mut seen: HashSet<MovieId> = HashSet::new();
        criteria
            .titles
            .iter()
            .filter_map(|title| self.catalog.get_by_title(title))
            .filter(|movie| Some(movie.id) != criteria.exclude && seen.insert(movie.id))
            .take(criteria.limit)
            .cloned()
            .collect()
    }

    fn pool_from_genres(&self, criteria: &CandidateCriteria) -> Vec<MovieRecord> {
        let wanted: HashSet<String> = criteria
            .genres
            .iter()
            .map(|g| g.trim().to_lowercase())
            .filter(|g| !g.is_empty())
            .collect();

        self.catalog
            .movies()
            .filter(|movie| Some(movie.id) != criteria.exclude)
            .filter(|movie| {
                wanted.is_empty() || movie.genres.iter().any(|g| wanted.contains(&g.to_lowercase()))
            })
            .take(criteria.limit)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MovieProvider for CatalogProvider {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn fetch_movie_by_title(&self, title: &str) -> Result<Option<MovieRecord>, ProviderError> {
        Ok(self.catalog.get_by_title(title).cloned())
    }

    #[instrument(skip(self, criteria), fields(limit = criteria.limit))]
    async fn fetch_candidate_pool(
        &self,
        criteria: &CandidateCriteria,
    ) -> Result<Vec<MovieRecord>, ProviderError> {
        let pool = if criteria.titles.is_empty() {
            self.pool_from_genres(criteria)
        } else {
            self.pool_from_titles(criteria)
        };
        debug!("Catalog candidate pool has {} movies", pool.len());
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RawMovie;

    fn movie(id: MovieId, title: &str, genres: &[&str]) -> MovieRecord {
        let raw = RawMovie {
            id: Some(id),
            title: Some(title.to_string()),
            genres: Some(genres.iter().map(|g| g.to_string()).collect()),
            rating: Some(7.0),
            year: Some(2000),
            ..Default::default()
        };
        MovieRecord::from_raw(raw).unwrap().0
    }

    fn provider() -> CatalogProvider {
        let catalog = MovieCatalog::from_records(vec![
            movie(1, "Inception", &["Sci-Fi", "Thriller"]),
            movie(2, "The Matrix", &["Sci-Fi", "Action"]),
            movie(3, "Notebook", &["Romance"]),
            movie(4, "Heat", &["Crime", "Thriller"]),
        ])
        .unwrap();
        CatalogProvider::new(Arc::new(catalog))
    }

    #[tokio::test]
    async fn test_fetch_by_title_is_case_insensitive() {
        let provider = provider();
        let found = provider.fetch_movie_by_title("the MATRIX").await.unwrap();
        assert_eq!(found.map(|m| m.id), Some(2));
        assert!(provider.fetch_movie_by_title("Unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_pool_by_seed_genres() {
        let provider = provider();
        let seed = provider.fetch_movie_by_title("Inception").await.unwrap().unwrap();

        let pool = provider
            .fetch_candidate_pool(&CandidateCriteria::for_seed(&seed, 10))
            .await
            .unwrap();
        let ids: Vec<MovieId> = pool.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 4]);
    }

    #[tokio::test]
    async fn test_pool_without_genres_takes_everything_up_to_limit() {
        let provider = provider();
        let criteria = CandidateCriteria {
            limit: 3,
            ..Default::default()
        };
        let pool = provider.fetch_candidate_pool(&criteria).await.unwrap();
        let ids: Vec<MovieId> = pool.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_pool_from_titles_skips_unknown_and_duplicates() {
        let provider = provider();
        let criteria = CandidateCriteria::from_titles(["heat", "Nope", "Heat", "Notebook"]);
        let pool = provider.fetch_candidate_pool(&criteria).await.unwrap();
        let ids: Vec<MovieId> = pool.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![4, 3]);
    }
}
