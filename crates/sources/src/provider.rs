//! Provider abstraction for movie metadata.
//!
//! A provider answers two questions: "which movie is this title?" and "which
//! movies should be considered as candidates?". Ranking never talks to a
//! provider directly; the orchestrator fetches everything first.

use async_trait::async_trait;
use data_loader::{DataLoadError, MovieId, MovieRecord};
use thiserror::Error;

/// Default number of candidates requested from a provider
pub const DEFAULT_POOL_LIMIT: usize = 200;

/// Errors raised by providers
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure talking to a remote provider. The request URL
    /// is stripped since it carries the API key.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// Remote provider answered with a non-success status
    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Payload could not be turned into a movie record
    #[error("Invalid provider payload: {0}")]
    InvalidPayload(String),

    /// Local dataset failure
    #[error("Dataset error: {0}")]
    Data(#[from] DataLoadError),

    /// The request cannot be served by this provider
    #[error("Unsupported request: {0}")]
    Unsupported(String),

    /// Nothing could be fetched at all
    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Http(err.without_url())
    }
}

/// What to put in a candidate pool.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidateCriteria {
    /// Movie to leave out of the pool (normally the seed)
    pub exclude: Option<MovieId>,
    /// Prefer movies sharing at least one of these genres (empty = any)
    pub genres: Vec<String>,
    /// Explicit titles to fetch (empty = let the provider choose)
    pub titles: Vec<String>,
    /// Maximum pool size
    pub limit: usize,
}

impl CandidateCriteria {
    /// Candidates related to `seed` by genre
    pub fn for_seed(seed: &MovieRecord, limit: usize) -> Self {
        Self {
            exclude: Some(seed.id),
            genres: seed.genres.iter().cloned().collect(),
            titles: Vec::new(),
            limit,
        }
    }

    /// Candidates from an explicit title list
    pub fn from_titles(titles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let titles: Vec<String> = titles.into_iter().map(Into::into).collect();
        Self {
            exclude: None,
            genres: Vec::new(),
            limit: titles.len(),
            titles,
        }
    }

    /// Restrict to an explicit title list (builder pattern)
    pub fn with_titles(mut self, titles: Vec<String>) -> Self {
        self.titles = titles;
        self
    }
}

/// Source of movie metadata.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Look up one movie by title.
    ///
    /// Returns `Ok(None)` when the provider does not know the title.
    async fn fetch_movie_by_title(&self, title: &str) -> Result<Option<MovieRecord>, ProviderError>;

    /// Assemble a candidate pool for ranking
    async fn fetch_candidate_pool(
        &self,
        criteria: &CandidateCriteria,
    ) -> Result<Vec<MovieRecord>, ProviderError>;
}

/// Fetch metadata for a list of titles, skipping unknown ones.
///
/// Used to build a dataset file that later runs load instead of calling the
/// remote provider again.
pub async fn enrich_dataset(
    provider: &dyn MovieProvider,
    titles: &[String],
) -> Result<Vec<MovieRecord>, ProviderError> {
    let titles: Vec<String> = titles
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let criteria = CandidateCriteria::from_titles(titles);
    let movies = provider.fetch_candidate_pool(&criteria).await?;
    tracing::info!(
        provider = provider.name(),
        requested = criteria.titles.len(),
        fetched = movies.len(),
        "Dataset enriched"
    );
    Ok(movies)
}
