//! OMDb API provider
//!
//! Looks movies up by title against the OMDb API (`GET /?apikey=..&t=..`).
//! OMDb has no "similar movies" endpoint, so candidate pools are built from
//! an explicit title list, fetched concurrently.
//!
//! Field mapping:
//! - `imdbID` "tt0133093" -> id 133093
//! - `Genre`, `Actors` (billing order), `Director` -> genres, cast, keywords
//! - `Year` "2010" or "2008–2013" -> leading four digits
//! - `imdbRating` "N/A" -> missing (defaulted by `MovieRecord::from_raw`)
//! - `Plot` -> plot summary, stored with the dataset

use crate::provider::{CandidateCriteria, MovieProvider, ProviderError};
use async_trait::async_trait;
use data_loader::{parser::report_quality, MovieId, MovieRecord, RawMovie};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

/// Public OMDb endpoint
pub const DEFAULT_OMDB_URL: &str = "https://www.omdbapi.com";

/// Concurrent title lookups per candidate pool
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// OMDb title payload. Every field is optional; OMDb uses "N/A" for unknowns.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OmdbMovie {
    pub title: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub actors: Option<String>,
    pub plot: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    /// "True" or "False"
    pub response: String,
    pub error: Option<String>,
}

impl OmdbMovie {
    pub fn found(&self) -> bool {
        self.response.eq_ignore_ascii_case("true")
    }

    /// Convert to the loosely-typed raw shape; validation happens in
    /// `MovieRecord::from_raw`
    pub fn to_raw(&self) -> RawMovie {
        RawMovie {
            id: self.imdb_id.as_deref().and_then(parse_imdb_id),
            title: known(&self.title).map(str::to_string),
            genres: known(&self.genre).map(split_list),
            cast: known(&self.actors).map(split_list),
            keywords: known(&self.director).map(split_list),
            year: known(&self.year).and_then(parse_year),
            rating: known(&self.imdb_rating).and_then(|r| r.parse().ok()),
            plot: known(&self.plot).map(str::to_string),
        }
    }
}

/// `None` for missing or "N/A" fields
fn known(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("N/A"))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// "tt0133093" -> 133093
fn parse_imdb_id(value: &str) -> Option<MovieId> {
    value.trim().trim_start_matches("tt").parse().ok()
}

/// Leading four digits of "2010", "2008–2013", "2019–"
fn parse_year(value: &str) -> Option<i32> {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() == 4 { digits.parse().ok() } else { None }
}

/// Provider for the OMDb HTTP API
#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
    max_concurrent: usize,
}

impl OmdbProvider {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Configure how many lookups run at once (default: 8)
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    async fn fetch_omdb(&self, title: &str) -> Result<OmdbMovie, ProviderError> {
        let url = format!("{}/", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MovieProvider for OmdbProvider {
    fn name(&self) -> &'static str {
        "omdb"
    }

    #[instrument(skip(self))]
    async fn fetch_movie_by_title(&self, title: &str) -> Result<Option<MovieRecord>, ProviderError> {
        let payload = self.fetch_omdb(title).await?;
        if !payload.found() {
            debug!(error = ?payload.error, "OMDb has no match");
            return Ok(None);
        }

        let (record, quality) = MovieRecord::from_raw(payload.to_raw())
            .map_err(|e| ProviderError::InvalidPayload(e.to_string()))?;
        report_quality(&record, &quality);
        Ok(Some(record))
    }

    #[instrument(skip(self, criteria), fields(titles = criteria.titles.len(), limit = criteria.limit))]
    async fn fetch_candidate_pool(
        &self,
        criteria: &CandidateCriteria,
    ) -> Result<Vec<MovieRecord>, ProviderError> {
        if criteria.titles.is_empty() {
            return Err(ProviderError::Unsupported(
                "OMDb candidate pools need an explicit title list".to_string(),
            ));
        }

        let permits = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();
        for (index, title) in criteria.titles.iter().enumerate() {
            let provider = self.clone();
            let permits = permits.clone();
            let title = title.clone();
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                let result = provider.fetch_movie_by_title(&title).await;
                (index, title, result)
            });
        }

        let mut fetched: Vec<(usize, MovieRecord)> = Vec::new();
        let mut failures = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, _, Ok(Some(movie)))) => fetched.push((index, movie)),
                Ok((_, title, Ok(None))) => warn!(%title, "Movie not found, skipping"),
                Ok((_, title, Err(e))) => {
                    warn!(%title, error = %e, "Movie fetch failed, skipping");
                    failures += 1;
                }
                Err(e) => {
                    warn!(error = %e, "Fetch task failed");
                    failures += 1;
                }
            }
        }

        if fetched.is_empty() && failures > 0 {
            return Err(ProviderError::Unavailable(format!(
                "all {} title lookups failed",
                failures
            )));
        }

        // Restore input order, then drop duplicates and the excluded id
        fetched.sort_by_key(|(index, _)| *index);
        let mut seen: HashSet<MovieId> = HashSet::new();
        let pool: Vec<MovieRecord> = fetched
            .into_iter()
            .map(|(_, movie)| movie)
            .filter(|movie| Some(movie.id) != criteria.exclude && seen.insert(movie.id))
            .take(criteria.limit)
            .collect();

        debug!("OMDb candidate pool has {} movies", pool.len());
        Ok(pool)
    }
}
