//! Core domain types for provider-supplied movie metadata.
//!
//! Two shapes live here:
//! - `RawMovie` mirrors whatever a provider or dataset file hands us. Every
//!   field is optional because providers routinely omit data.
//! - `MovieRecord` is the validated, immutable value the rest of the system
//!   works with. Defaults for missing optional fields are applied exactly once,
//!   in `MovieRecord::from_raw`.

use crate::error::{DataLoadError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases & Constants
// =============================================================================

/// Provider-assigned movie identifier (the numeric part of an IMDb id for OMDb)
pub type MovieId = u32;

/// Rating substituted when the provider has none (midpoint of the 0-10 scale)
pub const DEFAULT_RATING: f32 = 5.0;

/// Upper bound of the rating scale
pub const MAX_RATING: f32 = 10.0;

// =============================================================================
// Raw provider payload
// =============================================================================

/// Loosely-typed movie as it arrives from a provider or a dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMovie {
    #[serde(default)]
    pub id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    /// Cast in billing order
    #[serde(default)]
    pub cast: Option<Vec<String>>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub rating: Option<f32>,
    /// Short plot summary, kept for display
    #[serde(default)]
    pub plot: Option<String>,
}

// =============================================================================
// Data quality reporting
// =============================================================================

/// A field that was absent or unusable and got defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DataIssue {
    MissingGenres,
    MissingCast,
    MissingKeywords,
    MissingYear,
    /// Rating absent or not a number; `DEFAULT_RATING` was used
    MissingRating,
    /// Rating outside 0-10; the original value is kept for reporting
    RatingOutOfRange(f32),
}

/// Incomplete-data report produced while validating a `RawMovie`.
///
/// Never fatal: it exists so providers can log what was defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataQuality {
    pub issues: Vec<DataIssue>,
}

impl DataQuality {
    pub fn is_complete(&self) -> bool {
        self.issues.is_empty()
    }
}

// =============================================================================
// MovieRecord
// =============================================================================

/// One movie returned by a provider, validated and defaulted.
///
/// Records are never mutated after construction; ranking runs borrow them.
/// The only way in is `from_raw`, and persistence goes through `to_raw`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    pub genres: BTreeSet<String>,
    /// Cast names in billing order
    pub cast: Vec<String>,
    pub keywords: BTreeSet<String>,
    pub year: Option<i32>,
    /// Always within 0.0..=10.0
    pub rating: f32,
    pub plot: Option<String>,
}

impl MovieRecord {
    /// Validate a raw payload into a record.
    ///
    /// `id` and a non-blank `title` are required. Everything else is optional
    /// and defaulted: empty tag sets, `DEFAULT_RATING`, unknown year. Each
    /// defaulted field is listed in the returned `DataQuality`.
    pub fn from_raw(raw: RawMovie) -> Result<(Self, DataQuality)> {
        let id = raw.id.ok_or_else(|| DataLoadError::InvalidRecord {
            reason: format!("missing id (title: {:?})", raw.title),
        })?;
        let title = raw
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| DataLoadError::InvalidRecord {
                reason: format!("missing title for movie {}", id),
            })?;

        let mut quality = DataQuality::default();

        let genres = collect_tags(raw.genres);
        if genres.is_empty() {
            quality.issues.push(DataIssue::MissingGenres);
        }

        let cast: Vec<String> = raw
            .cast
            .unwrap_or_default()
            .into_iter()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        if cast.is_empty() {
            quality.issues.push(DataIssue::MissingCast);
        }

        let keywords = collect_tags(raw.keywords);
        if keywords.is_empty() {
            quality.issues.push(DataIssue::MissingKeywords);
        }

        if raw.year.is_none() {
            quality.issues.push(DataIssue::MissingYear);
        }

        let rating = match raw.rating {
            Some(r) if r.is_nan() => {
                quality.issues.push(DataIssue::MissingRating);
                DEFAULT_RATING
            }
            Some(r) if !(0.0..=MAX_RATING).contains(&r) => {
                quality.issues.push(DataIssue::RatingOutOfRange(r));
                r.clamp(0.0, MAX_RATING)
            }
            Some(r) => r,
            None => {
                quality.issues.push(DataIssue::MissingRating);
                DEFAULT_RATING
            }
        };

        let record = Self {
            id,
            title,
            genres,
            cast,
            keywords,
            year: raw.year,
            rating,
            plot: raw
                .plot
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        };
        Ok((record, quality))
    }

    /// Convert back to the raw shape for persistence.
    pub fn to_raw(&self) -> RawMovie {
        RawMovie {
            id: Some(self.id),
            title: Some(self.title.clone()),
            genres: Some(self.genres.iter().cloned().collect()),
            cast: Some(self.cast.clone()),
            keywords: Some(self.keywords.iter().cloned().collect()),
            year: self.year,
            rating: Some(self.rating),
            plot: self.plot.clone(),
        }
    }
}

/// Trim tags and drop blanks. Case is preserved here; feature extraction
/// decides how tags compare.
fn collect_tags(tags: Option<Vec<String>>) -> BTreeSet<String> {
    tags.unwrap_or_default()
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

// =============================================================================
// MovieCatalog - in-memory dataset index
// =============================================================================

/// Holds a dataset of movies plus lookup indices.
///
/// Insertion order is kept in `order` so that anything derived from the
/// catalog (candidate pools, search results) is reproducible.
#[derive(Debug, Default)]
pub struct MovieCatalog {
    pub(crate) movies: HashMap<MovieId, MovieRecord>,
    /// Movie ids in first-insertion order
    pub(crate) order: Vec<MovieId>,
    /// Lowercased title -> id
    pub(crate) title_index: HashMap<String, MovieId>,
    /// Lowercased genre -> ids, in catalog order
    pub(crate) genre_index: HashMap<String, Vec<MovieId>>,
}

impl MovieCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_movie(&self, id: MovieId) -> Option<&MovieRecord> {
        self.movies.get(&id)
    }

    /// Case-insensitive exact title lookup
    pub fn get_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.title_index
            .get(&title.trim().to_lowercase())
            .and_then(|id| self.movies.get(id))
    }

    /// Movies tagged with `genre` (case-insensitive), in catalog order
    pub fn get_movies_by_genre(&self, genre: &str) -> &[MovieId] {
        self.genre_index
            .get(&genre.trim().to_lowercase())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over all movies in catalog order
    pub fn movies(&self) -> impl Iterator<Item = &MovieRecord> {
        self.order.iter().filter_map(|id| self.movies.get(id))
    }

    /// Insert a movie. Re-inserting an id replaces the record but keeps its
    /// original position.
    pub fn insert_movie(&mut self, movie: MovieRecord) {
        if let Some(previous) = self.movies.get(&movie.id) {
            let key = previous.title.to_lowercase();
            if self.title_index.get(&key) == Some(&movie.id) {
                self.title_index.remove(&key);
            }
        } else {
            self.order.push(movie.id);
        }
        self.title_index
            .entry(movie.title.to_lowercase())
            .or_insert(movie.id);
        self.movies.insert(movie.id, movie);
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
