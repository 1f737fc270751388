//! Feature extraction for similarity scoring.
//!
//! Turns a `MovieRecord` into a `FeatureVector`. Extraction is a pure
//! function of the record and the `FeatureConfig`: no lookups, no clock
//! reads (the reference year is fixed when the config is built).

use chrono::Datelike;
use data_loader::{MovieId, MovieRecord, MAX_RATING};
use std::collections::{BTreeMap, BTreeSet};

/// Recency weight used when a movie has no release year
pub const NEUTRAL_RECENCY: f32 = 0.5;

/// Number of billed cast members considered by default
pub const DEFAULT_CAST_LIMIT: usize = 5;

/// Years after which the recency weight halves
pub const DEFAULT_RECENCY_HALF_LIFE: f32 = 10.0;

/// Current calendar year (UTC)
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Tuning knobs for feature extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureConfig {
    /// Only the first `cast_limit` billed names are used
    pub cast_limit: usize,
    /// Year recency is measured from
    pub reference_year: i32,
    /// Recency weight is `0.5 ^ (|reference_year - year| / recency_half_life)`
    pub recency_half_life: f32,
}

impl FeatureConfig {
    /// Default configuration measured from a fixed reference year
    pub fn with_reference_year(reference_year: i32) -> Self {
        Self {
            cast_limit: DEFAULT_CAST_LIMIT,
            reference_year,
            recency_half_life: DEFAULT_RECENCY_HALF_LIFE,
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self::with_reference_year(current_year())
    }
}

/// Normalized representation of one movie.
///
/// Categorical dimensions are tag sets (membership weight 1.0); numeric
/// dimensions are already scaled to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub movie_id: MovieId,
    pub genres: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
    /// Top-billed cast, limited to `FeatureConfig::cast_limit`
    pub cast: BTreeSet<String>,
    /// Rating / 10
    pub rating: f32,
    /// Monotonically decreasing in distance from the reference year
    pub recency: f32,
}

impl FeatureVector {
    /// Flattened `feature name -> weight` view.
    ///
    /// Tag dimensions appear as `genre:<tag>`, `keyword:<tag>` and
    /// `cast:<name>` with weight 1.0.
    pub fn dimensions(&self) -> BTreeMap<String, f32> {
        let mut dims = BTreeMap::new();
        for genre in &self.genres {
            dims.insert(format!("genre:{}", genre), 1.0);
        }
        for keyword in &self.keywords {
            dims.insert(format!("keyword:{}", keyword), 1.0);
        }
        for name in &self.cast {
            dims.insert(format!("cast:{}", name), 1.0);
        }
        dims.insert("rating".to_string(), self.rating);
        dims.insert("recency".to_string(), self.recency);
        dims
    }
}

/// Extracts feature vectors from movie records.
#[derive(Debug, Clone, Copy)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Compute the feature vector for one record. Never fails: missing data
    /// simply contributes nothing (empty sets) or a neutral value.
    pub fn extract(&self, movie: &MovieRecord) -> FeatureVector {
        FeatureVector {
            movie_id: movie.id,
            genres: normalize_tags(movie.genres.iter()),
            keywords: normalize_tags(movie.keywords.iter()),
            cast: normalize_tags(movie.cast.iter().take(self.config.cast_limit)),
            rating: (movie.rating / MAX_RATING).clamp(0.0, 1.0),
            recency: self.recency(movie.year),
        }
    }

    /// Recency weight for a release year.
    ///
    /// ## Algorithm
    /// - Unknown year: `NEUTRAL_RECENCY`
    /// - Otherwise: `0.5 ^ (|reference_year - year| / half_life)`, so the
    ///   reference year itself scores 1.0 and every `half_life` years of
    ///   distance halves the weight
    pub fn recency(&self, year: Option<i32>) -> f32 {
        match year {
            Some(year) => {
                let distance = self.config.reference_year.abs_diff(year) as f32;
                0.5f32.powf(distance / self.config.recency_half_life)
            }
            None => NEUTRAL_RECENCY,
        }
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new(FeatureConfig::default())
    }
}

/// Lowercase and trim tags so "Sci-Fi" and " sci-fi" match; blanks dropped
fn normalize_tags<'a>(tags: impl Iterator<Item = &'a String>) -> BTreeSet<String> {
    tags.map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::RawMovie;

    fn movie(cast: &[&str], year: Option<i32>, rating: Option<f32>) -> MovieRecord {
        let raw = RawMovie {
            id: Some(1),
            title: Some("Inception".to_string()),
            genres: Some(vec!["Sci-Fi".to_string(), "THRILLER".to_string()]),
            cast: Some(cast.iter().map(|c| c.to_string()).collect()),
            keywords: Some(vec!["Dream ".to_string()]),
            year,
            rating,
            ..Default::default()
        };
        MovieRecord::from_raw(raw).unwrap().0
    }

    #[test]
    fn test_extract_normalizes_tags_and_rating() {
        let extractor = FeatureExtractor::new(FeatureConfig::with_reference_year(2010));
        let features = extractor.extract(&movie(&["Leonardo DiCaprio"], Some(2010), Some(8.8)));

        assert_eq!(features.movie_id, 1);
        assert!(features.genres.contains("sci-fi"));
        assert!(features.genres.contains("thriller"));
        assert!(features.keywords.contains("dream"));
        assert!(features.cast.contains("leonardo dicaprio"));
        assert!((features.rating - 0.88).abs() < 1e-6);
        assert_eq!(features.recency, 1.0);
    }

    #[test]
    fn test_extract_missing_rating_uses_midpoint() {
        let extractor = FeatureExtractor::new(FeatureConfig::with_reference_year(2010));
        let features = extractor.extract(&movie(&[], None, None));
        assert_eq!(features.rating, 0.5);
        assert_eq!(features.recency, NEUTRAL_RECENCY);
        assert!(features.cast.is_empty());
    }

    #[test]
    fn test_cast_limited_to_top_billed() {
        let config = FeatureConfig {
            cast_limit: 2,
            ..FeatureConfig::with_reference_year(2010)
        };
        let extractor = FeatureExtractor::new(config);
        let features = extractor.extract(&movie(&["A", "B", "C", "D"], Some(2010), Some(7.0)));

        assert_eq!(features.cast.len(), 2);
        assert!(features.cast.contains("a"));
        assert!(features.cast.contains("b"));
        assert!(!features.cast.contains("c"));
    }

    #[test]
    fn test_recency_is_monotonic_and_symmetric() {
        let extractor = FeatureExtractor::new(FeatureConfig::with_reference_year(2020));

        let same = extractor.recency(Some(2020));
        let ten_back = extractor.recency(Some(2010));
        let twenty_back = extractor.recency(Some(2000));
        let ten_ahead = extractor.recency(Some(2030));

        assert_eq!(same, 1.0);
        assert!((ten_back - 0.5).abs() < 1e-6);
        assert!((twenty_back - 0.25).abs() < 1e-6);
        assert!(same > ten_back && ten_back > twenty_back);
        assert_eq!(ten_back, ten_ahead);
    }

    #[test]
    fn test_recency_extreme_years() {
        let extractor = FeatureExtractor::new(FeatureConfig::with_reference_year(2020));

        for year in [i32::MIN, i32::MAX] {
            let recency = extractor.recency(Some(year));
            assert!((0.0..=1.0).contains(&recency));
        }
        assert_eq!(extractor.recency(Some(i32::MIN)), 0.0);
    }

    #[test]
    fn test_extract_is_deterministic() {
        let extractor = FeatureExtractor::new(FeatureConfig::with_reference_year(2024));
        let record = movie(&["A", "B"], Some(1999), Some(8.7));
        assert_eq!(extractor.extract(&record), extractor.extract(&record));
    }

    #[test]
    fn test_dimensions_view() {
        let extractor = FeatureExtractor::new(FeatureConfig::with_reference_year(2010));
        let dims = extractor.extract(&movie(&["Tom Hardy"], Some(2010), Some(8.0))).dimensions();

        assert_eq!(dims.get("genre:sci-fi"), Some(&1.0));
        assert_eq!(dims.get("keyword:dream"), Some(&1.0));
        assert_eq!(dims.get("cast:tom hardy"), Some(&1.0));
        assert_eq!(dims.get("rating"), Some(&0.8));
        assert_eq!(dims.get("recency"), Some(&1.0));
    }
}
