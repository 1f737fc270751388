use pipeline::{FeatureConfig, RankingConfig, RankingEngine, SimilarityWeights};
use serde::Deserialize;
use sources::omdb::{DEFAULT_MAX_CONCURRENT, DEFAULT_OMDB_URL};
use sources::DEFAULT_POOL_LIMIT;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable prefix for every setting
pub const ENV_PREFIX: &str = "REEL_RECS_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Recommender configuration loaded from environment variables
/// (`REEL_RECS_API_KEY`, `REEL_RECS_TOP_N`, ...).
///
/// Built once at startup and handed to the provider and orchestrator
/// constructors; nothing reads the environment after that.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// OMDb API key; only needed when fetching from OMDb
    #[serde(default)]
    pub api_key: Option<String>,

    /// OMDb base URL
    #[serde(default = "default_omdb_url")]
    pub omdb_url: String,

    /// Concurrent OMDb lookups
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,

    /// JSON dataset written by `fetch` and read by `recommend`
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Recommendations returned when the caller does not ask for a count
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Maximum candidate pool size requested from the provider
    #[serde(default = "default_pool_limit")]
    pub pool_limit: usize,

    /// Billed cast members considered per movie
    #[serde(default = "default_cast_limit")]
    pub cast_limit: usize,

    /// Years after which the recency weight halves
    #[serde(default = "default_recency_half_life")]
    pub recency_half_life: f32,

    /// Year recency is measured from; current year when unset
    #[serde(default)]
    pub reference_year: Option<i32>,

    /// Drop candidates rated below this value
    #[serde(default)]
    pub min_rating: Option<f32>,

    /// Drop candidates released more than this many years from the seed
    #[serde(default)]
    pub release_window: Option<u32>,

    // Similarity weight overrides
    #[serde(default)]
    pub weight_genre: Option<f32>,
    #[serde(default)]
    pub weight_keywords: Option<f32>,
    #[serde(default)]
    pub weight_cast: Option<f32>,
    #[serde(default)]
    pub weight_rating: Option<f32>,
    #[serde(default)]
    pub weight_recency: Option<f32>,
}

fn default_omdb_url() -> String {
    DEFAULT_OMDB_URL.to_string()
}

fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("movies_dataset.json")
}

fn default_top_n() -> usize {
    5
}

fn default_pool_limit() -> usize {
    DEFAULT_POOL_LIMIT
}

fn default_cast_limit() -> usize {
    pipeline::features::DEFAULT_CAST_LIMIT
}

fn default_recency_half_life() -> f32 {
    pipeline::features::DEFAULT_RECENCY_HALF_LIFE
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            omdb_url: default_omdb_url(),
            max_concurrent: default_max_concurrent(),
            dataset_path: default_dataset_path(),
            top_n: default_top_n(),
            pool_limit: default_pool_limit(),
            cast_limit: default_cast_limit(),
            recency_half_life: default_recency_half_life(),
            reference_year: None,
            min_rating: None,
            release_window: None,
            weight_genre: None,
            weight_keywords: None,
            weight_cast: None,
            weight_rating: None,
            weight_recency: None,
        }
    }
}

impl RecommenderConfig {
    /// Load configuration from environment variables, reading `.env` first
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = envy::prefixed(ENV_PREFIX).from_env::<Self>()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from explicit key/value pairs (keys carry the prefix)
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX).from_iter::<_, Self>(pairs)?;
        config.validate()?;
        Ok(config)
    }

    /// API key, or an error naming the variable to set
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ConfigError::Invalid(format!("API key not found; set {}API_KEY", ENV_PREFIX))
            })
    }

    pub fn weights(&self) -> SimilarityWeights {
        let defaults = SimilarityWeights::default();
        SimilarityWeights {
            genre: self.weight_genre.unwrap_or(defaults.genre),
            keywords: self.weight_keywords.unwrap_or(defaults.keywords),
            cast: self.weight_cast.unwrap_or(defaults.cast),
            rating: self.weight_rating.unwrap_or(defaults.rating),
            recency: self.weight_recency.unwrap_or(defaults.recency),
        }
    }

    /// Engine configuration. The reference year is fixed here, once.
    pub fn ranking_config(&self) -> RankingConfig {
        let reference_year = self
            .reference_year
            .unwrap_or_else(pipeline::features::current_year);
        RankingConfig {
            features: FeatureConfig {
                cast_limit: self.cast_limit,
                reference_year,
                recency_half_life: self.recency_half_life,
            },
            weights: self.weights(),
            min_rating: self.min_rating,
            release_window: self.release_window,
        }
    }

    /// Reject settings no engine can run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".to_string()));
        }
        if self.pool_limit == 0 {
            return Err(ConfigError::Invalid("pool_limit must be at least 1".to_string()));
        }
        if let Some(min_rating) = self.min_rating {
            if !(0.0..=data_loader::MAX_RATING).contains(&min_rating) {
                return Err(ConfigError::Invalid(format!(
                    "min_rating must be within 0-10, got {}",
                    min_rating
                )));
            }
        }
        RankingEngine::new(self.ranking_config())
            .map(|_| ())
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
