//! # Sources Crate
//!
//! Movie metadata providers: where seeds and candidate pools come from.
//!
//! ## Components
//!
//! ### MovieProvider trait
//! The boundary between the recommender and the outside world. The ranking
//! engine never sees HTTP, API keys or files; it receives `MovieRecord`s.
//!
//! ### CatalogProvider (local)
//! Serves a previously saved JSON dataset from memory. Candidate pools are
//! the movies sharing a genre with the seed.
//!
//! ### OmdbProvider (remote)
//! Looks titles up on the OMDb API. Candidate pools are explicit title
//! lists fetched concurrently.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CandidateCriteria, MovieProvider, OmdbProvider};
//!
//! let provider = OmdbProvider::new(api_key, sources::omdb::DEFAULT_OMDB_URL);
//! let seed = provider.fetch_movie_by_title("Inception").await?;
//! let pool = provider
//!     .fetch_candidate_pool(&CandidateCriteria::from_titles(["The Matrix", "Heat"]))
//!     .await?;
//! ```

// Public modules
pub mod provider;
pub mod catalog;
pub mod omdb;

// Re-export commonly used types
pub use provider::{CandidateCriteria, MovieProvider, ProviderError, enrich_dataset, DEFAULT_POOL_LIMIT};
pub use catalog::CatalogProvider;
pub use omdb::{OmdbMovie, OmdbProvider};
