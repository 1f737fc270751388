//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod minimum_rating;
pub mod release_window;
pub mod seed_exclusion;

// Re-export for convenience
pub use minimum_rating::MinimumRatingFilter;
pub use release_window::ReleaseWindowFilter;
pub use seed_exclusion::SeedExclusionFilter;
