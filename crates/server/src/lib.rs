//! Server crate for the ReelRecs recommendation engine.
//!
//! This crate contains the configuration layer and the orchestrator that
//! coordinates providers and the ranking engine.

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::{ConfigError, RecommenderConfig, ENV_PREFIX};
pub use error::RecommendError;
pub use orchestrator::RecommendationOrchestrator;
