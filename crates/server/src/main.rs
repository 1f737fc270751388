//! Simple harness for the recommendation orchestrator.
//!
//! Loads the local dataset named by `REEL_RECS_DATASET_PATH` and prints
//! recommendations for the title given as the first argument.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use data_loader::MovieCatalog;
use server::{RecommendationOrchestrator, RecommenderConfig};
use sources::CatalogProvider;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,sources=debug,pipeline=debug")
        .init();

    info!("Starting ReelRecs server harness");

    let config = RecommenderConfig::from_env()?;
    let title = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Inception".to_string());

    info!("Loading dataset from {}", config.dataset_path.display());
    let catalog = MovieCatalog::load_from_file(&config.dataset_path)
        .with_context(|| format!("loading {}", config.dataset_path.display()))?;
    let (movies, genres) = catalog.counts();
    info!("Dataset loaded: {} movies, {} genres", movies, genres);

    let provider = Arc::new(CatalogProvider::new(Arc::new(catalog)));
    let orchestrator = RecommendationOrchestrator::new(provider, &config)?;

    info!("Getting {} recommendations for '{}'", config.top_n, title);
    let result = orchestrator.recommend(&title, config.top_n).await?;

    info!("Received {} recommendations:", result.len());
    for (i, entry) in result.iter().enumerate() {
        info!(
            "{}. {} ({}) - Score: {:.3}",
            i + 1,
            entry.movie.title,
            entry
                .movie
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "????".to_string()),
            entry.score
        );
    }

    Ok(())
}
