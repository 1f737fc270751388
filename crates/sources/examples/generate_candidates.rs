//! Example: Build a candidate pool for a seed title
//!
//! Run with: cargo run --package sources --example generate_candidates -- "Inception"
//!
//! This example shows how to:
//! 1. Load a saved movie dataset
//! 2. Look up a seed movie through the CatalogProvider
//! 3. Build a genre-based candidate pool
//! 4. Display the results

use data_loader::MovieCatalog;
use sources::{CandidateCriteria, CatalogProvider, MovieProvider, DEFAULT_POOL_LIMIT};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let title = std::env::args().nth(1).unwrap_or_else(|| "Inception".to_string());

    println!("=== ReelRecs Candidate Pool Example ===\n");

    // Load dataset
    println!("Loading movie dataset...");
    let start = Instant::now();
    let catalog = Arc::new(MovieCatalog::load_from_file(Path::new("movies_dataset.json"))?);
    println!("Loaded {} movies in {:?}\n", catalog.len(), start.elapsed());

    let provider = CatalogProvider::new(catalog);
    let Some(seed) = provider.fetch_movie_by_title(&title).await? else {
        anyhow::bail!("'{}' is not in the dataset", title);
    };
    println!("Seed: {} ({:?})", seed.title, seed.year);
    println!("  Genres: {:?}\n", seed.genres);

    let start = Instant::now();
    let pool = provider
        .fetch_candidate_pool(&CandidateCriteria::for_seed(&seed, DEFAULT_POOL_LIMIT))
        .await?;
    println!("Built pool of {} candidates in {:?}", pool.len(), start.elapsed());

    for (i, movie) in pool.iter().take(10).enumerate() {
        println!("  {}. {} [{:?}] rated {:.1}", i + 1, movie.title, movie.genres, movie.rating);
    }

    Ok(())
}
