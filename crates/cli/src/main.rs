use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{parser, MatchKind, MovieCatalog};
use pipeline::{RecommendationResult, ScoreBreakdown};
use server::{RecommendError, RecommendationOrchestrator, RecommenderConfig};
use sources::{enrich_dataset, CatalogProvider, OmdbProvider};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Titles fetched when `fetch` is run without `--title`
const DEFAULT_TITLES: &[&str] = &[
    "Inception",
    "The Matrix",
    "Interstellar",
    "The Dark Knight",
    "Pulp Fiction",
    "Forrest Gump",
    "The Shawshank Redemption",
    "Fight Club",
    "The Godfather",
    "The Godfather Part II",
    "The Lord of the Rings: The Fellowship of the Ring",
    "The Lord of the Rings: The Two Towers",
    "The Lord of the Rings: The Return of the King",
    "Star Wars: Episode IV - A New Hope",
    "Star Wars: Episode V - The Empire Strikes Back",
    "Star Wars: Episode VI - Return of the Jedi",
    "The Avengers",
    "Avengers: Endgame",
    "Iron Man",
    "Iron Man 2",
    "Iron Man 3",
    "Black Panther",
    "Captain America: The First Avenger",
    "Captain America: The Winter Soldier",
    "Captain America: Civil War",
    "Guardians of the Galaxy",
    "Guardians of the Galaxy Vol. 2",
    "Thor",
    "Thor: Ragnarok",
    "Spider-Man: Homecoming",
    "Spider-Man: Far From Home",
    "Doctor Strange",
    "Ant-Man",
    "Ant-Man and the Wasp",
    "The Lion King",
    "Aladdin",
    "Frozen",
    "Frozen II",
    "Beauty and the Beast",
    "Cinderella",
    "Mulan",
    "Toy Story",
    "Toy Story 2",
    "Toy Story 3",
    "Toy Story 4",
    "Finding Nemo",
    "Finding Dory",
    "Up",
    "Wall-E",
    "Coco",
    "Inside Out",
    "Soul",
];

/// ReelRecs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Content-based movie recommendations from OMDb metadata", long_about = None)]
struct Cli {
    /// Path to the JSON dataset (overrides REEL_RECS_DATASET_PATH)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch movie metadata from OMDb and save it as the dataset
    Fetch {
        /// Title to fetch; repeat for several (defaults to the built-in list)
        #[arg(long = "title")]
        titles: Vec<String>,

        /// Overwrite an existing dataset file
        #[arg(long)]
        force: bool,
    },

    /// Get movies similar to a seed title
    Recommend {
        /// Seed movie title (case-insensitive)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return (defaults to REEL_RECS_TOP_N)
        #[arg(long)]
        limit: Option<usize>,

        /// Show the per-dimension similarity behind each score
        #[arg(long)]
        explain: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Maximum number of results
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Prompt for titles and print recommendations until 'quit'
    Interactive,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = RecommenderConfig::from_env().context("Failed to load configuration")?;
    if let Some(dataset) = cli.dataset {
        config.dataset_path = dataset;
    }

    match cli.command {
        Commands::Fetch { titles, force } => handle_fetch(&config, titles, force).await?,
        Commands::Recommend {
            title,
            limit,
            explain,
        } => {
            let orchestrator = build_orchestrator(&config)?;
            let limit = limit.unwrap_or(config.top_n);
            handle_recommend(&orchestrator, &title, limit, explain).await?
        }
        Commands::Search { title, limit } => {
            let catalog = load_catalog(&config.dataset_path)?;
            handle_search(&catalog, &title, limit)
        }
        Commands::Interactive => {
            let orchestrator = build_orchestrator(&config)?;
            handle_interactive(&orchestrator, config.top_n).await?
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let catalog = Arc::new(load_catalog(&config.dataset_path)?);
            handle_benchmark(&config, catalog, requests, concurrent).await?
        }
    }

    Ok(())
}

/// Load the dataset written by `fetch`
fn load_catalog(path: &Path) -> Result<MovieCatalog> {
    if !path.exists() {
        bail!(
            "Dataset {} not found; run `reel-recs fetch` first",
            path.display()
        );
    }

    println!("Loading dataset from {}...", path.display());
    let start = Instant::now();
    let catalog = MovieCatalog::load_from_file(path).context("Failed to load movie dataset")?;
    println!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );
    Ok(catalog)
}

fn build_orchestrator(config: &RecommenderConfig) -> Result<RecommendationOrchestrator> {
    let catalog = Arc::new(load_catalog(&config.dataset_path)?);
    let provider = Arc::new(CatalogProvider::new(catalog));
    Ok(RecommendationOrchestrator::new(provider, config)?)
}

/// Handle the 'fetch' command
async fn handle_fetch(config: &RecommenderConfig, titles: Vec<String>, force: bool) -> Result<()> {
    let path = &config.dataset_path;
    if path.exists() && !force {
        println!(
            "{} Dataset {} already exists (use --force to refetch)",
            "•".yellow(),
            path.display()
        );
        return Ok(());
    }

    let titles = if titles.is_empty() {
        DEFAULT_TITLES.iter().map(|t| t.to_string()).collect()
    } else {
        titles
    };

    let provider = OmdbProvider::new(config.require_api_key()?, config.omdb_url.as_str())
        .with_max_concurrent(config.max_concurrent);

    println!("Fetching {} titles from OMDb...", titles.len());
    let start = Instant::now();
    let movies = enrich_dataset(&provider, &titles)
        .await
        .context("Failed to fetch movie metadata")?;
    info!("Fetched {} of {} titles", movies.len(), titles.len());

    parser::save_dataset(path, &movies)
        .with_context(|| format!("Failed to save dataset to {}", path.display()))?;
    println!(
        "{} Saved {} movies to {} in {:?}",
        "✓".green(),
        movies.len(),
        path.display(),
        start.elapsed()
    );
    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: &RecommendationOrchestrator,
    title: &str,
    limit: usize,
    explain: bool,
) -> Result<()> {
    let result = orchestrator.recommend(title, limit).await?;
    print_recommendations(title, &result, explain);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &MovieCatalog, title: &str, limit: usize) {
    let hits = catalog.search(title, limit);
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if hits.is_empty() {
        println!("  No movies found");
        return;
    }

    for (kind, movie) in hits {
        let marker = match kind {
            MatchKind::Exact => "=".green(),
            MatchKind::Substring => "~".normal(),
        };
        let genres = movie.genres.iter().cloned().collect::<Vec<_>>().join(", ");
        println!(
            "{} {}: {} ({}) [{}] rated {:.1}",
            marker,
            movie.id,
            movie.title,
            format_year(movie.year),
            genres,
            movie.rating
        );
    }
}

/// Handle the 'interactive' command
async fn handle_interactive(orchestrator: &RecommendationOrchestrator, limit: usize) -> Result<()> {
    let stdin = io::stdin();
    loop {
        print!("\nEnter a movie title (or 'quit' to exit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let title = line.trim();
        if title.is_empty() {
            println!("Please enter a movie title or 'quit' to exit.");
            continue;
        }
        if title.eq_ignore_ascii_case("quit") {
            break;
        }

        match orchestrator.recommend(title, limit).await {
            Ok(result) => print_recommendations(title, &result, false),
            Err(RecommendError::SeedNotFound { .. }) => {
                println!("{} Movie '{}' not found in the dataset.", "✗".red(), title)
            }
            Err(e) => println!("{} {}", "✗".red(), e),
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    config: &RecommenderConfig,
    catalog: Arc<MovieCatalog>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    if catalog.is_empty() {
        bail!("Dataset is empty");
    }

    let titles: Vec<String> = catalog.movies().map(|m| m.title.clone()).collect();
    let provider = Arc::new(CatalogProvider::new(catalog));
    let orchestrator = RecommendationOrchestrator::new(provider, config)?;
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));
    let top_n = config.top_n;

    let seeds: Vec<String> = (0..requests)
        .map(|_| titles[rand::random_range(0..titles.len())].clone())
        .collect();

    let start = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for seed in seeds {
        let orchestrator = orchestrator.clone();
        let permits = permits.clone();
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let started = Instant::now();
            match orchestrator.recommend(&seed, top_n).await {
                Ok(_) => {}
                // A seed with no related movies is a valid, empty answer
                Err(e) if e.is_invalid_argument() => {}
                Err(e) => return Err(e.into()),
            }
            Ok::<_, anyhow::Error>(started.elapsed())
        }));
    }

    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = start.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let percentile = |p: f64| {
        let index = ((timings.len() as f64 * p) as usize).min(timings.len() - 1);
        timings[index]
    };
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", requests, concurrent.max(1));
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn format_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string())
}

fn format_dimension(value: Option<f32>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

fn print_breakdown(breakdown: &ScoreBreakdown) {
    println!(
        "   genres {}  keywords {}  cast {}  rating {:.2}  recency {:.2}",
        format_dimension(breakdown.genre),
        format_dimension(breakdown.keywords),
        format_dimension(breakdown.cast),
        breakdown.rating,
        breakdown.recency
    );
}

/// Helper function to format and print recommendations
fn print_recommendations(title: &str, result: &RecommendationResult, explain: bool) {
    println!("{}", format!("Movies similar to '{}':", title).bold().blue());
    for (i, entry) in result.iter().enumerate() {
        let movie = &entry.movie;
        let genres = movie.genres.iter().cloned().collect::<Vec<_>>().join(", ");
        println!(
            "{}. {} ({}) [{}] - Score: {:.2}",
            (i + 1).to_string().green(),
            movie.title,
            format_year(movie.year),
            genres,
            entry.score
        );
        if explain {
            print_breakdown(&entry.breakdown);
            if let Some(plot) = &movie.plot {
                println!("   {}", plot.dimmed());
            }
        }
    }
}
