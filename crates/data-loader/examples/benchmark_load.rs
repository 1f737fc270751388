use data_loader::MovieCatalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("movies_dataset.json");

    println!("Loading movie dataset from {}...\n", path.display());

    let start = Instant::now();
    let catalog = MovieCatalog::load_from_file(path)
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let (movies, genres) = catalog.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Genres: {}", genres);
    println!("\nPerformance: {:.0} movies/second",
             movies as f64 / elapsed.as_secs_f64());
}
