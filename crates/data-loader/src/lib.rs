//! # Data Loader Crate
//!
//! Movie metadata types and the JSON dataset store.
//!
//! ## Main Components
//!
//! - **types**: `RawMovie` (provider payload), `MovieRecord` (validated value),
//!   `MovieCatalog` (in-memory index)
//! - **parser**: load/save the JSON dataset file
//! - **index**: build, validate and search a `MovieCatalog`
//! - **error**: error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load_from_file(Path::new("movies_dataset.json"))?;
//! let inception = catalog.get_by_title("inception").unwrap();
//! println!("{} ({:?}) rated {}", inception.title, inception.year, inception.rating);
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use index::MatchKind;
pub use types::{
    DataIssue,
    DataQuality,
    MovieCatalog,
    MovieId,
    MovieRecord,
    RawMovie,
    DEFAULT_RATING,
    MAX_RATING,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: MovieId, title: &str) -> RawMovie {
        RawMovie {
            id: Some(id),
            title: Some(title.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_catalog_creation() {
        let catalog = MovieCatalog::new();
        assert_eq!(catalog.counts(), (0, 0));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_raw_complete_record() {
        let input = RawMovie {
            genres: Some(vec![" Sci-Fi ".to_string(), "Thriller".to_string(), "".to_string()]),
            cast: Some(vec!["Leonardo DiCaprio".to_string(), "  ".to_string()]),
            keywords: Some(vec!["dream".to_string()]),
            year: Some(2010),
            rating: Some(8.8),
            ..raw(1, " Inception ")
        };

        let (movie, quality) = MovieRecord::from_raw(input).unwrap();
        assert!(quality.is_complete());
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.genres.len(), 2);
        assert!(movie.genres.contains("Sci-Fi"));
        assert_eq!(movie.cast, vec!["Leonardo DiCaprio".to_string()]);
        assert_eq!(movie.year, Some(2010));
    }

    #[test]
    fn test_from_raw_defaults_missing_fields() {
        let (movie, quality) = MovieRecord::from_raw(raw(2, "Sparse")).unwrap();

        assert_eq!(movie.rating, DEFAULT_RATING);
        assert!(movie.genres.is_empty());
        assert!(movie.cast.is_empty());
        assert_eq!(movie.year, None);
        assert_eq!(
            quality.issues,
            vec![
                DataIssue::MissingGenres,
                DataIssue::MissingCast,
                DataIssue::MissingKeywords,
                DataIssue::MissingYear,
                DataIssue::MissingRating,
            ]
        );
    }

    #[test]
    fn test_from_raw_clamps_rating() {
        let input = RawMovie {
            rating: Some(12.5),
            ..raw(3, "Overrated")
        };
        let (movie, quality) = MovieRecord::from_raw(input).unwrap();
        assert_eq!(movie.rating, MAX_RATING);
        assert!(quality.issues.contains(&DataIssue::RatingOutOfRange(12.5)));

        let input = RawMovie {
            rating: Some(f32::NAN),
            ..raw(4, "Not a number")
        };
        let (movie, _) = MovieRecord::from_raw(input).unwrap();
        assert_eq!(movie.rating, DEFAULT_RATING);
    }

    #[test]
    fn test_from_raw_requires_id_and_title() {
        let no_id = RawMovie {
            title: Some("Nameless".to_string()),
            ..Default::default()
        };
        assert!(MovieRecord::from_raw(no_id).is_err());
        assert!(MovieRecord::from_raw(raw(5, "   ")).is_err());
    }

    #[test]
    fn test_insert_movie_replaces_in_place() {
        let mut catalog = MovieCatalog::new();
        catalog.insert_movie(MovieRecord::from_raw(raw(1, "First")).unwrap().0);
        catalog.insert_movie(MovieRecord::from_raw(raw(2, "Second")).unwrap().0);
        catalog.insert_movie(MovieRecord::from_raw(raw(1, "First (Director's Cut)")).unwrap().0);

        let titles: Vec<&str> = catalog.movies().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["First (Director's Cut)", "Second"]);
        assert!(catalog.get_by_title("first").is_none());
        assert_eq!(catalog.get_by_title("FIRST (director's cut)").map(|m| m.id), Some(1));
    }
}
