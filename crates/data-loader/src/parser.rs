//! Reading and writing the JSON dataset file.
//!
//! The dataset is a JSON array of `RawMovie` objects:
//!
//! ```json
//! [
//!   {
//!     "id": 1375666,
//!     "title": "Inception",
//!     "genres": ["Action", "Adventure", "Sci-Fi"],
//!     "cast": ["Leonardo DiCaprio", "Joseph Gordon-Levitt"],
//!     "keywords": ["Christopher Nolan"],
//!     "year": 2010,
//!     "rating": 8.8
//!   }
//! ]
//! ```
//!
//! Every entry goes through `MovieRecord::from_raw`, so a loaded dataset is
//! already defaulted and ready for ranking.

use crate::error::{DataLoadError, Result};
use crate::types::{DataQuality, MovieRecord, RawMovie};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Open a file, mapping "not found" to a dedicated error
fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

/// Parse a dataset from any JSON string.
///
/// `source` names the origin in error messages.
pub fn parse_dataset(json: &str, source: &str) -> Result<Vec<MovieRecord>> {
    let raw: Vec<RawMovie> = serde_json::from_str(json)?;
    validate_entries(raw, source)
}

/// Load the dataset file at `path`
pub fn load_dataset(path: &Path) -> Result<Vec<MovieRecord>> {
    let reader = BufReader::new(open(path)?);
    let raw: Vec<RawMovie> = serde_json::from_reader(reader)?;
    let records = validate_entries(raw, &path.display().to_string())?;
    info!(path = %path.display(), count = records.len(), "Dataset loaded");
    Ok(records)
}

/// Save records to `path` as pretty-printed JSON, overwriting any existing file
pub fn save_dataset(path: &Path, records: &[MovieRecord]) -> Result<()> {
    let raw: Vec<RawMovie> = records.iter().map(MovieRecord::to_raw).collect();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &raw)?;
    writer.flush()?;
    info!(path = %path.display(), count = records.len(), "Dataset saved");
    Ok(())
}

fn validate_entries(raw: Vec<RawMovie>, source: &str) -> Result<Vec<MovieRecord>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let (record, quality) =
                MovieRecord::from_raw(entry).map_err(|e| DataLoadError::InvalidDatasetEntry {
                    file: source.to_string(),
                    index,
                    reason: e.to_string(),
                })?;
            report_quality(&record, &quality);
            Ok(record)
        })
        .collect()
}

/// Log defaulted fields. Missing data never aborts loading.
pub fn report_quality(record: &MovieRecord, quality: &DataQuality) {
    if !quality.is_complete() {
        warn!(
            movie_id = record.id,
            title = %record.title,
            issues = ?quality.issues,
            "Incomplete movie data, defaults applied"
        );
    }
}
