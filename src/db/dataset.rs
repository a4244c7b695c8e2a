use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
};

/// Source of the movie table
pub trait MovieSource: Send + Sync {
    /// Loads every movie, in table order
    fn load_movies(&self) -> AppResult<Vec<Movie>>;

    /// Source name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Accepted on-disk layouts
///
/// Either a plain array of records, or the column-oriented export of a data
/// frame, keyed by column then by row label.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    Records(Vec<Movie>),
    Columns(ColumnTable),
}

#[derive(Debug, Deserialize)]
struct ColumnTable {
    #[serde(alias = "id")]
    movie_id: BTreeMap<String, i64>,
    title: BTreeMap<String, String>,
    tags: BTreeMap<String, String>,
}

impl ColumnTable {
    fn into_movies(self) -> AppResult<Vec<Movie>> {
        // Row labels are numeric; order rows by value, not by string.
        let mut rows = Vec::with_capacity(self.movie_id.len());
        for (label, movie_id) in self.movie_id {
            let row: u64 = label
                .parse()
                .map_err(|_| AppError::Dataset(format!("Invalid row label '{}'", label)))?;
            let title = self
                .title
                .get(&label)
                .ok_or_else(|| AppError::Dataset(format!("Row {} has no title", label)))?;
            let tags = self
                .tags
                .get(&label)
                .ok_or_else(|| AppError::Dataset(format!("Row {} has no tags", label)))?;
            rows.push((row, Movie::new(movie_id, title.clone(), tags.clone())));
        }

        if rows.len() != self.title.len() || rows.len() != self.tags.len() {
            return Err(AppError::Dataset(
                "Columns have different row counts".to_string(),
            ));
        }

        rows.sort_by_key(|(row, _)| *row);
        Ok(rows.into_iter().map(|(_, movie)| movie).collect())
    }
}

/// Parses a movie table from JSON text
pub fn parse_movies(json: &str) -> AppResult<Vec<Movie>> {
    let file: DatasetFile = serde_json::from_str(json)
        .map_err(|e| AppError::Dataset(format!("Failed to parse movie table: {}", e)))?;

    match file {
        DatasetFile::Records(movies) => Ok(movies),
        DatasetFile::Columns(table) => table.into_movies(),
    }
}

/// Movie table stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonMovieSource {
    path: PathBuf,
}

impl JsonMovieSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MovieSource for JsonMovieSource {
    fn load_movies(&self) -> AppResult<Vec<Movie>> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| {
            AppError::Dataset(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let movies = parse_movies(&json)?;

        tracing::info!(
            path = %self.path.display(),
            movies = movies.len(),
            "Loaded movie table"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
