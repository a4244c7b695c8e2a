use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
};

/// Exact-title lookup into the movie table
///
/// Matching is exact-string: no case folding or fuzzy matching. When several
/// rows share a title the first row wins; the number of shadowed rows is
/// logged when the index is built.
#[derive(Debug, Clone, Default)]
pub struct TitleResolver {
    index: HashMap<String, usize>,
    duplicates: usize,
}

impl TitleResolver {
    pub fn new(movies: &[Movie]) -> Self {
        let mut index = HashMap::with_capacity(movies.len());
        let mut duplicates = 0;

        for (row, movie) in movies.iter().enumerate() {
            if index.contains_key(&movie.title) {
                duplicates += 1;
                tracing::debug!(title = %movie.title, row, "Duplicate title shadowed by earlier row");
            } else {
                index.insert(movie.title.clone(), row);
            }
        }

        if duplicates > 0 {
            tracing::warn!(
                duplicates,
                "Movie table contains duplicate titles; only the first occurrence is reachable"
            );
        }

        Self { index, duplicates }
    }

    /// Row index of the first movie titled exactly `title`
    pub fn resolve(&self, title: &str) -> AppResult<usize> {
        self.index
            .get(title)
            .copied()
            .ok_or_else(|| AppError::TitleNotFound(title.to_string()))
    }

    /// Rows whose title was shadowed by an earlier row
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }
}
