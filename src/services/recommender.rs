use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::Movie,
    services::{
        similarity::SimilarityMatrix, title_resolver::TitleResolver, vectorizer::CountVectorizer,
    },
};

/// Immutable recommendation model
///
/// Owns the movie table together with everything derived from it, so the
/// similarity matrix can never drift out of alignment with the rows it
/// describes. Built once, then shared read-only.
#[derive(Debug)]
pub struct Recommender {
    movies: Vec<Movie>,
    resolver: TitleResolver,
    similarity: SimilarityMatrix,
    vocabulary_size: usize,
}

impl Recommender {
    /// Vectorizes the tags and computes the all-pairs similarity matrix
    pub fn build(movies: Vec<Movie>, max_features: usize) -> AppResult<Self> {
        let started = Instant::now();

        let mut vectorizer = CountVectorizer::new().with_max_features(max_features);
        let tags: Vec<&str> = movies.iter().map(|m| m.tags.as_str()).collect();
        let vectors = vectorizer.fit_transform(&tags)?;
        let similarity = SimilarityMatrix::build(&vectors);
        let resolver = TitleResolver::new(&movies);

        tracing::info!(
            movies = movies.len(),
            vocabulary = vectorizer.vocabulary_size(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Similarity model built"
        );

        Ok(Self {
            vocabulary_size: vectorizer.vocabulary_size(),
            movies,
            resolver,
            similarity,
        })
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie(&self, index: usize) -> AppResult<&Movie> {
        self.movies.get(index).ok_or(AppError::IndexOutOfRange {
            index,
            len: self.movies.len(),
        })
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn resolve(&self, title: &str) -> AppResult<usize> {
        self.resolver.resolve(title)
    }

    /// The `k` movies most similar to `title`, as `(row, score)` pairs
    pub fn similar_to(&self, title: &str, k: usize) -> AppResult<Vec<(usize, f64)>> {
        let index = self.resolve(title)?;
        self.similarity.top_k_scored(index, k)
    }

    /// Titles containing `query`, case-insensitive, in table order
    pub fn search_titles(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        self.movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Movie> {
        vec![
            Movie::new(1, "A", "x y"),
            Movie::new(2, "B", "x y"),
            Movie::new(3, "C", "z"),
        ]
    }

    #[test]
    fn test_worked_example() {
        let recommender = Recommender::build(sample(), 5000).unwrap();
        let similar = recommender.similar_to("A", 2).unwrap();

        assert_eq!(similar, vec![(1, 1.0), (2, 0.0)]);
        assert_eq!(recommender.movie(similar[0].0).unwrap().title, "B");
        assert_eq!(recommender.vocabulary_size(), 3);
    }

    #[test]
    fn test_matrix_aligned_with_table() {
        let recommender = Recommender::build(sample(), 5000).unwrap();
        assert_eq!(recommender.similarity().len(), recommender.movies().len());
    }

    #[test]
    fn test_unknown_title() {
        let recommender = Recommender::build(sample(), 5000).unwrap();
        assert!(matches!(
            recommender.similar_to("D", 5),
            Err(AppError::TitleNotFound(_))
        ));
    }

    #[test]
    fn test_empty_table_fails() {
        assert!(matches!(
            Recommender::build(vec![], 5000),
            Err(AppError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_search_titles_case_insensitive() {
        let movies = vec![
            Movie::new(1, "The Dark Knight", "batman"),
            Movie::new(2, "Dark Shadows", "vampire"),
            Movie::new(3, "Avatar", "pandora"),
        ];
        let recommender = Recommender::build(movies, 5000).unwrap();
        let found: Vec<&str> = recommender
            .search_titles("dark")
            .iter()
            .map(|m| m.title.as_str())
            .collect();
        assert_eq!(found, vec!["The Dark Knight", "Dark Shadows"]);
    }
}
