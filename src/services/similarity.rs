use std::cmp::Ordering;

use crate::error::{AppError, AppResult};
use crate::services::vectorizer::CountVector;

/// Dense, symmetric all-pairs cosine similarity matrix
///
/// Row and column `i` correspond to row `i` of the movie table the vectors
/// were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    scores: Vec<f64>,
}

/// Scores are rounded to this many units per 1.0, so mathematically equal
/// ratios share one bit pattern and ties resolve by index.
const SCORE_SCALE: f64 = 1e12;

/// Cosine similarity of two count vectors; 0.0 when either is all-zero
pub fn cosine_similarity(a: &CountVector, b: &CountVector) -> f64 {
    let norms = a.norm_squared() as f64 * b.norm_squared() as f64;
    if norms == 0.0 {
        return 0.0;
    }
    let score = (a.dot(b) as f64 / norms.sqrt()).min(1.0);
    (score * SCORE_SCALE).round() / SCORE_SCALE
}

impl SimilarityMatrix {
    /// Computes every pairwise similarity once
    pub fn build(vectors: &[CountVector]) -> Self {
        let n = vectors.len();
        let mut scores = vec![0.0; n * n];

        for i in 0..n {
            scores[i * n + i] = if vectors[i].is_zero() { 0.0 } else { 1.0 };
            for j in (i + 1)..n {
                let score = cosine_similarity(&vectors[i], &vectors[j]);
                scores[i * n + j] = score;
                scores[j * n + i] = score;
            }
        }

        Self { n, scores }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.scores[i * self.n + j])
        } else {
            None
        }
    }

    pub fn row(&self, index: usize) -> AppResult<&[f64]> {
        if index >= self.n {
            return Err(AppError::IndexOutOfRange {
                index,
                len: self.n,
            });
        }
        Ok(&self.scores[index * self.n..(index + 1) * self.n])
    }

    /// The `k` rows most similar to `query`, with their scores
    ///
    /// Sorted by descending score, ties by ascending index. The query row
    /// itself is never returned.
    pub fn top_k_scored(&self, query: usize, k: usize) -> AppResult<Vec<(usize, f64)>> {
        let row = self.row(query)?;

        let mut ranked: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(index, _)| index != query)
            .collect();
        ranked.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });
        ranked.truncate(k);

        Ok(ranked)
    }

    /// Indices of the `k` rows most similar to `query`
    pub fn top_k(&self, query: usize, k: usize) -> AppResult<Vec<usize>> {
        Ok(self
            .top_k_scored(query, k)?
            .into_iter()
            .map(|(index, _)| index)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stopwords::StopWords;
    use crate::services::vectorizer::CountVectorizer;

    fn matrix_for(docs: &[&str]) -> SimilarityMatrix {
        let mut vectorizer = CountVectorizer::new().with_stop_words(StopWords::none());
        let vectors = vectorizer.fit_transform(docs).unwrap();
        SimilarityMatrix::build(&vectors)
    }

    #[test]
    fn test_worked_example() {
        let matrix = matrix_for(&["x y", "x y", "z"]);
        assert_eq!(matrix.get(0, 1), Some(1.0));
        assert_eq!(matrix.get(0, 2), Some(0.0));
        assert_eq!(matrix.top_k(0, 2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let matrix = matrix_for(&[
            "action space alien",
            "space station drama",
            "romance drama",
            "alien alien horror",
        ]);

        for i in 0..matrix.len() {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..matrix.len() {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
                let score = matrix.get(i, j).unwrap();
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }

    #[test]
    fn test_partial_overlap_score() {
        // [1,1,0] vs [0,1,1]: 1 / (sqrt2 * sqrt2)
        let matrix = matrix_for(&["aa bb", "bb cc"]);
        let score = matrix.get(0, 1).unwrap();
        assert!((score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let mut vectorizer = CountVectorizer::new();
        // "the" is a stop word, so the second document has no terms
        let vectors = vectorizer.fit_transform(&["space opera", "the"]).unwrap();
        let matrix = SimilarityMatrix::build(&vectors);

        assert_eq!(matrix.get(1, 1), Some(0.0));
        assert_eq!(matrix.get(0, 1), Some(0.0));
        assert!(!matrix.get(0, 1).unwrap().is_nan());
    }

    #[test]
    fn test_top_k_sorted_desc_with_index_tie_break() {
        // rows 1, 2 and 3 tie against row 0; row 4 scores highest
        let matrix = matrix_for(&["aa bb", "aa cc", "aa dd", "aa ee", "aa bb bb"]);
        let ranked = matrix.top_k_scored(0, 5).unwrap();

        let indices: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![4, 1, 2, 3]);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn test_equal_ratios_tie_break_by_index() {
        // [1,1] against [1,0] and [3,0]: both 1/sqrt(2), computed from different sums
        let matrix = matrix_for(&["aa bb", "aa", "aa aa aa"]);
        assert_eq!(matrix.get(0, 1), matrix.get(0, 2));
        assert_eq!(matrix.top_k(0, 2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_top_k_excludes_query_even_on_ties() {
        let matrix = matrix_for(&["aa", "aa", "aa"]);
        assert_eq!(matrix.top_k(1, 5).unwrap(), vec![0, 2]);
        assert_eq!(matrix.top_k(2, 1).unwrap(), vec![0]);
    }

    #[test]
    fn test_top_k_returns_fewer_for_small_corpus() {
        let matrix = matrix_for(&["aa", "bb"]);
        assert_eq!(matrix.top_k(0, 5).unwrap(), vec![1]);

        let matrix = matrix_for(&["aa"]);
        assert!(matrix.top_k(0, 5).unwrap().is_empty());
    }

    #[test]
    fn test_top_k_out_of_range() {
        let matrix = matrix_for(&["aa", "bb"]);
        let result = matrix.top_k(2, 5);
        assert!(matches!(
            result,
            Err(AppError::IndexOutOfRange { index: 2, len: 2 })
        ));
    }
}
