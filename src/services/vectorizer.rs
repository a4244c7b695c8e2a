//! Bag-of-words count vectorizer.
//!
//! Fits a vocabulary of the most frequent non-stop-word terms over the whole
//! corpus, then maps each document onto a count vector over that vocabulary.
//! Vocabulary selection ranks terms by total corpus frequency (descending),
//! breaking ties lexicographically, and columns are assigned in lexicographic
//! order of the kept terms. Both orders are total, so a fixed corpus always
//! produces identical vectors.

use std::collections::{BTreeMap, HashMap};

use regex::Regex;

use crate::error::{AppError, AppResult};
use crate::services::stopwords::StopWords;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// Sparse integer count vector of fixed dimensionality
///
/// Entries are `(column, count)` pairs with strictly increasing columns and
/// non-zero counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountVector {
    dim: usize,
    entries: Vec<(usize, u32)>,
}

impl CountVector {
    fn from_counts(dim: usize, counts: BTreeMap<usize, u32>) -> Self {
        Self {
            dim,
            entries: counts.into_iter().collect(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dense view of the vector
    pub fn to_dense(&self) -> Vec<u32> {
        let mut dense = vec![0; self.dim];
        for &(column, count) in &self.entries {
            dense[column] = count;
        }
        dense
    }

    /// Squared Euclidean norm
    pub fn norm_squared(&self) -> u64 {
        self.entries
            .iter()
            .map(|&(_, c)| u64::from(c) * u64::from(c))
            .sum()
    }

    /// Dot product via a merge over the sorted entries
    pub fn dot(&self, other: &CountVector) -> u64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0u64;
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, va) = self.entries[i];
            let (cb, vb) = other.entries[j];
            if ca == cb {
                sum += u64::from(va) * u64::from(vb);
                i += 1;
                j += 1;
            } else if ca < cb {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }
}

/// Count vectorizer with a frequency-capped vocabulary
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    max_features: usize,
    stop_words: StopWords,
    token_pattern: Regex,
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CountVectorizer {
    /// English stop words, `DEFAULT_MAX_FEATURES` terms
    pub fn new() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            stop_words: StopWords::english(),
            // Unicode word runs; the pattern is a literal and always compiles.
            token_pattern: Regex::new(r"\w+").expect("valid token pattern"),
            vocabulary: HashMap::new(),
            terms: Vec::new(),
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Vocabulary terms in column order
    pub fn vocabulary(&self) -> &[String] {
        &self.terms
    }

    pub fn vocabulary_size(&self) -> usize {
        self.terms.len()
    }

    /// Column assigned to `term`, if it made the vocabulary
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    fn tokenize<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.token_pattern
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .filter(|t| !self.stop_words.contains(t))
    }

    /// Learns the vocabulary from `documents`
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> AppResult<()> {
        if documents.is_empty() {
            return Err(AppError::EmptyCorpus);
        }

        let mut term_freq: HashMap<String, u64> = HashMap::new();
        for doc in documents {
            for token in self.tokenize(doc.as_ref()) {
                *term_freq.entry(token).or_insert(0) += 1;
            }
        }

        if term_freq.is_empty() {
            return Err(AppError::EmptyVocabulary);
        }

        let mut ranked: Vec<(String, u64)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        self.vocabulary = terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.clone(), column))
            .collect();
        self.terms = terms;

        tracing::debug!(
            documents = documents.len(),
            vocabulary = self.terms.len(),
            "Vectorizer vocabulary fitted"
        );

        Ok(())
    }

    /// Maps one document onto the fitted vocabulary
    pub fn transform(&self, document: &str) -> CountVector {
        let mut counts = BTreeMap::new();
        for token in self.tokenize(document) {
            if let Some(&column) = self.vocabulary.get(&token) {
                *counts.entry(column).or_insert(0u32) += 1;
            }
        }
        CountVector::from_counts(self.terms.len(), counts)
    }

    /// Fits the vocabulary, then vectorizes every document in order
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> AppResult<Vec<CountVector>> {
        self.fit(documents)?;
        Ok(documents
            .iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect())
    }
}
