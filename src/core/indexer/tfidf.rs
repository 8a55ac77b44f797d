//! TF-IDF vector space over chunks.
//!
//! Analysis: lowercase, tokens are runs of two or more word
//! characters, features are n-grams of 1..=`max_ngram` consecutive
//! tokens. Weights are raw term counts times the smoothed inverse
//! document frequency `ln((1 + n) / (1 + df)) + 1`, and every vector
//! is scaled to unit L2 length when it is produced.

use crate::core::error::{ColepsError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Default largest n-gram (unigrams and bigrams).
pub const DEFAULT_MAX_NGRAM: usize = 2;

/// Sparse vector as `(dimension, weight)` pairs sorted by dimension.
pub type SparseVector = Vec<(usize, f64)>;

/// Extract n-gram features from text.
pub fn analyze(text: &str, max_ngram: usize) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: Vec<&str> = TOKEN.find_iter(&lowered).map(|m| m.as_str()).collect();

    let mut features = Vec::new();
    for n in 1..=max_ngram.max(1) {
        if tokens.len() < n {
            break;
        }
        for window in tokens.windows(n) {
            features.push(window.join(" "));
        }
    }
    features
}

/// Dot product of two sparse vectors.
pub fn dot(a: &[(usize, f64)], b: &[(usize, f64)]) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// Fitted vocabulary and IDF weights.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    max_ngram: usize,
}

impl VectorSpace {
    /// Fit on `documents`, returning the space and one vector per
    /// document in input order.
    ///
    /// Fails when no document yields a single feature.
    pub fn fit(documents: &[&str], max_ngram: usize) -> Result<(Self, Vec<SparseVector>)> {
        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| analyze(d, max_ngram)).collect();

        // Sorted vocabulary keeps dimensions stable across rebuilds
        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for features in &analyzed {
            let unique: HashSet<&str> = features.iter().map(String::as_str).collect();
            for feature in unique {
                *doc_freq.entry(feature).or_insert(0) += 1;
            }
        }

        if doc_freq.is_empty() {
            return Err(ColepsError::IndexingFailed(
                "empty vocabulary; documents contain no indexable words".to_string(),
            ));
        }

        let n_docs = documents.len() as f64;
        let mut vocabulary = HashMap::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (dim, (feature, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(feature.to_string(), dim);
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }

        let space = Self {
            vocabulary,
            idf,
            max_ngram,
        };
        let vectors = analyzed.iter().map(|f| space.weigh(f)).collect();
        Ok((space, vectors))
    }

    /// Project text into this space. Unknown features are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&analyze(text, self.max_ngram))
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.vocabulary.contains_key(feature)
    }

    fn weigh(&self, features: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for feature in features {
            if let Some(&dim) = self.vocabulary.get(feature) {
                *counts.entry(dim).or_insert(0.0) += 1.0;
            }
        }

        let mut vector: SparseVector = counts
            .into_iter()
            .map(|(dim, tf)| (dim, tf * self.idf[dim]))
            .collect();

        let norm = vector.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in vector.iter_mut() {
                *w /= norm;
            }
        }
        vector
    }
}
