//! Optional lemmatization before normalization.
//!
//! Lemmatization is an enrichment: when no lemmatizer is configured,
//! or the configured one has nothing to offer, the resolver falls back
//! to plain normalization.

use crate::core::error::{ColepsError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Word to lemma substitution.
pub trait Lemmatizer: Send + Sync {
    /// Rewrite `text` with lemmas, or `None` if the lemmatizer cannot
    /// handle it.
    fn lemmatize(&self, text: &str) -> Option<String>;
}

/// Dictionary lemmatizer backed by a `{word: lemma}` JSON table.
#[derive(Debug, Clone, Default)]
pub struct LemmaTable {
    lemmas: HashMap<String, String>,
}

impl LemmaTable {
    pub fn new(lemmas: HashMap<String, String>) -> Self {
        let lemmas = lemmas
            .into_iter()
            .map(|(word, lemma)| (word.to_lowercase(), lemma.to_lowercase()))
            .collect();
        Self { lemmas }
    }

    /// Load a table from a JSON object file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            ColepsError::ConfigError(format!("Failed to read lemma table {path:?}: {e}"))
        })?;
        let lemmas: HashMap<String, String> = serde_json::from_str(&contents)?;
        Ok(Self::new(lemmas))
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

impl Lemmatizer for LemmaTable {
    fn lemmatize(&self, text: &str) -> Option<String> {
        if self.lemmas.is_empty() {
            return None;
        }

        let words: Vec<String> = text
            .split_whitespace()
            .map(|word| {
                let core = word.trim_matches(|c: char| !c.is_alphanumeric());
                match self.lemmas.get(&core.to_lowercase()) {
                    Some(lemma) if !core.is_empty() => word.replacen(core, lemma, 1),
                    _ => word.to_string(),
                }
            })
            .collect();

        Some(words.join(" "))
    }
}
