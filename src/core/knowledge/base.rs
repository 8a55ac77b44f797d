//! Curated question/answer table with exact and fuzzy lookup.

use crate::core::knowledge::stats::QueryStatistics;
use crate::core::text::{normalize, similarity_ratio, NormalizedText};
use std::collections::HashMap;

/// Default fuzzy cutoff.
pub const DEFAULT_FUZZY_CUTOFF: f64 = 0.60;

/// A knowledge base hit.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeMatch {
    /// Canonical question that matched
    pub question: NormalizedText,

    /// Curated answer
    pub answer: String,

    /// Similarity ratio (1.0 for exact hits)
    pub ratio: f64,
}

/// Normalized question to answer table.
///
/// Iteration follows insertion order. Re-inserting an existing key
/// replaces its answer but keeps its original position, which is the
/// order fuzzy lookup uses to break ties.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<(NormalizedText, String)>,
    positions: HashMap<NormalizedText, usize>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw question, normalizing it. Blank questions are
    /// ignored.
    pub fn insert(&mut self, question: &str, answer: impl Into<String>) {
        let key = normalize(question);
        if key.is_empty() {
            tracing::warn!("Ignoring knowledge base entry with blank question");
            return;
        }

        let answer = answer.into();
        match self.positions.get(&key) {
            Some(&pos) => {
                tracing::debug!("Duplicate knowledge base key '{}', keeping last answer", key);
                self.entries[pos].1 = answer;
            }
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, answer));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, question: &NormalizedText) -> Option<&str> {
        self.positions
            .get(question)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedText, &str)> {
        self.entries.iter().map(|(q, a)| (q, a.as_str()))
    }

    /// Exact lookup; records a hit on success.
    pub fn lookup_exact(
        &self,
        message: &NormalizedText,
        stats: &QueryStatistics,
    ) -> Option<KnowledgeMatch> {
        let answer = self.get(message)?;
        stats.record(message);
        Some(KnowledgeMatch {
            question: message.clone(),
            answer: answer.to_string(),
            ratio: 1.0,
        })
    }

    /// Best key whose similarity ratio reaches `cutoff`.
    ///
    /// Scans every key; on equal ratios the key encountered first in
    /// iteration order is kept.
    pub fn closest(&self, message: &NormalizedText, cutoff: f64) -> Option<KnowledgeMatch> {
        let mut best: Option<(usize, f64)> = None;
        for (pos, (question, _)) in self.entries.iter().enumerate() {
            let ratio = similarity_ratio(question.as_str(), message.as_str());
            if ratio < cutoff {
                continue;
            }
            if best.map_or(true, |(_, best_ratio)| ratio > best_ratio) {
                best = Some((pos, ratio));
            }
        }

        best.map(|(pos, ratio)| {
            let (question, answer) = &self.entries[pos];
            KnowledgeMatch {
                question: question.clone(),
                answer: answer.clone(),
                ratio,
            }
        })
    }

    /// Fuzzy lookup; records a hit on the matched key.
    pub fn lookup_fuzzy(
        &self,
        message: &NormalizedText,
        cutoff: f64,
        stats: &QueryStatistics,
    ) -> Option<KnowledgeMatch> {
        let found = self.closest(message, cutoff)?;
        stats.record(&found.question);
        Some(found)
    }
}
