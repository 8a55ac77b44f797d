//! Best-chunk retrieval over an index snapshot.

use crate::core::indexer::tfidf::dot;
use crate::core::indexer::IndexSnapshot;
use crate::core::types::SearchHit;

/// Default relevance floor; a best score at or below it is no match.
pub const DEFAULT_RELEVANCE_FLOOR: f64 = 0.1;

/// Scores a query against every chunk of a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SimilaritySearch {
    relevance_floor: f64,
}

impl Default for SimilaritySearch {
    fn default() -> Self {
        Self::new(DEFAULT_RELEVANCE_FLOOR)
    }
}

impl SimilaritySearch {
    pub fn new(relevance_floor: f64) -> Self {
        Self { relevance_floor }
    }

    pub fn relevance_floor(&self) -> f64 {
        self.relevance_floor
    }

    /// Best chunk for the raw query, or `None`.
    ///
    /// The query is vectorized with the snapshot's vocabulary and
    /// weights and scored by dot product against each chunk; the first
    /// chunk reaching the maximum wins. Returns `None` for an empty or
    /// unindexed corpus and when the best score does not exceed the
    /// relevance floor.
    pub fn search(&self, snapshot: &IndexSnapshot, query: &str) -> Option<SearchHit> {
        let index = snapshot.index()?;
        let query_vector = index.space.transform(query);
        if query_vector.is_empty() {
            tracing::debug!("Query shares no terms with the corpus");
            return None;
        }

        let mut best: Option<(usize, f64)> = None;
        for (pos, vector) in index.vectors.iter().enumerate() {
            let score = dot(&query_vector, vector);
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((pos, score));
            }
        }

        let (pos, score) = best?;
        if score <= self.relevance_floor {
            tracing::debug!(
                "Best chunk {} scored {:.3}, not above floor {}",
                pos,
                score,
                self.relevance_floor
            );
            return None;
        }

        let chunk = snapshot.chunks().get(pos)?.clone();
        Some(SearchHit { chunk, score })
    }
}
