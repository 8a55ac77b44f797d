//! Hit counters for knowledge base questions.

use crate::core::error::Result;
use crate::core::text::NormalizedText;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// Destination for statistics snapshots.
pub trait StatisticsSink: Send + Sync {
    fn save(&self, counts: &BTreeMap<String, u64>) -> Result<()>;
}

/// Question hit counters.
///
/// Only exact and fuzzy knowledge base hits are counted. Counters
/// never decrease and keys are never removed. Saves run outside the
/// counter lock; a snapshot older than the last one saved is dropped.
#[derive(Default)]
pub struct QueryStatistics {
    counts: Mutex<Counters>,
    sink: Option<Arc<dyn StatisticsSink>>,
    saved_version: Mutex<u64>,
}

#[derive(Default)]
struct Counters {
    map: BTreeMap<String, u64>,
    version: u64,
}

impl QueryStatistics {
    /// Start from previously persisted counts.
    pub fn with_counts(counts: BTreeMap<String, u64>) -> Self {
        Self {
            counts: Mutex::new(Counters {
                map: counts,
                version: 0,
            }),
            ..Self::default()
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn StatisticsSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn counters(&self) -> std::sync::MutexGuard<'_, Counters> {
        self.counts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Increment the counter of `question`.
    pub fn record(&self, question: &NormalizedText) {
        let (snapshot, version) = {
            let mut counters = self.counters();
            *counters.map.entry(question.as_str().to_string()).or_insert(0) += 1;
            counters.version += 1;
            match self.sink {
                Some(_) => (counters.map.clone(), counters.version),
                None => return,
            }
        };

        if let Some(sink) = &self.sink {
            let mut saved = self.saved_version.lock().unwrap_or_else(|e| e.into_inner());
            if version <= *saved {
                return;
            }
            match sink.save(&snapshot) {
                Ok(()) => *saved = version,
                Err(e) => tracing::warn!("Failed to persist statistics: {}", e),
            }
        }
    }

    pub fn count(&self, question: &str) -> u64 {
        self.counters().map.get(question).copied().unwrap_or(0)
    }

    /// Copy of all counters.
    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters().map.clone()
    }
}

impl std::fmt::Debug for QueryStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryStatistics")
            .field("counts", &self.snapshot())
            .field("persistent", &self.sink.is_some())
            .finish()
    }
}
