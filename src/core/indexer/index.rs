//! Corpus snapshots and copy-on-write reindexing.
//!
//! An [`IndexSnapshot`] is immutable: documents, their chunks and
//! the vectors over those chunks always come from the same rebuild.
//! [`DocumentIndexer`] builds a complete new snapshot off to the side
//! on every ingestion and then swaps the shared pointer, so readers
//! see either the previous snapshot or the new one, never a mix.

use crate::core::error::{ColepsError, Result};
use crate::core::indexer::chunker::Chunker;
use crate::core::indexer::tfidf::{SparseVector, VectorSpace, DEFAULT_MAX_NGRAM};
use crate::core::types::{Chunk, IngestReport};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

/// An ingested document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Caller-supplied identifier (file name for documents on disk)
    pub id: String,

    /// Extracted plain text
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Vocabulary plus one vector per chunk.
#[derive(Debug, Clone)]
pub struct VectorIndex {
    pub space: VectorSpace,
    pub vectors: Vec<SparseVector>,
}

/// One consistent view of the corpus.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    documents: Vec<Document>,
    chunks: Vec<Chunk>,
    index: Option<VectorIndex>,
    generation: u64,
}

impl IndexSnapshot {
    /// Chunk the accumulated text of `documents` and fit a fresh
    /// index over all chunks.
    ///
    /// If the index cannot be fitted (no indexable words) the snapshot
    /// keeps its chunks but has no index, and searches find nothing.
    pub fn build(
        documents: Vec<Document>,
        chunker: &Chunker,
        max_ngram: usize,
        generation: u64,
    ) -> Self {
        let chunks = chunker.chunk_text(&accumulated_text(&documents));

        let index = if chunks.is_empty() {
            None
        } else {
            let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
            match VectorSpace::fit(&texts, max_ngram) {
                Ok((space, vectors)) => Some(VectorIndex { space, vectors }),
                Err(e) => {
                    tracing::warn!("Vector index not built: {}", e);
                    None
                }
            }
        };

        Self {
            documents,
            chunks,
            index,
            generation,
        }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn index(&self) -> Option<&VectorIndex> {
        self.index.as_ref()
    }

    pub fn is_indexed(&self) -> bool {
        self.index.is_some()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.index.as_ref().map_or(0, |i| i.space.vocabulary_len())
    }

    /// Number of rebuilds that led to this snapshot.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// All document text, in ingestion order, joined by newlines.
    pub fn accumulated_text(&self) -> String {
        accumulated_text(&self.documents)
    }
}

fn accumulated_text(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Owns the live snapshot and rebuilds it on ingestion.
pub struct DocumentIndexer {
    chunker: Chunker,
    max_ngram: usize,
    current: RwLock<Arc<IndexSnapshot>>,
    // Serializes rebuilds so concurrent ingestions do not drop documents
    ingest_lock: Mutex<()>,
}

impl Default for DocumentIndexer {
    fn default() -> Self {
        Self::new(Chunker::default(), DEFAULT_MAX_NGRAM)
    }
}

impl DocumentIndexer {
    pub fn new(chunker: Chunker, max_ngram: usize) -> Self {
        Self {
            chunker,
            max_ngram: max_ngram.max(1),
            current: RwLock::new(Arc::new(IndexSnapshot::default())),
            ingest_lock: Mutex::new(()),
        }
    }

    /// The snapshot queries should use.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Add documents and rebuild the whole corpus once.
    ///
    /// Blank documents are skipped; if nothing remains the call fails
    /// and the live snapshot is left untouched.
    pub fn ingest(&self, documents: Vec<Document>) -> Result<IngestReport> {
        let _rebuild = self.ingest_lock.lock().unwrap_or_else(|e| e.into_inner());
        let start = Instant::now();

        let accepted: Vec<Document> = documents
            .into_iter()
            .filter(|doc| {
                let blank = doc.text.trim().is_empty();
                if blank {
                    tracing::warn!("Skipping empty document '{}'", doc.id);
                }
                !blank
            })
            .collect();

        if accepted.is_empty() {
            return Err(ColepsError::IngestFailed(
                "document contains no text".to_string(),
            ));
        }

        let previous = self.snapshot();
        let documents_added = accepted.len();
        let characters_added = accepted.iter().map(|d| d.text.chars().count()).sum();

        let mut all_documents = previous.documents.clone();
        all_documents.extend(accepted);

        let next = IndexSnapshot::build(
            all_documents,
            &self.chunker,
            self.max_ngram,
            previous.generation + 1,
        );
        let report = IngestReport {
            documents_added,
            characters_added,
            total_documents: next.documents.len(),
            chunks: next.chunks.len(),
            vocabulary: next.vocabulary_len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        {
            let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
            *current = Arc::new(next);
        }

        tracing::info!(
            "Reindexed corpus: {} documents, {} chunks, {} terms in {}ms",
            report.total_documents,
            report.chunks,
            report.vocabulary,
            report.duration_ms
        );

        Ok(report)
    }
}
