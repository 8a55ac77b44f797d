//! Document indexing module.
//!
//! Turns ingested documents into a searchable corpus:
//!
//! - Sentence-window chunking (UTF-8 safe, `char_indices()` based)
//! - TF-IDF vectors over unigrams and bigrams
//! - Immutable snapshots swapped atomically on every reindex
//!
//! Every ingestion rebuilds the whole corpus from the accumulated
//! text, so chunk and vector sets always describe the same documents.

pub mod chunker;
pub mod index;
pub mod tfidf;

pub use chunker::{split_sentences, Chunker, DEFAULT_WINDOW_SIZE};
pub use index::{Document, DocumentIndexer, IndexSnapshot, VectorIndex};
pub use tfidf::{VectorSpace, DEFAULT_MAX_NGRAM};
