//! Sentence-window chunking.
//!
//! Text is split into sentences after `.`, `!` or `?` when followed
//! by whitespace; the punctuation stays with its sentence and the
//! whitespace run is dropped. Sentences are then grouped into
//! fixed-size, non-overlapping windows. All scanning is done on
//! `char_indices()` so boundaries always fall on valid UTF-8
//! character boundaries.
//!
//! # Example
//!
//! ```
//! use colepsbot::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(2);
//! let chunks = chunker.chunk_text("A. B. C. D.");
//!
//! let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
//! assert_eq!(texts, vec!["A. B.", "C. D."]);
//! ```

use crate::core::types::Chunk;

/// Default number of sentences per chunk.
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Split text into sentences.
///
/// Empty pieces (e.g. trailing whitespace after the last sentence)
/// are not returned.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let end = idx + ch.len_utf8();

        // Boundary only when whitespace follows
        let mut next_start = None;
        while let Some(&(ws_idx, ws)) = chars.peek() {
            if !ws.is_whitespace() {
                break;
            }
            chars.next();
            next_start = Some(ws_idx + ws.len_utf8());
        }

        if let Some(next_start) = next_start {
            if end > start {
                sentences.push(&text[start..end]);
            }
            start = next_start;
        }
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }

    sentences
}

/// Groups sentences into fixed-size windows.
#[derive(Debug, Clone)]
pub struct Chunker {
    /// Number of sentences per chunk
    window_size: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is 0.
    pub fn new(window_size: usize) -> Self {
        assert!(window_size > 0, "window_size must be > 0");
        Self { window_size }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Chunk text into non-overlapping sentence windows.
    ///
    /// Windows whose text is only whitespace are dropped; chunk
    /// indices stay sequential over the chunks that are kept.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        let sentences = split_sentences(text);
        let mut chunks = Vec::new();

        for (window_idx, window) in sentences.chunks(self.window_size).enumerate() {
            let joined = window.join(" ");
            if joined.trim().is_empty() {
                continue;
            }

            chunks.push(Chunk {
                text: joined,
                chunk_index: chunks.len(),
                first_sentence: window_idx * self.window_size,
                sentence_count: window.len(),
            });
        }

        chunks
    }
}

/// Chunk `text` with the given window size.
pub fn chunk(text: &str, window_size: usize) -> Vec<Chunk> {
    Chunker::new(window_size).chunk_text(text)
}
