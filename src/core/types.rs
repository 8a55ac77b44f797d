//! Core data types for ColepsBot.
//!
//! This module defines the records that cross the boundary between
//! the resolution pipeline and its collaborators: chunks, search hits,
//! answers and ingestion reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confidence attached to each resolution stage.
pub mod confidence {
    pub const NAME: f32 = 1.0;
    pub const INTENT: f32 = 1.0;
    pub const EXACT: f32 = 0.9;
    pub const FUZZY: f32 = 0.8;
    pub const DOCUMENT: f32 = 0.7;
    pub const NONE: f32 = 0.0;
}

/// A group of consecutive sentences from the ingested documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Sentences joined by a single space
    pub text: String,

    /// Position of the chunk in the corpus
    pub chunk_index: usize,

    /// Index of the first sentence in the accumulated text
    pub first_sentence: usize,

    /// Number of sentences in the chunk
    pub sentence_count: usize,
}

/// Best chunk for a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Matching chunk
    pub chunk: Chunk,

    /// Dot product of query and chunk vectors
    pub score: f64,
}

/// Which stage produced an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    /// Self-introduction captured
    Name,
    /// Scripted intent
    Intent,
    /// Exact knowledge base key
    Exact,
    /// Approximate knowledge base key
    Fuzzy,
    /// Document chunk retrieval
    Document,
    /// Section titles offered for a vague query
    Titles,
    /// Nothing matched
    Fallback,
}

impl MatchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchSource::Name => "name",
            MatchSource::Intent => "intent",
            MatchSource::Exact => "exact",
            MatchSource::Fuzzy => "fuzzy",
            MatchSource::Document => "document",
            MatchSource::Titles => "titles",
            MatchSource::Fallback => "fallback",
        }
    }
}

/// One resolved question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Question as typed by the user
    pub question: String,

    /// Reply text
    pub response: String,

    /// Stage confidence in [0, 1]
    pub confidence: f32,

    /// When the answer was produced
    pub timestamp: DateTime<Utc>,

    /// Stage that produced the reply
    pub source: MatchSource,
}

impl Answer {
    pub fn new(question: &str, response: impl Into<String>, source: MatchSource) -> Self {
        let confidence = match source {
            MatchSource::Name => confidence::NAME,
            MatchSource::Intent => confidence::INTENT,
            MatchSource::Exact => confidence::EXACT,
            MatchSource::Fuzzy => confidence::FUZZY,
            MatchSource::Document | MatchSource::Titles => confidence::DOCUMENT,
            MatchSource::Fallback => confidence::NONE,
        };

        Self {
            question: question.to_string(),
            response: response.into(),
            confidence,
            timestamp: Utc::now(),
            source,
        }
    }

    /// Same answer with an explicit confidence.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn is_fallback(&self) -> bool {
        self.source == MatchSource::Fallback
    }
}

/// Statistics from an ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Documents accepted by this ingestion
    pub documents_added: usize,

    /// Characters accepted by this ingestion
    pub characters_added: usize,

    /// Documents in the corpus afterwards
    pub total_documents: usize,

    /// Chunks in the rebuilt corpus
    pub chunks: usize,

    /// Vocabulary size of the rebuilt index (0 if it could not be built)
    pub vocabulary: usize,

    /// Rebuild duration in milliseconds
    pub duration_ms: u64,
}
