//! Core domain logic (front-end agnostic)
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Answers, chunks and reports
//! - **xdg**: XDG directory handling
//! - **text**: Normalization, lemmatization, string similarity
//! - **knowledge**: Intents, knowledge base, hit statistics
//! - **indexer**: Sentence chunking, TF-IDF, index snapshots
//! - **search**: Similarity search and vague-query title hints
//! - **readers**: Documents directory and text extraction
//! - **storage**: Statistics and interaction history files
//! - **resolver**: The resolution pipeline
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod knowledge;
pub mod readers;
pub mod resolver;
pub mod search;
pub mod services;
pub mod storage;
pub mod text;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{ColepsError, Result};
pub use resolver::{Chatbot, ChatbotBuilder};
pub use services::Services;
