//! ColepsBot - layered question answering over curated and document
//! knowledge
//!
//! A question goes through a fixed priority chain: name capture,
//! scripted intents, exact and fuzzy knowledge base lookup, then
//! TF-IDF retrieval over ingested documents, with an apology when
//! nothing matches. Every stage reports its confidence.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - text (normalization, lemmas, similarity ratio)
//!   - knowledge (intents, knowledge base, statistics)
//!   - indexer (sentence windows, TF-IDF, snapshots)
//!   - search (dot-product retrieval, title hints)
//!   - readers (txt, pdf, docx)
//!   - storage (statistics and history files)
//!   - resolver (the `Chatbot`)
//!   - services (unified service container)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Example
//!
//! ```
//! use colepsbot::core::knowledge::{Catalog, FirstChooser};
//! use colepsbot::Chatbot;
//!
//! let catalog = Catalog::from_json_str(
//!     r#"{"intents": {"saluer": ["bonjour"]},
//!         "knowledge_base": {"Heures d'ouverture": "9h-18h"}}"#,
//! )
//! .unwrap();
//! let bot = Chatbot::builder().catalog(catalog).chooser(FirstChooser).build();
//!
//! let answer = bot.resolve("heures d'ouverture ?");
//! assert_eq!(answer.response, "9h-18h");
//! assert_eq!(answer.confidence, 0.9);
//! ```

// Core domain logic
pub mod core;

// CLI adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{ColepsError, Result};
pub use core::resolver::Chatbot;
pub use core::services::Services;
pub use core::types::*;
