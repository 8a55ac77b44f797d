//! Scripted and curated knowledge.
//!
//! - **intent**: built-in intents and response choosers
//! - **catalog**: intent catalog and catalog file loading
//! - **base**: knowledge base with exact and fuzzy lookup
//! - **stats**: hit counters for knowledge base questions

pub mod base;
pub mod catalog;
pub mod intent;
pub mod stats;

pub use base::{KnowledgeBase, KnowledgeMatch, DEFAULT_FUZZY_CUTOFF};
pub use catalog::{Catalog, IntentCatalog, IntentMatch};
pub use intent::{FirstChooser, Intent, IntentReply, RandomChooser, ResponseChooser};
pub use stats::{QueryStatistics, StatisticsSink};
