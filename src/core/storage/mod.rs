//! Persistence for statistics and interaction history.
//!
//! # Storage Layout
//!
//! ```text
//! {data_dir}/
//! ├── catalog.json        # Intents and knowledge base
//! ├── stats.json          # {question: count}
//! └── documents/          # Ingested .txt, .pdf, .docx files
//!
//! {state_dir}/
//! └── historique.json     # [Answer, ...]
//! ```

mod history;
mod stats;

pub use history::{InteractionLog, JsonHistoryFile, MemoryLog};
pub use stats::JsonStatsFile;
