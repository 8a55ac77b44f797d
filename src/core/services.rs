//! Unified service container for ColepsBot
//!
//! Wires the chatbot to its on-disk collaborators as described by
//! the configuration.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::knowledge::{Catalog, QueryStatistics, RandomChooser};
use crate::core::readers::{DocumentWalker, FileTitleSource, Library, LoadOutcome};
use crate::core::resolver::Chatbot;
use crate::core::storage::{JsonHistoryFile, JsonStatsFile};
use crate::core::text::{LemmaTable, Lemmatizer};
use std::sync::Arc;

/// Unified services container
#[derive(Clone)]
pub struct Services {
    /// Question answering
    pub chatbot: Arc<Chatbot>,

    /// Documents directory
    pub library: Arc<Library>,

    /// Statistics file
    pub stats: JsonStatsFile,

    /// Interaction history file
    pub history: Arc<JsonHistoryFile>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    ///
    /// Loads the catalog, persisted statistics and the optional lemma
    /// table. Documents are not loaded; see [`Services::load_documents`].
    pub fn new(config: Config) -> Result<Self> {
        let walker = DocumentWalker::new(
            config.documents.include_patterns.clone(),
            config.documents.max_file_size_mb,
        )?;
        let library = Arc::new(Library::new(config.documents.data_dir.clone(), walker));

        let catalog = Catalog::load_or_empty(&config.storage.catalog_file);

        let stats = JsonStatsFile::new(config.storage.stats_file.clone());
        let statistics = QueryStatistics::with_counts(stats.load_or_default())
            .with_sink(Arc::new(stats.clone()));

        let history = Arc::new(JsonHistoryFile::new(config.storage.history_file.clone()));

        let mut builder = Chatbot::builder()
            .catalog(catalog)
            .statistics(statistics)
            .window_size(config.documents.window_size)
            .max_ngram(config.search.max_ngram)
            .fuzzy_cutoff(config.matching.fuzzy_cutoff)
            .relevance_floor(config.search.relevance_floor)
            .vague_max_tokens(config.search.vague_max_tokens)
            .chooser(RandomChooser)
            .title_source(Arc::new(
                FileTitleSource::new(config.documents.data_dir.clone())
                    .with_pdf_min_font_size(config.documents.pdf_title_min_font_size),
            ))
            .interaction_log(history.clone());

        if let Some(lemmatizer) = load_lemmatizer(&config) {
            builder = builder.lemmatizer(lemmatizer);
        }

        Ok(Self {
            chatbot: Arc::new(builder.build()),
            library,
            stats,
            history,
            config: Arc::new(config),
        })
    }

    /// Ingest every document in the documents directory.
    pub fn load_documents(&self) -> Result<Vec<LoadOutcome>> {
        self.library.load_directory(&self.chatbot)
    }
}

fn load_lemmatizer(config: &Config) -> Option<Arc<dyn Lemmatizer>> {
    let path = config.storage.lemma_file.as_ref()?;
    match LemmaTable::from_file(path) {
        Ok(table) => {
            tracing::info!("Loaded {} lemmas from {:?}", table.len(), path);
            Some(Arc::new(table))
        }
        Err(e) => {
            tracing::warn!("Lemmatization disabled: {}", e);
            None
        }
    }
}
