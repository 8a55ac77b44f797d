//! Resolution orchestrator.
//!
//! [`Chatbot`] answers one question at a time by trying each stage in
//! priority order and stopping at the first that produces a reply:
//!
//! 1. Name capture ("je m'appelle ...")
//! 2. Intent matching (confidence 1.0)
//! 3. Exact knowledge base lookup (0.9)
//! 4. Fuzzy knowledge base lookup (0.8)
//! 5. Document search, or section titles for vague queries (0.7)
//! 6. Apology (0.0)
//!
//! Resolution never fails. The corpus can be reindexed concurrently;
//! each resolution works on the snapshot that was live when it
//! reached the document stage.

use crate::core::error::Result;
use crate::core::indexer::{Chunker, Document, DocumentIndexer, IndexSnapshot, DEFAULT_MAX_NGRAM};
use crate::core::knowledge::{
    Catalog, QueryStatistics, RandomChooser, ResponseChooser, DEFAULT_FUZZY_CUTOFF,
};
use crate::core::search::{
    collect_titles, is_vague, titles_reply, SimilaritySearch, TitleSource,
    DEFAULT_RELEVANCE_FLOOR, DEFAULT_VAGUE_MAX_TOKENS,
};
use crate::core::storage::InteractionLog;
use crate::core::text::{normalize, Lemmatizer, NormalizedText};
use crate::core::types::{confidence, Answer, IngestReport, MatchSource};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Reply when nothing matched.
pub const APOLOGY: &str = "Je suis désolé, je n'ai pas trouvé de réponse à votre question. \
                           Pouvez-vous reformuler ou poser une autre question?";

/// Reply when a self-introduction has no name after it.
pub const NAME_NOT_UNDERSTOOD: &str = "Je n'ai pas compris votre prénom.";

/// Normalized phrases that introduce the user's name.
const NAME_PATTERNS: &[&str] = &[
    "je mappelle",
    "je m appelle",
    "mon nom est",
    "mon prenom est",
    "my name is",
];

/// Identifier given to text ingested without a document name.
const INLINE_DOCUMENT_ID: &str = "texte";

/// Layered question answering over a catalog and a document corpus.
pub struct Chatbot {
    catalog: RwLock<Arc<Catalog>>,
    stats: QueryStatistics,
    indexer: DocumentIndexer,
    search: SimilaritySearch,
    fuzzy_cutoff: f64,
    vague_max_tokens: usize,
    chooser: Box<dyn ResponseChooser>,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
    titles: Option<Arc<dyn TitleSource>>,
    log: Option<Arc<dyn InteractionLog>>,
    user_name: RwLock<Option<String>>,
}

impl Default for Chatbot {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Chatbot {
    pub fn builder() -> ChatbotBuilder {
        ChatbotBuilder::default()
    }

    /// Answer a question. Never fails.
    pub fn resolve(&self, question: &str) -> Answer {
        let answer = self.resolve_stages(question);

        tracing::debug!(
            "Resolved via {} (confidence {:.1})",
            answer.source.as_str(),
            answer.confidence
        );

        if let Some(log) = &self.log {
            if let Err(e) = log.append(&answer) {
                tracing::warn!("Failed to record interaction: {}", e);
            }
        }

        answer
    }

    fn resolve_stages(&self, question: &str) -> Answer {
        let plain = normalize(question);

        if let Some(answer) = self.capture_name(question, &plain) {
            return answer;
        }

        let message = self.prepare(question, &plain);
        let catalog = self.catalog();

        if let Some(hit) = catalog
            .intents
            .match_intent(&message, self.chooser.as_ref())
        {
            tracing::debug!("Intent '{}' matched", hit.intent);
            return Answer::new(question, hit.reply, MatchSource::Intent);
        }

        if let Some(hit) = catalog.knowledge.lookup_exact(&message, &self.stats) {
            return Answer::new(question, hit.answer, MatchSource::Exact);
        }

        if let Some(hit) = catalog
            .knowledge
            .lookup_fuzzy(&message, self.fuzzy_cutoff, &self.stats)
        {
            tracing::debug!("Fuzzy match '{}' (ratio {:.3})", hit.question, hit.ratio);
            return Answer::new(question, hit.answer, MatchSource::Fuzzy);
        }

        let snapshot = self.indexer.snapshot();
        if let Some(hit) = self.search.search(&snapshot, question) {
            tracing::debug!("Chunk {} matched (score {:.3})", hit.chunk.chunk_index, hit.score);
            return Answer::new(question, hit.chunk.text, MatchSource::Document);
        }

        if let Some(reply) = self.title_hints(&snapshot, &message) {
            return Answer::new(question, reply, MatchSource::Titles);
        }

        Answer::new(question, APOLOGY, MatchSource::Fallback)
    }

    /// Lemmatized then normalized text, or plain normalization when no
    /// lemmatizer applies.
    fn prepare(&self, question: &str, plain: &NormalizedText) -> NormalizedText {
        match self
            .lemmatizer
            .as_ref()
            .and_then(|l| l.lemmatize(question))
        {
            Some(lemmatized) => normalize(&lemmatized),
            None => plain.clone(),
        }
    }

    fn capture_name(&self, question: &str, plain: &NormalizedText) -> Option<Answer> {
        let tokens: Vec<&str> = plain.tokens().collect();
        let end = NAME_PATTERNS.iter().find_map(|p| pattern_end(&tokens, p))?;

        let token = match tokens.get(end) {
            Some(&token) => token,
            None => {
                return Some(
                    Answer::new(question, NAME_NOT_UNDERSTOOD, MatchSource::Name)
                        .with_confidence(confidence::NONE),
                )
            }
        };

        // Prefer the spelling the user typed
        let name = question
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .find(|word| !word.is_empty() && normalize(word).as_str() == token)
            .unwrap_or(token);
        let name = capitalize(name);

        tracing::debug!("Captured user name '{}'", name);
        *self.user_name.write().unwrap_or_else(|e| e.into_inner()) = Some(name.clone());

        Some(Answer::new(
            question,
            format!("Enchanté, {name}. Que puis-je faire pour vous?"),
            MatchSource::Name,
        ))
    }

    fn title_hints(&self, snapshot: &IndexSnapshot, message: &NormalizedText) -> Option<String> {
        let source = self.titles.as_ref()?;
        if snapshot.chunks().is_empty() || !is_vague(message, self.vague_max_tokens) {
            return None;
        }
        let titles = collect_titles(source.as_ref(), snapshot.documents());
        if titles.is_empty() {
            return None;
        }
        Some(titles_reply(&titles))
    }

    /// Ingest anonymous text and reindex.
    pub fn ingest_text(&self, text: &str) -> Result<IngestReport> {
        self.ingest_document(INLINE_DOCUMENT_ID, text)
    }

    /// Ingest one named document and reindex.
    pub fn ingest_document(&self, id: &str, text: &str) -> Result<IngestReport> {
        self.ingest_batch(vec![Document::new(id, text)])
    }

    /// Ingest several documents with a single reindex.
    pub fn ingest_batch(&self, documents: Vec<Document>) -> Result<IngestReport> {
        self.indexer.ingest(documents)
    }

    /// Current corpus snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.indexer.snapshot()
    }

    /// Current catalog.
    pub fn catalog(&self) -> Arc<Catalog> {
        let guard = self.catalog.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Replace the catalog; resolutions in flight keep the old one.
    pub fn reload_catalog(&self, catalog: Catalog) {
        tracing::info!(
            "Catalog reloaded: {} intents, {} knowledge base entries",
            catalog.intents.intents().len(),
            catalog.knowledge.len()
        );
        *self.catalog.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(catalog);
    }

    /// Copy of the hit counters.
    pub fn statistics_snapshot(&self) -> BTreeMap<String, u64> {
        self.stats.snapshot()
    }

    /// Name captured from the last self-introduction.
    pub fn user_name(&self) -> Option<String> {
        self.user_name
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Token index just past the first whole-word occurrence of `pattern`.
fn pattern_end(tokens: &[&str], pattern: &str) -> Option<usize> {
    let words: Vec<&str> = pattern.split(' ').collect();
    tokens
        .windows(words.len())
        .position(|window| window == words.as_slice())
        .map(|start| start + words.len())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Builder for [`Chatbot`].
pub struct ChatbotBuilder {
    catalog: Catalog,
    stats: QueryStatistics,
    window_size: usize,
    max_ngram: usize,
    fuzzy_cutoff: f64,
    relevance_floor: f64,
    vague_max_tokens: usize,
    chooser: Box<dyn ResponseChooser>,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
    titles: Option<Arc<dyn TitleSource>>,
    log: Option<Arc<dyn InteractionLog>>,
}

impl Default for ChatbotBuilder {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            stats: QueryStatistics::default(),
            window_size: crate::core::indexer::DEFAULT_WINDOW_SIZE,
            max_ngram: DEFAULT_MAX_NGRAM,
            fuzzy_cutoff: DEFAULT_FUZZY_CUTOFF,
            relevance_floor: DEFAULT_RELEVANCE_FLOOR,
            vague_max_tokens: DEFAULT_VAGUE_MAX_TOKENS,
            chooser: Box::new(RandomChooser),
            lemmatizer: None,
            titles: None,
            log: None,
        }
    }
}

impl ChatbotBuilder {
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn statistics(mut self, stats: QueryStatistics) -> Self {
        self.stats = stats;
        self
    }

    /// Sentences per chunk; must be positive.
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn max_ngram(mut self, max_ngram: usize) -> Self {
        self.max_ngram = max_ngram;
        self
    }

    pub fn fuzzy_cutoff(mut self, cutoff: f64) -> Self {
        self.fuzzy_cutoff = cutoff;
        self
    }

    pub fn relevance_floor(mut self, floor: f64) -> Self {
        self.relevance_floor = floor;
        self
    }

    pub fn vague_max_tokens(mut self, max_tokens: usize) -> Self {
        self.vague_max_tokens = max_tokens;
        self
    }

    pub fn chooser(mut self, chooser: impl ResponseChooser + 'static) -> Self {
        self.chooser = Box::new(chooser);
        self
    }

    pub fn lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    pub fn title_source(mut self, titles: Arc<dyn TitleSource>) -> Self {
        self.titles = Some(titles);
        self
    }

    pub fn interaction_log(mut self, log: Arc<dyn InteractionLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// # Panics
    ///
    /// Panics if the window size is 0.
    pub fn build(self) -> Chatbot {
        Chatbot {
            catalog: RwLock::new(Arc::new(self.catalog)),
            stats: self.stats,
            indexer: DocumentIndexer::new(Chunker::new(self.window_size), self.max_ngram),
            search: SimilaritySearch::new(self.relevance_floor),
            fuzzy_cutoff: self.fuzzy_cutoff,
            vague_max_tokens: self.vague_max_tokens,
            chooser: self.chooser,
            lemmatizer: self.lemmatizer,
            titles: self.titles,
            log: self.log,
            user_name: RwLock::new(None),
        }
    }
}
