//! Configuration management for ColepsBot.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{ColepsError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub documents: DocumentsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Knowledge base matching
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Minimum similarity ratio for a fuzzy hit, in [0, 1]
    #[serde(default = "default_fuzzy_cutoff")]
    pub fuzzy_cutoff: f64,
}

/// Document ingestion
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocumentsConfig {
    /// Sentences per chunk
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// File name patterns to load (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// PDF text in a larger font than this (points) is a section title
    #[serde(default = "default_pdf_title_min_font_size")]
    pub pdf_title_min_font_size: f64,

    /// Directory holding the document files
    #[serde(default = "default_documents_dir")]
    pub data_dir: PathBuf,
}

/// Document search
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// A best score at or below this is no match
    #[serde(default = "default_relevance_floor")]
    pub relevance_floor: f64,

    /// Queries with at most this many tokens are vague
    #[serde(default = "default_vague_max_tokens")]
    pub vague_max_tokens: usize,

    /// Largest n-gram indexed (2 = unigrams and bigrams)
    #[serde(default = "default_max_ngram")]
    pub max_ngram: usize,
}

/// Persistent files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_catalog_file")]
    pub catalog_file: PathBuf,

    #[serde(default = "default_stats_file")]
    pub stats_file: PathBuf,

    #[serde(default = "default_history_file")]
    pub history_file: PathBuf,

    /// Optional `{word: lemma}` JSON table
    #[serde(default)]
    pub lemma_file: Option<PathBuf>,
}

// Default value functions
fn default_fuzzy_cutoff() -> f64 {
    crate::core::knowledge::DEFAULT_FUZZY_CUTOFF
}

fn default_window_size() -> usize {
    crate::core::indexer::DEFAULT_WINDOW_SIZE
}

fn default_include_patterns() -> Vec<String> {
    crate::core::readers::default_include_patterns()
}

fn default_max_file_size() -> usize {
    10
}

fn default_pdf_title_min_font_size() -> f64 {
    crate::core::readers::DEFAULT_TITLE_MIN_FONT_SIZE
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from("./documents")
}

fn default_relevance_floor() -> f64 {
    crate::core::search::DEFAULT_RELEVANCE_FLOOR
}

fn default_vague_max_tokens() -> usize {
    crate::core::search::DEFAULT_VAGUE_MAX_TOKENS
}

fn default_max_ngram() -> usize {
    crate::core::indexer::DEFAULT_MAX_NGRAM
}

fn default_catalog_file() -> PathBuf {
    PathBuf::from("./catalog.json")
}

fn default_stats_file() -> PathBuf {
    PathBuf::from("./stats.json")
}

fn default_history_file() -> PathBuf {
    PathBuf::from("./historique.json")
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_cutoff: default_fuzzy_cutoff(),
        }
    }
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            include_patterns: default_include_patterns(),
            max_file_size_mb: default_max_file_size(),
            pdf_title_min_font_size: default_pdf_title_min_font_size(),
            data_dir: default_documents_dir(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            relevance_floor: default_relevance_floor(),
            vague_max_tokens: default_vague_max_tokens(),
            max_ngram: default_max_ngram(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            catalog_file: default_catalog_file(),
            stats_file: default_stats_file(),
            history_file: default_history_file(),
            lemma_file: None,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!("Ignoring invalid {}={:?}", name, value);
            None
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ColepsError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. COLEPSBOT_CONFIG env var
    /// 2. XDG config file (~/.config/colepsbot/config.toml)
    /// 3. ./colepsbot.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("COLEPSBOT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("colepsbot.toml").exists() {
                Self::from_file("colepsbot.toml")?
            } else {
                Self::default()
            }
        };

        // Paths left at their defaults live in the XDG directories
        if config.documents.data_dir == default_documents_dir() {
            config.documents.data_dir = xdg.documents_dir();
        }
        if config.storage.catalog_file == default_catalog_file() {
            config.storage.catalog_file = xdg.catalog_file();
        }
        if config.storage.stats_file == default_stats_file() {
            config.storage.stats_file = xdg.stats_file();
        }
        if config.storage.history_file == default_history_file() {
            config.storage.history_file = xdg.history_file();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Matching configuration
        if let Some(cutoff) = parse_env("COLEPSBOT_FUZZY_CUTOFF") {
            self.matching.fuzzy_cutoff = cutoff;
        }

        // Documents configuration
        if let Some(window) = parse_env("COLEPSBOT_WINDOW_SIZE") {
            self.documents.window_size = window;
        }
        if let Some(size) = parse_env("COLEPSBOT_MAX_FILE_SIZE_MB") {
            self.documents.max_file_size_mb = size;
        }
        if let Ok(dir) = env::var("COLEPSBOT_DOCUMENTS_DIR") {
            self.documents.data_dir = PathBuf::from(dir);
        }

        // Search configuration
        if let Some(floor) = parse_env("COLEPSBOT_RELEVANCE_FLOOR") {
            self.search.relevance_floor = floor;
        }
        if let Some(tokens) = parse_env("COLEPSBOT_VAGUE_MAX_TOKENS") {
            self.search.vague_max_tokens = tokens;
        }
        if let Some(n) = parse_env("COLEPSBOT_MAX_NGRAM") {
            self.search.max_ngram = n;
        }

        // Storage configuration
        if let Ok(file) = env::var("COLEPSBOT_CATALOG_FILE") {
            self.storage.catalog_file = PathBuf::from(file);
        }
        if let Ok(file) = env::var("COLEPSBOT_STATS_FILE") {
            self.storage.stats_file = PathBuf::from(file);
        }
        if let Ok(file) = env::var("COLEPSBOT_HISTORY_FILE") {
            self.storage.history_file = PathBuf::from(file);
        }
        if let Ok(file) = env::var("COLEPSBOT_LEMMA_FILE") {
            self.storage.lemma_file = Some(PathBuf::from(file));
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.matching.fuzzy_cutoff) {
            return Err(ColepsError::ConfigError(
                "Fuzzy cutoff must be between 0 and 1".to_string(),
            ));
        }

        if self.documents.window_size == 0 {
            return Err(ColepsError::ConfigError(
                "Window size must be non-zero".to_string(),
            ));
        }

        let title_size = self.documents.pdf_title_min_font_size;
        if title_size.is_nan() || title_size < 0.0 {
            return Err(ColepsError::ConfigError(
                "PDF title font size must be non-negative".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.search.relevance_floor) {
            return Err(ColepsError::ConfigError(
                "Relevance floor must be between 0 and 1".to_string(),
            ));
        }

        if self.search.max_ngram == 0 {
            return Err(ColepsError::ConfigError(
                "Max n-gram must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Fuzzy cutoff: {}", self.matching.fuzzy_cutoff);
        tracing::info!("  Window size: {} sentences", self.documents.window_size);
        tracing::info!(
            "  Include patterns: {} patterns",
            self.documents.include_patterns.len()
        );
        tracing::info!("  Max file size: {} MB", self.documents.max_file_size_mb);
        tracing::info!(
            "  PDF title font size: > {} pt",
            self.documents.pdf_title_min_font_size
        );
        tracing::info!("  Documents dir: {:?}", self.documents.data_dir);
        tracing::info!("  Relevance floor: {}", self.search.relevance_floor);
        tracing::info!("  Vague query tokens: {}", self.search.vague_max_tokens);
        tracing::info!("  Max n-gram: {}", self.search.max_ngram);
        tracing::info!("  Catalog: {:?}", self.storage.catalog_file);
        tracing::info!("  Stats: {:?}", self.storage.stats_file);
        tracing::info!("  History: {:?}", self.storage.history_file);
        if let Some(lemmas) = &self.storage.lemma_file {
            tracing::info!("  Lemmas: {:?}", lemmas);
        }
    }
}
