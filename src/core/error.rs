//! Error types and error handling for ColepsBot.
//!
//! Query resolution itself never fails; these errors surface from
//! the collaborators around it (configuration, catalog loading,
//! document ingestion and persistence).

use thiserror::Error;

/// Result type alias for ColepsBot operations
pub type Result<T> = std::result::Result<T, ColepsError>;

/// Main error type for ColepsBot
#[derive(Error, Debug)]
pub enum ColepsError {
    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Ingestion failed: {0}")]
    IngestFailed(String),

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl ColepsError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ColepsError::DocumentNotFound(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            ColepsError::UnsupportedFormat(_)
                | ColepsError::IngestFailed(_)
                | ColepsError::ConfigError(_)
        )
    }
}
