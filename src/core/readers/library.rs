//! The documents directory.
//!
//! [`Library`] lists, adds and loads the documents stored in the
//! configured directory. [`FileTitleSource`] reads section titles
//! back from the same files for vague-query hints.

use crate::core::error::{ColepsError, Result};
use crate::core::indexer::Document;
use crate::core::readers::extract::{docx_titles, extract_text, DocumentFormat};
use crate::core::readers::pdf_titles::{pdf_titles, DEFAULT_TITLE_MIN_FONT_SIZE};
use crate::core::readers::walker::DocumentWalker;
use crate::core::resolver::Chatbot;
use crate::core::search::TitleSource;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A document file on disk.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<DateTime<Local>>,
}

/// Result of loading one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub name: String,

    /// Characters extracted, or the failure reason
    pub result: std::result::Result<usize, String>,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        self.result.is_ok()
    }

    /// User-facing status line.
    pub fn message(&self) -> String {
        match &self.result {
            Ok(chars) => format!("Contenu {} chargé ({} caractères)", self.name, chars),
            Err(reason) => format!("Échec du chargement de {} : {}", self.name, reason),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Documents stored in one directory.
pub struct Library {
    root: PathBuf,
    walker: DocumentWalker,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>, walker: DocumentWalker) -> Self {
        Self {
            root: root.into(),
            walker,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Supported documents, sorted by name.
    pub fn list(&self) -> Result<Vec<DocumentInfo>> {
        let files = self.walker.collect_files(&self.root)?;
        Ok(files
            .into_iter()
            .map(|path| {
                let metadata = fs::metadata(&path).ok();
                DocumentInfo {
                    name: file_name(&path),
                    size_bytes: metadata.as_ref().map_or(0, |m| m.len()),
                    modified: metadata
                        .and_then(|m| m.modified().ok())
                        .map(DateTime::<Local>::from),
                    path,
                }
            })
            .collect())
    }

    /// Extract every supported document.
    ///
    /// Files that fail are reported in the outcomes and left out of the
    /// returned documents.
    pub fn read_all(&self) -> Result<(Vec<Document>, Vec<LoadOutcome>)> {
        let mut documents = Vec::new();
        let mut outcomes = Vec::new();

        for path in self.walker.collect_files(&self.root)? {
            let name = file_name(&path);
            let result = match extract_text(&path) {
                Ok(text) if text.trim().is_empty() => Err("aucun texte extrait".to_string()),
                Ok(text) => {
                    let chars = text.chars().count();
                    documents.push(Document::new(name.clone(), text));
                    Ok(chars)
                }
                Err(e) => Err(e.to_string()),
            };
            if let Err(reason) = &result {
                tracing::warn!("Could not load {}: {}", name, reason);
            }
            outcomes.push(LoadOutcome { name, result });
        }

        Ok((documents, outcomes))
    }

    /// Ingest every supported document with a single reindex.
    pub fn load_directory(&self, bot: &Chatbot) -> Result<Vec<LoadOutcome>> {
        let (documents, outcomes) = self.read_all()?;
        if documents.is_empty() {
            tracing::info!("No documents to load from {:?}", self.root);
            return Ok(outcomes);
        }

        let report = bot.ingest_batch(documents)?;
        tracing::info!(
            "Loaded {} documents ({} characters) from {:?}",
            report.documents_added,
            report.characters_added,
            self.root
        );
        Ok(outcomes)
    }

    /// Check that `source` yields text, then copy it into the library.
    ///
    /// Returns the stored path and the extracted document.
    pub fn add(&self, source: &Path) -> Result<(PathBuf, Document)> {
        if !self.walker.matches_patterns(source) || DocumentFormat::from_path(source).is_none() {
            return Err(ColepsError::UnsupportedFormat(source.display().to_string()));
        }

        let size = fs::metadata(source)
            .map_err(|_| ColepsError::DocumentNotFound(source.display().to_string()))?
            .len();
        if size > self.walker.max_file_size_bytes() {
            return Err(ColepsError::IngestFailed(format!(
                "{} exceeds the size limit ({} bytes)",
                source.display(),
                size
            )));
        }

        let text = extract_text(source)?;
        if text.trim().is_empty() {
            return Err(ColepsError::IngestFailed(format!(
                "no text extracted from {}",
                source.display()
            )));
        }

        let name = file_name(source);
        fs::create_dir_all(&self.root)?;
        let dest = self.root.join(&name);
        if fs::canonicalize(source).ok() != fs::canonicalize(&dest).ok() {
            fs::copy(source, &dest).map_err(|e| {
                ColepsError::StorageError(format!("Failed to copy {source:?} to {dest:?}: {e}"))
            })?;
        }

        tracing::info!("Added {} to {:?}", name, self.root);
        Ok((dest, Document::new(name, text)))
    }
}

/// Section titles read from the documents directory.
///
/// Document ids are file names. Titles are read once per document and
/// cached. `.docx` titles are heading paragraphs; PDF titles are text
/// runs in a font larger than `pdf_min_font_size`. Plain text has none.
pub struct FileTitleSource {
    root: PathBuf,
    pdf_min_font_size: f64,
    cache: Mutex<HashMap<String, Vec<String>>>,
}

impl FileTitleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pdf_min_font_size: DEFAULT_TITLE_MIN_FONT_SIZE,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_pdf_min_font_size(mut self, size: f64) -> Self {
        self.pdf_min_font_size = size;
        self
    }

    fn read_titles(&self, document_id: &str) -> Vec<String> {
        let path = self.root.join(document_id);
        let titles = match DocumentFormat::from_path(&path) {
            Some(DocumentFormat::Docx) => docx_titles(&path),
            Some(DocumentFormat::Pdf) => pdf_titles(&path, self.pdf_min_font_size),
            _ => Ok(Vec::new()),
        };
        titles.unwrap_or_else(|e| {
            tracing::warn!("Could not read titles of {}: {}", document_id, e);
            Vec::new()
        })
    }
}

impl TitleSource for FileTitleSource {
    fn extract_titles(&self, document_id: &str) -> Vec<String> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache
            .entry(document_id.to_string())
            .or_insert_with(|| self.read_titles(document_id))
            .clone()
    }
}
