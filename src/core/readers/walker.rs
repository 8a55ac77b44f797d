//! Documents directory listing with pattern-based filtering.
//!
//! Lists the files of the documents directory that match the include
//! patterns, skipping hidden files and files over the size limit.
//! Errors on individual entries (permission denied, etc.) are logged
//! and skipped.

use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::core::error::{ColepsError, Result};

/// Default include patterns: every format the readers understand.
pub fn default_include_patterns() -> Vec<String> {
    vec!["*.txt".to_string(), "*.pdf".to_string(), "*.docx".to_string()]
}

/// Documents directory walker
pub struct DocumentWalker {
    /// File name patterns to include (e.g., "*.pdf")
    include_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl DocumentWalker {
    /// Create a new walker
    ///
    /// # Arguments
    ///
    /// * `include_patterns` - Glob patterns for file names to include
    /// * `max_file_size_mb` - Maximum file size in megabytes
    pub fn new(include_patterns: Vec<String>, max_file_size_mb: usize) -> Result<Self> {
        let include = include_patterns
            .into_iter()
            .map(|p| {
                Pattern::new(&p).map_err(|e| {
                    ColepsError::ConfigError(format!("Invalid include pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            include_patterns: include,
            max_file_size_bytes: (max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    /// Matching files directly under `root`, sorted by file name.
    ///
    /// A missing directory has no documents.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.exists() {
            tracing::debug!("Documents directory {:?} does not exist", root);
            return Ok(Vec::new());
        }
        if !root.is_dir() {
            return Err(ColepsError::ConfigError(format!(
                "Documents path is not a directory: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    let path = entry.path();

                    if let Ok(metadata) = entry.metadata() {
                        if metadata.len() > self.max_file_size_bytes {
                            tracing::warn!(
                                "Skipping large document: {:?} ({} bytes)",
                                path,
                                metadata.len()
                            );
                            continue;
                        }
                    }

                    if self.matches_patterns(path) {
                        files.push(path.to_path_buf());
                    }
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        Ok(files)
    }

    /// Whether a file name matches the include patterns.
    ///
    /// No patterns means every file matches.
    pub fn matches_patterns(&self, path: &Path) -> bool {
        let name = match path.file_name().and_then(|f| f.to_str()) {
            Some(name) => name,
            None => return false,
        };
        self.include_patterns.is_empty()
            || self
                .include_patterns
                .iter()
                .any(|p| p.matches(name) || p.matches(&name.to_lowercase()))
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }
}

fn is_hidden(entry: &DirEntry, root: &Path) -> bool {
    entry.path() != root
        && entry
            .file_name()
            .to_str()
            .map_or(false, |name| name.starts_with('.'))
}
