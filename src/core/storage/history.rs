//! Interaction log sinks.
//!
//! Every answer the resolver produces is appended to an
//! [`InteractionLog`]. Sinks serialize appends themselves so the
//! resolver can call them from any thread.

use crate::core::error::{ColepsError, Result};
use crate::core::types::Answer;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only record of answered questions.
pub trait InteractionLog: Send + Sync {
    fn append(&self, answer: &Answer) -> Result<()>;
}

/// Answers kept in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<Answer>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Answer> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl InteractionLog for MemoryLog {
    fn append(&self, answer: &Answer) -> Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(answer.clone());
        Ok(())
    }
}

/// Answers stored as a JSON array file.
///
/// Each append rewrites the file with the new entry at the end. A
/// corrupt file is replaced by a fresh array.
#[derive(Debug)]
pub struct JsonHistoryFile {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonHistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored answers. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<Answer>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            ColepsError::StorageError(format!("Corrupt history file {:?}: {e}", self.path))
        })
    }
}

impl InteractionLog for JsonHistoryFile {
    fn append(&self, answer: &Answer) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let mut history = self.load().unwrap_or_else(|e| {
            tracing::warn!("Restarting history: {}", e);
            Vec::new()
        });
        history.push(answer.clone());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&history)?)?;
        Ok(())
    }
}
