//! Statistics persisted as a pretty-printed JSON object.

use crate::core::error::{ColepsError, Result};
use crate::core::knowledge::StatisticsSink;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// `{question: count}` file.
#[derive(Debug, Clone)]
pub struct JsonStatsFile {
    path: PathBuf,
}

impl JsonStatsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read persisted counts. A missing file is an empty map.
    pub fn load(&self) -> Result<BTreeMap<String, u64>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            ColepsError::StorageError(format!("Corrupt statistics file {:?}: {e}", self.path))
        })
    }

    /// Read persisted counts, starting over when the file is corrupt.
    pub fn load_or_default(&self) -> BTreeMap<String, u64> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!("Starting with empty statistics: {}", e);
            BTreeMap::new()
        })
    }
}

impl StatisticsSink for JsonStatsFile {
    fn save(&self, counts: &BTreeMap<String, u64>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(counts)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
