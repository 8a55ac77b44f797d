//! XDG Base Directory Support
//!
//! Resolves where ColepsBot keeps its configuration, catalog,
//! statistics, documents and interaction history on Linux/Unix
//! systems.

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "colepsbot";

/// XDG directory structure for ColepsBot
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit COLEPSBOT_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share, ~/.local/state)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve(
                "COLEPSBOT_CONFIG_DIR",
                "XDG_CONFIG_HOME",
                dirs::home_dir().map(|h| h.join(".config")),
            ),
            data_dir: Self::resolve(
                "COLEPSBOT_DATA_DIR",
                "XDG_DATA_HOME",
                dirs::home_dir().map(|h| h.join(".local").join("share")),
            ),
            state_dir: Self::resolve(
                "COLEPSBOT_STATE_DIR",
                "XDG_STATE_HOME",
                dirs::home_dir().map(|h| h.join(".local").join("state")),
            ),
        }
    }

    fn resolve(app_var: &str, xdg_var: &str, fallback: Option<PathBuf>) -> PathBuf {
        if let Ok(dir) = env::var(app_var) {
            return PathBuf::from(dir);
        }
        if let Ok(xdg) = env::var(xdg_var) {
            return PathBuf::from(xdg).join(APP_DIR);
        }
        fallback
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Config file path (COLEPSBOT_CONFIG_FILE overrides)
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("COLEPSBOT_CONFIG_FILE") {
            return PathBuf::from(file);
        }
        self.config_dir.join("config.toml")
    }

    /// Directory of ingested document files
    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    /// Intents and knowledge base
    pub fn catalog_file(&self) -> PathBuf {
        self.data_dir.join("catalog.json")
    }

    /// Knowledge base hit counters
    pub fn stats_file(&self) -> PathBuf {
        self.data_dir.join("stats.json")
    }

    /// Answered questions
    pub fn history_file(&self) -> PathBuf {
        self.state_dir.join("historique.json")
    }

    /// Create all directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(self.documents_dir())?;
        fs::create_dir_all(&self.state_dir)?;
        Ok(())
    }

    /// Log the resolved paths
    pub fn log_paths(&self) {
        tracing::info!("XDG directories resolved:");
        tracing::info!("  Config: {:?}", self.config_dir);
        tracing::info!("  Data: {:?}", self.data_dir);
        tracing::info!("  State: {:?}", self.state_dir);
        tracing::info!("  Config file: {:?}", self.config_file());
        tracing::info!("  Documents: {:?}", self.documents_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
