//! CLI test helpers
//!
//! Provides utilities for testing CLI commands including:
//! - Arc<Services> wrappers matching CLI execute() signatures
//! - Documents directory setup

use crate::common::{test_config, SAMPLE_CATALOG};
use colepsbot::core::services::Services;
use std::sync::Arc;
use tempfile::TempDir;

/// Create test services wrapped in Arc (matching CLI execute() signatures)
pub fn create_cli_test_services() -> (Arc<Services>, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = test_config(temp_dir.path());
    std::fs::write(&config.storage.catalog_file, SAMPLE_CATALOG)
        .expect("Failed to write catalog");

    let services = Arc::new(Services::new(config).expect("Failed to create services"));
    (services, temp_dir)
}

/// Write files into the services' documents directory
///
/// # Arguments
/// * `services` - Services whose library receives the files
/// * `files` - Slice of (file_name, content) tuples
pub fn populate_documents(services: &Services, files: &[(&str, &str)]) {
    let root = services.library.root();
    std::fs::create_dir_all(root).expect("Failed to create documents dir");
    for (name, content) in files {
        std::fs::write(root.join(name), content).expect("Failed to write document");
    }
}
