//! Config command - show current configuration

use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use clap::Args;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Execute the config command
///
/// JSON output is the full configuration as it would be written in
/// `config.toml`, with paths resolved.
pub async fn execute(
    _args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config: &Config = &services.config;

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  matching:");
            println!("    fuzzy_cutoff: {}", config.matching.fuzzy_cutoff);
            println!("  documents:");
            println!("    data_dir: {}", config.documents.data_dir.display());
            println!("    window_size: {}", config.documents.window_size);
            println!(
                "    include_patterns: {:?}",
                config.documents.include_patterns
            );
            println!("    max_file_size_mb: {}", config.documents.max_file_size_mb);
            println!(
                "    pdf_title_min_font_size: {}",
                config.documents.pdf_title_min_font_size
            );
            println!("  search:");
            println!("    relevance_floor: {}", config.search.relevance_floor);
            println!("    vague_max_tokens: {}", config.search.vague_max_tokens);
            println!("    max_ngram: {}", config.search.max_ngram);
            println!("  storage:");
            println!("    catalog_file: {}", config.storage.catalog_file.display());
            println!("    stats_file: {}", config.storage.stats_file.display());
            println!("    history_file: {}", config.storage.history_file.display());
            match &config.storage.lemma_file {
                Some(path) => println!("    lemma_file: {}", path.display()),
                None => println!("    lemma_file: (none)"),
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    }

    Ok(())
}
