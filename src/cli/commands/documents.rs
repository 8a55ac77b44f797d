//! Document commands - add and list files in the documents directory

use crate::cli::output::{self, colors, format_bytes};
use crate::cli::OutputFormat;
use crate::core::readers::LoadOutcome;
use crate::core::services::Services;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for add-document
#[derive(Args, Debug)]
pub struct AddDocumentArgs {
    /// Path to a .txt, .pdf or .docx file
    pub path: PathBuf,
}

/// Arguments for list-documents
#[derive(Args, Debug)]
pub struct ListDocumentsArgs {}

/// Document list item
#[derive(Debug, Serialize)]
pub struct DocumentListItem {
    pub name: String,
    pub size_kb: f64,
    pub modified: Option<String>,
}

/// Document list response
#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub count: usize,
    pub documents: Vec<DocumentListItem>,
}

/// add-document response
#[derive(Debug, Serialize)]
pub struct AddDocumentResponse {
    pub name: String,
    pub stored_at: String,
    pub characters: usize,
    pub message: String,
}

/// Ingest the documents directory, reporting files that failed.
///
/// Failures are warnings; the remaining documents are still loaded.
pub fn load_corpus(
    services: &Services,
    format: OutputFormat,
) -> Result<Vec<LoadOutcome>, Box<dyn std::error::Error>> {
    let outcomes = services.load_documents()?;
    if format == OutputFormat::Human {
        for outcome in outcomes.iter().filter(|o| !o.is_loaded()) {
            output::print_warning(&outcome.message());
        }
    }
    Ok(outcomes)
}

/// Execute add-document
pub async fn execute_add(
    args: AddDocumentArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let (stored_at, document) = services.library.add(&args.path)?;
    let characters = document.text.chars().count();

    let response = AddDocumentResponse {
        message: LoadOutcome {
            name: document.id.clone(),
            result: Ok(characters),
        }
        .message(),
        name: document.id,
        stored_at: stored_at.to_string_lossy().into_owned(),
        characters,
    };

    match format {
        OutputFormat::Human => {
            output::print_success(&response.message);
            println!(
                "  {} {}",
                colors::label("Stored at:"),
                colors::file_path(&response.stored_at)
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Execute list-documents
pub async fn execute_list(
    _args: ListDocumentsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let documents = services.library.list()?;

    let response = DocumentListResponse {
        count: documents.len(),
        documents: documents
            .iter()
            .map(|d| DocumentListItem {
                name: d.name.clone(),
                size_kb: (d.size_bytes as f64 / 1024.0 * 100.0).round() / 100.0,
                modified: d.modified.map(|m| m.to_rfc3339()),
            })
            .collect(),
    };

    match format {
        OutputFormat::Human => {
            if documents.is_empty() {
                println!(
                    "No documents in {}. Run '{}' to add one.",
                    colors::file_path(&services.library.root().to_string_lossy()),
                    colors::label("colepsbot add-document <path>")
                );
            } else {
                println!(
                    "{} ({}):",
                    colors::label("Documents"),
                    colors::number(&response.count.to_string())
                );
                for doc in &documents {
                    let modified = doc
                        .modified
                        .map(|m| output::format_relative_time(&m.with_timezone(&chrono::Utc)))
                        .unwrap_or_default();
                    println!(
                        "  {:<40} {:>10}  {}",
                        colors::file_path(&doc.name),
                        colors::number(&format_bytes(doc.size_bytes)),
                        colors::dim(&modified)
                    );
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
