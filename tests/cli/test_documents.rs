//! Tests for document commands
//!
//! Tests add-document and list-documents handlers:
//! - Adding copies the file into the documents directory
//! - Unsupported and empty files are rejected
//! - Listing in both output formats

use super::test_helpers::{create_cli_test_services, populate_documents};
use crate::common::{TestCorpus, MUSEUM_TEXT};
use colepsbot::cli::commands::documents::{
    execute_add, execute_list, load_corpus, AddDocumentArgs, ListDocumentsArgs,
};
use colepsbot::cli::OutputFormat;

#[tokio::test]
async fn test_add_document() {
    let (services, _temp) = create_cli_test_services();
    let corpus = TestCorpus::small();

    let result = execute_add(
        AddDocumentArgs {
            path: corpus.files[0].clone(),
        },
        &services,
        OutputFormat::Human,
    )
    .await;
    assert!(result.is_ok());
    assert!(services.library.root().join("musee.txt").exists());

    // The next load picks it up
    let outcomes = load_corpus(&services, OutputFormat::Json).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].is_loaded());
}

#[tokio::test]
async fn test_add_unsupported_document() {
    let (services, _temp) = create_cli_test_services();
    let corpus = TestCorpus::with_files(&[("slides.pptx", "binaire")]);

    let result = execute_add(
        AddDocumentArgs {
            path: corpus.path().join("slides.pptx"),
        },
        &services,
        OutputFormat::Json,
    )
    .await;
    assert!(result.is_err());
    assert!(!services.library.root().join("slides.pptx").exists());
}

#[tokio::test]
async fn test_list_documents() {
    let (services, _temp) = create_cli_test_services();

    // Empty directory
    let result = execute_list(ListDocumentsArgs {}, &services, OutputFormat::Human).await;
    assert!(result.is_ok());

    populate_documents(
        &services,
        &[("musee.txt", MUSEUM_TEXT), ("cafe.txt", "Le café ouvre à 10h.")],
    );
    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute_list(ListDocumentsArgs {}, &services, format).await;
        assert!(result.is_ok());
    }

    let names: Vec<String> = services
        .library
        .list()
        .unwrap()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["cafe.txt", "musee.txt"]);
}

#[test]
fn test_load_corpus_reports_failures() {
    let (services, _temp) = create_cli_test_services();
    populate_documents(
        &services,
        &[("musee.txt", MUSEUM_TEXT), ("casse.pdf", "pas un pdf")],
    );

    let outcomes = load_corpus(&services, OutputFormat::Human).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes.iter().filter(|o| o.is_loaded()).count(), 1);
    assert_eq!(services.chatbot.snapshot().documents().len(), 1);
}
