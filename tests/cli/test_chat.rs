//! Tests for the chat loop
//!
//! The loop reads from any async buffered reader, so stdin is replaced
//! by an in-memory cursor.

use super::test_helpers::create_cli_test_services;
use colepsbot::cli::commands::chat::{converse, is_exit};
use colepsbot::cli::OutputFormat;
use colepsbot::MatchSource;
use std::io::Cursor;
use tokio::io::BufReader;

fn input(lines: &str) -> BufReader<Cursor<Vec<u8>>> {
    BufReader::new(Cursor::new(lines.as_bytes().to_vec()))
}

#[test]
fn test_exit_words() {
    assert!(is_exit("quit"));
    assert!(is_exit("  EXIT "));
    assert!(is_exit("Quitter"));
    assert!(!is_exit("quitte"));
    assert!(!is_exit("je veux quitter"));
}

#[tokio::test]
async fn test_converse_until_exit_word() {
    let (services, _temp) = create_cli_test_services();

    let asked = converse(
        input("Bonjour\n\nCombien coûte l'entrée ?\nquit\nmerci\n"),
        &services,
        OutputFormat::Human,
    )
    .await
    .unwrap();

    // Blank line skipped, nothing read after the exit word
    assert_eq!(asked, 2);
    let history = services.history.load().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].source, MatchSource::Intent);
    assert_eq!(history[1].source, MatchSource::Exact);
}

#[tokio::test]
async fn test_converse_until_eof() {
    let (services, _temp) = create_cli_test_services();

    let asked = converse(
        input("je m'appelle Léa\nmerci"),
        &services,
        OutputFormat::Json,
    )
    .await
    .unwrap();

    assert_eq!(asked, 2);
    assert_eq!(services.chatbot.user_name().as_deref(), Some("Léa"));
}

#[tokio::test]
async fn test_converse_empty_input() {
    let (services, _temp) = create_cli_test_services();
    let asked = converse(input(""), &services, OutputFormat::Human)
        .await
        .unwrap();
    assert_eq!(asked, 0);
}
