//! Tests for the show-stats command

use super::test_helpers::create_cli_test_services;
use colepsbot::cli::commands::stats::{execute, ranked, StatsArgs};
use colepsbot::cli::OutputFormat;

#[tokio::test]
async fn test_show_stats_empty() {
    let (services, _temp) = create_cli_test_services();
    let result = execute(StatsArgs { top: None }, &services, OutputFormat::Human).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_show_stats_after_questions() {
    let (services, _temp) = create_cli_test_services();
    for question in [
        "Combien coûte l'entrée ?",
        "combien coute l'entree",
        "Quelles sont les heures d'ouverture ?",
        "bonjour",
    ] {
        services.chatbot.resolve(question);
    }

    let items = ranked(&services.chatbot.statistics_snapshot(), None);
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].question, "combien coute l entree");
    assert_eq!(items[0].count, 2);
    assert_eq!(items[1].count, 1);

    for format in [OutputFormat::Human, OutputFormat::Json] {
        let result = execute(StatsArgs { top: Some(1) }, &services, format).await;
        assert!(result.is_ok());
    }
}
