// Persistence of statistics and interaction history through Services

use crate::common::{create_test_services, test_config, SAMPLE_CATALOG};
use colepsbot::core::storage::{JsonHistoryFile, JsonStatsFile};
use colepsbot::{MatchSource, Services};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_every_resolution_is_appended_to_history() {
    let (services, _temp) = create_test_services();

    services.chatbot.resolve("Bonjour");
    services.chatbot.resolve("Combien coûte l'entrée ?");
    services.chatbot.resolve("une question sans réponse");

    let history = services.history.load().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].question, "Bonjour");
    assert_eq!(history[0].source, MatchSource::Intent);
    assert_eq!(history[1].response, "L'entrée coûte 8 euros, gratuite le dimanche.");
    assert_eq!(history[2].confidence, 0.0);
    assert!(history[0].timestamp <= history[2].timestamp);
}

#[test]
fn test_history_file_is_a_json_array() {
    let (services, _temp) = create_test_services();
    services.chatbot.resolve("Bonjour");

    let raw = fs::read_to_string(services.history.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    for field in ["question", "response", "confidence", "timestamp", "source"] {
        assert!(entries[0].get(field).is_some(), "missing {field}");
    }
}

#[test]
fn test_statistics_survive_restart() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    fs::write(&config.storage.catalog_file, SAMPLE_CATALOG).unwrap();

    {
        let services = Services::new(config.clone()).unwrap();
        services.chatbot.resolve("Combien coûte l'entrée ?");
        services.chatbot.resolve("Où se trouve le musée svp ?");
    }

    let on_disk = JsonStatsFile::new(&config.storage.stats_file).load().unwrap();
    assert_eq!(on_disk.get("combien coute l entree"), Some(&1));
    assert_eq!(on_disk.get("ou se trouve le musee"), Some(&1));

    let services = Services::new(config).unwrap();
    services.chatbot.resolve("combien coute l'entree");
    assert_eq!(
        services.chatbot.statistics_snapshot().get("combien coute l entree"),
        Some(&2)
    );
}

#[test]
fn test_corrupt_statistics_start_empty() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    fs::write(&config.storage.stats_file, "{ pas du json").unwrap();

    let services = Services::new(config).unwrap();
    assert!(services.chatbot.statistics_snapshot().is_empty());
}

#[test]
fn test_corrupt_history_is_replaced() {
    let temp = TempDir::new().unwrap();
    let config = test_config(temp.path());
    fs::write(&config.storage.history_file, "[{\"tronque\":").unwrap();

    let services = Services::new(config.clone()).unwrap();
    services.chatbot.resolve("bonjour");

    let history = JsonHistoryFile::new(&config.storage.history_file).load().unwrap();
    assert_eq!(history.len(), 1);
}

#[test]
fn test_missing_catalog_still_answers() {
    let temp = TempDir::new().unwrap();
    let services = Services::new(test_config(temp.path())).unwrap();

    let answer = services.chatbot.resolve("Combien coûte l'entrée ?");
    assert!(answer.is_fallback());
    // No catalog, no intent triggers
    let answer = services.chatbot.resolve("Tu sais faire quoi ?");
    assert!(answer.is_fallback());
    assert_eq!(answer.confidence, 0.0);
}
