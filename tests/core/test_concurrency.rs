// Resolution while the corpus is being rebuilt

use crate::common::{deterministic_bot, MUSEUM_TEXT};
use colepsbot::MatchSource;
use std::sync::Arc;
use std::thread;

const INGESTS: usize = 20;

#[test]
fn test_resolve_during_ingestion() {
    let bot = Arc::new(deterministic_bot());
    bot.ingest_document("musee.txt", MUSEUM_TEXT).unwrap();

    thread::scope(|scope| {
        let writer = Arc::clone(&bot);
        scope.spawn(move || {
            for i in 0..INGESTS {
                let text = format!(
                    "Note numéro {i} sur la billetterie. La caisse {i} ouvre à neuf heures."
                );
                writer.ingest_document(&format!("note{i}.txt"), &text).unwrap();
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&bot);
            scope.spawn(move || {
                for _ in 0..50 {
                    let answer = reader.resolve("manuscrits médiévaux enluminés");
                    // Every snapshot contains the first document
                    assert_eq!(answer.source, MatchSource::Document);
                    assert!(answer.response.contains("manuscrits"));

                    let faq = reader.resolve("Combien coûte l'entrée ?");
                    assert_eq!(faq.source, MatchSource::Exact);
                }
            });
        }
    });

    let snapshot = bot.snapshot();
    assert_eq!(snapshot.documents().len(), INGESTS + 1);
    assert_eq!(snapshot.generation(), INGESTS as u64 + 1);
    assert_eq!(
        bot.statistics_snapshot().get("combien coute l entree"),
        Some(&200)
    );
}

#[test]
fn test_concurrent_ingests_are_serialized() {
    let bot = Arc::new(deterministic_bot());

    thread::scope(|scope| {
        for t in 0..4 {
            let bot = Arc::clone(&bot);
            scope.spawn(move || {
                for i in 0..5 {
                    bot.ingest_document(
                        &format!("t{t}-{i}.txt"),
                        &format!("Document {t} {i} sur les expositions temporaires."),
                    )
                    .unwrap();
                }
            });
        }
    });

    // No ingestion was lost to a concurrent rebuild
    let snapshot = bot.snapshot();
    assert_eq!(snapshot.documents().len(), 20);
    assert_eq!(snapshot.generation(), 20);
}

#[test]
fn test_snapshot_outlives_reindex() {
    let bot = deterministic_bot();
    bot.ingest_text(MUSEUM_TEXT).unwrap();

    let held = bot.snapshot();
    bot.ingest_text("Le vestiaire est gratuit. Les parapluies y sont acceptés.")
        .unwrap();

    assert_eq!(held.documents().len(), 1);
    assert_eq!(bot.snapshot().documents().len(), 2);
}
