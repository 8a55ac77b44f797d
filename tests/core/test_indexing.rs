// Corpus ingestion and retrieval tests

use crate::common::MUSEUM_TEXT;
use colepsbot::core::indexer::{Chunker, Document, DocumentIndexer, DEFAULT_MAX_NGRAM};
use colepsbot::core::search::SimilaritySearch;
use colepsbot::{Chatbot, ColepsError, MatchSource};

#[test]
fn test_reindex_covers_every_document() {
    let bot = Chatbot::default();
    bot.ingest_document("musee.txt", MUSEUM_TEXT).unwrap();
    let report = bot
        .ingest_document(
            "parking.txt",
            "Le parking souterrain compte deux cents places. Il est payant le samedi.",
        )
        .unwrap();

    assert_eq!(report.documents_added, 1);
    assert_eq!(report.total_documents, 2);

    let snapshot = bot.snapshot();
    assert_eq!(snapshot.generation(), 2);
    assert_eq!(report.chunks, snapshot.chunks().len());
    assert!(snapshot.accumulated_text().starts_with(MUSEUM_TEXT));
    assert!(snapshot.accumulated_text().ends_with("payant le samedi."));

    // Both the old and the new document are searchable
    let answer = bot.resolve("parking souterrain");
    assert_eq!(answer.source, MatchSource::Document);
    assert!(answer.response.contains("parking souterrain"));

    let answer = bot.resolve("roseraie potager");
    assert_eq!(answer.source, MatchSource::Document);
    assert!(answer.response.contains("roseraie"));
}

#[test]
fn test_chunks_are_sentence_windows() {
    let indexer = DocumentIndexer::new(Chunker::new(2), DEFAULT_MAX_NGRAM);
    indexer
        .ingest(vec![Document::new(
            "a",
            "Un. Deux deux. Trois trois trois. Quatre. Cinq.",
        )])
        .unwrap();

    let snapshot = indexer.snapshot();
    let texts: Vec<&str> = snapshot.chunks().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["Un. Deux deux.", "Trois trois trois. Quatre.", "Cinq."]
    );
    for (i, chunk) in snapshot.chunks().iter().enumerate() {
        assert_eq!(chunk.chunk_index, i);
    }
}

#[test]
fn test_rechunking_spans_document_boundaries() {
    let indexer = DocumentIndexer::new(Chunker::new(3), DEFAULT_MAX_NGRAM);
    indexer
        .ingest(vec![Document::new("a", "Phrase une. Phrase deux.")])
        .unwrap();
    indexer
        .ingest(vec![Document::new("b", "Phrase trois. Phrase quatre.")])
        .unwrap();

    let snapshot = indexer.snapshot();
    assert_eq!(snapshot.chunks().len(), 2);
    assert_eq!(
        snapshot.chunks()[0].text,
        "Phrase une. Phrase deux. Phrase trois."
    );
}

#[test]
fn test_blank_ingest_keeps_previous_snapshot() {
    let bot = Chatbot::default();
    bot.ingest_text(MUSEUM_TEXT).unwrap();
    let before = bot.snapshot();

    let err = bot.ingest_text(" \n\t ").unwrap_err();
    assert!(matches!(err, ColepsError::IngestFailed(_)));

    let after = bot.snapshot();
    assert_eq!(after.generation(), before.generation());
    assert_eq!(after.chunks(), before.chunks());
}

#[test]
fn test_search_on_empty_corpus() {
    let indexer = DocumentIndexer::default();
    let search = SimilaritySearch::default();
    assert!(search.search(&indexer.snapshot(), "n'importe quoi").is_none());
}

#[test]
fn test_search_returns_best_chunk_above_floor() {
    let indexer = DocumentIndexer::default();
    indexer
        .ingest(vec![Document::new("musee", MUSEUM_TEXT)])
        .unwrap();
    let snapshot = indexer.snapshot();

    let hit = SimilaritySearch::default()
        .search(&snapshot, "atelier de jardinage le mercredi")
        .unwrap();
    assert_eq!(hit.chunk.chunk_index, 2);
    assert!(hit.score > 0.1 && hit.score <= 1.0 + 1e-9);

    // Same query, floor above any possible score
    assert!(SimilaritySearch::new(1.5)
        .search(&snapshot, "atelier de jardinage le mercredi")
        .is_none());
}

#[test]
fn test_corpus_without_indexable_words() {
    let indexer = DocumentIndexer::default();
    indexer.ingest(vec![Document::new("a", "a b c. d e f.")]).unwrap();

    let snapshot = indexer.snapshot();
    assert!(!snapshot.chunks().is_empty());
    assert!(!snapshot.is_indexed());
    assert!(SimilaritySearch::default().search(&snapshot, "a b c").is_none());
}
