// Documents directory: loading, adding, listing and section titles

use crate::common::{create_test_services, docx_bytes, TestCorpus, MUSEUM_TEXT};
use colepsbot::core::readers::{extract_text, DocumentFormat};
use colepsbot::core::search::TITLES_PREFIX;
use colepsbot::{ColepsError, MatchSource};
use std::fs;

#[test]
fn test_load_documents_directory() {
    let (services, _temp) = create_test_services();
    let root = services.library.root().to_path_buf();
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("musee.txt"), MUSEUM_TEXT).unwrap();
    fs::write(root.join("vide.txt"), "\n\n").unwrap();
    fs::write(root.join("notes.md"), "ignored").unwrap();

    let outcomes = services.load_documents().unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_loaded());
    assert_eq!(
        outcomes[0].message(),
        format!("Contenu musee.txt chargé ({} caractères)", MUSEUM_TEXT.chars().count())
    );
    assert!(!outcomes[1].is_loaded());
    assert!(outcomes[1].message().starts_with("Échec du chargement de vide.txt"));

    let answer = services.chatbot.resolve("manuscrits médiévaux");
    assert_eq!(answer.source, MatchSource::Document);
}

#[test]
fn test_add_document_copies_and_extracts() {
    let (services, _temp) = create_test_services();
    let corpus = TestCorpus::small();

    let (stored, document) = services.library.add(&corpus.files[1]).unwrap();
    assert_eq!(document.id, "cafe.txt");
    assert!(document.text.contains("pâtisseries maison"));
    assert!(stored.starts_with(services.library.root()));
    assert!(stored.exists());

    let listed = services.library.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "cafe.txt");
    assert!(listed[0].size_bytes > 0);
}

#[test]
fn test_add_document_rejects_bad_input() {
    let (services, _temp) = create_test_services();
    let corpus = TestCorpus::with_files(&[
        ("notes.odt", "texte"),
        ("blanc.txt", "   "),
        ("faux.docx", "pas une archive"),
    ]);

    let err = services.library.add(&corpus.path().join("notes.odt")).unwrap_err();
    assert!(matches!(err, ColepsError::UnsupportedFormat(_)));

    let err = services.library.add(&corpus.path().join("blanc.txt")).unwrap_err();
    assert!(matches!(err, ColepsError::IngestFailed(_)));

    let err = services.library.add(&corpus.path().join("faux.docx")).unwrap_err();
    assert!(matches!(err, ColepsError::ExtractionFailed(_)));

    let err = services.library.add(&corpus.path().join("absent.txt")).unwrap_err();
    assert!(err.is_not_found());

    // Nothing was copied
    assert!(services.library.list().unwrap().is_empty());
}

#[test]
fn test_docx_text_and_format() {
    let corpus = TestCorpus::with_files(&[]);
    let path = corpus.path().join("guide.docx");
    fs::write(
        &path,
        docx_bytes(&[
            (Some("Heading1"), "Horaires"),
            (None, "Le musée ouvre à neuf heures."),
            (None, ""),
            (Some("Titre2"), "Tarifs"),
            (None, "L'entrée coûte huit euros."),
        ]),
    )
    .unwrap();

    assert_eq!(DocumentFormat::from_path(&path), Some(DocumentFormat::Docx));
    assert_eq!(
        extract_text(&path).unwrap(),
        "Horaires\nLe musée ouvre à neuf heures.\nTarifs\nL'entrée coûte huit euros."
    );
}

#[test]
fn test_vague_question_lists_docx_titles() {
    let (services, _temp) = create_test_services();
    let root = services.library.root().to_path_buf();
    fs::create_dir_all(&root).unwrap();
    fs::write(
        root.join("guide.docx"),
        docx_bytes(&[
            (Some("Title"), "Guide du visiteur"),
            (Some("Heading1"), "Horaires"),
            (None, "Le musée ouvre ses portes à neuf heures."),
            (Some("Heading1"), "Tarifs"),
            (None, "Les étudiants bénéficient d'une réduction."),
        ]),
    )
    .unwrap();
    fs::write(root.join("musee.txt"), MUSEUM_TEXT).unwrap();
    services.load_documents().unwrap();

    let answer = services.chatbot.resolve("truc");
    assert_eq!(answer.source, MatchSource::Titles);
    assert_eq!(answer.confidence, 0.7);
    assert_eq!(
        answer.response,
        format!("{TITLES_PREFIX}\n- Guide du visiteur\n- Horaires\n- Tarifs")
    );

    // A specific question that misses still gets the apology
    let answer = services
        .chatbot
        .resolve("xylophone quantique supraconducteur interplanétaire");
    assert!(answer.is_fallback());
}

#[test]
fn test_text_documents_offer_no_titles() {
    let (services, _temp) = create_test_services();
    let root = services.library.root().to_path_buf();
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join("musee.txt"), MUSEUM_TEXT).unwrap();
    services.load_documents().unwrap();

    assert!(services.chatbot.resolve("truc").is_fallback());
}
