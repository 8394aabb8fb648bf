//! Document-level extraction over JSON dumps and in-memory pages.

mod common;

use common::{grid_page, item, page, PAGE_HEIGHT, PAGE_WIDTH};
use glyphgrid::{
    CrossPageOptions, DocumentExtractor, ExtractWarningCode, JsonDocument, PageOutcome,
    PageSource, PipelineSettings, SourceError, TextLayer,
};

fn table_with_running_header(page_no: usize) -> TextLayer {
    let mut layer = grid_page(
        &[&["Part", "Qty"], &["101", "12"], &["102", "40"]],
        &[100.0, 300.0],
        200.0,
        20.0,
    );
    layer.items.push(item("ACME Quarterly", 60.0, 30.0, 10.0));
    layer
        .items
        .push(item(&format!("Page {page_no}"), 280.0, 770.0, 10.0));
    layer
}

#[test]
fn a_malformed_page_does_not_stop_the_document() {
    let dump = r#"{"pages": [
        {"width": 612, "height": 792, "items": [
            {"str": "Name", "transform": [10, 0, 0, 10, 100, 592]},
            {"str": "Age", "transform": [10, 0, 0, 10, 250, 592]},
            {"str": "Alice", "transform": [10, 0, 0, 10, 100, 572]},
            {"str": "30", "transform": [10, 0, 0, 10, 250, 572]}
        ]},
        {"width": 612, "height": "tall", "items": []},
        {"width": 612, "height": 792, "items": [
            {"str": "Only", "transform": [10, 0, 0, 10, 100, 592]}
        ]}
    ]}"#;
    let doc = JsonDocument::from_slice(dump.as_bytes()).unwrap();
    let result = DocumentExtractor::default().extract(&doc);

    assert_eq!(result.pages.len(), 3);
    assert!(matches!(result.pages[0].outcome, PageOutcome::Table(_)));
    match &result.pages[1].outcome {
        PageOutcome::Failed { error } => assert!(error.contains("malformed page 1")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(result.pages[2].outcome, PageOutcome::NoTable);
    assert_eq!(result.failed_count(), 1);

    let failed: Vec<_> = result
        .warnings()
        .filter(|w| w.code == ExtractWarningCode::PageFailed)
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].page, Some(1));
}

#[test]
fn a_malformed_item_only_costs_that_item() {
    let dump = r#"[{"width": 612, "height": 792, "items": [
        {"str": "Name", "transform": [10, 0, 0, 10, 100, 592]},
        {"str": "Age", "transform": [10, 0, 0, 10, 250, 592]},
        {"str": "Alice", "transform": [10, 0, 0, 10, 100, 572]},
        {"str": "30", "transform": [10, 0, 0, 10, 250, 572]},
        {"str": "x", "transform": null}
    ]}]"#;
    let doc = JsonDocument::from_slice(dump.as_bytes()).unwrap();
    let result = DocumentExtractor::default().extract(&doc);

    let page = &result.pages[0];
    let table = page.table().expect("page keeps its table");
    assert_eq!(table.text_grid(), vec![vec!["Name", "Age"], vec!["Alice", "30"]]);
    assert_eq!(result.failed_count(), 0);
    assert!(
        page.warnings
            .iter()
            .any(|w| w.code == ExtractWarningCode::MalformedItem)
    );
}

#[test]
fn cross_page_furniture_is_removed_when_enabled() {
    let layers: Vec<TextLayer> = (1..=3).map(table_with_running_header).collect();

    let plain = DocumentExtractor::default().extract(&layers);
    let (_, table) = plain.tables().next().unwrap();
    assert!(
        table
            .text_grid()
            .iter()
            .flatten()
            .any(|t| t.contains("ACME") || t.contains("Page"))
    );

    let extractor = DocumentExtractor::new(PipelineSettings::default())
        .with_cross_page(CrossPageOptions::default());
    let result = extractor.extract(&layers);
    assert_eq!(result.tables().count(), 3);
    for (_, table) in result.tables() {
        assert_eq!(
            table.text_grid(),
            vec![vec!["Part", "Qty"], vec!["101", "12"], vec!["102", "40"]]
        );
    }
}

#[test]
fn cross_page_detection_needs_enough_pages() {
    let layers: Vec<TextLayer> = (1..=2).map(table_with_running_header).collect();
    let extractor = DocumentExtractor::default().with_cross_page(CrossPageOptions::default());
    let result = extractor.extract(&layers);
    let (_, table) = result.tables().next().unwrap();
    assert!(table.text_grid().iter().flatten().any(|t| t.contains("ACME")));
}

#[test]
fn dump_files_open_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dump.json");
    std::fs::write(
        &path,
        r#"[{"height": 792, "items": [{"str": "x", "transform": [10, 0, 0, 10, 1, 1]}]}]"#,
    )
    .unwrap();
    let doc = JsonDocument::open_file(&path).unwrap();
    assert_eq!(doc.page_count(), 1);

    let missing = JsonDocument::open_file(dir.path().join("nope.json"));
    assert!(matches!(missing, Err(SourceError::Io(_))));
}

#[test]
fn extract_pages_keeps_requested_order() {
    let layers = vec![
        page(&[("a", 100.0, 200.0), ("b", 100.0, 220.0)]),
        TextLayer::new(PAGE_WIDTH, PAGE_HEIGHT, Vec::new()),
    ];
    let result = DocumentExtractor::default().extract_pages(&layers, &[1, 0]);
    let order: Vec<usize> = result.pages.iter().map(|p| p.page).collect();
    assert_eq!(order, vec![1, 0]);
    assert_eq!(result.pages[0].outcome, PageOutcome::NoTable);
}

#[test]
fn document_results_serialize_to_json() {
    let layers = vec![page(&[
        ("Name", 100.0, 200.0),
        ("Age", 250.0, 200.0),
        ("Alice", 100.0, 220.0),
        ("30", 250.0, 220.0),
    ])];
    let result = DocumentExtractor::default().extract(&layers);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["pages"][0]["outcome"]["status"], "table");
    assert_eq!(json["pages"][0]["outcome"]["rows"][1][0]["text"], "Alice");
    assert_eq!(json["pages"][0]["outcome"]["columns"][1], 250.0);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_extraction_matches_sequential() {
    let layers: Vec<TextLayer> = (1..=6).map(table_with_running_header).collect();
    let extractor = DocumentExtractor::default().with_cross_page(CrossPageOptions::default());
    assert_eq!(
        extractor.extract_parallel(layers.as_slice()),
        extractor.extract(&layers)
    );
}
