use quicksearch_api::Category;
use quicksearch_core::{QueryEngine, ingest};
use std::path::PathBuf;

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("search")
}

fn load_fixture() -> quicksearch_core::SearchIndex {
    let loaded = ingest::load(&fixture_dir()).unwrap();
    quicksearch_core::SearchIndex::from_records(&loaded.records)
}

#[test]
fn test_fixture_counts() {
    let loaded = ingest::load(&fixture_dir()).unwrap();
    assert_eq!(loaded.files.len(), 1);
    assert_eq!(loaded.records.len(), 14);

    let index = quicksearch_core::SearchIndex::from_records(&loaded.records);
    assert_eq!(index.name_count(), 14);
    assert_eq!(index.entry_count(), 45);
    assert_eq!(index.skipped_records(), 0);
}

#[test]
fn test_labels_are_decoded() {
    let index = load_fixture();
    let group = index.entries_for("abs").unwrap();

    assert_eq!(group.len(), 2);
    assert_eq!(
        &*group[0].qualified_name,
        "abs(const std::array< T, d > &x)"
    );
    assert_eq!(&*group[0].signature_label, "(const std::array< T, d > &x)");
    assert_eq!(group[0].file.as_deref(), Some("MathOperators_array.tpp"));
    assert_eq!(group[1].file.as_deref(), Some("MathOperators_vector.tpp"));
    assert_eq!(group[0].category, Some(Category::FUNCTIONS));
}

#[test]
fn test_grouped_results_carry_category() {
    let index = load_fixture();
    let groups = QueryEngine::new(&index).search_grouped("abs");

    assert!(!groups.is_empty());
    for item in groups.iter().flat_map(|g| g.items.iter()) {
        assert_eq!(item.category, Some(Category::FUNCTIONS));
    }
}

#[test]
fn test_display_name_keeps_case() {
    let index = load_fixture();
    assert!(index.entries_for("absorbASCII").is_some());
    assert!(index.entries_for("absorbascii").is_none());

    let entries = QueryEngine::new(&index).search("ABSORBA");
    assert_eq!(entries.len(), 8);
    assert!(entries.iter().all(|e| &*e.display_name == "absorbASCII"));
}

#[test]
fn test_duplicate_rows_retained() {
    let index = load_fixture();
    let groups = QueryEngine::new(&index).search_grouped("appends");

    assert_eq!(groups.len(), 1);
    assert_eq!(&*groups[0].display_name, "appendSData");
    assert_eq!(groups[0].len(), 2);
    assert_eq!(groups[0].items[0].target, groups[0].items[1].target);
}

#[test]
fn test_fixture_query_order() {
    let index = load_fixture();
    let groups = QueryEngine::new(&index).search_grouped("app");
    let names: Vec<_> = groups.iter().map(|g| &*g.display_name).collect();
    assert_eq!(names, vec!["append", "appendSData", "appendVData"]);

    let groups = QueryEngine::new(&index).search_grouped("ar");
    let names: Vec<_> = groups.iter().map(|g| &*g.display_name).collect();
    assert_eq!(names, vec!["areaTriangle", "areRecvsContinuous"]);

    let entries = QueryEngine::new(&index).search("a");
    assert_eq!(entries.len(), 45);
    assert!(QueryEngine::new(&index).search("zzz").is_empty());
}

#[test]
fn test_json_export_reloads() {
    let index = load_fixture();
    let json = ingest::json::to_json(&index.to_records()).unwrap();
    let records = ingest::json::parse_records(&json).unwrap();
    let reloaded = quicksearch_core::SearchIndex::from_records(&records);

    assert_eq!(reloaded.stats(), index.stats());
    assert_eq!(
        QueryEngine::new(&reloaded).search("abs"),
        QueryEngine::new(&index).search("abs")
    );
}
