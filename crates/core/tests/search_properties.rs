use quicksearch_api::{RecordEntry, SymbolRecord};
use quicksearch_core::format::ResultFormatter;
use quicksearch_core::index::normalize;
use quicksearch_core::{IndexBuilder, QueryEngine, SearchIndex};
use std::collections::HashMap;

fn record(name: &str, entries: &[(&str, &str)]) -> SymbolRecord {
    SymbolRecord::new(
        name,
        entries
            .iter()
            .map(|(target, label)| RecordEntry::new(format!("bitpit::{}", name), *target, *label))
            .collect(),
    )
}

fn corpus() -> Vec<SymbolRecord> {
    vec![
        record("absorbBINARY", &[("#b1", "(std::fstream &)"), ("#b2", "(data_T *, int)")]),
        record("abs", &[("#A", "array overload"), ("#B", "vector overload")]),
        record("absorbASCII", &[("#a1", "(std::fstream &)")]),
        record("appendSData", &[("#s", "(T2 &...)"), ("#s", "(T2 &...)")]),
        record("", &[("#bad", "")]),
        record("Adapt", &[("#ad", "bitpit::ParaTree")]),
        record("at", &[("#at1", "(id_t)"), ("#at2", "(id_t) const")]),
        record("ÉLAN", &[("#e", "()")]),
    ]
}

fn build() -> SearchIndex {
    SearchIndex::from_records(&corpus())
}

#[test]
fn empty_query_is_empty() {
    let index = build();
    assert!(QueryEngine::new(&index).search("").is_empty());
}

#[test]
fn every_prefix_finds_its_entries() {
    let index = build();
    let engine = QueryEngine::new(&index);

    for entry in index.entries() {
        let name: Vec<char> = entry.display_name.chars().collect();
        for len in 1..=name.len() {
            let prefix: String = name[..len].iter().collect();
            for query in [prefix.clone(), prefix.to_uppercase(), prefix.to_lowercase()] {
                let results = engine.search(&query);
                assert!(
                    results.contains(entry),
                    "query {:?} should find {:?}",
                    query,
                    entry.target
                );
            }
        }
    }
}

#[test]
fn unmatched_queries_are_empty_not_errors() {
    let index = build();
    let engine = QueryEngine::new(&index);

    for query in ["zzz", "absorbc", "at ", "b", "élanx"] {
        assert!(engine.search(query).is_empty(), "query {:?}", query);
    }
}

#[test]
fn building_twice_answers_identically() {
    let first = build();
    let second = build();

    for query in ["a", "ab", "abs", "absorb", "AT", "app", "é", "x"] {
        assert_eq!(
            QueryEngine::new(&first).search(query),
            QueryEngine::new(&second).search(query)
        );
    }
}

#[test]
fn rebuilding_from_exported_records_answers_identically() {
    let original = build();
    let rebuilt = SearchIndex::from_records(&original.to_records());

    for query in ["a", "abs", "app", "é"] {
        assert_eq!(
            QueryEngine::new(&original).search(query),
            QueryEngine::new(&rebuilt).search(query)
        );
    }
}

#[test]
fn grouping_partitions_without_loss() {
    let index = build();
    let engine = QueryEngine::new(&index);

    for query in ["a", "ab", "abs", "app", "at", "é", "zzz"] {
        let entries = engine.search(query);
        let groups = ResultFormatter::format(&entries);

        let grouped: usize = groups.iter().map(|g| g.len()).sum();
        assert_eq!(grouped, entries.len());

        let mut seen = HashMap::new();
        for group in &groups {
            assert!(seen.insert(group.display_name.clone(), ()).is_none());
            for item in &group.items {
                assert!(
                    entries
                        .iter()
                        .any(|e| e.display_name == group.display_name && e.target == item.target)
                );
            }
        }
    }
}

#[test]
fn overloads_group_in_ingestion_order() {
    let index = build();
    let groups = ResultFormatter::format(&QueryEngine::new(&index).search("ab"));

    assert_eq!(&*groups[0].display_name, "abs");
    let items: Vec<_> = groups[0]
        .items
        .iter()
        .map(|i| (&*i.target, &*i.signature_label))
        .collect();
    assert_eq!(
        items,
        vec![("#A", "array overload"), ("#B", "vector overload")]
    );
}

#[test]
fn groups_are_lexicographic() {
    let index = build();
    let groups = ResultFormatter::format(&QueryEngine::new(&index).search("absorb"));
    let names: Vec<_> = groups.iter().map(|g| &*g.display_name).collect();
    assert_eq!(names, vec!["absorbASCII", "absorbBINARY"]);

    let groups = ResultFormatter::format(&QueryEngine::new(&index).search("a"));
    let names: Vec<_> = groups.iter().map(|g| &*g.display_name).collect();
    assert_eq!(
        names,
        vec!["abs", "absorbASCII", "absorbBINARY", "Adapt", "appendSData", "at"]
    );
}

#[test]
fn duplicates_are_retained() {
    let index = build();
    let entries = QueryEngine::new(&index).search("appendsdata");

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].target, entries[1].target);
    assert_eq!(ResultFormatter::format(&entries)[0].len(), 2);
}

#[test]
fn malformed_records_are_skipped() {
    let mut builder = IndexBuilder::new();
    let mut errors = 0;
    for record in &corpus() {
        if builder.add_record(record).is_err() {
            errors += 1;
        }
    }
    let index = builder.build();

    assert_eq!(errors, 1);
    assert_eq!(index.skipped_records(), 1);
    assert_eq!(index.name_count(), 7);
}

#[test]
fn non_ascii_names_fold_case() {
    let index = build();
    let engine = QueryEngine::new(&index);

    assert_eq!(normalize("ÉLAN"), "élan");
    assert_eq!(engine.search("él").len(), 1);
    assert_eq!(engine.search("ÉL").len(), 1);
}
