//! Prefix search index over symbol display names.
//!
//! A [`SearchIndex`] is produced once by [`IndexBuilder`] and is read-only
//! afterwards. It is shared between readers behind an `Arc`; reloading a data
//! set means building a new index, never mutating a published one.

pub mod builder;
pub mod node;

pub use builder::IndexBuilder;
pub use node::{EntryId, IndexNode};

use indexmap::IndexMap;
use quicksearch_api::{Entry, IndexStats, RecordEntry, SymbolRecord};
use std::sync::Arc;

/// Normalization applied to display names and queries alike.
///
/// Lowercases char by char. `str::to_lowercase` is context sensitive (final
/// sigma), which would let a prefix normalize differently from the full name.
pub fn normalize(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[derive(Debug, Clone)]
pub struct SearchIndex {
    root: IndexNode,
    entries: Vec<Entry>,
    /// Normalized display name per entry, shared between entries of one name.
    normalized: Vec<Arc<str>>,
    /// Display name -> entries, in first-ingestion order of the name.
    by_name: IndexMap<Arc<str>, Vec<EntryId>>,
    node_count: usize,
    skipped_records: usize,
}

impl SearchIndex {
    pub fn builder() -> IndexBuilder {
        IndexBuilder::new()
    }

    /// Build from a record sequence, skipping malformed records.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a SymbolRecord>,
    {
        IndexBuilder::from_records(records)
    }

    pub fn root(&self) -> &IndexNode {
        &self.root
    }

    /// Node reached by an already normalized prefix.
    pub fn find_prefix(&self, normalized_prefix: &str) -> Option<&IndexNode> {
        self.root.descend(normalized_prefix.chars())
    }

    pub fn entry(&self, id: EntryId) -> &Entry {
        &self.entries[id as usize]
    }

    pub fn normalized_name(&self, id: EntryId) -> &str {
        &self.normalized[id as usize]
    }

    /// All entries in ingestion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Exact, case-sensitive lookup of a display name.
    pub fn entries_for(&self, display_name: &str) -> Option<Vec<&Entry>> {
        self.by_name
            .get(display_name)
            .map(|ids| ids.iter().map(|id| self.entry(*id)).collect())
    }

    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(|name| &**name)
    }

    pub fn name_count(&self) -> usize {
        self.by_name.len()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            name_count: self.name_count(),
            entry_count: self.entry_count(),
            node_count: self.node_count(),
            skipped_records: self.skipped_records(),
        }
    }

    /// One record per display name, entries in ingestion order.
    /// Rebuilding from the result answers every query the same way.
    pub fn to_records(&self) -> Vec<SymbolRecord> {
        self.by_name
            .iter()
            .map(|(name, ids)| {
                let entries = ids
                    .iter()
                    .map(|id| {
                        let entry = self.entry(*id);
                        RecordEntry {
                            qualified_name: entry.qualified_name.to_string(),
                            target: entry.target.to_string(),
                            signature_label: entry.signature_label.to_string(),
                            file: entry.file.as_deref().map(str::to_string),
                            category: entry.category.clone(),
                        }
                    })
                    .collect();
                SymbolRecord::new(name.to_string(), entries)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, targets: &[&str]) -> SymbolRecord {
        SymbolRecord::new(
            name,
            targets
                .iter()
                .map(|t| RecordEntry::new(format!("ns::{}", name), *t, "()"))
                .collect(),
        )
    }

    #[test]
    fn test_entries_for_is_case_sensitive() {
        let records = vec![record("absorbASCII", &["a", "b"])];
        let index = SearchIndex::from_records(&records);

        let found = index.entries_for("absorbASCII").unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(&*found[0].target, "a");
        assert!(index.entries_for("absorbascii").is_none());
    }

    #[test]
    fn test_to_records_merges_repeated_names() {
        let records = vec![
            record("abs", &["a"]),
            record("adapt", &["b"]),
            record("abs", &["c"]),
        ];
        let index = SearchIndex::from_records(&records);
        let rebuilt = index.to_records();

        assert_eq!(rebuilt.len(), 2);
        assert_eq!(rebuilt[0].display_name, "abs");
        let targets: Vec<_> = rebuilt[0].entries.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["a", "c"]);
    }

    #[test]
    fn test_normalize_is_prefix_stable() {
        let name = "ΟΔΟΣΟΣ";
        for end in name.char_indices().map(|(i, _)| i).skip(1) {
            assert!(normalize(name).starts_with(&normalize(&name[..end])));
        }
        assert_eq!(normalize("AbsorbASCII"), "absorbascii");
    }

    #[test]
    fn test_stats() {
        let records = vec![record("ab", &["x"]), record("", &["y"])];
        let index = SearchIndex::from_records(&records);
        let stats = index.stats();

        assert_eq!(stats.name_count, 1);
        assert_eq!(stats.entry_count, 1);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.skipped_records, 1);
    }
}
