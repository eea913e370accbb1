use super::node::{EntryId, IndexNode};
use super::{SearchIndex, normalize};
use crate::error::{QuickSearchError, Result};
use indexmap::IndexMap;
use quicksearch_api::{Entry, SymbolRecord};
use std::collections::HashMap;
use std::sync::Arc;

/// Accumulates records into a prefix tree and finalizes a [`SearchIndex`].
#[derive(Debug, Default)]
pub struct IndexBuilder {
    root: IndexNode,
    entries: Vec<Entry>,
    normalized: Vec<Arc<str>>,
    by_name: IndexMap<Arc<str>, Vec<EntryId>>,
    /// Shared normalized form per display name.
    normalized_names: HashMap<Arc<str>, Arc<str>>,
    position: usize,
    skipped: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a record sequence. Malformed records are logged and skipped.
    pub fn from_records<'a, I>(records: I) -> SearchIndex
    where
        I: IntoIterator<Item = &'a SymbolRecord>,
    {
        let mut builder = Self::new();
        builder.add_records(records);
        builder.build()
    }

    /// Start from `skipped` records already rejected upstream, e.g. the
    /// count stored with a snapshot.
    pub fn with_skipped(mut self, skipped: usize) -> Self {
        self.skipped += skipped;
        self
    }

    /// Add records in order, logging and skipping malformed ones.
    pub fn add_records<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a SymbolRecord>,
    {
        for record in records {
            if let Err(e) = self.add_record(record) {
                tracing::warn!("Skipping record: {}", e);
            }
        }
    }

    /// Add one record. Returns the number of entries indexed.
    ///
    /// A record with a blank display name or no entries is rejected with
    /// [`QuickSearchError::MalformedRecord`]; the builder stays usable.
    pub fn add_record(&mut self, record: &SymbolRecord) -> Result<usize> {
        let position = self.position;
        self.position += 1;

        if record.display_name.trim().is_empty() {
            self.skipped += 1;
            return Err(QuickSearchError::MalformedRecord {
                position,
                reason: "empty display name".to_string(),
            });
        }
        if record.entries.is_empty() {
            self.skipped += 1;
            return Err(QuickSearchError::MalformedRecord {
                position,
                reason: format!("'{}' has no entries", record.display_name),
            });
        }

        let (display_name, normalized) = self.intern_name(&record.display_name);

        for raw in &record.entries {
            let id = EntryId::try_from(self.entries.len())
                .map_err(|_| QuickSearchError::Internal("entry table is full".to_string()))?;

            self.entries
                .push(Entry::from_record(display_name.clone(), raw));
            self.normalized.push(normalized.clone());
            self.root.insert_path(normalized.chars(), id);
            self.by_name
                .entry(display_name.clone())
                .or_default()
                .push(id);
        }

        Ok(record.entries.len())
    }

    fn intern_name(&mut self, display_name: &str) -> (Arc<str>, Arc<str>) {
        if let Some((name, normalized)) = self.normalized_names.get_key_value(display_name) {
            return (name.clone(), normalized.clone());
        }
        let name: Arc<str> = Arc::from(display_name);
        let normalized: Arc<str> = Arc::from(normalize(display_name));
        self.normalized_names
            .insert(name.clone(), normalized.clone());
        (name, normalized)
    }

    /// Number of records rejected so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Rank all entries and freeze the tree.
    ///
    /// Rank order is ascending normalized name, then original display name,
    /// then ingestion order. The primary key is case-insensitive, so `abs`
    /// ranks before `Adapt` even though byte order would put `Adapt` first;
    /// names differing only in case are ordered by their bytes.
    pub fn build(self) -> SearchIndex {
        let Self {
            mut root,
            entries,
            normalized,
            by_name,
            skipped,
            ..
        } = self;

        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|a, b| {
            normalized[*a]
                .cmp(&normalized[*b])
                .then_with(|| entries[*a].display_name.cmp(&entries[*b].display_name))
                .then_with(|| a.cmp(b))
        });

        let mut rank = vec![0u32; entries.len()];
        for (position, id) in order.into_iter().enumerate() {
            rank[id] = position as u32;
        }
        root.sort_entries_by_rank(&rank);

        let node_count = root.node_count();
        tracing::debug!(
            "Built search index: {} names, {} entries, {} nodes, {} skipped",
            by_name.len(),
            entries.len(),
            node_count,
            skipped
        );

        SearchIndex {
            root,
            entries,
            normalized,
            by_name,
            node_count,
            skipped_records: skipped,
        }
    }
}
