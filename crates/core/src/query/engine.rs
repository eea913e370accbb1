use super::model::SearchOptions;
use crate::format::ResultFormatter;
use crate::index::{EntryId, SearchIndex, normalize};
use quicksearch_api::{DisplayGroup, Entry};
use std::ops::Deref;

/// Read-only query side of a [`SearchIndex`].
///
/// Works over anything that derefs to an index (`&SearchIndex`,
/// `Arc<SearchIndex>`), so a snapshot can be moved into a blocking task.
pub struct QueryEngine<I> {
    index: I,
    options: SearchOptions,
}

impl<I: Deref<Target = SearchIndex>> QueryEngine<I> {
    pub fn new(index: I) -> Self {
        Self {
            index,
            options: SearchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Entries whose display name starts with `query`, case-insensitively.
    ///
    /// An empty query or an unknown prefix yields an empty vector.
    pub fn search(&self, query: &str) -> Vec<Entry> {
        self.matching_ids(query)
            .into_iter()
            .map(|id| self.index.entry(id).clone())
            .collect()
    }

    /// [`Self::search`] grouped by display name, capped at `max_results` groups.
    pub fn search_grouped(&self, query: &str) -> Vec<DisplayGroup> {
        let entries = self.search(query);
        ResultFormatter::format_limited(&entries, self.options.max_results)
    }

    fn matching_ids(&self, query: &str) -> Vec<EntryId> {
        if query.is_empty() {
            return Vec::new();
        }

        let normalized = normalize(query);
        let Some(node) = self.index.find_prefix(&normalized) else {
            return Vec::new();
        };

        // Node lists are already in rank order. A name equal to the query
        // sorts before every longer name sharing it as a prefix.
        node.entries().to_vec()
    }
}
