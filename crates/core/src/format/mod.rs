//! Shapes query results for display.

use indexmap::IndexMap;
use quicksearch_api::{DisplayGroup, Entry, SubEntry};
use std::sync::Arc;

pub struct ResultFormatter;

impl ResultFormatter {
    /// Group entries by display name.
    ///
    /// Groups appear in the order their first entry appears; items keep the
    /// input order. Nothing is merged or dropped, duplicate targets included.
    pub fn format(entries: &[Entry]) -> Vec<DisplayGroup> {
        Self::format_limited(entries, None)
    }

    /// Like [`Self::format`], keeping at most `limit` groups. Groups are never
    /// truncated.
    pub fn format_limited(entries: &[Entry], limit: Option<usize>) -> Vec<DisplayGroup> {
        let mut groups: IndexMap<Arc<str>, DisplayGroup> = IndexMap::new();

        for entry in entries {
            if let Some(group) = groups.get_mut(&entry.display_name) {
                group.items.push(SubEntry::from(entry));
                continue;
            }
            if limit.is_some_and(|max| groups.len() >= max) {
                continue;
            }
            let mut group = DisplayGroup::new(entry.display_name.clone());
            group.items.push(SubEntry::from(entry));
            groups.insert(entry.display_name.clone(), group);
        }

        groups.into_values().collect()
    }
}
