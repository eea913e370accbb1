use super::category::Category;
use super::entry::Entry;
use super::util::{serde_arc_str, serde_opt_arc_str};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// All entries sharing one display name, bundled under a single heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGroup {
    #[serde(with = "serde_arc_str")]
    pub display_name: Arc<str>,
    pub items: Vec<SubEntry>,
}

impl DisplayGroup {
    pub fn new(display_name: Arc<str>) -> Self {
        Self {
            display_name,
            items: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A `signature_label` + `target` pair inside a [`DisplayGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubEntry {
    #[serde(with = "serde_arc_str")]
    pub signature_label: Arc<str>,
    #[serde(with = "serde_arc_str")]
    pub target: Arc<str>,
    #[serde(with = "serde_arc_str")]
    pub qualified_name: Arc<str>,
    #[serde(default, with = "serde_opt_arc_str")]
    pub file: Option<Arc<str>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl From<&Entry> for SubEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            signature_label: entry.signature_label.clone(),
            target: entry.target.clone(),
            qualified_name: entry.qualified_name.clone(),
            file: entry.file.clone(),
            category: entry.category.clone(),
        }
    }
}
