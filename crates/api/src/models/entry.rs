use super::category::Category;
use super::util::{serde_arc_str, serde_opt_arc_str};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One raw input row: a display name and every documented occurrence of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    pub display_name: String,
    pub entries: Vec<RecordEntry>,
}

impl SymbolRecord {
    pub fn new(display_name: impl Into<String>, entries: Vec<RecordEntry>) -> Self {
        Self {
            display_name: display_name.into(),
            entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub qualified_name: String,
    pub target: String,
    pub signature_label: String,
    /// Declaring file, when the generator appends one to the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl RecordEntry {
    pub fn new(
        qualified_name: impl Into<String>,
        target: impl Into<String>,
        signature_label: impl Into<String>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            target: target.into(),
            signature_label: signature_label.into(),
            file: None,
            category: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// One documented symbol occurrence as held by a built index.
///
/// String fields are shared, so cloning an entry out of an index snapshot
/// does not copy text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(with = "serde_arc_str")]
    pub display_name: Arc<str>,
    #[serde(with = "serde_arc_str")]
    pub qualified_name: Arc<str>,
    /// Opaque link target, carried through untouched.
    #[serde(with = "serde_arc_str")]
    pub target: Arc<str>,
    #[serde(with = "serde_arc_str")]
    pub signature_label: Arc<str>,
    #[serde(default, with = "serde_opt_arc_str")]
    pub file: Option<Arc<str>>,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Entry {
    pub fn from_record(display_name: Arc<str>, raw: &RecordEntry) -> Self {
        Self {
            display_name,
            qualified_name: Arc::from(raw.qualified_name.as_str()),
            target: Arc::from(raw.target.as_str()),
            signature_label: Arc::from(raw.signature_label.as_str()),
            file: raw.file.as_deref().map(Arc::from),
            category: raw.category.clone(),
        }
    }
}
