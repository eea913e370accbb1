use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Kind of symbol list an entry was published in (e.g. `functions`, `classes`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(Cow<'static, str>);

impl Category {
    pub const ALL: Category = Category(Cow::Borrowed("all"));
    pub const CLASSES: Category = Category(Cow::Borrowed("classes"));
    pub const FUNCTIONS: Category = Category(Cow::Borrowed("functions"));
    pub const VARIABLES: Category = Category(Cow::Borrowed("variables"));
    pub const TYPEDEFS: Category = Category(Cow::Borrowed("typedefs"));
    pub const ENUMS: Category = Category(Cow::Borrowed("enums"));
    pub const NAMESPACES: Category = Category(Cow::Borrowed("namespaces"));
    pub const FILES: Category = Category(Cow::Borrowed("files"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Derive the category from a data file stem.
    /// Generated files are split into numbered pages, so `functions_1` and
    /// `functions_a` both map to `functions`.
    pub fn from_file_stem(stem: &str) -> Self {
        let base = match stem.rsplit_once('_') {
            Some((head, page))
                if !head.is_empty()
                    && !page.is_empty()
                    && page.chars().all(|c| c.is_ascii_hexdigit()) =>
            {
                head
            }
            _ => stem,
        };

        match base.to_lowercase().as_str() {
            "all" => Self::ALL,
            "classes" => Self::CLASSES,
            "functions" => Self::FUNCTIONS,
            "variables" => Self::VARIABLES,
            "typedefs" => Self::TYPEDEFS,
            "enums" => Self::ENUMS,
            "namespaces" => Self::NAMESPACES,
            "files" => Self::FILES,
            other => Self::new(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
