use crate::config::SearchConfig;
use serde::{Deserialize, Serialize};

/// Per-query knobs, usually derived from [`SearchConfig`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum number of groups returned by grouped searches.
    pub max_results: Option<usize>,
}

impl SearchOptions {
    /// `Some(0)` means unlimited, as in [`SearchConfig::with_max_results`].
    pub fn with_max_results(max_results: Option<usize>) -> Self {
        Self {
            max_results: max_results.filter(|n| *n > 0),
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self::with_max_results(config.max_results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_is_unlimited() {
        assert_eq!(SearchOptions::with_max_results(Some(0)).max_results, None);
        assert_eq!(SearchOptions::with_max_results(Some(3)).max_results, Some(3));

        let config = SearchConfig::default().with_max_results(Some(0));
        assert_eq!(SearchOptions::from(&config), SearchOptions::with_max_results(Some(0)));
    }
}
