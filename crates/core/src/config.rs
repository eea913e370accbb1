//! Engine configuration.
//!
//! Values come from [`SearchConfig::default`], optionally overlaid with
//! `QUICKSEARCH_*` environment variables. The CLI applies its own flags on top.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const APP_DIR_NAME: &str = ".quicksearch";
pub const DEFAULT_INDEX_DIR: &str = "indices";
pub const DEFAULT_WATCH_DEBOUNCE_MS: u64 = 500;

pub const ENV_CACHE_DIR: &str = "QUICKSEARCH_CACHE_DIR";
pub const ENV_MAX_RESULTS: &str = "QUICKSEARCH_MAX_RESULTS";
pub const ENV_WATCH_DEBOUNCE_MS: &str = "QUICKSEARCH_WATCH_DEBOUNCE_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Directory holding index snapshots.
    pub cache_dir: PathBuf,
    /// Maximum number of groups per response. `None` means unlimited.
    pub max_results: Option<usize>,
    /// Quiet period before a changed data source is rebuilt.
    pub watch_debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_dir: app_dir().join(DEFAULT_INDEX_DIR),
            max_results: None,
            watch_debounce_ms: DEFAULT_WATCH_DEBOUNCE_MS,
        }
    }
}

impl SearchConfig {
    /// Defaults overlaid with the `QUICKSEARCH_*` environment variables.
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var(ENV_CACHE_DIR) {
            config.cache_dir = PathBuf::from(dir);
        }

        if let Ok(raw) = std::env::var(ENV_MAX_RESULTS) {
            match raw.parse::<usize>() {
                Ok(0) => config.max_results = None,
                Ok(n) => config.max_results = Some(n),
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", ENV_MAX_RESULTS, raw, e),
            }
        }

        if let Ok(raw) = std::env::var(ENV_WATCH_DEBOUNCE_MS) {
            match raw.parse::<u64>() {
                Ok(ms) => config.watch_debounce_ms = ms,
                Err(e) => tracing::warn!("Ignoring {}={:?}: {}", ENV_WATCH_DEBOUNCE_MS, raw, e),
            }
        }

        config
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn with_max_results(mut self, limit: Option<usize>) -> Self {
        self.max_results = limit.filter(|n| *n > 0);
        self
    }

    pub fn with_watch_debounce_ms(mut self, ms: u64) -> Self {
        self.watch_debounce_ms = ms;
        self
    }
}

/// Per-user application directory (`~/.quicksearch`).
pub fn app_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = SearchConfig::default()
            .with_cache_dir("/tmp/qs")
            .with_max_results(Some(0))
            .with_watch_debounce_ms(50);

        assert_eq!(config.cache_dir, PathBuf::from("/tmp/qs"));
        assert_eq!(config.max_results, None);
        assert_eq!(config.watch_debounce_ms, 50);
    }
}
