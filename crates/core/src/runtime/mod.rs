//! Search engine runtime with MVCC publication of indices

use crate::config::SearchConfig;
use crate::error::{QuickSearchError, Result};
use crate::index::SearchIndex;
use crate::query::{QueryEngine, SearchOptions};
use quicksearch_api::{DisplayGroup, Entry, IndexStats, SubEntry, SymbolRecord};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use xxhash_rust::xxh3::xxh3_64;

mod lifecycle;
mod storage;
mod watch;

pub use storage::{SNAPSHOT_VERSION, Snapshot};

/// A published index together with the fingerprint of the data it was
/// built from.
#[derive(Debug)]
pub struct IndexVersion {
    pub index: SearchIndex,
    /// Content fingerprint of the data source, `0` for in-memory records.
    pub fingerprint: u64,
}

impl IndexVersion {
    pub fn new(index: SearchIndex, fingerprint: u64) -> Self {
        Self { index, fingerprint }
    }
}

/// QuickSearch engine
///
/// Holds the active index version:
/// - Readers take a cheap snapshot (Arc clone) and query it without locks
/// - Rebuilds construct a new version off-lock and atomically swap it in
/// - Readers holding an older snapshot keep using it until they drop it
pub struct SearchEngine {
    /// Active version, `None` until the first successful build or load
    current: Arc<RwLock<Option<Arc<IndexVersion>>>>,

    /// File or directory the records are read from
    source: PathBuf,

    /// Snapshot cache file for this source
    index_path: PathBuf,

    config: SearchConfig,

    /// Held by every path that builds and publishes a version, so versions
    /// are published in the order their source was read.
    rebuild_lock: tokio::sync::Mutex<()>,

    /// Cancellation token for background tasks (like watcher)
    cancel_token: tokio_util::sync::CancellationToken,
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

impl SearchEngine {
    pub fn new(source: PathBuf, config: SearchConfig) -> Self {
        let source = source.canonicalize().unwrap_or(source);
        let index_path = Self::compute_index_path(&config.cache_dir, &source);

        Self {
            current: Arc::new(RwLock::new(None)),
            source,
            index_path,
            config,
            rebuild_lock: tokio::sync::Mutex::new(()),
            cancel_token: tokio_util::sync::CancellationToken::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Snapshot file for a source: `<cache_dir>/<xxh3 of source path>.bin`
    fn compute_index_path(cache_dir: &Path, source: &Path) -> PathBuf {
        let hash = xxh3_64(source.to_string_lossy().as_bytes());
        cache_dir.join(format!("{:016x}.bin", hash))
    }

    /// Get the active index version (cheap operation)
    pub async fn snapshot(&self) -> Result<Arc<IndexVersion>> {
        let lock = self.current.read().await;
        lock.clone().ok_or(QuickSearchError::IndexNotBuilt)
    }

    pub async fn is_built(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Swap in a new version. Readers see either the old or the new one.
    pub(crate) async fn publish(&self, version: IndexVersion) {
        let stats = version.index.stats();
        let mut lock = self.current.write().await;
        *lock = Some(Arc::new(version));
        tracing::info!(
            "Published index for {}: {} names, {} entries ({} records skipped)",
            self.source.display(),
            stats.name_count,
            stats.entry_count,
            stats.skipped_records
        );
    }

    /// Build from in-memory records and publish.
    pub async fn publish_records(&self, records: Vec<SymbolRecord>) -> Result<()> {
        let _guard = self.rebuild_lock.lock().await;
        let index = tokio::task::spawn_blocking(move || SearchIndex::from_records(&records))
            .await
            .map_err(|e| QuickSearchError::Internal(e.to_string()))?;
        self.publish(IndexVersion::new(index, 0)).await;
        Ok(())
    }

    fn options(&self) -> SearchOptions {
        SearchOptions::from(&self.config)
    }

    /// Prefix search returning flat, ranked entries.
    pub async fn search(&self, query: &str) -> Result<Vec<Entry>> {
        let version = self.snapshot().await?;
        Ok(QueryEngine::new(&version.index)
            .with_options(self.options())
            .search(query))
    }

    /// Prefix search grouped by display name.
    pub async fn search_grouped(&self, query: &str) -> Result<Vec<DisplayGroup>> {
        let version = self.snapshot().await?;
        let start = std::time::Instant::now();
        let groups = QueryEngine::new(&version.index)
            .with_options(self.options())
            .search_grouped(query);
        tracing::debug!(
            "Query {:?} matched {} groups in {:?}",
            query,
            groups.len(),
            start.elapsed()
        );
        Ok(groups)
    }

    /// Exact lookup of one display name.
    pub async fn lookup(&self, display_name: &str) -> Result<Option<DisplayGroup>> {
        let version = self.snapshot().await?;
        Ok(version.index.entries_for(display_name).map(|entries| {
            let mut group = DisplayGroup::new(entries[0].display_name.clone());
            group.items = entries.into_iter().map(SubEntry::from).collect();
            group
        }))
    }

    pub async fn stats(&self) -> Result<IndexStats> {
        Ok(self.snapshot().await?.index.stats())
    }
}
