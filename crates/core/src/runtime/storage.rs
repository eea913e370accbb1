use super::*;
use serde::{Deserialize, Serialize};

/// Bumped whenever the on-disk layout of [`Snapshot`] changes.
pub const SNAPSHOT_VERSION: u32 = 2;

/// On-disk form of a published index: the records it was built from.
/// Rebuilding from the records is cheap and keeps the file format
/// independent of the in-memory tree layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub source: PathBuf,
    pub fingerprint: u64,
    pub records: Vec<SymbolRecord>,
    /// Records rejected when the index was built; `records` no longer holds them.
    #[serde(default)]
    pub skipped_records: usize,
}

impl Snapshot {
    pub fn encode(&self) -> Result<Vec<u8>> {
        // Named fields: record entries skip absent optional fields.
        let bytes = rmp_serde::to_vec_named(self)
            .map_err(|e| QuickSearchError::Storage(format!("MSGPACK error: {}", e)))?;

        zstd::encode_all(&bytes[..], 0)
            .map_err(|e| QuickSearchError::Storage(format!("Zstd compression failed: {}", e)))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let decompressed = zstd::decode_all(bytes)
            .map_err(|e| QuickSearchError::Storage(format!("Zstd decompression failed: {}", e)))?;

        rmp_serde::from_slice(&decompressed)
            .map_err(|e| QuickSearchError::Storage(format!("MSGPACK error: {}", e)))
    }
}

impl SearchEngine {
    /// Clear the snapshot for the current source and unpublish the index
    pub async fn clear_project_index(&self) -> Result<()> {
        let path = self.index_path.clone();
        if path.exists() {
            tokio::fs::remove_file(path).await?;
        }

        let mut lock = self.current.write().await;
        *lock = None;

        Ok(())
    }

    /// Clear all snapshots under `cache_dir`
    pub fn clear_all_indices(cache_dir: &Path) -> Result<()> {
        if cache_dir.exists() {
            std::fs::remove_dir_all(cache_dir)?;
        }
        Ok(())
    }

    // ---- Helper methods ----

    pub(super) fn load_from_disk(path: &Path) -> Result<Option<Snapshot>> {
        if !path.exists() {
            return Ok(None);
        }

        let bytes = std::fs::read(path)?;

        match Snapshot::decode(&bytes) {
            Ok(snapshot) => {
                if snapshot.version != SNAPSHOT_VERSION {
                    tracing::warn!(
                        "Snapshot version mismatch at {} (found {}, expected {}). Will rebuild.",
                        path.display(),
                        snapshot.version,
                        SNAPSHOT_VERSION
                    );
                    let _ = std::fs::remove_file(path);
                    return Ok(None);
                }
                tracing::info!("Loaded snapshot from {}", path.display());
                Ok(Some(snapshot))
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse snapshot at {}: {}. Will rebuild.",
                    path.display(),
                    e
                );
                let _ = std::fs::remove_file(path);
                Ok(None)
            }
        }
    }

    pub(super) fn save_to_disk(snapshot: &Snapshot, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = snapshot.encode()?;

        // Write to a temp file, then rename over the target
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, bytes)?;
        std::fs::rename(temp_path, path)?;

        tracing::info!("Saved snapshot to {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksearch_api::RecordEntry;
    use tempfile::tempdir;

    fn snapshot() -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            source: PathBuf::from("/docs/search"),
            fingerprint: 42,
            skipped_records: 3,
            records: vec![SymbolRecord::new(
                "abs",
                vec![RecordEntry::new("abs(int)", "#a", "(int)").with_file("math.hpp")],
            )],
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("snap.bin");

        SearchEngine::save_to_disk(&snapshot(), &path).unwrap();
        assert!(!path.with_extension("tmp").exists());

        let loaded = SearchEngine::load_from_disk(&path).unwrap().unwrap();
        assert_eq!(loaded.fingerprint, 42);
        assert_eq!(loaded.skipped_records, 3);
        assert_eq!(loaded.records, snapshot().records);
    }

    #[test]
    fn test_version_mismatch_discards_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snap.bin");
        let mut old = snapshot();
        old.version = SNAPSHOT_VERSION + 1;
        SearchEngine::save_to_disk(&old, &path).unwrap();

        assert!(SearchEngine::load_from_disk(&path).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_discarded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snap.bin");
        std::fs::write(&path, b"not zstd").unwrap();

        assert!(SearchEngine::load_from_disk(&path).unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(
            SearchEngine::load_from_disk(&dir.path().join("none.bin"))
                .unwrap()
                .is_none()
        );
    }
}
