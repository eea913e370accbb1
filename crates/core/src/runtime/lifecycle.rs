use super::*;
use crate::index::IndexBuilder;
use crate::ingest;

impl SearchEngine {
    /// Rebuild the index from the data source.
    ///
    /// The new index is built off-lock and published only on success; a
    /// failed rebuild leaves the previous version in place.
    ///
    /// Overlapping rebuilds run one at a time, each reading the source only
    /// once it holds the lock, so the last version published is the newest.
    pub async fn rebuild(&self) -> Result<()> {
        let _guard = self.rebuild_lock.lock().await;
        self.rebuild_locked().await
    }

    async fn rebuild_locked(&self) -> Result<()> {
        let source = self.source.clone();

        let version = tokio::task::spawn_blocking(move || -> Result<IndexVersion> {
            let loaded = ingest::load(&source)?;
            let index = SearchIndex::from_records(&loaded.records);
            Ok(IndexVersion::new(index, loaded.fingerprint))
        })
        .await
        .map_err(|e| QuickSearchError::Internal(e.to_string()))??;

        self.publish(version).await;
        Ok(())
    }

    /// Load the snapshot for this source, if one exists
    pub async fn load(&self) -> Result<bool> {
        let _guard = self.rebuild_lock.lock().await;
        let path = self.index_path.clone();

        let version = tokio::task::spawn_blocking(move || -> Result<Option<IndexVersion>> {
            Ok(Self::load_from_disk(&path)?.map(|snapshot| {
                let mut builder = IndexBuilder::new().with_skipped(snapshot.skipped_records);
                builder.add_records(&snapshot.records);
                IndexVersion::new(builder.build(), snapshot.fingerprint)
            }))
        })
        .await
        .map_err(|e| QuickSearchError::Internal(e.to_string()))??;

        match version {
            Some(version) => {
                self.publish(version).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Save the published index as a snapshot
    pub async fn save(&self) -> Result<()> {
        let version = self.snapshot().await?;
        let path = self.index_path.clone();
        let source = self.source.clone();

        tokio::task::spawn_blocking(move || {
            let snapshot = Snapshot {
                version: SNAPSHOT_VERSION,
                source,
                fingerprint: version.fingerprint,
                records: version.index.to_records(),
                skipped_records: version.index.skipped_records(),
            };
            Self::save_to_disk(&snapshot, &path)
        })
        .await
        .map_err(|e| QuickSearchError::Internal(e.to_string()))?
    }

    /// Rebuild if the data source changed since the published version was
    /// built. Returns whether a rebuild happened.
    pub async fn refresh(&self) -> Result<bool> {
        let _guard = self.rebuild_lock.lock().await;
        let source = self.source.clone();
        let fingerprint = tokio::task::spawn_blocking(move || ingest::fingerprint(&source))
            .await
            .map_err(|e| QuickSearchError::Internal(e.to_string()))??;

        if let Ok(current) = self.snapshot().await {
            if current.fingerprint == fingerprint {
                tracing::debug!("Source {} unchanged", self.source.display());
                return Ok(false);
            }
        }

        self.rebuild_locked().await?;
        Ok(true)
    }

    /// Load the snapshot if present, then bring it up to date with the
    /// source. Used by every client on startup.
    pub async fn open(&self) -> Result<()> {
        match self.load().await {
            Ok(true) => {}
            Ok(false) => tracing::info!("No usable snapshot for {}", self.source.display()),
            Err(e) => tracing::warn!("Failed to load snapshot: {}", e),
        }

        if self.refresh().await? {
            self.save().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const FUNCTIONS: &str = "var searchData=[\
        ['abs',['abs',['#a',1,'abs(int x)'],['#b',1,'abs(long x)']]],\
        ['adapt',['adapt',['#c',1,'bitpit::ParaTree']]]\
    ];";

    fn setup() -> (tempfile::TempDir, SearchEngine) {
        let dir = tempdir().unwrap();
        let source = dir.path().join("search");
        fs::create_dir(&source).unwrap();
        fs::write(source.join("functions_0.js"), FUNCTIONS).unwrap();

        let config = SearchConfig::default().with_cache_dir(dir.path().join("cache"));
        let engine = SearchEngine::new(source, config);
        (dir, engine)
    }

    #[tokio::test]
    async fn test_rebuild_save_load() {
        let (_dir, engine) = setup();
        engine.rebuild().await.unwrap();
        engine.save().await.unwrap();
        assert!(engine.index_path().exists());

        let reopened = SearchEngine::new(engine.source().to_path_buf(), engine.config().clone());
        assert!(reopened.load().await.unwrap());
        assert_eq!(
            reopened.search("a").await.unwrap(),
            engine.search("a").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_previous_version() {
        let (dir, engine) = setup();
        engine.rebuild().await.unwrap();

        fs::remove_dir_all(dir.path().join("search")).unwrap();
        assert!(engine.rebuild().await.is_err());
        assert_eq!(engine.search("abs").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_only_on_change() {
        let (dir, engine) = setup();
        assert!(engine.refresh().await.unwrap());
        assert!(!engine.refresh().await.unwrap());

        fs::write(
            dir.path().join("search").join("functions_1.js"),
            "var searchData=[['zip',['zip',['#z',1,'zip()']]]];",
        )
        .unwrap();
        assert!(engine.refresh().await.unwrap());
        assert_eq!(engine.search("zi").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_skipped_count_survives_snapshot() {
        let (dir, engine) = setup();
        fs::write(
            dir.path().join("search").join("functions_0.js"),
            "var searchData=[['ok',['ok',['#ok',1,'ok()']]],['x',42]];",
        )
        .unwrap();
        engine.rebuild().await.unwrap();
        engine.save().await.unwrap();
        let built = engine.stats().await.unwrap();
        assert_eq!(built.skipped_records, 1);

        let reopened = SearchEngine::new(engine.source().to_path_buf(), engine.config().clone());
        reopened.open().await.unwrap();
        assert!(!reopened.refresh().await.unwrap());
        assert_eq!(reopened.stats().await.unwrap(), built);
    }

    #[tokio::test]
    async fn test_queued_rebuild_reads_latest_source() {
        let (dir, engine) = setup();
        let engine = Arc::new(engine);

        let guard = engine.rebuild_lock.lock().await;
        let pending = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.rebuild().await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        assert!(!engine.is_built().await);

        fs::write(
            dir.path().join("search").join("functions_0.js"),
            "var searchData=[['zip',['zip',['#z',1,'zip()']]]];",
        )
        .unwrap();
        drop(guard);
        pending.await.unwrap().unwrap();

        assert_eq!(engine.search("zi").await.unwrap().len(), 1);
        assert!(engine.search("abs").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_rebuilds_publish_newest() {
        let (dir, engine) = setup();
        let engine = Arc::new(engine);
        engine.rebuild().await.unwrap();

        let first = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.rebuild().await }
        });
        fs::write(
            dir.path().join("search").join("functions_1.js"),
            "var searchData=[['zip',['zip',['#z',1,'zip()']]]];",
        )
        .unwrap();
        engine.rebuild().await.unwrap();
        first.await.unwrap().unwrap();

        assert_eq!(engine.search("zi").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_requires_built_index() {
        let (_dir, engine) = setup();
        assert!(matches!(
            engine.save().await,
            Err(QuickSearchError::IndexNotBuilt)
        ));
    }

    #[tokio::test]
    async fn test_open_uses_snapshot_and_clear() {
        let (_dir, engine) = setup();
        engine.open().await.unwrap();
        assert!(engine.index_path().exists());

        engine.clear_project_index().await.unwrap();
        assert!(!engine.index_path().exists());
        assert!(!engine.is_built().await);
    }
}
