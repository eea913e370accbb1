use super::*;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use tokio::sync::mpsc;

struct FsWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
}

impl FsWatcher {
    fn new(root: &Path, mode: RecursiveMode) -> notify::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(root, mode)?;
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    async fn next_event_async(&mut self) -> Option<Event> {
        match self.rx.recv().await {
            Some(Ok(event)) => Some(event),
            _ => None,
        }
    }
}

impl SearchEngine {
    /// Whether a changed path belongs to this engine's data source.
    fn affects_source(&self, path: &Path) -> bool {
        if self.source.is_dir() {
            path.starts_with(&self.source) && crate::ingest::is_relevant_path(path)
        } else {
            path == self.source
        }
    }

    /// Watch the data source and rebuild after changes settle.
    /// The watcher task exits when `cancel_token` is cancelled or the
    /// engine is dropped.
    pub async fn start_watch_with_token(
        self: Arc<Self>,
        cancel_token: tokio_util::sync::CancellationToken,
    ) -> Result<()> {
        use std::time::Duration;

        // Files are watched through their directory: editors and generators
        // often replace a file instead of writing it in place.
        let (root, mode) = if self.source.is_dir() {
            (self.source.clone(), RecursiveMode::Recursive)
        } else {
            let parent = self
                .source
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (parent, RecursiveMode::NonRecursive)
        };

        let mut watcher =
            FsWatcher::new(&root, mode).map_err(|e| QuickSearchError::Internal(e.to_string()))?;

        let debounce_interval = Duration::from_millis(self.config.watch_debounce_ms);
        let engine_weak = Arc::downgrade(&self);
        drop(self);

        tokio::spawn(async move {
            tracing::info!("Started watching {}", root.display());
            let mut pending_events: Vec<notify::Event> = Vec::new();

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        break;
                    }
                    event = watcher.next_event_async() => {
                        match event {
                            Some(e) => pending_events.push(e),
                            None => break,
                        }
                    }
                    _ = tokio::time::sleep(debounce_interval), if !pending_events.is_empty() => {
                        let Some(engine) = engine_weak.upgrade() else {
                            break;
                        };

                        let changed = pending_events
                            .iter()
                            .flat_map(|event| event.paths.iter())
                            .filter(|path| engine.affects_source(path))
                            .count();
                        pending_events.clear();

                        if changed > 0 {
                            tracing::info!("Detected {} changed paths. Refreshing...", changed);
                            match engine.refresh().await {
                                Ok(true) => {
                                    if let Err(err) = engine.save().await {
                                        tracing::error!("Failed to save snapshot: {}", err);
                                    }
                                }
                                Ok(false) => {}
                                Err(err) => tracing::error!("Failed to refresh index: {}", err),
                            }
                        }
                    }
                }
            }
            tracing::info!("File watcher task ended for {}", root.display());
        });

        Ok(())
    }

    /// Watch using the engine-wide cancellation token.
    pub async fn watch(self: Arc<Self>) -> Result<()> {
        let cancel_token = self.cancel_token.clone();
        self.start_watch_with_token(cancel_token).await
    }

    /// Child token of the engine-wide one, cancelled when the engine drops.
    pub fn child_cancel_token(&self) -> tokio_util::sync::CancellationToken {
        self.cancel_token.child_token()
    }
}
