use quicksearch_api::{DisplayGroup, IndexLifecycle, IndexStats, SearchService};
use quicksearch_core::EngineHandle;
use quicksearch_core::format::ResultFormatter;
use quicksearch_core::query::QueryEngine;

/// Engine access for the synchronous REPL loop.
///
/// The line editor runs on the main thread, outside the runtime, so every
/// call blocks on the runtime handle.
#[derive(Clone)]
pub struct ShellContext {
    pub engine: EngineHandle,
    pub rt_handle: tokio::runtime::Handle,
}

impl ShellContext {
    pub fn new(engine: EngineHandle, rt_handle: tokio::runtime::Handle) -> Self {
        Self { engine, rt_handle }
    }

    pub fn search(&self, prefix: &str) -> Result<Vec<DisplayGroup>, Box<dyn std::error::Error>> {
        Ok(self.rt_handle.block_on(self.engine.search(prefix))?)
    }

    pub fn lookup(&self, name: &str) -> Result<Option<DisplayGroup>, Box<dyn std::error::Error>> {
        Ok(self.rt_handle.block_on(self.engine.lookup(name))?)
    }

    pub fn stats(&self) -> Result<IndexStats, Box<dyn std::error::Error>> {
        Ok(self.rt_handle.block_on(self.engine.get_stats())?)
    }

    /// Rebuild from the data source and save the snapshot.
    pub fn reload(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.rt_handle.block_on(async {
            self.engine.rebuild().await?;
            self.engine.save().await
        })?;
        Ok(())
    }

    /// Display names starting with `prefix`, for completion.
    pub fn complete_names(&self, prefix: &str, limit: usize) -> Vec<String> {
        let Ok(version) = self.rt_handle.block_on(self.engine.index()) else {
            return Vec::new();
        };
        let entries = QueryEngine::new(&version.index).search(prefix);
        ResultFormatter::format_limited(&entries, Some(limit))
            .into_iter()
            .map(|group| group.display_name.to_string())
            .collect()
    }
}
