use super::EngineHandle;
use crate::query::{QueryEngine, SearchOptions};
use async_trait::async_trait;
use quicksearch_api::{ApiError, ApiResult, DisplayGroup, IndexStats, SearchService};

#[async_trait]
impl SearchService for EngineHandle {
    async fn search(&self, query: &str) -> ApiResult<Vec<DisplayGroup>> {
        let version = self.engine.snapshot().await?;
        let options = SearchOptions::from(self.engine.config());
        let query = query.to_string(); // Owned for 'static lifetime in spawn_blocking

        tokio::task::spawn_blocking(move || {
            QueryEngine::new(&version.index)
                .with_options(options)
                .search_grouped(&query)
        })
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
    }

    async fn lookup(&self, display_name: &str) -> ApiResult<Option<DisplayGroup>> {
        Ok(self.engine.lookup(display_name).await?)
    }

    async fn get_stats(&self) -> ApiResult<IndexStats> {
        Ok(self.engine.stats().await?)
    }
}
