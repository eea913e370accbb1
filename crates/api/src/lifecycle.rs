use crate::ApiResult;
use async_trait::async_trait;

pub trait WatchHandle: Send + Sync {
    fn stop(&self);
}

#[async_trait]
pub trait IndexLifecycle: Send + Sync {
    /// Rebuild the index from the data source
    async fn rebuild(&self) -> ApiResult<()>;

    /// Load the index from the snapshot cache
    async fn load(&self) -> ApiResult<bool>;

    /// Save the published index to the snapshot cache
    async fn save(&self) -> ApiResult<()>;

    /// Rebuild only if the data source changed. Returns true if a rebuild happened.
    async fn refresh(&self) -> ApiResult<bool>;

    /// Watch the data source and rebuild on change
    async fn start_watch(&self) -> ApiResult<std::sync::Arc<dyn WatchHandle>>;

    /// Clear the snapshot for the current data source
    async fn clear_index(&self) -> ApiResult<()>;
}
