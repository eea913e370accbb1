use super::EngineHandle;
use async_trait::async_trait;
use quicksearch_api::{ApiResult, IndexLifecycle, WatchHandle};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

struct TokenWatchHandle {
    token: CancellationToken,
}

impl WatchHandle for TokenWatchHandle {
    fn stop(&self) {
        self.token.cancel();
    }
}

#[async_trait]
impl IndexLifecycle for EngineHandle {
    async fn rebuild(&self) -> ApiResult<()> {
        Ok(self.engine.rebuild().await?)
    }

    async fn load(&self) -> ApiResult<bool> {
        Ok(self.engine.load().await?)
    }

    async fn save(&self) -> ApiResult<()> {
        Ok(self.engine.save().await?)
    }

    async fn refresh(&self) -> ApiResult<bool> {
        Ok(self.engine.refresh().await?)
    }

    async fn start_watch(&self) -> ApiResult<Arc<dyn WatchHandle>> {
        let token = self.engine.child_cancel_token();
        self.engine
            .clone()
            .start_watch_with_token(token.clone())
            .await?;
        Ok(Arc::new(TokenWatchHandle { token }))
    }

    async fn clear_index(&self) -> ApiResult<()> {
        Ok(self.engine.clear_project_index().await?)
    }
}
