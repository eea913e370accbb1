use std::path::PathBuf;
use std::sync::Arc;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::runtime::{IndexVersion, SearchEngine as InternalEngine};
use quicksearch_api::QuickSearchEngine;

mod lifecycle;
mod search;

/// Engine handle - unified interface for all clients
///
/// Cloning is cheap; every clone talks to the same engine and sees the
/// same published index.
#[derive(Clone)]
pub struct EngineHandle {
    pub(crate) engine: Arc<InternalEngine>,
}

impl EngineHandle {
    /// Create a new engine handle for a data source
    pub fn new(source: PathBuf, config: SearchConfig) -> Self {
        Self {
            engine: Arc::new(InternalEngine::new(source, config)),
        }
    }

    /// Create a handle from an existing engine (useful for testing)
    pub fn from_engine(engine: Arc<InternalEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<InternalEngine> {
        &self.engine
    }

    /// Get the active index version
    pub async fn index(&self) -> Result<Arc<IndexVersion>> {
        self.engine.snapshot().await
    }
}

impl QuickSearchEngine for EngineHandle {}
