use crate::ApiResult;
use crate::models::DisplayGroup;
use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IndexStats {
    /// Distinct display names.
    pub name_count: usize,
    pub entry_count: usize,
    /// Nodes in the prefix tree, root included.
    pub node_count: usize,
    /// Records rejected while building.
    pub skipped_records: usize,
}

#[async_trait]
pub trait SearchService: Send + Sync {
    /// Prefix search, grouped by display name.
    async fn search(&self, query: &str) -> ApiResult<Vec<DisplayGroup>>;

    /// Exact, case-sensitive lookup of one display name.
    async fn lookup(&self, display_name: &str) -> ApiResult<Option<DisplayGroup>>;

    async fn get_stats(&self) -> ApiResult<IndexStats>;
}
