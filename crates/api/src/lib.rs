pub mod error;
pub mod lifecycle;
pub mod models;
pub mod search;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use lifecycle::{IndexLifecycle, WatchHandle};
pub use models::*;
pub use search::{IndexStats, SearchService};

/// Composite trait representing the full QuickSearch engine API.
/// Clients depend on this single trait instead of the individual services.
pub trait QuickSearchEngine: SearchService + IndexLifecycle {}
