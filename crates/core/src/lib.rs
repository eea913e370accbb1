pub mod config;
pub mod error;
pub mod logging;

pub mod facade;
pub mod format;
pub mod index;
pub mod ingest;
pub mod query;
pub mod runtime;

pub use config::SearchConfig;
pub use facade::EngineHandle;
pub use runtime::SearchEngine;
pub use error::{QuickSearchError, Result};
pub use index::{IndexBuilder, SearchIndex};
pub use query::QueryEngine;
