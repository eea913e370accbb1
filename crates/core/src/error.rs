use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuickSearchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Malformed record #{position}: {reason}")]
    MalformedRecord { position: usize, reason: String },
    #[error("Index has not been built yet")]
    IndexNotBuilt,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<QuickSearchError> for quicksearch_api::ApiError {
    fn from(err: QuickSearchError) -> Self {
        match err {
            QuickSearchError::IndexNotBuilt => quicksearch_api::ApiError::IndexNotBuilt,
            other => quicksearch_api::ApiError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuickSearchError>;
