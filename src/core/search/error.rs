//! Search Error Types
//!
//! Error handling for the universal search engine. Repository failures
//! abort the whole call; only the active-count enrichment is allowed to
//! degrade (handled in the orchestrator, not here).

use thiserror::Error;

/// Search operation errors
#[derive(Error, Debug)]
pub enum SearchError {
    /// Any failure fetching candidates or counts from the storage layer.
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for SearchError {
    fn from(e: sqlx::Error) -> Self {
        SearchError::Repository(e.to_string())
    }
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
